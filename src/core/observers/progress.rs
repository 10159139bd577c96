// Copyright 2024-2026 gradmin developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! # Fixed-width progress table
//!
//! Prints a header once, then one line per iteration with the driver tag,
//! the iteration index, the local wall-clock time, the current cost and the
//! infinity norm of the current gradient.

use crate::core::math::GradminInfNorm;
use crate::core::observers::Observe;
use crate::core::{Error, GradminFloat, IterState, State, KV};
use chrono::Local;

/// Prints per-iteration progress to stdout in a fixed-width table.
///
/// Attached automatically by [`optimize`](`crate::core::optimize`) when
/// `OptimizeControl::verbose` is set.
#[derive(Clone, Debug, Default)]
pub struct ProgressLogger {
    /// Driver tag printed at the start of each line
    tag: String,
}

impl ProgressLogger {
    /// Constructor
    pub fn new() -> Self {
        ProgressLogger { tag: String::new() }
    }
}

impl<P, H, F> Observe<IterState<P, H, F>> for ProgressLogger
where
    P: Clone + GradminInfNorm<F>,
    H: Clone,
    F: GradminFloat,
{
    fn observe_init(&mut self, name: &str, _kv: &KV) -> Result<(), Error> {
        self.tag = name.to_string();
        println!("       Step     Time       Energy       fmax");
        Ok(())
    }

    fn observe_iter(&mut self, state: &IterState<P, H, F>, _kv: &KV) -> Result<(), Error> {
        let fmax = state
            .get_grad()
            .map(|g| g.inf_norm())
            .unwrap_or_else(F::nan);
        println!(
            "{}: {:3}   {:<8} {:16.9} {:10.6}",
            self.tag,
            state.get_iter(),
            Local::now().format("%H:%M:%S").to_string(),
            state.get_cost(),
            fmax
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    send_sync_test!(progress_logger, ProgressLogger);
}
