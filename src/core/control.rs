// Copyright 2024-2026 gradmin developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use crate::core::GradminFloat;
#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

/// Configuration shared by drivers and line searches.
///
/// Constructed by the caller and handed to strategies and to
/// [`optimize`](`crate::core::optimize`) by value; all fields have sensible
/// defaults and builder-style setters.
///
/// # Example
///
/// ```
/// use gradmin::core::OptimizeControl;
///
/// let control: OptimizeControl<f64> = OptimizeControl::new()
///     .max_iterations(500)
///     .gtol(1e-8)
///     .verbose(true);
/// # assert_eq!(control.max_iterations, 500);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub struct OptimizeControl<F> {
    /// Hard cap on outer iterations
    pub max_iterations: u64,
    /// Default convergence threshold
    pub tol: F,
    /// Threshold on the infinity norm of the gradient (outer convergence)
    pub gtol: F,
    /// Threshold on the bracket width inside refinement
    pub xtol: F,
    /// Threshold on the change of the line function inside refinement
    pub ftol: F,
    /// Cap on the norm of a single outer step
    pub maxmove: F,
    /// Log per-iteration progress
    pub verbose: bool,
}

impl<F: GradminFloat> Default for OptimizeControl<F> {
    fn default() -> Self {
        OptimizeControl {
            max_iterations: 1000,
            tol: float!(1e-6),
            gtol: float!(1e-6),
            xtol: float!(1e-6),
            ftol: float!(1e-6),
            maxmove: F::infinity(),
            verbose: false,
        }
    }
}

impl<F: GradminFloat> OptimizeControl<F> {
    /// Constructor with default values
    pub fn new() -> Self {
        OptimizeControl::default()
    }

    /// Set the maximum number of outer iterations
    #[must_use]
    pub fn max_iterations(mut self, max_iterations: u64) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Set the default convergence threshold
    #[must_use]
    pub fn tol(mut self, tol: F) -> Self {
        self.tol = tol;
        self
    }

    /// Set the threshold on the infinity norm of the gradient
    #[must_use]
    pub fn gtol(mut self, gtol: F) -> Self {
        self.gtol = gtol;
        self
    }

    /// Set the threshold on the bracket width inside refinement
    #[must_use]
    pub fn xtol(mut self, xtol: F) -> Self {
        self.xtol = xtol;
        self
    }

    /// Set the threshold on the change of the line function inside refinement
    #[must_use]
    pub fn ftol(mut self, ftol: F) -> Self {
        self.ftol = ftol;
        self
    }

    /// Set the cap on the norm of a single outer step
    #[must_use]
    pub fn maxmove(mut self, maxmove: F) -> Self {
        self.maxmove = maxmove;
        self
    }

    /// Turn per-iteration progress logging on or off
    #[must_use]
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    send_sync_test!(optimize_control, OptimizeControl<f64>);

    #[test]
    fn test_defaults() {
        let c: OptimizeControl<f64> = OptimizeControl::new();
        assert_eq!(c.max_iterations, 1000);
        assert!((c.tol - 1e-6).abs() < f64::EPSILON);
        assert!((c.gtol - 1e-6).abs() < f64::EPSILON);
        assert!(c.maxmove.is_infinite());
        assert!(!c.verbose);
    }
}
