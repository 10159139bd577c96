// Copyright 2024-2026 gradmin developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! # Restart strategies
//!
//! Restarting sets β to zero, resetting the nonlinear conjugate gradient to
//! a steepest descent step when conjugacy has deteriorated.
//!
//! # References:
//!
//! \[0\] Jorge Nocedal and Stephen J. Wright (2006). Numerical Optimization.
//! Springer. ISBN 0-387-30303-0. (Equation 5.52)

use crate::core::math::GradminDot;
use crate::core::{GradminFloat, SerializeAlias};
#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

/// Common interface for restart tests.
pub trait RestartStrategy<P, F>: SerializeAlias {
    /// Returns `true` if the driver should discard the previous direction.
    fn restart(&self, g: &P, g_prev: &P, d_prev: &P) -> bool;
}

/// Never restart.
#[derive(Default, Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub struct NeverRestart {}

impl NeverRestart {
    /// Constructor
    pub fn new() -> Self {
        NeverRestart {}
    }
}

impl<P, F> RestartStrategy<P, F> for NeverRestart {
    fn restart(&self, _g: &P, _g_prev: &P, _d_prev: &P) -> bool {
        false
    }
}

/// Orthogonality-based restart: fires when consecutive gradients have lost
/// orthogonality, `|g.g_prev| / g_prev.g_prev >= nu`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub struct NJWSRestart<F> {
    nu: F,
}

impl<F: GradminFloat> Default for NJWSRestart<F> {
    fn default() -> Self {
        NJWSRestart { nu: float!(0.1) }
    }
}

impl<F: GradminFloat> NJWSRestart<F> {
    /// Constructor with the orthogonality threshold `nu` (typically 0.1).
    pub fn new(nu: F) -> Self {
        NJWSRestart { nu }
    }
}

impl<P, F> RestartStrategy<P, F> for NJWSRestart<F>
where
    P: GradminDot<P, F>,
    F: GradminFloat,
{
    fn restart(&self, g: &P, g_prev: &P, _d_prev: &P) -> bool {
        g.dot(g_prev).abs() / g_prev.dot(g_prev) >= self.nu
    }
}
