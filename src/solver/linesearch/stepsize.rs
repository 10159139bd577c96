// Copyright 2024-2026 gradmin developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! # Step length sub-strategies
//!
//! Given a bracket `(low, hi, init)` these produce the next trial step
//! length. Interpolating variants validate the analytic result against the
//! bracket and against NaN/Inf; any violation falls back to the bisection
//! midpoint. [`GeometricReduction`] is the one unbracketed exception.
//!
//! # References:
//!
//! \[0\] Jorge Nocedal and Stephen J. Wright (2006). Numerical Optimization.
//! Springer. ISBN 0-387-30303-0.

use crate::core::math::{GradminDot, GradminScaledAdd};
use crate::core::{Error, GradminFloat, Objective, Problem, SearchState};
use crate::solver::linesearch::{line_cost, line_slope, AlphaState, StepSizeStrategy};
use log::warn;
#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

/// Clamp an analytic trial step to the bracket: any value outside
/// `[low, hi]` or non-finite falls back to the bisection midpoint.
fn bracket_or_midpoint<F: GradminFloat>(candidate: F, alpha: &AlphaState<F>, name: &str) -> F {
    if candidate.is_finite() && candidate >= alpha.low && candidate <= alpha.hi {
        candidate
    } else {
        warn!(
            "{}: trial step {} left the bracket [{}, {}], falling back to bisection",
            name, candidate, alpha.low, alpha.hi
        );
        alpha.midpoint()
    }
}

/// # Bisection step
///
/// The midpoint of the bracket.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub struct BisectionStep {}

impl BisectionStep {
    /// Constructor
    pub fn new() -> Self {
        BisectionStep {}
    }
}

impl<O, P, F> StepSizeStrategy<O, P, F> for BisectionStep
where
    F: GradminFloat,
{
    fn next_step(
        &self,
        alpha: &AlphaState<F>,
        _problem: &mut Problem<O>,
        _state: &SearchState<P>,
    ) -> Result<F, Error> {
        Ok(alpha.midpoint())
    }
}

/// # Geometric reduction
///
/// `beta * init` with `beta` in `(0, 1)`. Unbracketed: the only sub-strategy
/// which may leave `[low, hi]`, which is what makes it usable for plain
/// backtracking.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub struct GeometricReduction<F> {
    beta: F,
}

impl<F: GradminFloat> Default for GeometricReduction<F> {
    fn default() -> Self {
        GeometricReduction {
            beta: float!(0.5),
        }
    }
}

impl<F: GradminFloat> GeometricReduction<F> {
    /// Constructor, `beta` must be in `(0, 1)`.
    pub fn new(beta: F) -> Result<Self, Error> {
        if beta <= float!(0.0) || beta >= float!(1.0) {
            return Err(gradmin_error!(
                InvalidParameter,
                "GeometricReduction: Contraction factor beta must be in (0, 1)"
            ));
        }
        Ok(GeometricReduction { beta })
    }
}

impl<O, P, F> StepSizeStrategy<O, P, F> for GeometricReduction<F>
where
    F: GradminFloat,
{
    fn next_step(
        &self,
        alpha: &AlphaState<F>,
        _problem: &mut Problem<O>,
        _state: &SearchState<P>,
    ) -> Result<F, Error> {
        Ok(self.beta * alpha.init)
    }
}

/// # Golden section step
///
/// Shrinks the bracket by the golden ratio, picking the interior point on
/// the side of `init`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub struct GoldenSection {}

impl GoldenSection {
    /// Constructor
    pub fn new() -> Self {
        GoldenSection {}
    }
}

impl<O, P, F> StepSizeStrategy<O, P, F> for GoldenSection
where
    F: GradminFloat,
{
    fn next_step(
        &self,
        alpha: &AlphaState<F>,
        _problem: &mut Problem<O>,
        _state: &SearchState<P>,
    ) -> Result<F, Error> {
        let golden = (float!(1.0) + float!(5.0).sqrt()) / float!(2.0);
        let step = (alpha.hi - alpha.low) / golden;
        if (alpha.init - alpha.low).abs() < (alpha.init - alpha.hi).abs() {
            Ok(alpha.low + step)
        } else {
            Ok(alpha.hi - step)
        }
    }
}

/// # Quadratic interpolation
///
/// Fits a parabola through `(low, phi(low))`, `(init, phi(init))` and
/// `(hi, phi(hi))` and returns its vertex. Falls back to bisection when the
/// denominator degenerates or the vertex leaves the bracket.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub struct QuadraticInterpolation {}

impl QuadraticInterpolation {
    /// Constructor
    pub fn new() -> Self {
        QuadraticInterpolation {}
    }
}

impl<O, P, F> StepSizeStrategy<O, P, F> for QuadraticInterpolation
where
    O: Objective<Param = P, Float = F>,
    P: Clone + GradminScaledAdd<P, F, P>,
    F: GradminFloat,
{
    fn next_step(
        &self,
        alpha: &AlphaState<F>,
        problem: &mut Problem<O>,
        state: &SearchState<P>,
    ) -> Result<F, Error> {
        let phi_low = line_cost(problem, state, alpha.low)?;
        let phi_hi = line_cost(problem, state, alpha.hi)?;
        let phi_init = line_cost(problem, state, alpha.init)?;

        let denominator = (phi_hi - phi_init) * alpha.low
            + (phi_init - phi_low) * alpha.hi
            + (phi_low - phi_hi) * alpha.init;

        if denominator.abs() < float!(1e-10) {
            warn!("QuadraticInterpolation: degenerate denominator, falling back to bisection");
            return Ok(alpha.midpoint());
        }

        let numerator = alpha.low * alpha.low * (phi_hi - phi_init)
            + alpha.hi * alpha.hi * (phi_init - phi_low)
            + alpha.init * alpha.init * (phi_low - phi_hi);

        let vertex = numerator / (float!(2.0) * denominator);

        Ok(bracket_or_midpoint(vertex, alpha, "QuadraticInterpolation"))
    }
}

/// # Cubic interpolation
///
/// Uses values and line derivatives at both bracket ends (Nocedal-Wright
/// eq. 3.59). Requires a gradient.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub struct CubicInterpolation {}

impl CubicInterpolation {
    /// Constructor
    pub fn new() -> Self {
        CubicInterpolation {}
    }
}

impl<O, P, F> StepSizeStrategy<O, P, F> for CubicInterpolation
where
    O: Objective<Param = P, Float = F>,
    P: Clone + GradminScaledAdd<P, F, P> + GradminDot<P, F>,
    F: GradminFloat,
{
    fn next_step(
        &self,
        alpha: &AlphaState<F>,
        problem: &mut Problem<O>,
        state: &SearchState<P>,
    ) -> Result<F, Error> {
        let phi_low = line_cost(problem, state, alpha.low)?;
        let phi_hi = line_cost(problem, state, alpha.hi)?;
        let dphi_low = line_slope(problem, state, alpha.low)?;
        let dphi_hi = line_slope(problem, state, alpha.hi)?;

        let z = float!(3.0) * (phi_low - phi_hi) / (alpha.hi - alpha.low) + dphi_low + dphi_hi;
        let w = (z * z - dphi_low * dphi_hi).max(float!(0.0)).sqrt();
        let m = (dphi_hi + w - z) / (dphi_hi - dphi_low + float!(2.0) * w);
        let step = alpha.hi - m * (alpha.hi - alpha.low);

        Ok(bracket_or_midpoint(step, alpha, "CubicInterpolation"))
    }
}

/// # Cubic Hermite interpolation
///
/// Fits the two-point Hermite cubic and solves its derivative quadratic.
/// Returns a root inside the bracket at which the second derivative is
/// positive; otherwise the midpoint. Requires a gradient.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub struct CubicHermite {}

impl CubicHermite {
    /// Constructor
    pub fn new() -> Self {
        CubicHermite {}
    }
}

impl<O, P, F> StepSizeStrategy<O, P, F> for CubicHermite
where
    O: Objective<Param = P, Float = F>,
    P: Clone + GradminScaledAdd<P, F, P> + GradminDot<P, F>,
    F: GradminFloat,
{
    fn next_step(
        &self,
        alpha: &AlphaState<F>,
        problem: &mut Problem<O>,
        state: &SearchState<P>,
    ) -> Result<F, Error> {
        let h = alpha.hi - alpha.low;
        let f0 = line_cost(problem, state, alpha.low)?;
        let f1 = line_cost(problem, state, alpha.hi)?;
        // derivatives with respect to the normalized coordinate t in [0, 1]
        let d0 = line_slope(problem, state, alpha.low)? * h;
        let d1 = line_slope(problem, state, alpha.hi)? * h;

        // p(t) = a t^3 + b t^2 + c t + f0, p'(t) = 3 a t^2 + 2 b t + c
        let a = float!(2.0) * (f0 - f1) + d0 + d1;
        let b = float!(3.0) * (f1 - f0) - float!(2.0) * d0 - d1;
        let c = d0;

        let discriminant = b * b - float!(3.0) * a * c;
        if discriminant < float!(0.0) || a.abs() < F::epsilon() {
            return Ok(alpha.midpoint());
        }

        let root1 = (-b + discriminant.sqrt()) / (float!(3.0) * a);
        let root2 = (-b - discriminant.sqrt()) / (float!(3.0) * a);

        for t in [root1, root2] {
            let second = float!(6.0) * a * t + float!(2.0) * b;
            if t >= float!(0.0) && t <= float!(1.0) && second > float!(0.0) {
                return Ok(bracket_or_midpoint(alpha.low + t * h, alpha, "CubicHermite"));
            }
        }
        Ok(alpha.midpoint())
    }
}

/// # Secant step
///
/// Classic secant iteration on the line derivative. Requires a gradient.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub struct Secant {}

impl Secant {
    /// Constructor
    pub fn new() -> Self {
        Secant {}
    }
}

impl<O, P, F> StepSizeStrategy<O, P, F> for Secant
where
    O: Objective<Param = P, Float = F>,
    P: Clone + GradminScaledAdd<P, F, P> + GradminDot<P, F>,
    F: GradminFloat,
{
    fn next_step(
        &self,
        alpha: &AlphaState<F>,
        problem: &mut Problem<O>,
        state: &SearchState<P>,
    ) -> Result<F, Error> {
        let dphi_low = line_slope(problem, state, alpha.low)?;
        let dphi_hi = line_slope(problem, state, alpha.hi)?;
        let step = alpha.hi - dphi_hi * (alpha.hi - alpha.low) / (dphi_hi - dphi_low);
        Ok(bracket_or_midpoint(step, alpha, "Secant"))
    }
}
