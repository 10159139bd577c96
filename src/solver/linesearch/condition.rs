// Copyright 2024-2026 gradmin developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! # Line search conditions
//!
//! For a step length to be accepted in a line search, it needs to satisfy
//! one of several conditions: sufficient decrease (Armijo), curvature,
//! their (strong) Wolfe combinations, or the Goldstein bounds.
//!
//! # References:
//!
//! \[0\] Jorge Nocedal and Stephen J. Wright (2006). Numerical Optimization.
//! Springer. ISBN 0-387-30303-0.

use crate::core::math::GradminDot;
use crate::core::{Error, GradminFloat};
#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

/// Needs to be implemented by everything that wants to be a line search
/// condition.
pub trait LineSearchCondition<P, F> {
    /// Evaluate the condition
    ///
    /// Has access to the cost function value and (optionally) the gradient
    /// at the trial point, the cost function value and the gradient at the
    /// initial point, the search direction and the step length.
    fn evaluate_condition(
        &self,
        current_cost: F,
        current_gradient: Option<&P>,
        initial_cost: F,
        initial_gradient: &P,
        search_direction: &P,
        step_length: F,
    ) -> bool;

    /// Indicates whether this condition requires the computation of the
    /// gradient at the trial point
    fn requires_current_gradient(&self) -> bool;
}

/// # Armijo (sufficient decrease) condition
///
/// `phi(alpha) <= phi(0) + c * alpha * phi'(0)`
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub struct ArmijoCondition<F> {
    c: F,
}

impl<F: GradminFloat> ArmijoCondition<F> {
    /// Constructor, `c` must be in `(0, 1)`.
    pub fn new(c: F) -> Result<Self, Error> {
        if c <= float!(0.0) || c >= float!(1.0) {
            return Err(gradmin_error!(
                InvalidParameter,
                "ArmijoCondition: Parameter c must be in (0, 1)"
            ));
        }
        Ok(ArmijoCondition { c })
    }

    /// Returns the sufficient decrease parameter
    pub fn c(&self) -> F {
        self.c
    }
}

impl<P, F> LineSearchCondition<P, F> for ArmijoCondition<F>
where
    P: GradminDot<P, F>,
    F: GradminFloat,
{
    fn evaluate_condition(
        &self,
        current_cost: F,
        _current_gradient: Option<&P>,
        initial_cost: F,
        initial_gradient: &P,
        search_direction: &P,
        step_length: F,
    ) -> bool {
        current_cost
            <= initial_cost + self.c * step_length * initial_gradient.dot(search_direction)
    }

    fn requires_current_gradient(&self) -> bool {
        false
    }
}

/// # Curvature condition
///
/// `phi'(alpha) >= c * phi'(0)`
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub struct CurvatureCondition<F> {
    c: F,
}

impl<F: GradminFloat> CurvatureCondition<F> {
    /// Constructor, `c` must be in `(0, 1)`.
    pub fn new(c: F) -> Result<Self, Error> {
        if c <= float!(0.0) || c >= float!(1.0) {
            return Err(gradmin_error!(
                InvalidParameter,
                "CurvatureCondition: Parameter c must be in (0, 1)"
            ));
        }
        Ok(CurvatureCondition { c })
    }
}

impl<P, F> LineSearchCondition<P, F> for CurvatureCondition<F>
where
    P: GradminDot<P, F>,
    F: GradminFloat,
{
    fn evaluate_condition(
        &self,
        _current_cost: F,
        current_gradient: Option<&P>,
        _initial_cost: F,
        initial_gradient: &P,
        search_direction: &P,
        _step_length: F,
    ) -> bool {
        current_gradient
            .expect("Gradient not supplied to `evaluate_condition` of `CurvatureCondition`")
            .dot(search_direction)
            >= self.c * initial_gradient.dot(search_direction)
    }

    fn requires_current_gradient(&self) -> bool {
        true
    }
}

/// # Strong curvature condition
///
/// `|phi'(alpha)| <= c * |phi'(0)|`
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub struct StrongCurvatureCondition<F> {
    c: F,
}

impl<F: GradminFloat> StrongCurvatureCondition<F> {
    /// Constructor, `c` must be in `(0, 1)`.
    pub fn new(c: F) -> Result<Self, Error> {
        if c <= float!(0.0) || c >= float!(1.0) {
            return Err(gradmin_error!(
                InvalidParameter,
                "StrongCurvatureCondition: Parameter c must be in (0, 1)"
            ));
        }
        Ok(StrongCurvatureCondition { c })
    }
}

impl<P, F> LineSearchCondition<P, F> for StrongCurvatureCondition<F>
where
    P: GradminDot<P, F>,
    F: GradminFloat,
{
    fn evaluate_condition(
        &self,
        _current_cost: F,
        current_gradient: Option<&P>,
        _initial_cost: F,
        initial_gradient: &P,
        search_direction: &P,
        _step_length: F,
    ) -> bool {
        current_gradient
            .expect("Gradient not supplied to `evaluate_condition` of `StrongCurvatureCondition`")
            .dot(search_direction)
            .abs()
            <= self.c * initial_gradient.dot(search_direction).abs()
    }

    fn requires_current_gradient(&self) -> bool {
        true
    }
}

/// # (Weak) Wolfe conditions
///
/// Armijo and the curvature condition combined.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub struct WolfeCondition<F> {
    armijo: ArmijoCondition<F>,
    curvature: CurvatureCondition<F>,
}

impl<F: GradminFloat> WolfeCondition<F> {
    /// Constructor, requires `0 < c1 < c2 < 1`.
    pub fn new(c1: F, c2: F) -> Result<Self, Error> {
        let armijo = ArmijoCondition::new(c1)?;
        if c2 <= c1 || c2 >= float!(1.0) {
            return Err(gradmin_error!(
                InvalidParameter,
                "WolfeCondition: Parameter c2 must be in (c1, 1)"
            ));
        }
        Ok(WolfeCondition {
            armijo,
            curvature: CurvatureCondition::new(c2)?,
        })
    }
}

impl<P, F> LineSearchCondition<P, F> for WolfeCondition<F>
where
    P: GradminDot<P, F>,
    F: GradminFloat,
{
    fn evaluate_condition(
        &self,
        current_cost: F,
        current_gradient: Option<&P>,
        initial_cost: F,
        initial_gradient: &P,
        search_direction: &P,
        step_length: F,
    ) -> bool {
        self.armijo.evaluate_condition(
            current_cost,
            current_gradient,
            initial_cost,
            initial_gradient,
            search_direction,
            step_length,
        ) && self.curvature.evaluate_condition(
            current_cost,
            current_gradient,
            initial_cost,
            initial_gradient,
            search_direction,
            step_length,
        )
    }

    fn requires_current_gradient(&self) -> bool {
        true
    }
}

/// # Strong Wolfe conditions
///
/// Armijo and the strong curvature condition combined.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub struct StrongWolfeCondition<F> {
    armijo: ArmijoCondition<F>,
    curvature: StrongCurvatureCondition<F>,
}

impl<F: GradminFloat> StrongWolfeCondition<F> {
    /// Constructor, requires `0 < c1 < c2 < 1`.
    pub fn new(c1: F, c2: F) -> Result<Self, Error> {
        let armijo = ArmijoCondition::new(c1)?;
        if c2 <= c1 || c2 >= float!(1.0) {
            return Err(gradmin_error!(
                InvalidParameter,
                "StrongWolfeCondition: Parameter c2 must be in (c1, 1)"
            ));
        }
        Ok(StrongWolfeCondition {
            armijo,
            curvature: StrongCurvatureCondition::new(c2)?,
        })
    }
}

impl<P, F> LineSearchCondition<P, F> for StrongWolfeCondition<F>
where
    P: GradminDot<P, F>,
    F: GradminFloat,
{
    fn evaluate_condition(
        &self,
        current_cost: F,
        current_gradient: Option<&P>,
        initial_cost: F,
        initial_gradient: &P,
        search_direction: &P,
        step_length: F,
    ) -> bool {
        self.armijo.evaluate_condition(
            current_cost,
            current_gradient,
            initial_cost,
            initial_gradient,
            search_direction,
            step_length,
        ) && self.curvature.evaluate_condition(
            current_cost,
            current_gradient,
            initial_cost,
            initial_gradient,
            search_direction,
            step_length,
        )
    }

    fn requires_current_gradient(&self) -> bool {
        true
    }
}

/// # Goldstein upper bound
///
/// `phi(alpha) <= phi(0) + (1 - c) * alpha * phi'(0)`, `c` in `(0, 0.5)`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub struct GoldsteinUpperBoundCondition<F> {
    c: F,
}

impl<F: GradminFloat> GoldsteinUpperBoundCondition<F> {
    /// Constructor, `c` must be in `(0, 0.5)`.
    pub fn new(c: F) -> Result<Self, Error> {
        if c <= float!(0.0) || c >= float!(0.5) {
            return Err(gradmin_error!(
                InvalidParameter,
                "GoldsteinUpperBoundCondition: Parameter c must be in (0, 0.5)"
            ));
        }
        Ok(GoldsteinUpperBoundCondition { c })
    }
}

impl<P, F> LineSearchCondition<P, F> for GoldsteinUpperBoundCondition<F>
where
    P: GradminDot<P, F>,
    F: GradminFloat,
{
    fn evaluate_condition(
        &self,
        current_cost: F,
        _current_gradient: Option<&P>,
        initial_cost: F,
        initial_gradient: &P,
        search_direction: &P,
        step_length: F,
    ) -> bool {
        current_cost
            <= initial_cost
                + (float!(1.0) - self.c) * step_length * initial_gradient.dot(search_direction)
    }

    fn requires_current_gradient(&self) -> bool {
        false
    }
}

/// # Goldstein conditions
///
/// Armijo and the Goldstein upper bound combined.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub struct GoldsteinCondition<F> {
    armijo: ArmijoCondition<F>,
    upper: GoldsteinUpperBoundCondition<F>,
}

impl<F: GradminFloat> GoldsteinCondition<F> {
    /// Constructor with the Armijo parameter `c1` and the upper bound
    /// parameter `c2` (must be in `(0, 0.5)`).
    pub fn new(c1: F, c2: F) -> Result<Self, Error> {
        Ok(GoldsteinCondition {
            armijo: ArmijoCondition::new(c1)?,
            upper: GoldsteinUpperBoundCondition::new(c2)?,
        })
    }
}

impl<P, F> LineSearchCondition<P, F> for GoldsteinCondition<F>
where
    P: GradminDot<P, F>,
    F: GradminFloat,
{
    fn evaluate_condition(
        &self,
        current_cost: F,
        current_gradient: Option<&P>,
        initial_cost: F,
        initial_gradient: &P,
        search_direction: &P,
        step_length: F,
    ) -> bool {
        self.armijo.evaluate_condition(
            current_cost,
            current_gradient,
            initial_cost,
            initial_gradient,
            search_direction,
            step_length,
        ) && self.upper.evaluate_condition(
            current_cost,
            current_gradient,
            initial_cost,
            initial_gradient,
            search_direction,
            step_length,
        )
    }

    fn requires_current_gradient(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GradminError, Objective, Problem, SearchState};
    use crate::solver::linesearch::condition_accepts;
    use crate::test_trait_impl;

    test_trait_impl!(armijo, ArmijoCondition<f64>);
    test_trait_impl!(curvature, CurvatureCondition<f64>);
    test_trait_impl!(strong_curvature, StrongCurvatureCondition<f64>);
    test_trait_impl!(wolfe, WolfeCondition<f64>);
    test_trait_impl!(strongwolfe, StrongWolfeCondition<f64>);
    test_trait_impl!(goldstein_upper, GoldsteinUpperBoundCondition<f64>);
    test_trait_impl!(goldstein, GoldsteinCondition<f64>);

    #[derive(Clone)]
    struct Sphere {}

    impl Objective for Sphere {
        type Param = Vec<f64>;
        type Hessian = ();
        type Float = f64;

        fn cost(&self, p: &Self::Param) -> Result<Self::Float, crate::core::Error> {
            Ok(p.iter().map(|x| x * x).sum())
        }

        fn gradient(&self, p: &Self::Param) -> Result<Self::Param, crate::core::Error> {
            Ok(p.iter().map(|x| 2.0 * x).collect())
        }
    }

    #[test]
    fn test_armijo_accepts() {
        // f(x) = x^T x at x = (1, 1), d = (-1, -1), c1 = 0.1
        let cond = ArmijoCondition::new(0.1f64).unwrap();
        let mut problem = Problem::new(Sphere {});
        let state = SearchState::new(vec![1.0, 1.0], vec![-1.0, -1.0]);

        assert!(condition_accepts(&cond, &mut problem, &state, 0.1).unwrap());
        assert!(condition_accepts(&cond, &mut problem, &state, 1.0).unwrap());
        assert!(!condition_accepts(&cond, &mut problem, &state, 2.0).unwrap());
    }

    #[test]
    fn test_curvature_accepts() {
        // Same objective, c2 = 0.9
        let cond = CurvatureCondition::new(0.9f64).unwrap();
        let mut problem = Problem::new(Sphere {});
        let state = SearchState::new(vec![1.0, 1.0], vec![-1.0, -1.0]);

        assert!(condition_accepts(&cond, &mut problem, &state, 0.5).unwrap());
        assert!(condition_accepts(&cond, &mut problem, &state, 1.0).unwrap());
        assert!(!condition_accepts(&cond, &mut problem, &state, 0.01).unwrap());
    }

    #[test]
    fn test_strong_curvature() {
        let cond = StrongCurvatureCondition::new(0.9f64).unwrap();
        let mut problem = Problem::new(Sphere {});
        let state = SearchState::new(vec![1.0, 1.0], vec![-1.0, -1.0]);

        // phi'(alpha) = -4 (1 - alpha): |phi'(1.9)| = 3.6 <= 0.9 * 4
        assert!(condition_accepts(&cond, &mut problem, &state, 1.9).unwrap());
        // |phi'(0.01)| = 3.96 > 3.6
        assert!(!condition_accepts(&cond, &mut problem, &state, 0.01).unwrap());
    }

    #[test]
    fn test_parameter_ranges() {
        assert!(ArmijoCondition::new(0.0f64).is_err());
        assert!(ArmijoCondition::new(1.0f64).is_err());
        assert!(ArmijoCondition::new(f64::EPSILON).is_ok());
        assert!(CurvatureCondition::new(1.0f64).is_err());
        assert!(StrongCurvatureCondition::new(0.0f64).is_err());
        assert!(WolfeCondition::new(0.5f64, 0.1).is_err());
        assert!(StrongWolfeCondition::new(1e-4f64, 0.9).is_ok());
        assert!(StrongWolfeCondition::new(1e-4f64, 1.0).is_err());
    }

    #[test]
    fn test_goldstein_parameter_check() {
        assert_error!(
            GoldsteinUpperBoundCondition::new(0.0f64),
            GradminError,
            "Invalid parameter: \"GoldsteinUpperBoundCondition: Parameter c must be in (0, 0.5)\""
        );
        assert_error!(
            GoldsteinUpperBoundCondition::new(0.5f64),
            GradminError,
            "Invalid parameter: \"GoldsteinUpperBoundCondition: Parameter c must be in (0, 0.5)\""
        );
        assert!(GoldsteinCondition::new(1e-4f64, 0.0).is_err());
        assert!(GoldsteinCondition::new(1e-4f64, 0.5).is_err());
        assert!(GoldsteinCondition::new(1e-4f64, 0.25).is_ok());
    }

    #[test]
    fn test_goldstein_brackets_step() {
        let cond = GoldsteinCondition::new(0.1f64, 0.1).unwrap();
        let mut problem = Problem::new(Sphere {});
        let state = SearchState::new(vec![1.0, 1.0], vec![-1.0, -1.0]);

        // phi(alpha) = 2 (1 - alpha)^2, phi'(0) = -4: the bound pair
        // accepts exactly alpha in (0, 0.2] here
        assert!(condition_accepts(&cond, &mut problem, &state, 0.1).unwrap());
        assert!(condition_accepts(&cond, &mut problem, &state, 0.2).unwrap());
        assert!(!condition_accepts(&cond, &mut problem, &state, 0.5).unwrap());
        assert!(!condition_accepts(&cond, &mut problem, &state, 2.0).unwrap());
    }
}
