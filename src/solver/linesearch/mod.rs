// Copyright 2024-2026 gradmin developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! # Line searches
//!
//! A line search selects a scalar step length α along a fixed direction. It
//! is assembled from orthogonal pieces:
//!
//! * an acceptance [condition](`condition`) (Armijo, Wolfe, Goldstein, ...),
//! * a [step-size sub-strategy](`stepsize`) producing the next trial α
//!   inside a bracket (bisection, golden section, interpolation, ...),
//! * a search strategy wrapping both and returning an accepted α:
//!   [`BacktrackingLineSearch`], [`BisectionLineSearch`], [`ZoomLineSearch`]
//!   and [`MooreThuenteLineSearch`].
//!
//! ## Reference
//!
//! Jorge Nocedal and Stephen J. Wright (2006). Numerical Optimization.
//! Springer. ISBN 0-387-30303-0.

/// Backtracking search strategy
pub mod backtracking;
/// Bisection search strategy
pub mod bisection;
/// Acceptance conditions
pub mod condition;
/// Moore-Thuente search strategy
pub mod morethuente;
/// Step length sub-strategies
pub mod stepsize;
/// Zoom search strategy
pub mod zoom;

pub use self::backtracking::BacktrackingLineSearch;
pub use self::bisection::BisectionLineSearch;
pub use self::morethuente::MooreThuenteLineSearch;
pub use self::zoom::ZoomLineSearch;

use crate::core::math::{GradminDot, GradminScaledAdd};
use crate::core::{Error, GradminFloat, Objective, Problem, SearchState};
use self::condition::LineSearchCondition;
#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

/// A bracket of step length candidates.
///
/// Handed to search strategies and step-size sub-strategies. The invariant
/// `0 <= low <= init <= hi` is checked by [`AlphaState::new`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub struct AlphaState<F> {
    /// Initial trial step length
    pub init: F,
    /// Lower end of the bracket
    pub low: F,
    /// Upper end of the bracket
    pub hi: F,
}

impl<F: GradminFloat> AlphaState<F> {
    /// Constructor
    ///
    /// Fails with `InvalidParameter` unless `0 <= low <= init <= hi`.
    pub fn new(init: F, low: F, hi: F) -> Result<Self, Error> {
        if low < float!(0.0) || init < low || hi < init {
            return Err(gradmin_error!(
                InvalidParameter,
                "AlphaState: 0 <= low <= init <= hi required."
            ));
        }
        Ok(AlphaState { init, low, hi })
    }

    /// Midpoint of the bracket, the universal numeric fallback
    pub fn midpoint(&self) -> F {
        (self.low + self.hi) / float!(2.0)
    }
}

/// Interface of a search strategy: returns an accepted step length along
/// `state.direction`, starting from the bracket `alpha`.
pub trait SearchStrategy<O, P, F> {
    /// Search for an acceptable step length.
    ///
    /// A return value of zero indicates that no acceptable step length was
    /// found; drivers terminate with `LineSearchFailed` in that case.
    fn search(
        &mut self,
        problem: &mut Problem<O>,
        state: &SearchState<P>,
        alpha: AlphaState<F>,
    ) -> Result<F, Error>;
}

/// Interface of a step-size sub-strategy: produce the next trial step
/// length for the bracket `alpha`.
///
/// Bracketed sub-strategies must return a value in `[alpha.low, alpha.hi]`
/// and fall back to the bisection midpoint on any numerical failure.
pub trait StepSizeStrategy<O, P, F> {
    /// Compute the next trial step length.
    fn next_step(
        &self,
        alpha: &AlphaState<F>,
        problem: &mut Problem<O>,
        state: &SearchState<P>,
    ) -> Result<F, Error>;
}

/// The trial point `x + alpha * d`.
pub fn trial_point<P, F>(state: &SearchState<P>, alpha: F) -> P
where
    P: GradminScaledAdd<P, F, P>,
{
    state.param.scaled_add(&alpha, &state.direction)
}

/// The line function `phi(alpha) = f(x + alpha * d)`.
pub fn line_cost<O, P, F>(
    problem: &mut Problem<O>,
    state: &SearchState<P>,
    alpha: F,
) -> Result<F, Error>
where
    O: Objective<Param = P, Float = F>,
    P: Clone + GradminScaledAdd<P, F, P>,
    F: GradminFloat,
{
    problem.cost(&trial_point(state, alpha))
}

/// The line derivative `phi'(alpha) = grad f(x + alpha * d) . d`.
pub fn line_slope<O, P, F>(
    problem: &mut Problem<O>,
    state: &SearchState<P>,
    alpha: F,
) -> Result<F, Error>
where
    O: Objective<Param = P, Float = F>,
    P: Clone + GradminScaledAdd<P, F, P> + GradminDot<P, F>,
    F: GradminFloat,
{
    problem.directional_derivative(&trial_point(state, alpha), &state.direction)
}

/// Evaluate an acceptance condition directly against an objective function.
///
/// Computes the quantities the condition needs (initial cost and gradient,
/// trial cost and, if required, the trial gradient) and evaluates it at
/// `alpha`. Fails with `MissingGradient` when the objective exposes none.
pub fn condition_accepts<O, L, P, F>(
    condition: &L,
    problem: &mut Problem<O>,
    state: &SearchState<P>,
    alpha: F,
) -> Result<bool, Error>
where
    O: Objective<Param = P, Float = F>,
    L: LineSearchCondition<P, F>,
    P: Clone + GradminScaledAdd<P, F, P>,
    F: GradminFloat,
{
    let init_cost = problem.cost(&state.param)?;
    let init_grad = problem.gradient(&state.param)?;
    let cur_cost = line_cost(problem, state, alpha)?;
    let cur_grad = if condition.requires_current_gradient() {
        Some(problem.gradient(&trial_point(state, alpha))?)
    } else {
        None
    };
    Ok(condition.evaluate_condition(
        cur_cost,
        cur_grad.as_ref(),
        init_cost,
        &init_grad,
        &state.direction,
        alpha,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GradminError;
    use crate::test_trait_impl;

    test_trait_impl!(alpha_state, AlphaState<f64>);

    #[test]
    fn test_alpha_state_new() {
        let a = AlphaState::new(1.0f64, 1e-6, 10.0).unwrap();
        assert!((a.init - 1.0).abs() < f64::EPSILON);
        assert!((a.midpoint() - 5.0000005).abs() < 1e-12);

        assert_error!(
            AlphaState::new(1.0f64, 2.0, 10.0),
            GradminError,
            "Invalid parameter: \"AlphaState: 0 <= low <= init <= hi required.\""
        );
        assert_error!(
            AlphaState::new(1.0f64, -1.0, 10.0),
            GradminError,
            "Invalid parameter: \"AlphaState: 0 <= low <= init <= hi required.\""
        );
        assert_error!(
            AlphaState::new(11.0f64, 0.0, 10.0),
            GradminError,
            "Invalid parameter: \"AlphaState: 0 <= low <= init <= hi required.\""
        );
    }

    #[test]
    fn test_trial_point() {
        let state = SearchState::new(vec![1.0f64, 1.0], vec![-1.0, -1.0]);
        let p = trial_point(&state, 0.5);
        assert!((p[0] - 0.5).abs() < f64::EPSILON);
        assert!((p[1] - 0.5).abs() < f64::EPSILON);
    }
}
