// Copyright 2024-2026 gradmin developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! * [Bisection line search](`BisectionLineSearch`)

use crate::core::math::{GradminDot, GradminScaledAdd};
use crate::core::{Error, GradminFloat, Objective, OptimizeControl, Problem, SearchState};
use crate::solver::linesearch::condition::LineSearchCondition;
use crate::solver::linesearch::{line_cost, trial_point, AlphaState, SearchStrategy};
#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

/// Bisection of a fixed interval: the midpoint replaces the rejected end
/// until the interval width drops below `control.tol`.
///
/// The working interval is reset from the constructor parameters on every
/// call, so repeated calls are independent of each other. The bracket handed
/// in by the driver is ignored.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub struct BisectionLineSearch<L, F> {
    /// Acceptance condition
    condition: L,
    /// Lower end of the search interval
    alpha_min: F,
    /// Upper end of the search interval
    alpha_max: F,
    /// Control parameters
    control: OptimizeControl<F>,
}

impl<L, F: GradminFloat> BisectionLineSearch<L, F> {
    /// Constructor with the search interval `[alpha_min, alpha_max]`.
    pub fn new(condition: L, alpha_min: F, alpha_max: F) -> Result<Self, Error> {
        if alpha_min < float!(0.0) || alpha_max <= alpha_min {
            return Err(gradmin_error!(
                InvalidParameter,
                "BisectionLineSearch: 0 <= alpha_min < alpha_max required."
            ));
        }
        Ok(BisectionLineSearch {
            condition,
            alpha_min,
            alpha_max,
            control: OptimizeControl::default(),
        })
    }

    /// Replace the control parameters
    #[must_use]
    pub fn with_control(mut self, control: OptimizeControl<F>) -> Self {
        self.control = control;
        self
    }
}

impl<O, L, P, F> SearchStrategy<O, P, F> for BisectionLineSearch<L, F>
where
    O: Objective<Param = P, Float = F>,
    L: LineSearchCondition<P, F>,
    P: Clone + GradminScaledAdd<P, F, P> + GradminDot<P, F>,
    F: GradminFloat,
{
    fn search(
        &mut self,
        problem: &mut Problem<O>,
        state: &SearchState<P>,
        _alpha: AlphaState<F>,
    ) -> Result<F, Error> {
        let init_cost = problem.cost(&state.param)?;
        let init_grad = problem.gradient(&state.param)?;

        let mut low = self.alpha_min;
        let mut hi = self.alpha_max;
        let mut alpha = (low + hi) / float!(2.0);
        let mut iter = 0;

        while hi - low > self.control.tol && iter < self.control.max_iterations {
            let current_cost = line_cost(problem, state, alpha)?;
            let current_grad = if self.condition.requires_current_gradient() {
                Some(problem.gradient(&trial_point(state, alpha))?)
            } else {
                None
            };
            if self.condition.evaluate_condition(
                current_cost,
                current_grad.as_ref(),
                init_cost,
                &init_grad,
                &state.direction,
                alpha,
            ) {
                low = alpha;
            } else {
                hi = alpha;
            }
            let next = (low + hi) / float!(2.0);
            // float exhaustion: midpoint pinned to an endpoint
            if next <= low || next >= hi {
                alpha = next;
                break;
            }
            alpha = next;
            iter += 1;
        }
        Ok(alpha)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GradminError;
    use crate::solver::linesearch::condition::ArmijoCondition;
    use crate::test_trait_impl;

    test_trait_impl!(
        bisection_linesearch,
        BisectionLineSearch<ArmijoCondition<f64>, f64>
    );

    #[derive(Clone)]
    struct Sphere {}

    impl Objective for Sphere {
        type Param = Vec<f64>;
        type Hessian = ();
        type Float = f64;

        fn cost(&self, p: &Self::Param) -> Result<Self::Float, Error> {
            Ok(p.iter().map(|x| x * x).sum())
        }

        fn gradient(&self, p: &Self::Param) -> Result<Self::Param, Error> {
            Ok(p.iter().map(|x| 2.0 * x).collect())
        }
    }

    #[test]
    fn test_invalid_interval() {
        let condition = ArmijoCondition::new(0.1f64).unwrap();
        assert_error!(
            BisectionLineSearch::new(condition, 1.0, 1.0),
            GradminError,
            "Invalid parameter: \"BisectionLineSearch: 0 <= alpha_min < alpha_max required.\""
        );
    }

    #[test]
    fn test_finds_acceptance_boundary() {
        // Armijo with c = 0.1 on phi(alpha) = 2 (1 - alpha)^2 accepts
        // alpha <= 1.8; bisection on [0, 2] converges to that boundary.
        let condition = ArmijoCondition::new(0.1f64).unwrap();
        let mut ls = BisectionLineSearch::new(condition, 0.0, 2.0).unwrap();
        let mut problem = Problem::new(Sphere {});
        let state = SearchState::new(vec![1.0, 1.0], vec![-1.0, -1.0]);
        let alpha = ls
            .search(&mut problem, &state, AlphaState::new(1.0, 0.0, 2.0).unwrap())
            .unwrap();
        assert!((alpha - 1.8).abs() < 1e-5);
    }

    #[test]
    fn test_repeated_calls_are_idempotent() {
        let condition = ArmijoCondition::new(0.1f64).unwrap();
        let mut ls = BisectionLineSearch::new(condition, 0.0, 2.0).unwrap();
        let mut problem = Problem::new(Sphere {});
        let state = SearchState::new(vec![1.0, 1.0], vec![-1.0, -1.0]);
        let bracket = AlphaState::new(1.0, 0.0, 2.0).unwrap();
        let first = ls.search(&mut problem, &state, bracket).unwrap();
        let second = ls.search(&mut problem, &state, bracket).unwrap();
        assert!((first - second).abs() < f64::EPSILON);
    }
}
