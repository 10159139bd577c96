// Copyright 2024-2026 gradmin developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! * [Moore-Thuente line search](`MooreThuenteLineSearch`)

use crate::core::math::{GradminDot, GradminScaledAdd};
use crate::core::{Error, GradminFloat, Objective, OptimizeControl, Problem, SearchState};
use crate::solver::linesearch::{
    line_cost, trial_point, AlphaState, SearchStrategy, StepSizeStrategy,
};
#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

/// Interval-update line search in the manner of More and Thuente.
///
/// Classifies each trial step against the Armijo bound and the sign and
/// magnitude of the line derivative, shrinking `[lo, hi]` accordingly, and
/// returns as soon as a step satisfies both strong Wolfe inequalities. The
/// next trial step inside the interval comes from the step-size
/// sub-strategy.
///
/// # References:
///
/// \[0\] Jorge J. More and David J. Thuente. "Line search algorithms with
/// guaranteed sufficient decrease." ACM Trans. Math. Softw. 20, 3 (1994).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub struct MooreThuenteLineSearch<S, F> {
    /// Sufficient decrease parameter
    c1: F,
    /// Curvature parameter
    c2: F,
    /// Step length sub-strategy
    step: S,
    /// Control parameters
    control: OptimizeControl<F>,
}

impl<S, F: GradminFloat> MooreThuenteLineSearch<S, F> {
    /// Constructor with the strong Wolfe parameters `c1` and `c2`.
    pub fn new(step: S, c1: F, c2: F) -> Result<Self, Error> {
        if c1 <= float!(0.0) || c1 >= float!(1.0) {
            return Err(gradmin_error!(
                InvalidParameter,
                "MooreThuenteLineSearch: Parameter c1 must be in (0, 1)"
            ));
        }
        if c2 <= c1 || c2 >= float!(1.0) {
            return Err(gradmin_error!(
                InvalidParameter,
                "MooreThuenteLineSearch: Parameter c2 must be in (c1, 1)"
            ));
        }
        Ok(MooreThuenteLineSearch {
            c1,
            c2,
            step,
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

impl<O, S, P, F> SearchStrategy<O, P, F> for MooreThuenteLineSearch<S, F>
where
    O: Objective<Param = P, Float = F>,
    S: StepSizeStrategy<O, P, F>,
    P: Clone + GradminScaledAdd<P, F, P> + GradminDot<P, F>,
    F: GradminFloat,
{
    fn search(
        &mut self,
        problem: &mut Problem<O>,
        state: &SearchState<P>,
        alpha: AlphaState<F>,
    ) -> Result<F, Error> {
        let init_cost = problem.cost(&state.param)?;
        let init_grad = problem.gradient(&state.param)?;
        let dphi0 = init_grad.dot(&state.direction);

        let mut lo = alpha.low;
        let mut hi = alpha.hi;
        let mut alpha_k = alpha.init;

        for _ in 0..self.control.max_iterations {
            let grad_k = problem.gradient(&trial_point(state, alpha_k))?;
            let dphi_k = grad_k.dot(&state.direction);
            let phi_k = line_cost(problem, state, alpha_k)?;

            let armijo_ok = phi_k <= init_cost + self.c1 * alpha_k * dphi0;
            if !armijo_ok || dphi_k > float!(0.0) {
                hi = alpha_k;
            } else if dphi_k.abs() <= -self.c2 * dphi0 {
                lo = alpha_k;
            } else {
                // both strong Wolfe conditions are satisfied
                return Ok(alpha_k);
            }
            if hi - lo < self.control.tol {
                break;
            }
            alpha_k = self.step.next_step(
                &AlphaState {
                    init: alpha_k,
                    low: lo,
                    hi,
                },
                problem,
                state,
            )?;
        }
        Ok(alpha_k)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::linesearch::stepsize::BisectionStep;
    use crate::test_trait_impl;

    test_trait_impl!(morethuente, MooreThuenteLineSearch<BisectionStep, f64>);

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
    fn test_invalid_parameters() {
        assert!(MooreThuenteLineSearch::<_, f64>::new(BisectionStep::new(), 0.0, 0.9).is_err());
        assert!(MooreThuenteLineSearch::<_, f64>::new(BisectionStep::new(), 1e-4, 1.0).is_err());
        assert!(MooreThuenteLineSearch::<_, f64>::new(BisectionStep::new(), 1e-4, 0.9).is_ok());
    }

    #[test]
    fn test_finds_acceptable_step() {
        let mut ls = MooreThuenteLineSearch::new(BisectionStep::new(), 1e-4, 0.9).unwrap();
        let mut problem = Problem::new(Sphere {});
        let state = SearchState::new(vec![1.0, 1.0], vec![-1.0, -1.0]);
        let alpha = ls
            .search(&mut problem, &state, AlphaState::new(0.5, 0.0, 2.0).unwrap())
            .unwrap();
        // phi(alpha) = 2 (1 - alpha)^2: the accepted step decreases the cost
        assert!(alpha > 0.0);
        let phi = 2.0 * (1.0 - alpha) * (1.0 - alpha);
        assert!(phi < 2.0);
    }
}
