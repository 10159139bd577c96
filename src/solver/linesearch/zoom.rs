// Copyright 2024-2026 gradmin developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! * [Zoom line search](`ZoomLineSearch`)

use crate::core::math::{GradminDot, GradminScaledAdd};
use crate::core::{Error, GradminFloat, Objective, OptimizeControl, Problem, SearchState};
use crate::solver::linesearch::condition::{
    ArmijoCondition, LineSearchCondition, StrongCurvatureCondition,
};
use crate::solver::linesearch::{
    line_cost, trial_point, AlphaState, SearchStrategy, StepSizeStrategy,
};
use log::warn;
#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

/// Two-phase line search for a strong Wolfe point (Nocedal-Wright
/// Algorithm 3.5/3.6).
///
/// Phase one expands the trial step until an interval containing a strong
/// Wolfe point is bracketed; phase two shrinks that interval with the
/// step-size sub-strategy until a point is accepted or the `ftol`/`xtol`
/// inner stops fire. When bracketing fails entirely, the search falls back
/// to the midpoint of the initial interval and logs a warning.
///
/// # References:
///
/// \[0\] Jorge Nocedal and Stephen J. Wright (2006). Numerical Optimization.
/// Springer. ISBN 0-387-30303-0.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub struct ZoomLineSearch<S, F> {
    /// Sufficient decrease parameter
    c1: F,
    /// Armijo condition built from `c1`
    armijo: ArmijoCondition<F>,
    /// Strong curvature condition built from `c2`
    curvature: StrongCurvatureCondition<F>,
    /// Step length sub-strategy used inside the zoom phase
    step: S,
    /// Control parameters
    control: OptimizeControl<F>,
}

impl<S, F: GradminFloat> ZoomLineSearch<S, F> {
    /// Constructor with the strong Wolfe parameters `c1` and `c2`.
    pub fn new(step: S, c1: F, c2: F) -> Result<Self, Error> {
        Ok(ZoomLineSearch {
            c1,
            armijo: ArmijoCondition::new(c1)?,
            curvature: StrongCurvatureCondition::new(c2)?,
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

impl<S, F: GradminFloat> ZoomLineSearch<S, F> {
    /// Phase two: shrink `[lo, hi]` (which may be inverted) until a strong
    /// Wolfe point is accepted or the inner stops fire.
    #[allow(clippy::too_many_arguments)]
    fn zoom<O, P>(
        &self,
        mut lo: F,
        mut hi: F,
        problem: &mut Problem<O>,
        state: &SearchState<P>,
        init_cost: F,
        init_grad: &P,
    ) -> Result<F, Error>
    where
        O: Objective<Param = P, Float = F>,
        S: StepSizeStrategy<O, P, F>,
        P: Clone + GradminScaledAdd<P, F, P> + GradminDot<P, F>,
    {
        let ftol = self.control.ftol;
        let xtol = self.control.xtol;

        let mut alpha_j = (lo + hi) / float!(2.0);
        let mut previous_phi = F::infinity();

        for idx in 0..self.control.max_iterations {
            alpha_j = self
                .step
                .next_step(&ordered(alpha_j, lo, hi), problem, state)?;

            let current_phi = line_cost(problem, state, alpha_j)?;
            // interval too narrow or the line function flat: done
            if idx > 0 && ((current_phi - previous_phi).abs() < ftol || (hi - lo).abs() < xtol) {
                break;
            }

            let armijo_ok = self.armijo.evaluate_condition(
                current_phi,
                None,
                init_cost,
                init_grad,
                &state.direction,
                alpha_j,
            );
            if !armijo_ok || current_phi >= line_cost(problem, state, lo)? {
                hi = alpha_j;
            } else {
                let grad_j = problem.gradient(&trial_point(state, alpha_j))?;
                if self.curvature.evaluate_condition(
                    current_phi,
                    Some(&grad_j),
                    init_cost,
                    init_grad,
                    &state.direction,
                    alpha_j,
                ) {
                    return Ok(alpha_j);
                }
                if grad_j.dot(&state.direction) * (hi - lo) >= float!(0.0) {
                    hi = lo;
                }
                lo = alpha_j;
            }
            previous_phi = current_phi;
        }
        self.step
            .next_step(&ordered(alpha_j, lo, hi), problem, state)
    }
}

/// Bracket for the sub-strategy; `lo`/`hi` may arrive inverted.
fn ordered<F: GradminFloat>(init: F, lo: F, hi: F) -> AlphaState<F> {
    if lo <= hi {
        AlphaState { init, low: lo, hi }
    } else {
        AlphaState {
            init,
            low: hi,
            hi: lo,
        }
    }
}

impl<O, S, P, F> SearchStrategy<O, P, F> for ZoomLineSearch<S, F>
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

        let alpha_max = alpha.hi;
        let mut alpha_i = alpha.init;
        let mut alpha_prev = float!(0.0);
        let mut alpha_res = F::infinity();

        for idx in 0..100 {
            let phi_i = line_cost(problem, state, alpha_i)?;
            let armijo_ok = self.armijo.evaluate_condition(
                phi_i,
                None,
                init_cost,
                &init_grad,
                &state.direction,
                alpha_i,
            );
            if (!armijo_ok && idx > 0) || phi_i > init_cost + self.c1 * alpha_i * dphi0 {
                alpha_res =
                    self.zoom(alpha_prev, alpha_i, problem, state, init_cost, &init_grad)?;
                break;
            }
            let grad_i = problem.gradient(&trial_point(state, alpha_i))?;
            if self.curvature.evaluate_condition(
                phi_i,
                Some(&grad_i),
                init_cost,
                &init_grad,
                &state.direction,
                alpha_i,
            ) {
                alpha_res = alpha_i;
                break;
            }
            if grad_i.dot(&state.direction) >= float!(0.0) {
                alpha_res =
                    self.zoom(alpha_i, alpha_prev, problem, state, init_cost, &init_grad)?;
                break;
            }
            alpha_prev = alpha_i;
            alpha_i = (float!(2.0) * alpha_i).min(alpha_max);
        }

        if !alpha_res.is_finite() {
            warn!("ZoomLineSearch: bracketing failed, falling back to bisection of the initial interval");
            alpha_res = alpha.midpoint();
        }
        Ok(alpha_res)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::linesearch::stepsize::{BisectionStep, CubicInterpolation};
    use crate::test_trait_impl;

    test_trait_impl!(zoom, ZoomLineSearch<BisectionStep, f64>);

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
    fn test_accepts_strong_wolfe_point() {
        let mut ls = ZoomLineSearch::new(BisectionStep::new(), 1e-4, 0.9).unwrap();
        let mut problem = Problem::new(Sphere {});
        let state = SearchState::new(vec![1.0, 1.0], vec![-1.0, -1.0]);
        let alpha = ls
            .search(
                &mut problem,
                &state,
                AlphaState::new(1.0, 1e-6, 10.0).unwrap(),
            )
            .unwrap();
        // phi(alpha) = 2 (1 - alpha)^2: strong Wolfe holds around the
        // one-dimensional minimum
        assert!(alpha.is_finite());
        let phi = 2.0 * (1.0 - alpha) * (1.0 - alpha);
        let dphi = -4.0 * (1.0 - alpha);
        assert!(phi <= 2.0 + 1e-4 * alpha * (-4.0));
        assert!(dphi.abs() <= 0.9 * 4.0);
    }

    #[test]
    fn test_cubic_substep() {
        let mut ls = ZoomLineSearch::new(CubicInterpolation::new(), 1e-4, 0.9).unwrap();
        let mut problem = Problem::new(Sphere {});
        let state = SearchState::new(vec![2.0, -1.0], vec![-4.0, 2.0]);
        let alpha = ls
            .search(
                &mut problem,
                &state,
                AlphaState::new(1.0, 1e-6, 10.0).unwrap(),
            )
            .unwrap();
        // the exact one-dimensional minimizer along this line is 0.5
        assert!(alpha.is_finite() && alpha > 0.0);
        let x = vec![2.0 - 4.0 * alpha, -1.0 + 2.0 * alpha];
        let cost: f64 = x.iter().map(|v| v * v).sum();
        assert!(cost < 5.0);
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(ZoomLineSearch::<_, f64>::new(BisectionStep::new(), 0.0, 0.9).is_err());
        assert!(ZoomLineSearch::<_, f64>::new(BisectionStep::new(), 1e-4, 1.0).is_err());
    }
}
