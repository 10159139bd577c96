// Copyright 2024-2026 gradmin developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! * [Backtracking line search](`BacktrackingLineSearch`)

use crate::core::math::{GradminDot, GradminScaledAdd};
use crate::core::{
    Error, GradminFloat, Objective, OptimizeControl, Problem, SearchState,
};
use crate::solver::linesearch::condition::LineSearchCondition;
use crate::solver::linesearch::{line_cost, trial_point, AlphaState, SearchStrategy, StepSizeStrategy};
#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

/// The backtracking line search starts at the initial trial step and keeps
/// shrinking it via its step-size sub-strategy until the acceptance
/// condition holds.
///
/// The classic pairing is an Armijo condition with
/// [`GeometricReduction`](`crate::solver::linesearch::stepsize::GeometricReduction`);
/// any condition/sub-strategy pair works. Returns zero when the step length
/// shrinks to nothing or the iteration cap is exhausted.
///
/// # References:
///
/// \[0\] Jorge Nocedal and Stephen J. Wright (2006). Numerical Optimization.
/// Springer. ISBN 0-387-30303-0.
///
/// \[1\] Wikipedia: <https://en.wikipedia.org/wiki/Backtracking_line_search>
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub struct BacktrackingLineSearch<L, S, F> {
    /// Acceptance condition
    condition: L,
    /// Step length sub-strategy
    step: S,
    /// Control parameters
    control: OptimizeControl<F>,
}

impl<L, S, F: GradminFloat> BacktrackingLineSearch<L, S, F> {
    /// Constructor
    pub fn new(condition: L, step: S) -> Self {
        BacktrackingLineSearch {
            condition,
            step,
            control: OptimizeControl::default(),
        }
    }

    /// Replace the control parameters
    #[must_use]
    pub fn with_control(mut self, control: OptimizeControl<F>) -> Self {
        self.control = control;
        self
    }
}

impl<O, L, S, P, F> SearchStrategy<O, P, F> for BacktrackingLineSearch<L, S, F>
where
    O: Objective<Param = P, Float = F>,
    L: LineSearchCondition<P, F>,
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

        let mut alpha_k = alpha.init;
        let mut iter = 0;
        while alpha_k > float!(0.0) && iter < self.control.max_iterations {
            let current_cost = line_cost(problem, state, alpha_k)?;
            let current_grad = if self.condition.requires_current_gradient() {
                Some(problem.gradient(&trial_point(state, alpha_k))?)
            } else {
                None
            };
            if self.condition.evaluate_condition(
                current_cost,
                current_grad.as_ref(),
                init_cost,
                &init_grad,
                &state.direction,
                alpha_k,
            ) {
                return Ok(alpha_k);
            }
            // shrink towards alpha.low; the current trial is the bracket top
            alpha_k = self.step.next_step(
                &AlphaState {
                    init: alpha_k,
                    low: alpha.low,
                    hi: alpha_k,
                },
                problem,
                state,
            )?;
            iter += 1;
        }
        Ok(float!(0.0))
    }
}
