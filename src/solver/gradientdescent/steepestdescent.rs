// Copyright 2024-2026 gradmin developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Steepest Descent method
//!
//! [SteepestDescent](`SteepestDescent`)
//!
//! # References:
//!
//! \[0\] Jorge Nocedal and Stephen J. Wright (2006). Numerical Optimization.
//! Springer. ISBN 0-387-30303-0.

use crate::core::math::{
    GradminAdd, GradminDot, GradminInfNorm, GradminMul, GradminNorm, GradminScaledAdd,
};
use crate::core::{
    DeserializeOwnedAlias, Error, GradminFloat, IterState, Objective, OptimizeControl, Problem,
    SearchState, SerializeAlias, Solver, State, TerminationReason, KV,
};
use crate::solver::linesearch::{AlphaState, SearchStrategy};
#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

/// Steepest descent iteratively takes steps in the direction of the
/// strongest negative gradient. In each iteration, the line search is
/// employed to obtain an appropriate step length; a zero step length
/// terminates the run with `LineSearchFailed`.
///
/// # References:
///
/// \[0\] Jorge Nocedal and Stephen J. Wright (2006). Numerical Optimization.
/// Springer. ISBN 0-387-30303-0.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub struct SteepestDescent<LS, F> {
    /// Line search
    linesearch: LS,
    /// Control parameters
    control: OptimizeControl<F>,
}

impl<LS, F: GradminFloat> SteepestDescent<LS, F> {
    /// Constructor
    pub fn new(linesearch: LS) -> Self {
        SteepestDescent {
            linesearch,
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

impl<O, LS, P, H, F> Solver<O, IterState<P, H, F>> for SteepestDescent<LS, F>
where
    O: Objective<Param = P, Float = F>,
    LS: SearchStrategy<O, P, F> + SerializeAlias,
    P: Clone
        + SerializeAlias
        + DeserializeOwnedAlias
        + GradminAdd<P, P>
        + GradminDot<P, F>
        + GradminMul<F, P>
        + GradminNorm<F>
        + GradminInfNorm<F>
        + GradminScaledAdd<P, F, P>,
    H: Clone + SerializeAlias + DeserializeOwnedAlias,
    F: GradminFloat,
{
    const NAME: &'static str = "Steepest Descent";

    fn init(
        &mut self,
        problem: &mut Problem<O>,
        mut state: IterState<P, H, F>,
    ) -> Result<(IterState<P, H, F>, Option<KV>), Error> {
        let param = state.take_param().ok_or_else(gradmin_error_closure!(
            NotInitialized,
            "SteepestDescent: initial parameter vector required"
        ))?;
        let (cost, grad) = problem.cost_and_gradient(&param)?;
        Ok((state.param(param).cost(cost).gradient(grad), None))
    }

    fn next_iter(
        &mut self,
        problem: &mut Problem<O>,
        mut state: IterState<P, H, F>,
    ) -> Result<(IterState<P, H, F>, Option<KV>), Error> {
        let xk = state.take_param().ok_or_else(gradmin_error_closure!(
            PotentialBug,
            "SteepestDescent: parameter vector missing"
        ))?;
        let grad = state
            .take_grad()
            .map(Result::Ok)
            .unwrap_or_else(|| problem.gradient(&xk))?;

        let direction = grad.mul(&float!(-1.0));

        // the bracket extends to maxmove, but never below the unit trial step
        let hi = self.control.maxmove.max(float!(1.0));
        let alpha = self.linesearch.search(
            problem,
            &SearchState::new(xk.clone(), direction.clone()),
            AlphaState::new(float!(1.0), float!(1e-6), hi)?,
        )?;
        if alpha <= float!(0.0) || !alpha.is_finite() {
            return Ok((
                state
                    .param(xk)
                    .gradient(grad)
                    .termination_reason(TerminationReason::LineSearchFailed),
                None,
            ));
        }

        let mut step = direction.mul(&alpha);
        let step_norm = step.norm();
        if step_norm > self.control.maxmove {
            step = step.mul(&(self.control.maxmove / step_norm));
        }
        let xk1 = xk.add(&step);

        let (cost, new_grad) = problem.cost_and_gradient(&xk1)?;

        Ok((
            state.param(xk1).cost(cost).gradient(new_grad),
            Some(make_kv!("alpha" => alpha;)),
        ))
    }

    fn terminate(&mut self, state: &IterState<P, H, F>) -> TerminationReason {
        if let Some(grad) = state.get_grad() {
            if grad.inf_norm() < self.control.gtol {
                return TerminationReason::TargetToleranceReached;
            }
        }
        TerminationReason::NotTerminated
    }
}
