// Copyright 2024-2026 gradmin developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! # References:
//!
//! \[0\] Jorge Nocedal and Stephen J. Wright (2006). Numerical Optimization.
//! Springer. ISBN 0-387-30303-0. (Algorithm 5.4)

use crate::core::math::{
    GradminAdd, GradminDot, GradminInfNorm, GradminMul, GradminNorm, GradminScaledAdd,
};
use crate::core::{
    DeserializeOwnedAlias, Error, GradminFloat, IterState, Objective, OptimizeControl, Problem,
    SearchState, SerializeAlias, Solver, State, TerminationReason, KV,
};
use crate::solver::conjugategradient::beta::NLCGBetaUpdate;
use crate::solver::conjugategradient::restart::RestartStrategy;
use crate::solver::linesearch::{AlphaState, SearchStrategy};
#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

/// The nonlinear conjugate gradient method generalizes conjugate gradients
/// to nonlinear optimization problems.
///
/// The β coefficient formula and the restart test are pluggable; a firing
/// restart resets the search direction to steepest descent. Each iteration
/// obtains its step length from the line search over the bracket
/// `(1, 1e-6, 10)` and caps the move at `control.maxmove`.
///
/// # References:
///
/// \[0\] Jorge Nocedal and Stephen J. Wright (2006). Numerical Optimization.
/// Springer. ISBN 0-387-30303-0.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub struct NonlinearConjugateGradient<LS, B, R, P, F> {
    /// Current search direction
    p: Option<P>,
    /// Current beta
    beta: F,
    /// Line search
    linesearch: LS,
    /// Beta update method
    beta_method: B,
    /// Restart strategy
    restart: R,
    /// Control parameters
    control: OptimizeControl<F>,
}

impl<LS, B, R, P, F: GradminFloat> NonlinearConjugateGradient<LS, B, R, P, F> {
    /// Constructor
    pub fn new(linesearch: LS, beta_method: B, restart: R) -> Self {
        NonlinearConjugateGradient {
            p: None,
            beta: F::nan(),
            linesearch,
            beta_method,
            restart,
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

impl<O, LS, B, R, P, H, F> Solver<O, IterState<P, H, F>>
    for NonlinearConjugateGradient<LS, B, R, P, F>
where
    O: Objective<Param = P, Float = F>,
    LS: SearchStrategy<O, P, F> + SerializeAlias,
    B: NLCGBetaUpdate<P, F>,
    R: RestartStrategy<P, F>,
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
    const NAME: &'static str = "Nonlinear Conjugate Gradient";

    fn init(
        &mut self,
        problem: &mut Problem<O>,
        mut state: IterState<P, H, F>,
    ) -> Result<(IterState<P, H, F>, Option<KV>), Error> {
        let param = state.take_param().ok_or_else(gradmin_error_closure!(
            NotInitialized,
            "NonlinearConjugateGradient: initial parameter vector required"
        ))?;
        let (cost, grad) = problem.cost_and_gradient(&param)?;
        self.p = Some(grad.mul(&float!(-1.0)));
        Ok((state.param(param).cost(cost).gradient(grad), None))
    }

    fn next_iter(
        &mut self,
        problem: &mut Problem<O>,
        mut state: IterState<P, H, F>,
    ) -> Result<(IterState<P, H, F>, Option<KV>), Error> {
        let p = self
            .p
            .clone()
            .ok_or_else(gradmin_error_closure!(
                NotInitialized,
                "NonlinearConjugateGradient: `init` not called"
            ))?;
        let xk = state.take_param().ok_or_else(gradmin_error_closure!(
            PotentialBug,
            "NonlinearConjugateGradient: parameter vector missing"
        ))?;
        let grad = state
            .take_grad()
            .map(Result::Ok)
            .unwrap_or_else(|| problem.gradient(&xk))?;

        let alpha = self.linesearch.search(
            problem,
            &SearchState::new(xk.clone(), p.clone()),
            AlphaState::new(float!(1.0), float!(1e-6), float!(10.0))?,
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

        // scale the proposed move down when it exceeds maxmove
        let mut step = p.mul(&alpha);
        let step_norm = step.norm();
        if step_norm > self.control.maxmove {
            step = step.mul(&(self.control.maxmove / step_norm));
        }
        let xk1 = xk.add(&step);

        let (cost, new_grad) = problem.cost_and_gradient(&xk1)?;

        let restarted = self.restart.restart(&new_grad, &grad, &p);
        self.beta = if restarted {
            float!(0.0)
        } else {
            self.beta_method.update(&new_grad, &grad, &p)?
        };

        self.p = Some(new_grad.mul(&float!(-1.0)).add(&p.mul(&self.beta)));

        Ok((
            state.param(xk1).cost(cost).gradient(new_grad),
            Some(make_kv!(
                "alpha" => alpha;
                "beta" => self.beta;
                "restart" => restarted;
            )),
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::conjugategradient::beta::PolakRibiere;
    use crate::solver::conjugategradient::restart::NeverRestart;
    use crate::solver::linesearch::condition::ArmijoCondition;
    use crate::solver::linesearch::stepsize::GeometricReduction;
    use crate::solver::linesearch::BacktrackingLineSearch;
    use crate::test_trait_impl;

    test_trait_impl!(
        nonlinear_cg,
        NonlinearConjugateGradient<
            BacktrackingLineSearch<ArmijoCondition<f64>, GeometricReduction<f64>, f64>,
            PolakRibiere,
            NeverRestart,
            Vec<f64>,
            f64,
        >
    );
}
