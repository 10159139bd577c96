// Copyright 2024-2026 gradmin developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! # References:
//!
//! \[0\] Jorge Nocedal and Stephen J. Wright (2006). Numerical Optimization.
//! Springer. ISBN 0-387-30303-0.

use crate::core::math::{
    GradminAdd, GradminDot, GradminInfNorm, GradminMul, GradminNorm, GradminScaledAdd, GradminSub,
};
use crate::core::{
    DeserializeOwnedAlias, Error, GradminFloat, IterState, Objective, OptimizeControl, Problem,
    SearchState, SerializeAlias, Solver, State, TerminationReason, KV,
};
use crate::solver::linesearch::{AlphaState, SearchStrategy};
#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// L-BFGS method
///
/// Limited-memory BFGS keeps the last `m` curvature pairs `(s, y)` together
/// with `rho = 1 / (y . s)` in bounded FIFO queues and applies the implicit
/// inverse Hessian via the standard two-loop recursion. Pairs with
/// non-positive curvature `y . s <= 0` are skipped, which keeps every stored
/// `rho` positive. The step length comes from the line search over the
/// bracket `(1, 1e-6, 100)`.
///
/// # References:
///
/// \[0\] Jorge Nocedal and Stephen J. Wright (2006). Numerical Optimization.
/// Springer. ISBN 0-387-30303-0.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub struct LBFGS<LS, P, F> {
    /// Line search
    linesearch: LS,
    /// Number of curvature pairs to store
    m: usize,
    /// Position differences `s_k`
    s: VecDeque<P>,
    /// Gradient differences `y_k`
    y: VecDeque<P>,
    /// Stored `rho_k = 1 / (y_k . s_k)`
    rho: VecDeque<F>,
    /// Control parameters
    control: OptimizeControl<F>,
}

impl<LS, P, F: GradminFloat> LBFGS<LS, P, F> {
    /// Constructor with the number of stored curvature pairs `m`
    /// (typically 5 to 20).
    pub fn new(linesearch: LS, m: usize) -> Self {
        LBFGS {
            linesearch,
            m,
            s: VecDeque::with_capacity(m),
            y: VecDeque::with_capacity(m),
            rho: VecDeque::with_capacity(m),
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

impl<LS, P, F> LBFGS<LS, P, F>
where
    P: Clone + GradminAdd<P, P> + GradminSub<P, P> + GradminDot<P, F> + GradminMul<F, P>,
    F: GradminFloat,
{
    /// Two-loop recursion: apply the implicit inverse Hessian to the
    /// gradient and negate, yielding the search direction.
    fn direction(&self, gradient: &P) -> P {
        let mut q = gradient.clone();
        let cur_m = self.s.len();
        let mut alpha = vec![float!(0.0); cur_m];

        for (i, ((sk, yk), rho)) in self
            .s
            .iter()
            .zip(self.y.iter())
            .zip(self.rho.iter())
            .enumerate()
            .rev()
        {
            let alpha_i = *rho * sk.dot(&q);
            q = q.sub(&yk.mul(&alpha_i));
            alpha[i] = alpha_i;
        }

        if let (Some(s_last), Some(y_last), Some(rho_last)) =
            (self.s.back(), self.y.back(), self.rho.back())
        {
            // initial Hessian scaling
            q = q.mul(&(*rho_last * s_last.dot(y_last)));
        }

        let mut r = q;
        for (i, ((sk, yk), rho)) in self
            .s
            .iter()
            .zip(self.y.iter())
            .zip(self.rho.iter())
            .enumerate()
        {
            let beta = *rho * yk.dot(&r);
            r = r.add(&sk.mul(&(alpha[i] - beta)));
        }

        r.mul(&float!(-1.0))
    }
}

impl<O, LS, P, H, F> Solver<O, IterState<P, H, F>> for LBFGS<LS, P, F>
where
    O: Objective<Param = P, Float = F>,
    LS: SearchStrategy<O, P, F> + SerializeAlias,
    P: Clone
        + SerializeAlias
        + DeserializeOwnedAlias
        + GradminAdd<P, P>
        + GradminSub<P, P>
        + GradminDot<P, F>
        + GradminMul<F, P>
        + GradminNorm<F>
        + GradminInfNorm<F>
        + GradminScaledAdd<P, F, P>,
    H: Clone + SerializeAlias + DeserializeOwnedAlias,
    F: GradminFloat,
{
    const NAME: &'static str = "L-BFGS";

    fn init(
        &mut self,
        problem: &mut Problem<O>,
        mut state: IterState<P, H, F>,
    ) -> Result<(IterState<P, H, F>, Option<KV>), Error> {
        let param = state.take_param().ok_or_else(gradmin_error_closure!(
            NotInitialized,
            "LBFGS: initial parameter vector required"
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
            "LBFGS: parameter vector missing"
        ))?;
        let prev_grad = state
            .take_grad()
            .map(Result::Ok)
            .unwrap_or_else(|| problem.gradient(&xk))?;

        let direction = self.direction(&prev_grad);

        // try the unit step first, but allow searching a much larger range
        let alpha = self.linesearch.search(
            problem,
            &SearchState::new(xk.clone(), direction.clone()),
            AlphaState::new(float!(1.0), float!(1e-6), float!(100.0))?,
        )?;
        if alpha <= float!(0.0) || !alpha.is_finite() {
            return Ok((
                state
                    .param(xk)
                    .gradient(prev_grad)
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

        let (cost, grad) = problem.cost_and_gradient(&xk1)?;

        let s = xk1.sub(&xk);
        let y = grad.sub(&prev_grad);
        let ys = y.dot(&s);
        // skip pairs with non-positive curvature so every stored rho > 0
        if ys > float!(0.0) {
            if self.s.len() == self.m {
                self.s.pop_front();
                self.y.pop_front();
                self.rho.pop_front();
            }
            self.s.push_back(s);
            self.y.push_back(y);
            self.rho.push_back(float!(1.0) / ys);
        }

        Ok((
            state.param(xk1).cost(cost).gradient(grad),
            Some(make_kv!("alpha" => alpha; "pairs" => self.s.len();)),
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
