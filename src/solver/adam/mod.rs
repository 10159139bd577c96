// Copyright 2024-2026 gradmin developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! # ADAM
//!
//! # References:
//!
//! \[0\] Diederik P. Kingma and Jimmy Ba. "Adam: A method for stochastic
//! optimization." ICLR (2015).

use crate::core::math::{
    GradminAdd, GradminDiv, GradminInfNorm, GradminMul, GradminScaledSub, GradminSqrt,
    GradminZeroLike,
};
use crate::core::{
    DeserializeOwnedAlias, Error, GradminFloat, IterState, Objective, OptimizeControl, Problem,
    SerializeAlias, Solver, TerminationReason, KV,
};
#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

/// ADAM: gradient descent with bias-corrected first and second moment
/// estimates.
///
/// Maintains elementwise exponential moving averages of the gradient and of
/// its square; each step moves along `m_hat / (sqrt(v_hat) + epsilon)`
/// scaled by the learning rate. No line search is consumed.
///
/// # References:
///
/// \[0\] Diederik P. Kingma and Jimmy Ba. "Adam: A method for stochastic
/// optimization." ICLR (2015).
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub struct Adam<P, F> {
    /// Learning rate
    lr: F,
    /// Exponential decay rate for the first moment estimates
    beta1: F,
    /// Exponential decay rate for the second moment estimates
    beta2: F,
    /// Small constant for numerical stability
    epsilon: F,
    /// First moment estimate
    m: Option<P>,
    /// Second moment estimate
    v: Option<P>,
    /// Running power of `beta1`
    beta1_pow: F,
    /// Running power of `beta2`
    beta2_pow: F,
    /// Control parameters
    control: OptimizeControl<F>,
}

impl<P, F: GradminFloat> Adam<P, F> {
    /// Constructor with the default hyperparameters
    /// `(lr, beta1, beta2, epsilon) = (0.001, 0.9, 0.999, 1e-8)`.
    pub fn new() -> Self {
        Adam {
            lr: float!(0.001),
            beta1: float!(0.9),
            beta2: float!(0.999),
            epsilon: float!(1e-8),
            m: None,
            v: None,
            beta1_pow: float!(0.9),
            beta2_pow: float!(0.999),
            control: OptimizeControl::default(),
        }
    }

    /// Set the learning rate
    #[must_use]
    pub fn with_lr(mut self, lr: F) -> Self {
        self.lr = lr;
        self
    }

    /// Set the decay rates of the moment estimates
    #[must_use]
    pub fn with_betas(mut self, beta1: F, beta2: F) -> Self {
        self.beta1 = beta1;
        self.beta2 = beta2;
        self.beta1_pow = beta1;
        self.beta2_pow = beta2;
        self
    }

    /// Set the stability constant
    #[must_use]
    pub fn with_epsilon(mut self, epsilon: F) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Replace the control parameters
    #[must_use]
    pub fn with_control(mut self, control: OptimizeControl<F>) -> Self {
        self.control = control;
        self
    }
}

impl<P, F: GradminFloat> Default for Adam<P, F> {
    fn default() -> Self {
        Adam::new()
    }
}

impl<O, P, H, F> Solver<O, IterState<P, H, F>> for Adam<P, F>
where
    O: Objective<Param = P, Float = F>,
    P: Clone
        + SerializeAlias
        + DeserializeOwnedAlias
        + GradminAdd<P, P>
        + GradminAdd<F, P>
        + GradminDiv<P, P>
        + GradminMul<F, P>
        + GradminMul<P, P>
        + GradminScaledSub<P, F, P>
        + GradminSqrt
        + GradminZeroLike
        + GradminInfNorm<F>,
    H: Clone + SerializeAlias + DeserializeOwnedAlias,
    F: GradminFloat,
{
    const NAME: &'static str = "ADAM";

    fn init(
        &mut self,
        problem: &mut Problem<O>,
        mut state: IterState<P, H, F>,
    ) -> Result<(IterState<P, H, F>, Option<KV>), Error> {
        let param = state.take_param().ok_or_else(gradmin_error_closure!(
            NotInitialized,
            "Adam: initial parameter vector required"
        ))?;
        let (cost, grad) = problem.cost_and_gradient(&param)?;
        self.m = Some(grad.zero_like());
        self.v = Some(grad.zero_like());
        self.beta1_pow = self.beta1;
        self.beta2_pow = self.beta2;
        Ok((state.param(param).cost(cost).gradient(grad), None))
    }

    fn next_iter(
        &mut self,
        problem: &mut Problem<O>,
        mut state: IterState<P, H, F>,
    ) -> Result<(IterState<P, H, F>, Option<KV>), Error> {
        let xk = state.take_param().ok_or_else(gradmin_error_closure!(
            PotentialBug,
            "Adam: parameter vector missing"
        ))?;
        let grad = state
            .take_grad()
            .map(Result::Ok)
            .unwrap_or_else(|| problem.gradient(&xk))?;

        let m_prev = self.m.take().ok_or_else(gradmin_error_closure!(
            NotInitialized,
            "Adam: `init` not called"
        ))?;
        let v_prev = self.v.take().ok_or_else(gradmin_error_closure!(
            NotInitialized,
            "Adam: `init` not called"
        ))?;

        let one = float!(1.0);
        let m = m_prev
            .mul(&self.beta1)
            .add(&grad.mul(&(one - self.beta1)));
        let v = v_prev
            .mul(&self.beta2)
            .add(&grad.mul(&grad).mul(&(one - self.beta2)));

        let m_hat = m.mul(&(one / (one - self.beta1_pow)));
        let v_hat = v.mul(&(one / (one - self.beta2_pow)));

        let update = m_hat.div(&v_hat.sqrt().add(&self.epsilon));
        let xk1 = xk.scaled_sub(&self.lr, &update);

        self.m = Some(m);
        self.v = Some(v);
        self.beta1_pow = self.beta1_pow * self.beta1;
        self.beta2_pow = self.beta2_pow * self.beta2;

        let (cost, new_grad) = problem.cost_and_gradient(&xk1)?;

        Ok((state.param(xk1).cost(cost).gradient(new_grad), None))
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
