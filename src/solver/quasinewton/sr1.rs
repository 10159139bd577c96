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

/// SR1 method
///
/// Symmetric rank-one updating, applied directly to the inverse Hessian
/// approximation: with `delta = s - H y` the update is
/// `H <- H + (delta delta^T) / (delta . y)`, skipped whenever
/// `|delta . y| < r * |delta| * |y|` to keep the denominator well away from
/// zero. The step length comes from the line search over the bracket
/// `(1, 1e-6, 1)`.
///
/// # References:
///
/// \[0\] Jorge Nocedal and Stephen J. Wright (2006). Numerical Optimization.
/// Springer. ISBN 0-387-30303-0.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub struct SR1<LS, H, F> {
    /// Tolerance of the skipping rule
    r: F,
    /// Initial inverse Hessian
    init_inv_hessian: Option<H>,
    /// Line search
    linesearch: LS,
    /// Control parameters
    control: OptimizeControl<F>,
}

impl<LS, H, F: GradminFloat> SR1<LS, H, F> {
    /// Constructor; `init_inverse_hessian` is typically the identity.
    pub fn new(init_inverse_hessian: H, linesearch: LS) -> Self {
        SR1 {
            r: float!(1e-8),
            init_inv_hessian: Some(init_inverse_hessian),
            linesearch,
            control: OptimizeControl::default(),
        }
    }

    /// Set the skipping rule tolerance `r` (must be in `[0, 1]`).
    pub fn r(mut self, r: F) -> Result<Self, Error> {
        if r < float!(0.0) || r > float!(1.0) {
            Err(gradmin_error!(
                InvalidParameter,
                "SR1: r must be in [0, 1]."
            ))
        } else {
            self.r = r;
            Ok(self)
        }
    }

    /// Replace the control parameters
    #[must_use]
    pub fn with_control(mut self, control: OptimizeControl<F>) -> Self {
        self.control = control;
        self
    }
}

impl<O, LS, P, H, F> Solver<O, IterState<P, H, F>> for SR1<LS, H, F>
where
    O: Objective<Param = P, Hessian = H, Float = F>,
    LS: SearchStrategy<O, P, F> + SerializeAlias,
    P: Clone
        + SerializeAlias
        + DeserializeOwnedAlias
        + GradminAdd<P, P>
        + GradminSub<P, P>
        + GradminDot<P, F>
        + GradminDot<P, H>
        + GradminMul<F, P>
        + GradminNorm<F>
        + GradminInfNorm<F>
        + GradminScaledAdd<P, F, P>,
    H: Clone
        + SerializeAlias
        + DeserializeOwnedAlias
        + GradminDot<P, P>
        + GradminAdd<H, H>
        + GradminMul<F, H>,
    F: GradminFloat,
{
    const NAME: &'static str = "SR1";

    fn init(
        &mut self,
        problem: &mut Problem<O>,
        mut state: IterState<P, H, F>,
    ) -> Result<(IterState<P, H, F>, Option<KV>), Error> {
        let param = state.take_param().ok_or_else(gradmin_error_closure!(
            NotInitialized,
            "SR1: initial parameter vector required"
        ))?;
        let (cost, grad) = problem.cost_and_gradient(&param)?;
        let inv_hessian = self.init_inv_hessian.take().ok_or_else(gradmin_error_closure!(
            NotInitialized,
            "SR1: initial inverse Hessian required"
        ))?;
        Ok((
            state
                .param(param)
                .cost(cost)
                .gradient(grad)
                .inv_hessian(inv_hessian),
            None,
        ))
    }

    fn next_iter(
        &mut self,
        problem: &mut Problem<O>,
        mut state: IterState<P, H, F>,
    ) -> Result<(IterState<P, H, F>, Option<KV>), Error> {
        let xk = state.take_param().ok_or_else(gradmin_error_closure!(
            PotentialBug,
            "SR1: parameter vector missing"
        ))?;
        let prev_grad = state
            .take_grad()
            .map(Result::Ok)
            .unwrap_or_else(|| problem.gradient(&xk))?;
        let inv_hessian = state.take_inv_hessian().ok_or_else(gradmin_error_closure!(
            PotentialBug,
            "SR1: inverse Hessian missing"
        ))?;

        let direction = inv_hessian.dot(&prev_grad).mul(&float!(-1.0));

        let alpha = self.linesearch.search(
            problem,
            &SearchState::new(xk.clone(), direction.clone()),
            AlphaState::new(float!(1.0), float!(1e-6), float!(1.0))?,
        )?;
        if alpha <= float!(0.0) || !alpha.is_finite() {
            return Ok((
                state
                    .param(xk)
                    .gradient(prev_grad)
                    .inv_hessian(inv_hessian)
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

        let hy = inv_hessian.dot(&y);
        let delta = s.sub(&hy);
        let dy: F = delta.dot(&y);

        // rank-one update, skipped when the denominator is too small
        let skipped = dy.abs() < self.r * delta.norm() * y.norm();
        let inv_hessian = if skipped {
            inv_hessian
        } else {
            let dd_outer: H = delta.dot(&delta);
            inv_hessian.add(&dd_outer.mul(&(float!(1.0) / dy)))
        };

        Ok((
            state
                .param(xk1)
                .cost(cost)
                .gradient(grad)
                .inv_hessian(inv_hessian),
            Some(make_kv!("alpha" => alpha; "skipped_update" => skipped;)),
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
    use crate::core::GradminError;
    use crate::solver::linesearch::condition::ArmijoCondition;
    use crate::solver::linesearch::stepsize::GeometricReduction;
    use crate::solver::linesearch::BacktrackingLineSearch;
    use crate::test_trait_impl;

    type Ls = BacktrackingLineSearch<ArmijoCondition<f64>, GeometricReduction<f64>, f64>;

    test_trait_impl!(sr1, SR1<Ls, Vec<Vec<f64>>, f64>);

    #[test]
    fn test_r_range() {
        let condition = ArmijoCondition::new(1e-4f64).unwrap();
        let ls = BacktrackingLineSearch::new(condition, GeometricReduction::default());
        let sr1: SR1<Ls, Vec<Vec<f64>>, f64> =
            SR1::new(vec![vec![1.0, 0.0], vec![0.0, 1.0]], ls);
        assert_error!(
            sr1.r(2.0),
            GradminError,
            "Invalid parameter: \"SR1: r must be in [0, 1].\""
        );
    }
}
