// Copyright 2024-2026 gradmin developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! # `OptimizeResult`
//!
//! Returned by the [`Executor`](`crate::core::Executor`) and by
//! [`optimize`](`crate::core::optimize`). Carries the solution, the final
//! cost and derivatives, the termination status and all evaluation counts.
//! The counts are finalized even when the run terminates early.

use crate::core::TerminationReason;
#[cfg(feature = "serde1")]
use serde::Serialize;

/// Final struct returned by the `run` method of `Executor`.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde1", derive(Serialize))]
pub struct OptimizeResult<P, H, F> {
    /// Solution parameter vector
    pub x: P,
    /// Value of the objective function at the solution
    pub fun: F,
    /// Gradient at the solution, if one was computed
    pub jac: Option<P>,
    /// Hessian at the solution, if one was maintained
    pub hess: Option<H>,
    /// Inverse Hessian approximation at the solution, if one was maintained
    pub hess_inv: Option<H>,
    /// Whether the run terminated successfully
    pub success: bool,
    /// Termination status
    pub status: TerminationReason,
    /// Description of the termination
    pub message: String,
    /// Maximum constraint violation (always zero; unconstrained)
    pub maxcv: F,
    /// Number of iterations performed
    pub nit: u64,
    /// Number of evaluations of the objective function
    pub nfev: u64,
    /// Number of evaluations of the gradient
    pub njev: u64,
    /// Number of evaluations of the Hessian
    pub nhev: u64,
    /// Number of points at which value and gradient were evaluated together
    pub nufg: u64,
}

impl<P, H, F> std::fmt::Display for OptimizeResult<P, H, F>
where
    F: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        writeln!(f, "OptimizeResult:")?;
        writeln!(f, "    success:     {}", self.success)?;
        writeln!(f, "    status:      {}", self.message)?;
        writeln!(f, "    fun:         {}", self.fun)?;
        writeln!(f, "    nit:         {}", self.nit)?;
        writeln!(f, "    nfev:        {}", self.nfev)?;
        writeln!(f, "    njev:        {}", self.njev)?;
        writeln!(f, "    nhev:        {}", self.nhev)?;
        writeln!(f, "    nufg:        {}", self.nufg)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    send_sync_test!(optimize_result, OptimizeResult<Vec<f64>, Vec<Vec<f64>>, f64>);

    #[test]
    fn test_display() {
        let result: OptimizeResult<Vec<f64>, (), f64> = OptimizeResult {
            x: vec![1.0, 1.0],
            fun: 0.0,
            jac: None,
            hess: None,
            hess_inv: None,
            success: true,
            status: TerminationReason::TargetToleranceReached,
            message: TerminationReason::TargetToleranceReached.text().to_string(),
            maxcv: 0.0,
            nit: 10,
            nfev: 20,
            njev: 11,
            nhev: 0,
            nufg: 10,
        };
        let text = format!("{}", result);
        assert!(text.contains("success:     true"));
        assert!(text.contains("Target tolerance reached"));
    }
}
