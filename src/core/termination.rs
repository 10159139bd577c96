// Copyright 2024-2026 gradmin developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

/// Reasons for optimization algorithms to stop
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub enum TerminationReason {
    /// The optimization algorithm is not terminated
    NotTerminated,
    /// Reached maximum number of iterations
    MaxItersReached,
    /// Reached target cost function value
    TargetCostReached,
    /// Reached target tolerance on the gradient norm
    TargetToleranceReached,
    /// No change in cost function value
    NoChangeInCost,
    /// The line search returned a zero or non-finite step length
    LineSearchFailed,
    /// Algorithm aborted
    Aborted,
}

impl TerminationReason {
    /// Returns `true` if a solver terminated and `false` otherwise.
    ///
    /// # Example
    ///
    /// ```
    /// use gradmin::core::TerminationReason;
    ///
    /// assert!(TerminationReason::MaxItersReached.terminated());
    /// assert!(!TerminationReason::NotTerminated.terminated());
    /// ```
    pub fn terminated(self) -> bool {
        !matches!(self, TerminationReason::NotTerminated)
    }

    /// Returns `true` if the reason indicates a successful run.
    pub fn success(self) -> bool {
        matches!(
            self,
            TerminationReason::TargetCostReached
                | TerminationReason::TargetToleranceReached
                | TerminationReason::NoChangeInCost
        )
    }

    /// Returns a textual representation of what happened.
    pub fn text(&self) -> &str {
        match *self {
            TerminationReason::NotTerminated => "Not terminated",
            TerminationReason::MaxItersReached => "Maximum number of iterations reached",
            TerminationReason::TargetCostReached => "Target cost value reached",
            TerminationReason::TargetToleranceReached => "Target tolerance reached",
            TerminationReason::NoChangeInCost => "No change in cost function value",
            TerminationReason::LineSearchFailed => "Line search failed",
            TerminationReason::Aborted => "Optimization aborted",
        }
    }
}

impl std::fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.text())
    }
}

impl Default for TerminationReason {
    fn default() -> Self {
        TerminationReason::NotTerminated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    send_sync_test!(termination_reason, TerminationReason);

    #[test]
    fn test_success() {
        assert!(TerminationReason::TargetToleranceReached.success());
        assert!(TerminationReason::TargetCostReached.success());
        assert!(!TerminationReason::MaxItersReached.success());
        assert!(!TerminationReason::LineSearchFailed.success());
        assert!(!TerminationReason::NotTerminated.success());
    }
}
