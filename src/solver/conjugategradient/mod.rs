// Copyright 2024-2026 gradmin developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! # Nonlinear conjugate gradient
//!
//! The driver [`NonlinearConjugateGradient`] with pluggable
//! [beta update formulas](`beta`) and [restart strategies](`restart`).

/// Beta update methods
pub mod beta;
/// Nonlinear conjugate gradient driver
mod nlcg;
/// Restart strategies
pub mod restart;

pub use self::beta::{
    DaiYuan, FletcherReeves, FletcherReevesPolakRibiere, HagerZhang, HestenesStiefel, Hybrid,
    HybridOp, LiuStorey, NLCGBetaUpdate, PolakRibiere,
};
pub use self::nlcg::NonlinearConjugateGradient;
pub use self::restart::{NJWSRestart, NeverRestart, RestartStrategy};
