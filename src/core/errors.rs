// Copyright 2024-2026 gradmin developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! # Errors

use thiserror::Error;

/// gradmin error type
#[derive(Debug, Error)]
pub enum GradminError {
    /// Indicates an invalid parameter
    #[error("Invalid parameter: {text:?}")]
    InvalidParameter {
        /// Text
        text: String,
    },

    /// Indicates that the objective function does not expose a gradient
    #[error("Missing gradient: {text:?}")]
    MissingGradient {
        /// Text
        text: String,
    },

    /// Indicates that the objective function does not expose a Hessian
    #[error("Missing Hessian: {text:?}")]
    MissingHessian {
        /// Text
        text: String,
    },

    /// Indicates a degenerate direction context (`g_prev` with zero norm)
    #[error("Degenerate direction: {text:?}")]
    DegenerateDirection {
        /// Text
        text: String,
    },

    /// Indicates that something is not initialized
    #[error("Not initialized: {text:?}")]
    NotInitialized {
        /// Text
        text: String,
    },

    /// For errors which are likely bugs.
    #[error("Potential bug: {text:?}. This is potentially a bug. Please file a report on https://github.com/gradmin-rs/gradmin/issues")]
    PotentialBug {
        /// Text
        text: String,
    },
}
