// Copyright 2024-2026 gradmin developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! gradmin core
//!
//! This module contains the traits and types necessary for implementing
//! minimizers and line searches, and tools for observing the state of
//! optimization runs. If you just want to run a minimizer, the entry points
//! are [`optimize`] and [`step_from`].

/// Macros
#[macro_use]
pub mod macros;
/// Configuration of a run
mod control;
/// Error handling
mod errors;
/// Executor
mod executor;
/// Trait alias for float types
mod float;
/// Key value datastructure
mod kv;
/// Math utilities
pub mod math;
/// Observers
pub mod observers;
/// Traits and wrappers for objective functions
mod problem;
/// Definition of the return type of a run
mod result;
/// Trait alias for `serde`s `Serialize` and `DeserializeOwned`
mod serialization;
/// `Solver` trait
mod solver;
/// Iteration state
mod state;
/// Definition of termination reasons
mod termination;

pub use anyhow::Error;
pub use control::OptimizeControl;
pub use errors::GradminError;
pub use executor::{optimize, step_from, Executor};
pub use float::GradminFloat;
pub use kv::KV;
pub use math::*;
pub use problem::{MaskedObjective, Objective, Problem};
pub use result::OptimizeResult;
pub use serialization::{DeserializeOwnedAlias, SerializeAlias};
pub use solver::Solver;
pub use state::{IterState, SearchState, State};
pub use termination::TerminationReason;
