// Copyright 2024-2026 gradmin developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! # Observers
//!
//! gradmin offers an interface to observe the state of a run at
//! initialization as well as after every iteration. This includes the
//! parameter vector, iteration number, cost values and solver-specific
//! metrics. The interface can be used to implement loggers or to send the
//! information to a storage.
//!
//! The observer [`SlogLogger`] logs progress to the terminal via `slog`
//! (requires the default-on `slog-logger` feature). The observer
//! [`ProgressLogger`] prints the classic fixed-width progress table and is
//! attached automatically by [`optimize`](`crate::core::optimize`) when
//! `OptimizeControl::verbose` is set.
//!
//! For each observer it can be defined how often it will observe the
//! progress of the solver via [`ObserverMode`]: `Always`, `Never`, `NewBest`
//! or `Every(i)`.
//!
//! Custom observers implement the [`Observe`] trait.

mod progress;
#[cfg(feature = "slog-logger")]
mod slog_logger;

pub use progress::ProgressLogger;
#[cfg(feature = "slog-logger")]
pub use slog_logger::SlogLogger;

use crate::core::{Error, State, KV};
use std::sync::{Arc, Mutex};

/// An interface which every observer is required to implement
pub trait Observe<I> {
    /// Called once after initialization of the solver.
    ///
    /// Has access to the name of the solver via `name` and to a key-value
    /// store `kv` with entries specific for each solver.
    fn observe_init(&mut self, _name: &str, _kv: &KV) -> Result<(), Error> {
        Ok(())
    }

    /// Called at every iteration of the solver.
    ///
    /// Has access to the current `state` of the solver and to a key-value
    /// store `kv` with entries specific for each solver.
    fn observe_iter(&mut self, _state: &I, _kv: &KV) -> Result<(), Error> {
        Ok(())
    }
}

type ObserversVec<I> = Vec<(Arc<Mutex<dyn Observe<I>>>, ObserverMode)>;

/// Container for observers.
///
/// This type also implements [`Observe`] and therefore can be used like a
/// single observer. Each observer has an [`ObserverMode`] attached which
/// indicates when the observer will be called.
#[derive(Clone, Default)]
pub struct Observers<I> {
    /// Vector of `Observe`rs with the corresponding `ObserverMode`
    observers: ObserversVec<I>,
}

impl<I> Observers<I> {
    /// Construct a new empty `Observers` instance.
    pub fn new() -> Self {
        Observers { observers: vec![] }
    }

    /// Add another observer with a corresponding [`ObserverMode`].
    pub fn push<OBS: Observe<I> + 'static>(
        &mut self,
        observer: OBS,
        mode: ObserverMode,
    ) -> &mut Self {
        self.observers.push((Arc::new(Mutex::new(observer)), mode));
        self
    }

    /// Returns true if there are no observers stored.
    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

/// Implementing [`Observe`] for [`Observers`] allows using it like a single
/// observer. It loops over all stored observers, checks if the conditions
/// for observing are met and calls the actual observers if required.
impl<I: State> Observe<I> for Observers<I> {
    fn observe_init(&mut self, name: &str, kv: &KV) -> Result<(), Error> {
        for l in self.observers.iter() {
            l.0.lock().unwrap().observe_init(name, kv)?
        }
        Ok(())
    }

    fn observe_iter(&mut self, state: &I, kv: &KV) -> Result<(), Error> {
        for l in self.observers.iter_mut() {
            let iter = state.get_iter();
            let observer = &mut l.0.lock().unwrap();
            match l.1 {
                ObserverMode::Always => observer.observe_iter(state, kv),
                ObserverMode::Every(i) if iter % i == 0 => observer.observe_iter(state, kv),
                ObserverMode::NewBest if state.is_best() => observer.observe_iter(state, kv),
                ObserverMode::Never | ObserverMode::Every(_) | ObserverMode::NewBest => Ok(()),
            }?
        }
        Ok(())
    }
}

/// Indicates when to call an observer.
///
/// `Always` calls the observer in every iteration, `Every(X)` calls the
/// observer every X iterations, `NewBest` calls the observer only when a new
/// best parameter vector is found and `Never` deactivates the observer.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ObserverMode {
    /// Never call the observer
    Never,
    /// Call observer in every iteration
    Always,
    /// Call observer every N iterations
    Every(u64),
    /// Call observer when new best is found
    NewBest,
}

impl Default for ObserverMode {
    /// The default for `ObserverMode` is `Always`
    fn default() -> ObserverMode {
        ObserverMode::Always
    }
}
