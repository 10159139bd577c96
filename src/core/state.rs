// Copyright 2024-2026 gradmin developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use crate::core::{GradminFloat, Problem, TerminationReason};
use instant;
#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A pair of current point and current search direction.
///
/// Line-search components operate on a fixed `(x, d)` pair; minimizer
/// drivers construct one per outer iteration. `d` need not be normalized.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub struct SearchState<P> {
    /// Current point
    pub param: P,
    /// Current search direction
    pub direction: P,
}

impl<P> SearchState<P> {
    /// Constructor
    pub fn new(param: P, direction: P) -> Self {
        SearchState { param, direction }
    }
}

/// Minimal interface of an iteration state, used by the
/// [`Executor`](`crate::core::Executor`) and by observers.
pub trait State {
    /// Type of the parameter vector
    type Param: Clone;
    /// Floating point precision
    type Float: GradminFloat;

    /// Construct a new state with default values
    fn new() -> Self;

    /// Update the best-parameter tracking based on the current cost
    fn update(&mut self);

    /// Returns a reference to the current parameter vector
    fn get_param(&self) -> Option<&Self::Param>;

    /// Returns a reference to the best parameter vector found so far
    fn get_best_param(&self) -> Option<&Self::Param>;

    /// Returns the maximum number of iterations
    fn get_max_iters(&self) -> u64;

    /// Returns the current iteration number
    fn get_iter(&self) -> u64;

    /// Increment the iteration number by one
    fn increment_iter(&mut self);

    /// Returns the current cost function value
    fn get_cost(&self) -> Self::Float;

    /// Returns the best cost function value found so far
    fn get_best_cost(&self) -> Self::Float;

    /// Returns the target cost function value
    fn get_target_cost(&self) -> Self::Float;

    /// Copy the function evaluation counts out of a `Problem`
    fn func_counts<O>(&mut self, problem: &Problem<O>);

    /// Returns the function evaluation counts
    fn get_func_counts(&self) -> &HashMap<String, u64>;

    /// Set the elapsed time
    fn time(&mut self, time: Option<instant::Duration>) -> &mut Self;

    /// Returns the elapsed time
    fn get_time(&self) -> Option<instant::Duration>;

    /// Returns the iteration number of the last best parameter vector
    fn get_last_best_iter(&self) -> u64;

    /// Set the termination reason
    #[must_use]
    fn termination_reason(self, reason: TerminationReason) -> Self;

    /// Returns the termination reason
    fn get_termination_reason(&self) -> TerminationReason;

    /// Returns `true` if the run is terminated
    fn terminated(&self) -> bool {
        self.get_termination_reason().terminated()
    }

    /// Returns `true` if the most recent iteration found a new best parameter
    fn is_best(&self) -> bool {
        self.get_last_best_iter() == self.get_iter()
    }
}

/// Maintains the state from iteration to iteration of a solver.
///
/// Keeps track of the parameter vector, gradient, Hessian and inverse
/// Hessian of the current and previous iteration, the best parameter vector
/// found so far, cost function values, iteration numbers, function
/// evaluation counts, elapsed time and the termination reason.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub struct IterState<P, H, F> {
    /// Current parameter vector
    pub param: Option<P>,
    /// Previous parameter vector
    pub prev_param: Option<P>,
    /// Current best parameter vector
    pub best_param: Option<P>,
    /// Previous best parameter vector
    pub prev_best_param: Option<P>,
    /// Current cost function value
    pub cost: F,
    /// Previous cost function value
    pub prev_cost: F,
    /// Current best cost function value
    pub best_cost: F,
    /// Previous best cost function value
    pub prev_best_cost: F,
    /// Target cost function value
    pub target_cost: F,
    /// Current gradient
    pub grad: Option<P>,
    /// Previous gradient
    pub prev_grad: Option<P>,
    /// Current Hessian
    pub hessian: Option<H>,
    /// Previous Hessian
    pub prev_hessian: Option<H>,
    /// Current inverse Hessian
    pub inv_hessian: Option<H>,
    /// Previous inverse Hessian
    pub prev_inv_hessian: Option<H>,
    /// Current iteration
    pub iter: u64,
    /// Iteration number of last best cost
    pub last_best_iter: u64,
    /// Maximum number of iterations
    pub max_iters: u64,
    /// Evaluation counts
    pub counts: HashMap<String, u64>,
    /// Time required so far
    pub time: Option<instant::Duration>,
    /// Reason of termination
    pub termination_reason: TerminationReason,
}

impl<P, H, F> IterState<P, H, F>
where
    P: Clone,
    H: Clone,
    F: GradminFloat,
{
    /// Set the parameter vector. This shifts the stored parameter vector to
    /// the previous parameter vector.
    ///
    /// # Example
    ///
    /// ```
    /// # use gradmin::core::{IterState, State};
    /// # let state: IterState<Vec<f64>, (), f64> = IterState::new();
    /// let state = state.param(vec![1.0f64, 2.0]);
    /// # assert_eq!(state.param.as_ref().unwrap()[0].to_ne_bytes(), 1.0f64.to_ne_bytes());
    /// ```
    #[must_use]
    pub fn param(mut self, param: P) -> Self {
        std::mem::swap(&mut self.prev_param, &mut self.param);
        self.param = Some(param);
        self
    }

    /// Set the gradient. This shifts the stored gradient to the previous
    /// gradient.
    #[must_use]
    pub fn gradient(mut self, gradient: P) -> Self {
        std::mem::swap(&mut self.prev_grad, &mut self.grad);
        self.grad = Some(gradient);
        self
    }

    /// Set the Hessian. This shifts the stored Hessian to the previous
    /// Hessian.
    #[must_use]
    pub fn hessian(mut self, hessian: H) -> Self {
        std::mem::swap(&mut self.prev_hessian, &mut self.hessian);
        self.hessian = Some(hessian);
        self
    }

    /// Set the inverse Hessian. This shifts the stored inverse Hessian to
    /// the previous inverse Hessian.
    #[must_use]
    pub fn inv_hessian(mut self, inv_hessian: H) -> Self {
        std::mem::swap(&mut self.prev_inv_hessian, &mut self.inv_hessian);
        self.inv_hessian = Some(inv_hessian);
        self
    }

    /// Set the current cost function value. This shifts the stored cost to
    /// the previous cost.
    #[must_use]
    pub fn cost(mut self, cost: F) -> Self {
        std::mem::swap(&mut self.prev_cost, &mut self.cost);
        self.cost = cost;
        self
    }

    /// Set the target cost. When this cost is reached, the algorithm stops.
    /// The default is `F::NEG_INFINITY`.
    #[must_use]
    pub fn target_cost(mut self, target_cost: F) -> Self {
        self.target_cost = target_cost;
        self
    }

    /// Set the maximum number of iterations
    ///
    /// # Example
    ///
    /// ```
    /// # use gradmin::core::{IterState, State};
    /// # let state: IterState<Vec<f64>, (), f64> = IterState::new();
    /// let state = state.max_iters(1000);
    /// # assert_eq!(state.max_iters, 1000);
    /// ```
    #[must_use]
    pub fn max_iters(mut self, iters: u64) -> Self {
        self.max_iters = iters;
        self
    }

    /// Returns the previous cost function value
    pub fn get_prev_cost(&self) -> F {
        self.prev_cost
    }

    /// Returns a reference to the gradient
    pub fn get_grad(&self) -> Option<&P> {
        self.grad.as_ref()
    }

    /// Returns a reference to the previous gradient
    pub fn get_prev_grad(&self) -> Option<&P> {
        self.prev_grad.as_ref()
    }

    /// Returns a reference to the inverse Hessian
    pub fn get_inv_hessian(&self) -> Option<&H> {
        self.inv_hessian.as_ref()
    }

    /// Moves the current parameter vector out and replaces it internally
    /// with `None`
    pub fn take_param(&mut self) -> Option<P> {
        self.param.take()
    }

    /// Moves the gradient out and replaces it internally with `None`
    pub fn take_grad(&mut self) -> Option<P> {
        self.grad.take()
    }

    /// Moves the Hessian out and replaces it internally with `None`
    pub fn take_hessian(&mut self) -> Option<H> {
        self.hessian.take()
    }

    /// Moves the inverse Hessian out and replaces it internally with `None`
    pub fn take_inv_hessian(&mut self) -> Option<H> {
        self.inv_hessian.take()
    }
}

impl<P, H, F> State for IterState<P, H, F>
where
    P: Clone,
    H: Clone,
    F: GradminFloat,
{
    type Param = P;
    type Float = F;

    fn new() -> Self {
        IterState {
            param: None,
            prev_param: None,
            best_param: None,
            prev_best_param: None,
            cost: F::infinity(),
            prev_cost: F::infinity(),
            best_cost: F::infinity(),
            prev_best_cost: F::infinity(),
            target_cost: F::neg_infinity(),
            grad: None,
            prev_grad: None,
            hessian: None,
            prev_hessian: None,
            inv_hessian: None,
            prev_inv_hessian: None,
            iter: 0,
            last_best_iter: 0,
            max_iters: std::u64::MAX,
            counts: HashMap::new(),
            time: Some(instant::Duration::new(0, 0)),
            termination_reason: TerminationReason::NotTerminated,
        }
    }

    fn update(&mut self) {
        // A +Inf cost is considered an improvement over a +Inf best cost so
        // that the initial parameter vector is recorded as best.
        if self.cost < self.best_cost
            || (self.cost.is_infinite()
                && self.best_cost.is_infinite()
                && self.cost.is_sign_positive() == self.best_cost.is_sign_positive())
        {
            if let Some(param) = self.param.clone() {
                std::mem::swap(&mut self.prev_best_param, &mut self.best_param);
                self.best_param = Some(param);
            }
            std::mem::swap(&mut self.prev_best_cost, &mut self.best_cost);
            self.best_cost = self.cost;
            self.last_best_iter = self.iter;
        }
    }

    fn get_param(&self) -> Option<&P> {
        self.param.as_ref()
    }

    fn get_best_param(&self) -> Option<&P> {
        self.best_param.as_ref()
    }

    fn get_max_iters(&self) -> u64 {
        self.max_iters
    }

    fn get_iter(&self) -> u64 {
        self.iter
    }

    fn increment_iter(&mut self) {
        self.iter += 1;
    }

    fn get_cost(&self) -> F {
        self.cost
    }

    fn get_best_cost(&self) -> F {
        self.best_cost
    }

    fn get_target_cost(&self) -> F {
        self.target_cost
    }

    fn func_counts<O>(&mut self, problem: &Problem<O>) {
        for (&k, &v) in problem.counts.iter() {
            let count = self.counts.entry(k.to_string()).or_insert(0);
            *count = v
        }
    }

    fn get_func_counts(&self) -> &HashMap<String, u64> {
        &self.counts
    }

    fn time(&mut self, time: Option<instant::Duration>) -> &mut Self {
        self.time = time;
        self
    }

    fn get_time(&self) -> Option<instant::Duration> {
        self.time
    }

    fn get_last_best_iter(&self) -> u64 {
        self.last_best_iter
    }

    fn termination_reason(mut self, reason: TerminationReason) -> Self {
        self.termination_reason = reason;
        self
    }

    fn get_termination_reason(&self) -> TerminationReason {
        self.termination_reason
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    send_sync_test!(iterstate, IterState<Vec<f64>, Vec<Vec<f64>>, f64>);
    send_sync_test!(searchstate, SearchState<Vec<f64>>);

    #[test]
    fn test_param_shift() {
        let state: IterState<Vec<f64>, (), f64> = IterState::new();
        let state = state.param(vec![1.0, 2.0]);
        assert!(state.prev_param.is_none());
        let state = state.param(vec![3.0, 4.0]);
        assert!((state.prev_param.as_ref().unwrap()[0] - 1.0).abs() < f64::EPSILON);
        assert!((state.param.as_ref().unwrap()[0] - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_update_tracks_best() {
        let mut state: IterState<Vec<f64>, (), f64> = IterState::new();
        state = state.param(vec![1.0]).cost(5.0);
        state.update();
        assert!((state.get_best_cost() - 5.0).abs() < f64::EPSILON);
        state = state.param(vec![2.0]).cost(10.0);
        state.update();
        // cost got worse, best stays
        assert!((state.get_best_cost() - 5.0).abs() < f64::EPSILON);
        assert!((state.get_best_param().unwrap()[0] - 1.0).abs() < f64::EPSILON);
        state = state.param(vec![3.0]).cost(1.0);
        state.update();
        assert!((state.get_best_cost() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_termination() {
        let state: IterState<Vec<f64>, (), f64> = IterState::new();
        assert!(!state.terminated());
        let state = state.termination_reason(TerminationReason::MaxItersReached);
        assert!(state.terminated());
    }

    #[test]
    fn test_func_counts() {
        let mut problem = Problem::new(());
        problem.counts.insert("cost_count", 3);
        let mut state: IterState<Vec<f64>, (), f64> = IterState::new();
        state.func_counts(&problem);
        assert_eq!(state.get_func_counts()["cost_count"], 3);
        problem.counts.insert("cost_count", 5);
        state.func_counts(&problem);
        assert_eq!(state.get_func_counts()["cost_count"], 5);
    }
}
