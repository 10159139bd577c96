// Copyright 2024-2026 gradmin developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use crate::core::math::{GradminDot, GradminSub};
use crate::core::{DeserializeOwnedAlias, Error, GradminFloat, SerializeAlias};
#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// This trait needs to be implemented for every objective function.
///
/// It is required to implement the `cost` method. The `gradient` and
/// `hessian` methods are optional: their default implementations return an
/// error indicating that the respective capability is not available, which
/// gradient-based solvers and derivative-using line-search components
/// surface to the caller.
pub trait Objective {
    /// Type of the parameter vector (the gradient has the same type)
    type Param: Clone + SerializeAlias + DeserializeOwnedAlias;
    /// Type of the Hessian. Can be `()` if not needed.
    type Hessian: Clone + SerializeAlias + DeserializeOwnedAlias;
    /// Precision of floats
    type Float: GradminFloat;

    /// Compute the cost function value at `param`
    fn cost(&self, param: &Self::Param) -> Result<Self::Float, Error>;

    /// Compute the gradient at `param`
    fn gradient(&self, _param: &Self::Param) -> Result<Self::Param, Error> {
        Err(gradmin_error!(
            MissingGradient,
            "Method `gradient` of Objective trait not implemented!"
        ))
    }

    /// Compute the Hessian at `param`
    fn hessian(&self, _param: &Self::Param) -> Result<Self::Hessian, Error> {
        Err(gradmin_error!(
            MissingHessian,
            "Method `hessian` of Objective trait not implemented!"
        ))
    }
}

/// Wraps an objective function and keeps track of how often the cost,
/// gradient and Hessian have been computed.
///
/// A solver evaluates the objective exclusively through this wrapper, so the
/// evaluation counts end up in the [`OptimizeResult`](`crate::core::OptimizeResult`)
/// even when the run terminates early.
#[derive(Clone, Debug, Default)]
pub struct Problem<O> {
    /// Objective function
    pub problem: Option<O>,
    /// Evaluation counts
    pub counts: HashMap<&'static str, u64>,
}

impl<O> Problem<O> {
    /// Construct a `Problem` from an objective function
    pub fn new(problem: O) -> Self {
        Problem {
            problem: Some(problem),
            counts: HashMap::new(),
        }
    }

    /// Evaluate a closure on the wrapped objective and count the evaluation
    /// under `name`.
    pub fn op<T, F: FnOnce(&O) -> Result<T, Error>>(
        &mut self,
        name: &'static str,
        func: F,
    ) -> Result<T, Error> {
        let count = self.counts.entry(name).or_insert(0);
        *count += 1;
        func(self.problem.as_ref().unwrap())
    }
}

impl<O: Objective> Problem<O> {
    /// Compute the cost function value (counts as one `cost_count`)
    pub fn cost(&mut self, param: &O::Param) -> Result<O::Float, Error> {
        self.op("cost_count", |problem| problem.cost(param))
    }

    /// Compute the gradient (counts as one `gradient_count`)
    pub fn gradient(&mut self, param: &O::Param) -> Result<O::Param, Error> {
        self.op("gradient_count", |problem| problem.gradient(param))
    }

    /// Compute the Hessian (counts as one `hessian_count`)
    pub fn hessian(&mut self, param: &O::Param) -> Result<O::Hessian, Error> {
        self.op("hessian_count", |problem| problem.hessian(param))
    }

    /// Compute the directional derivative `gradient(param) . direction`.
    ///
    /// Counts as one gradient evaluation. Fails with `MissingGradient` when
    /// the objective does not expose a gradient.
    pub fn directional_derivative(
        &mut self,
        param: &O::Param,
        direction: &O::Param,
    ) -> Result<O::Float, Error>
    where
        O::Param: GradminDot<O::Param, O::Float>,
    {
        Ok(self.gradient(param)?.dot(direction))
    }

    /// Compute cost and gradient at the same point.
    ///
    /// In addition to the individual counters this increments
    /// `cost_gradient_count`, which records the number of points at which
    /// both value and gradient were requested together. Drivers use this
    /// entry once per accepted step, so the count equals the number of
    /// distinct evaluation points.
    pub fn cost_and_gradient(
        &mut self,
        param: &O::Param,
    ) -> Result<(O::Float, O::Param), Error> {
        let cost = self.cost(param)?;
        let grad = self.gradient(param)?;
        let count = self.counts.entry("cost_gradient_count").or_insert(0);
        *count += 1;
        Ok((cost, grad))
    }
}

/// Composes an objective function over `Vec<F>` with a fixed-coordinate
/// mask: gradient entries of coordinates marked as not free are forced to
/// zero, which pins those coordinates for any gradient-based driver.
///
/// Also carries a `diff` metric on parameter vectors (defaults to `a - b`)
/// and a mutable state slot for pre-pinned coordinates.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub struct MaskedObjective<O: Objective> {
    /// Wrapped objective
    problem: O,
    /// `true` for coordinates free to move
    free: Vec<bool>,
    /// Pinned coordinate state
    state: Option<O::Param>,
}

impl<O: Objective> MaskedObjective<O> {
    /// Constructor
    ///
    /// `free` must hold one entry per coordinate; `false` pins the
    /// corresponding coordinate.
    pub fn new(problem: O, free: Vec<bool>) -> Self {
        MaskedObjective {
            problem,
            free,
            state: None,
        }
    }

    /// Difference metric on parameter vectors
    pub fn diff(&self, a: &O::Param, b: &O::Param) -> O::Param
    where
        O::Param: GradminSub<O::Param, O::Param>,
    {
        a.sub(b)
    }

    /// Returns the stored coordinate state
    pub fn state(&self) -> Option<&O::Param> {
        self.state.as_ref()
    }

    /// Store a coordinate state
    pub fn set_state(&mut self, state: O::Param) {
        self.state = Some(state);
    }
}

impl<O, F> Objective for MaskedObjective<O>
where
    O: Objective<Param = Vec<F>, Float = F>,
    F: GradminFloat,
{
    type Param = Vec<F>;
    type Hessian = O::Hessian;
    type Float = F;

    fn cost(&self, param: &Self::Param) -> Result<Self::Float, Error> {
        self.problem.cost(param)
    }

    fn gradient(&self, param: &Self::Param) -> Result<Self::Param, Error> {
        let mut grad = self.problem.gradient(param)?;
        for (g, free) in grad.iter_mut().zip(self.free.iter()) {
            if !*free {
                *g = F::zero();
            }
        }
        Ok(grad)
    }

    fn hessian(&self, param: &Self::Param) -> Result<Self::Hessian, Error> {
        self.problem.hessian(param)
    }
}
