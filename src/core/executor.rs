// Copyright 2024-2026 gradmin developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use crate::core::math::GradminInfNorm;
use crate::core::observers::{Observe, ObserverMode, Observers, ProgressLogger};
use crate::core::{
    DeserializeOwnedAlias, Error, GradminFloat, IterState, Objective, OptimizeControl,
    OptimizeResult, Problem, SearchState, SerializeAlias, Solver, State, TerminationReason, KV,
};
use instant;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Executes a solver
pub struct Executor<O, S, I> {
    /// Solver
    solver: S,
    /// Problem (objective function behind the counting wrapper)
    pub problem: Problem<O>,
    /// State
    pub(crate) state: Option<I>,
    /// Storage for observers
    observers: Observers<I>,
    /// Indicates whether Ctrl-C functionality should be active or not
    ctrlc: bool,
    /// Indicates whether to time execution or not
    timer: bool,
}

impl<O, S, I> Executor<O, S, I>
where
    S: Solver<O, I>,
    I: State,
{
    /// Create a new executor from an objective function and a `solver`
    pub fn new(problem: O, solver: S) -> Self {
        Executor {
            solver,
            problem: Problem::new(problem),
            state: Some(I::new()),
            observers: Observers::new(),
            ctrlc: true,
            timer: true,
        }
    }

    /// Configure the initial state
    #[must_use]
    pub fn configure<F: FnOnce(I) -> I>(mut self, init: F) -> Self {
        let state = self.state.take().unwrap();
        let state = init(state);
        self.state = Some(state);
        self
    }

    /// Attach an observer to the executor
    #[must_use]
    pub fn add_observer<OBS: Observe<I> + 'static>(
        mut self,
        observer: OBS,
        mode: ObserverMode,
    ) -> Self {
        self.observers.push(observer, mode);
        self
    }

    /// Turn Ctrl-C handling on or off (default: on)
    #[must_use]
    pub fn ctrlc(mut self, ctrlc: bool) -> Self {
        self.ctrlc = ctrlc;
        self
    }

    /// Turn timer on or off (default: on)
    #[must_use]
    pub fn timer(mut self, timer: bool) -> Self {
        self.timer = timer;
        self
    }
}

impl<O, S, P, H, F> Executor<O, S, IterState<P, H, F>>
where
    O: Objective<Param = P, Hessian = H, Float = F>,
    S: Solver<O, IterState<P, H, F>>,
    P: Clone + SerializeAlias + DeserializeOwnedAlias,
    H: Clone + SerializeAlias + DeserializeOwnedAlias,
    F: GradminFloat,
{
    /// Run the executor and return an [`OptimizeResult`].
    ///
    /// Evaluation counts are finalized into the result even when the run
    /// terminates early.
    pub fn run(mut self) -> Result<OptimizeResult<P, H, F>, Error> {
        let total_time = if self.timer {
            Some(instant::Instant::now())
        } else {
            None
        };

        let state = self.state.take().unwrap();

        let running = Arc::new(AtomicBool::new(true));

        if self.ctrlc {
            #[cfg(feature = "ctrlc")]
            {
                // Any run after the first one within the same process will
                // not be able to register another handler; treat that as
                // success and keep going.
                let r = running.clone();
                match ctrlc::set_handler(move || {
                    r.store(false, Ordering::SeqCst);
                }) {
                    Err(ctrlc::Error::MultipleHandlers) => Ok(()),
                    r => r,
                }?;
            }
        }

        let (mut state, kv) = self.solver.init(&mut self.problem, state)?;
        state.update();

        if !self.observers.is_empty() {
            let mut logs = make_kv!("max_iters" => state.get_max_iters(););
            if let Some(kv) = kv {
                logs = logs.merge(kv);
            }
            self.observers.observe_init(S::NAME, &logs)?;
        }

        state.func_counts(&self.problem);

        while running.load(Ordering::SeqCst) {
            // Check the stopping criteria only if nothing inside
            // `next_iter()` terminated the run already; evaluating them
            // unconditionally would overwrite that termination reason.
            state = if !state.terminated() {
                let term = self.solver.terminate_internal(&state);
                state.termination_reason(term)
            } else {
                state
            };
            if state.terminated() {
                break;
            }

            let start = if self.timer {
                Some(instant::Instant::now())
            } else {
                None
            };

            let (state_t, kv) = self.solver.next_iter(&mut self.problem, state)?;
            state = state_t;

            state.func_counts(&self.problem);

            let duration = start.map(|start| start.elapsed());

            state.update();

            if !self.observers.is_empty() {
                let mut log = kv.unwrap_or_else(KV::new);
                if let Some(duration) = duration {
                    log = log.merge(make_kv!("time" => duration.as_secs_f64();));
                }
                self.observers.observe_iter(&state, &log)?;
            }

            state.increment_iter();

            if self.timer {
                if let Some(total) = total_time {
                    state.time(Some(total.elapsed()));
                }
            }

            // Check if termination occurred inside next_iter()
            if state.terminated() {
                break;
            }
        }

        // In case the loop stopped prematurely and `termination_reason` is
        // still `NotTerminated`, someone must have pulled the handbrake.
        if state.get_iter() < state.get_max_iters() && !state.terminated() {
            state = state.termination_reason(TerminationReason::Aborted);
        }

        let reason = state.get_termination_reason();
        let counts = state.get_func_counts().clone();
        let x = state.take_param().ok_or_else(gradmin_error_closure!(
            PotentialBug,
            "`Executor`: no parameter vector in state"
        ))?;

        Ok(OptimizeResult {
            x,
            fun: state.get_cost(),
            jac: state.take_grad(),
            hess: state.take_hessian(),
            hess_inv: state.take_inv_hessian(),
            success: reason.success(),
            status: reason,
            message: reason.text().to_string(),
            maxcv: float!(0.0),
            nit: state.get_iter(),
            nfev: counts.get("cost_count").copied().unwrap_or(0),
            njev: counts.get("gradient_count").copied().unwrap_or(0),
            nhev: counts.get("hessian_count").copied().unwrap_or(0),
            nufg: counts.get("cost_gradient_count").copied().unwrap_or(0),
        })
    }
}

/// Minimize an objective function with the given driver.
///
/// Sets the iteration cap from `control`, attaches the verbose progress
/// observer when `control.verbose` is set and runs the driver from
/// `initial_state.param` (drivers choose their own initial direction).
pub fn optimize<O, S, P, H, F>(
    problem: O,
    solver: S,
    initial_state: SearchState<P>,
    control: &OptimizeControl<F>,
) -> Result<OptimizeResult<P, H, F>, Error>
where
    O: Objective<Param = P, Hessian = H, Float = F>,
    S: Solver<O, IterState<P, H, F>>,
    P: Clone + SerializeAlias + DeserializeOwnedAlias + GradminInfNorm<F>,
    H: Clone + SerializeAlias + DeserializeOwnedAlias,
    F: GradminFloat,
{
    let SearchState { param, .. } = initial_state;
    let mut executor = Executor::new(problem, solver)
        .configure(|config| config.param(param).max_iters(control.max_iterations));
    if control.verbose {
        executor = executor.add_observer(ProgressLogger::new(), ObserverMode::Always);
    }
    executor.run()
}

/// Run at most `n_steps` outer steps of the driver from the supplied state
/// and return the current parameter vector.
///
/// With `n_steps == 0` the input parameter vector is returned unchanged and
/// the objective function is never evaluated.
pub fn step_from<O, S, P, H, F>(
    problem: O,
    solver: S,
    state: SearchState<P>,
    n_steps: u64,
) -> Result<P, Error>
where
    O: Objective<Param = P, Hessian = H, Float = F>,
    S: Solver<O, IterState<P, H, F>>,
    P: Clone + SerializeAlias + DeserializeOwnedAlias,
    H: Clone + SerializeAlias + DeserializeOwnedAlias,
    F: GradminFloat,
{
    if n_steps == 0 {
        return Ok(state.param);
    }
    let result = Executor::new(problem, solver)
        .configure(|config| config.param(state.param).max_iters(n_steps))
        .run()?;
    Ok(result.x)
}
