// Copyright 2024-2026 gradmin developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! End-to-end runs of the drivers on the test functions.

use crate::core::{optimize, step_from, OptimizeControl, SearchState, TerminationReason};
use crate::solver::adam::Adam;
use crate::solver::conjugategradient::{
    FletcherReeves, NeverRestart, NonlinearConjugateGradient,
};
use crate::solver::gradientdescent::SteepestDescent;
use crate::solver::linesearch::condition::{ArmijoCondition, StrongWolfeCondition};
use crate::solver::linesearch::stepsize::{CubicInterpolation, GeometricReduction, GoldenSection};
use crate::solver::linesearch::{BacktrackingLineSearch, ZoomLineSearch};
use crate::solver::quasinewton::{BFGS, LBFGS, SR1};
use crate::testfunctions::{Quadratic, Rosenbrock};
use approx::assert_relative_eq;

fn eye2() -> Vec<Vec<f64>> {
    vec![vec![1.0, 0.0], vec![0.0, 1.0]]
}

#[test]
fn test_nlcg_rosenbrock_strong_wolfe_backtracking() {
    // Fletcher-Reeves CG from (-1.3, 1.8) with a strong Wolfe condition and
    // geometric backtracking finds the minimum of the Rosenbrock valley.
    let condition = StrongWolfeCondition::new(1e-4, 0.9).unwrap();
    let linesearch = BacktrackingLineSearch::new(condition, GeometricReduction::default());
    let solver = NonlinearConjugateGradient::new(
        linesearch,
        FletcherReeves::new(),
        NeverRestart::new(),
    );

    let control = OptimizeControl::new().max_iterations(1000).gtol(1e-6);
    let result = optimize(
        Rosenbrock::default(),
        solver,
        SearchState::new(vec![-1.3, 1.8], vec![0.0, 0.0]),
        &control,
    )
    .unwrap();

    assert!(result.success);
    assert_relative_eq!(result.x[0], 1.0, epsilon = 1e-4);
    assert_relative_eq!(result.x[1], 1.0, epsilon = 1e-4);
    assert!(result.nfev > 0 && result.njev > 0);
}

#[test]
fn test_lbfgs_rosenbrock_armijo_golden() {
    // L-BFGS from (-1.3, 1.8) with an Armijo condition and golden-section
    // backtracking.
    let condition = ArmijoCondition::new(0.1).unwrap();
    let linesearch = BacktrackingLineSearch::new(condition, GoldenSection::new());
    let solver = LBFGS::new(linesearch, 5);

    let control = OptimizeControl::new().max_iterations(1000).gtol(1e-6);
    let result = optimize(
        Rosenbrock::default(),
        solver,
        SearchState::new(vec![-1.3, 1.8], vec![0.0, 0.0]),
        &control,
    )
    .unwrap();

    assert!(result.success);
    assert_relative_eq!(result.x[0], 1.0, epsilon = 1e-5);
    assert_relative_eq!(result.x[1], 1.0, epsilon = 1e-5);
}

#[test]
fn test_nlcg_quadratic_converges_quickly() {
    // Fletcher-Reeves with a near-exact line search minimizes a strictly
    // convex two-dimensional quadratic in a couple of conjugate steps.
    let linesearch = ZoomLineSearch::new(CubicInterpolation::new(), 1e-4, 0.9).unwrap();
    let solver = NonlinearConjugateGradient::new(
        linesearch,
        FletcherReeves::new(),
        NeverRestart::new(),
    );

    let control = OptimizeControl::new().max_iterations(50).gtol(1e-6);
    let result = optimize(
        Quadratic::new(vec![1.0, 10.0]),
        solver,
        SearchState::new(vec![4.0, 1.0], vec![0.0, 0.0]),
        &control,
    )
    .unwrap();

    assert!(result.success);
    assert!(result.nit <= 5);
    assert_relative_eq!(result.x[0], 0.0, epsilon = 1e-4);
    assert_relative_eq!(result.x[1], 0.0, epsilon = 1e-4);
}

#[test]
fn test_steepest_descent_quadratic() {
    let condition = ArmijoCondition::new(1e-4).unwrap();
    let linesearch = BacktrackingLineSearch::new(condition, GeometricReduction::default());
    let solver = SteepestDescent::new(linesearch);

    let control = OptimizeControl::new().max_iterations(5000).gtol(1e-6);
    let result = optimize(
        Quadratic::new(vec![1.0, 2.0]),
        solver,
        SearchState::new(vec![3.0, -2.0], vec![0.0, 0.0]),
        &control,
    )
    .unwrap();

    assert!(result.success);
    assert_relative_eq!(result.x[0], 0.0, epsilon = 1e-5);
    assert_relative_eq!(result.x[1], 0.0, epsilon = 1e-5);
}

#[test]
fn test_bfgs_rosenbrock() {
    // the curvature half of the strong Wolfe pair keeps y.s positive, which
    // keeps the inverse Hessian approximation positive definite
    let condition = StrongWolfeCondition::new(1e-4, 0.9).unwrap();
    let linesearch = BacktrackingLineSearch::new(condition, GeometricReduction::default());
    let solver = BFGS::new(eye2(), linesearch);

    let control = OptimizeControl::new().max_iterations(1000).gtol(1e-6);
    let result = optimize(
        Rosenbrock::default(),
        solver,
        SearchState::new(vec![-1.3, 1.8], vec![0.0, 0.0]),
        &control,
    )
    .unwrap();

    assert!(result.success);
    assert_relative_eq!(result.x[0], 1.0, epsilon = 1e-4);
    assert_relative_eq!(result.x[1], 1.0, epsilon = 1e-4);
    // the maintained inverse Hessian approximation ends up in the result
    assert!(result.hess_inv.is_some());
}

#[test]
fn test_sr1_quadratic() {
    let condition = ArmijoCondition::new(1e-4).unwrap();
    let linesearch = BacktrackingLineSearch::new(condition, GeometricReduction::default());
    let solver = SR1::new(eye2(), linesearch);

    let control = OptimizeControl::new().max_iterations(2000).gtol(1e-6);
    let result = optimize(
        Quadratic::new(vec![1.0, 10.0]),
        solver,
        SearchState::new(vec![2.0, 1.0], vec![0.0, 0.0]),
        &control,
    )
    .unwrap();

    assert!(result.success);
    assert_relative_eq!(result.x[0], 0.0, epsilon = 1e-4);
    assert_relative_eq!(result.x[1], 0.0, epsilon = 1e-4);
}

#[test]
fn test_adam_quadratic() {
    // ADAM crawls with its default learning rate; give it a larger one.
    // With a fixed learning rate it orbits the minimum rather than pinning
    // it down, so only proximity is asserted.
    let solver: Adam<Vec<f64>, f64> = Adam::new().with_lr(0.05);

    let control = OptimizeControl::new().max_iterations(2000);
    let result = optimize(
        Quadratic::new(vec![1.0, 2.0]),
        solver,
        SearchState::new(vec![1.0, -1.0], vec![0.0, 0.0]),
        &control,
    )
    .unwrap();

    assert!(result.fun < 1e-2);
    assert!(result.x[0].abs() < 0.1);
    assert!(result.x[1].abs() < 0.1);
}

#[test]
fn test_step_from_zero_steps_keeps_input() {
    let condition = ArmijoCondition::new(1e-4).unwrap();
    let linesearch = BacktrackingLineSearch::new(condition, GeometricReduction::default());
    let solver = SteepestDescent::new(linesearch);

    let x = step_from(
        Quadratic::new(vec![1.0, 1.0]),
        solver,
        SearchState::new(vec![3.0, -2.0], vec![0.0, 0.0]),
        0,
    )
    .unwrap();
    assert_relative_eq!(x[0], 3.0, epsilon = f64::EPSILON);
    assert_relative_eq!(x[1], -2.0, epsilon = f64::EPSILON);
}

#[test]
fn test_step_from_advances() {
    let condition = ArmijoCondition::new(1e-4).unwrap();
    let linesearch = BacktrackingLineSearch::new(condition, GeometricReduction::default());
    let solver = SteepestDescent::new(linesearch);

    let x = step_from(
        Quadratic::new(vec![1.0, 1.0]),
        solver,
        SearchState::new(vec![3.0, -2.0], vec![0.0, 0.0]),
        3,
    )
    .unwrap();
    // three descent steps strictly reduce the distance to the origin
    let norm: f64 = x.iter().map(|v| v * v).sum::<f64>().sqrt();
    assert!(norm < (9.0f64 + 4.0).sqrt());
}

#[test]
fn test_counters_reported_in_result() {
    let condition = ArmijoCondition::new(1e-4).unwrap();
    let linesearch = BacktrackingLineSearch::new(condition, GeometricReduction::default());
    let solver = SteepestDescent::new(linesearch);

    let control = OptimizeControl::new().max_iterations(3);
    let result = optimize(
        Rosenbrock::default(),
        solver,
        SearchState::new(vec![-1.3, 1.8], vec![0.0, 0.0]),
        &control,
    )
    .unwrap();

    assert_eq!(result.status, TerminationReason::MaxItersReached);
    assert!(!result.success);
    // counters are finalized even though the run hit the iteration cap:
    // one fused evaluation in init plus one per iteration
    assert_eq!(result.nufg, 1 + result.nit);
    assert!(result.nfev >= result.nufg);
    assert!(result.njev >= result.nufg);
    assert_eq!(result.nhev, 0);
}

#[test]
fn test_line_search_failure_is_reported() {
    use crate::core::{Error, Objective};

    // An objective whose reported gradient disagrees with its cost: every
    // "descent" direction actually ascends, so no trial step can satisfy
    // the Armijo bound and the line search shrinks the step to zero.
    #[derive(Clone)]
    struct Mismatched {}

    impl Objective for Mismatched {
        type Param = Vec<f64>;
        type Hessian = ();
        type Float = f64;

        fn cost(&self, p: &Self::Param) -> Result<Self::Float, Error> {
            Ok(p[0] * p[0])
        }

        fn gradient(&self, _p: &Self::Param) -> Result<Self::Param, Error> {
            Ok(vec![1.0, 0.0])
        }
    }

    let condition = ArmijoCondition::new(0.5).unwrap();
    let linesearch = BacktrackingLineSearch::new(condition, GeometricReduction::default())
        .with_control(OptimizeControl::default().max_iterations(80));
    let solver = SteepestDescent::new(linesearch);

    let control = OptimizeControl::new().max_iterations(10);
    let result = optimize(
        Mismatched {},
        solver,
        SearchState::new(vec![0.0, 0.0], vec![0.0, 0.0]),
        &control,
    )
    .unwrap();

    assert_eq!(result.status, TerminationReason::LineSearchFailed);
    assert!(!result.success);
}

#[test]
fn test_verbose_header_and_progress() {
    use crate::core::observers::{Observe, ObserverMode, ProgressLogger};
    use crate::core::{Executor, IterState, KV};

    // drive the progress logger directly; its output goes to stdout
    let mut logger = ProgressLogger::new();
    let kv = KV::new();
    Observe::<IterState<Vec<f64>, (), f64>>::observe_init(&mut logger, "L-BFGS", &kv).unwrap();

    let condition = ArmijoCondition::new(1e-4).unwrap();
    let linesearch = BacktrackingLineSearch::new(condition, GeometricReduction::default());
    let solver = SteepestDescent::new(linesearch);
    let result = Executor::new(Quadratic::new(vec![1.0, 2.0]), solver)
        .configure(|config: IterState<Vec<f64>, Vec<Vec<f64>>, f64>| {
            config.param(vec![1.0, 1.0]).max_iters(2)
        })
        .add_observer(ProgressLogger::new(), ObserverMode::Always)
        .ctrlc(false)
        .run()
        .unwrap();
    assert_eq!(result.nit, 2);
}

#[test]
fn test_wolfe_step_decreases_cost() {
    // For a descent direction, any accepted strong Wolfe step strictly
    // decreases the cost.
    use crate::core::{Objective, Problem};
    use crate::solver::linesearch::{AlphaState, SearchStrategy};

    let problem_def = Rosenbrock::default();
    let x = vec![-1.3, 1.8];
    let g = problem_def.gradient(&x).unwrap();
    let d: Vec<f64> = g.iter().map(|v| -v).collect();

    let condition = StrongWolfeCondition::new(1e-4, 0.9).unwrap();
    let mut ls = BacktrackingLineSearch::new(condition, GeometricReduction::default());
    let mut problem = Problem::new(problem_def.clone());
    let alpha = ls
        .search(
            &mut problem,
            &SearchState::new(x.clone(), d.clone()),
            AlphaState::new(1.0, 1e-6, 10.0).unwrap(),
        )
        .unwrap();
    assert!(alpha > 0.0);

    let x_new: Vec<f64> = x
        .iter()
        .zip(d.iter())
        .map(|(xi, di)| xi + alpha * di)
        .collect();
    assert!(problem_def.cost(&x_new).unwrap() < problem_def.cost(&x).unwrap());
}
