// Copyright 2024-2026 gradmin developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! # Test functions
//!
//! Classic smooth test functions with analytic derivatives, usable directly
//! as [`Objective`](`crate::core::Objective`)s in examples and tests.

use crate::core::{Error, Objective};

/// Two-dimensional Rosenbrock function
///
/// `f(x, y) = (a - x)^2 + b (y - x^2)^2`
///
/// The global minimum `f = 0` is at `(a, a^2)`.
pub fn rosenbrock_2d(param: &[f64], a: f64, b: f64) -> f64 {
    (a - param[0]).powi(2) + b * (param[1] - param[0].powi(2)).powi(2)
}

/// Gradient of the two-dimensional Rosenbrock function
pub fn rosenbrock_2d_derivative(param: &[f64], a: f64, b: f64) -> Vec<f64> {
    let (x, y) = (param[0], param[1]);
    vec![
        -2.0 * (a - x) - 4.0 * b * x * (y - x.powi(2)),
        2.0 * b * (y - x.powi(2)),
    ]
}

/// Hessian of the two-dimensional Rosenbrock function
pub fn rosenbrock_2d_hessian(param: &[f64], _a: f64, b: f64) -> Vec<Vec<f64>> {
    let (x, y) = (param[0], param[1]);
    vec![
        vec![2.0 - 4.0 * b * y + 12.0 * b * x.powi(2), -4.0 * b * x],
        vec![-4.0 * b * x, 2.0 * b],
    ]
}

/// The two-dimensional Rosenbrock function as an objective
#[derive(Clone, Debug)]
pub struct Rosenbrock {
    /// Parameter `a` (minimum at `(a, a^2)`)
    pub a: f64,
    /// Parameter `b` (valley steepness)
    pub b: f64,
}

impl Default for Rosenbrock {
    fn default() -> Self {
        Rosenbrock { a: 1.0, b: 100.0 }
    }
}

impl Objective for Rosenbrock {
    type Param = Vec<f64>;
    type Hessian = Vec<Vec<f64>>;
    type Float = f64;

    fn cost(&self, param: &Self::Param) -> Result<Self::Float, Error> {
        Ok(rosenbrock_2d(param, self.a, self.b))
    }

    fn gradient(&self, param: &Self::Param) -> Result<Self::Param, Error> {
        Ok(rosenbrock_2d_derivative(param, self.a, self.b))
    }

    fn hessian(&self, param: &Self::Param) -> Result<Self::Hessian, Error> {
        Ok(rosenbrock_2d_hessian(param, self.a, self.b))
    }
}

/// Axis-aligned convex quadratic `f(x) = sum_i w_i x_i^2`
///
/// With all weights equal to one this is the sphere function.
#[derive(Clone, Debug)]
pub struct Quadratic {
    /// Per-coordinate weights (must be positive for convexity)
    pub weights: Vec<f64>,
}

impl Quadratic {
    /// Constructor
    pub fn new(weights: Vec<f64>) -> Self {
        Quadratic { weights }
    }
}

impl Objective for Quadratic {
    type Param = Vec<f64>;
    type Hessian = Vec<Vec<f64>>;
    type Float = f64;

    fn cost(&self, param: &Self::Param) -> Result<Self::Float, Error> {
        Ok(param
            .iter()
            .zip(self.weights.iter())
            .map(|(x, w)| w * x * x)
            .sum())
    }

    fn gradient(&self, param: &Self::Param) -> Result<Self::Param, Error> {
        Ok(param
            .iter()
            .zip(self.weights.iter())
            .map(|(x, w)| 2.0 * w * x)
            .collect())
    }

    fn hessian(&self, param: &Self::Param) -> Result<Self::Hessian, Error> {
        let n = param.len();
        Ok((0..n)
            .map(|i| {
                (0..n)
                    .map(|j| if i == j { 2.0 * self.weights[i] } else { 0.0 })
                    .collect()
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_rosenbrock_values() {
        assert_relative_eq!(
            rosenbrock_2d(&[1.0, 1.0], 1.0, 100.0),
            0.0,
            epsilon = f64::EPSILON
        );
        assert_relative_eq!(
            rosenbrock_2d(&[0.0, 0.0], 1.0, 100.0),
            1.0,
            epsilon = f64::EPSILON
        );
    }

    #[test]
    fn test_rosenbrock_gradient() {
        let g = rosenbrock_2d_derivative(&[1.0, 1.0], 1.0, 100.0);
        assert_relative_eq!(g[0], 0.0, epsilon = f64::EPSILON);
        assert_relative_eq!(g[1], 0.0, epsilon = f64::EPSILON);

        let g = rosenbrock_2d_derivative(&[0.0, 0.0], 1.0, 100.0);
        assert_relative_eq!(g[0], -2.0, epsilon = f64::EPSILON);
        assert_relative_eq!(g[1], 0.0, epsilon = f64::EPSILON);
    }

    #[test]
    fn test_rosenbrock_hessian() {
        let h = rosenbrock_2d_hessian(&[1.0, 1.0], 1.0, 100.0);
        assert_relative_eq!(h[0][0], 802.0, epsilon = f64::EPSILON);
        assert_relative_eq!(h[0][1], -400.0, epsilon = f64::EPSILON);
        assert_relative_eq!(h[1][0], -400.0, epsilon = f64::EPSILON);
        assert_relative_eq!(h[1][1], 200.0, epsilon = f64::EPSILON);
    }

    #[test]
    fn test_quadratic() {
        let q = Quadratic::new(vec![1.0, 10.0]);
        assert_relative_eq!(q.cost(&vec![2.0, 1.0]).unwrap(), 14.0, epsilon = f64::EPSILON);
        let g = q.gradient(&vec![2.0, 1.0]).unwrap();
        assert_relative_eq!(g[0], 4.0, epsilon = f64::EPSILON);
        assert_relative_eq!(g[1], 20.0, epsilon = f64::EPSILON);
    }
}
