// Copyright 2024-2026 gradmin developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! # Beta update methods
//!
//! The scalar β in `d <- -g + β d_prev` defines the nonlinear-CG family.
//! Every formula receives the current gradient, the previous gradient and
//! the previous search direction, and fails with `DegenerateDirection` when
//! the previous gradient has zero norm.
//!
//! # References:
//!
//! \[0\] Jorge Nocedal and Stephen J. Wright (2006). Numerical Optimization.
//! Springer. ISBN 0-387-30303-0.
//!
//! \[1\] W. W. Hager and H. Zhang. "A new conjugate gradient method with
//! guaranteed descent and an efficient line search." SIAM J. Optim. 16
//! (2005).

use crate::core::math::{GradminDot, GradminMul, GradminSub};
use crate::core::{Error, GradminFloat, SerializeAlias};
#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

/// Common interface for beta update methods.
pub trait NLCGBetaUpdate<P, F>: SerializeAlias {
    /// Compute β from the current gradient `g`, the previous gradient
    /// `g_prev` and the previous search direction `d_prev`.
    fn update(&self, g: &P, g_prev: &P, d_prev: &P) -> Result<F, Error>;
}

fn check_degenerate<P, F>(g_prev: &P) -> Result<F, Error>
where
    P: GradminDot<P, F>,
    F: GradminFloat,
{
    let denom = g_prev.dot(g_prev);
    if denom <= float!(0.0) {
        return Err(gradmin_error!(
            DegenerateDirection,
            "NLCGBetaUpdate: previous gradient has zero norm"
        ));
    }
    Ok(denom)
}

/// Fletcher and Reeves (FR): `β = g.g / g_prev.g_prev`
#[derive(Default, Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub struct FletcherReeves {}

impl FletcherReeves {
    /// Constructor
    pub fn new() -> Self {
        FletcherReeves {}
    }
}

impl<P, F> NLCGBetaUpdate<P, F> for FletcherReeves
where
    P: GradminDot<P, F>,
    F: GradminFloat,
{
    fn update(&self, g: &P, g_prev: &P, _d_prev: &P) -> Result<F, Error> {
        let denom = check_degenerate(g_prev)?;
        Ok(g.dot(g) / denom)
    }
}

/// Polak and Ribiere (PR): `β = g.y / g_prev.g_prev` with `y = g - g_prev`
#[derive(Default, Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub struct PolakRibiere {}

impl PolakRibiere {
    /// Constructor
    pub fn new() -> Self {
        PolakRibiere {}
    }
}

impl<P, F> NLCGBetaUpdate<P, F> for PolakRibiere
where
    P: GradminDot<P, F> + GradminSub<P, P>,
    F: GradminFloat,
{
    fn update(&self, g: &P, g_prev: &P, _d_prev: &P) -> Result<F, Error> {
        let denom = check_degenerate(g_prev)?;
        Ok(g.dot(&g.sub(g_prev)) / denom)
    }
}

/// Hestenes and Stiefel (HS): `β = g.y / y.d_prev`
#[derive(Default, Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub struct HestenesStiefel {}

impl HestenesStiefel {
    /// Constructor
    pub fn new() -> Self {
        HestenesStiefel {}
    }
}

impl<P, F> NLCGBetaUpdate<P, F> for HestenesStiefel
where
    P: GradminDot<P, F> + GradminSub<P, P>,
    F: GradminFloat,
{
    fn update(&self, g: &P, g_prev: &P, d_prev: &P) -> Result<F, Error> {
        check_degenerate::<P, F>(g_prev)?;
        let y = g.sub(g_prev);
        Ok(g.dot(&y) / y.dot(d_prev))
    }
}

/// Liu and Storey (LS): `β = -g.y / d_prev.g_prev`
#[derive(Default, Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub struct LiuStorey {}

impl LiuStorey {
    /// Constructor
    pub fn new() -> Self {
        LiuStorey {}
    }
}

impl<P, F> NLCGBetaUpdate<P, F> for LiuStorey
where
    P: GradminDot<P, F> + GradminSub<P, P>,
    F: GradminFloat,
{
    fn update(&self, g: &P, g_prev: &P, d_prev: &P) -> Result<F, Error> {
        check_degenerate::<P, F>(g_prev)?;
        let y = g.sub(g_prev);
        Ok(-(g.dot(&y)) / d_prev.dot(g_prev))
    }
}

/// Dai and Yuan (DY, also known as conjugate descent):
/// `β = g.g / y.d_prev`
#[derive(Default, Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub struct DaiYuan {}

impl DaiYuan {
    /// Constructor
    pub fn new() -> Self {
        DaiYuan {}
    }
}

impl<P, F> NLCGBetaUpdate<P, F> for DaiYuan
where
    P: GradminDot<P, F> + GradminSub<P, P>,
    F: GradminFloat,
{
    fn update(&self, g: &P, g_prev: &P, d_prev: &P) -> Result<F, Error> {
        check_degenerate::<P, F>(g_prev)?;
        let y = g.sub(g_prev);
        Ok(g.dot(g) / y.dot(d_prev))
    }
}

/// Hager and Zhang (HZ):
/// `θ = |y|^2 / y.d_prev`, `β = (y - 2 θ d_prev).g / y.d_prev`
#[derive(Default, Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub struct HagerZhang {}

impl HagerZhang {
    /// Constructor
    pub fn new() -> Self {
        HagerZhang {}
    }
}

impl<P, F> NLCGBetaUpdate<P, F> for HagerZhang
where
    P: GradminDot<P, F> + GradminSub<P, P> + GradminMul<F, P>,
    F: GradminFloat,
{
    fn update(&self, g: &P, g_prev: &P, d_prev: &P) -> Result<F, Error> {
        check_degenerate::<P, F>(g_prev)?;
        let y = g.sub(g_prev);
        let yd = y.dot(d_prev);
        let theta = y.dot(&y) / yd;
        Ok(y.sub(&d_prev.mul(&(float!(2.0) * theta))).dot(g) / yd)
    }
}

/// FR-PR hybrid: clamps the PR coefficient into `[-β_FR, β_FR]`.
#[derive(Default, Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub struct FletcherReevesPolakRibiere {
    fr: FletcherReeves,
    pr: PolakRibiere,
}

impl FletcherReevesPolakRibiere {
    /// Constructor
    pub fn new() -> Self {
        FletcherReevesPolakRibiere {
            fr: FletcherReeves::new(),
            pr: PolakRibiere::new(),
        }
    }
}

impl<P, F> NLCGBetaUpdate<P, F> for FletcherReevesPolakRibiere
where
    P: GradminDot<P, F> + GradminSub<P, P>,
    F: GradminFloat,
{
    fn update(&self, g: &P, g_prev: &P, d_prev: &P) -> Result<F, Error> {
        let beta_fr = self.fr.update(g, g_prev, d_prev)?;
        let beta_pr = self.pr.update(g, g_prev, d_prev)?;
        if beta_pr < -beta_fr {
            Ok(-beta_fr)
        } else if beta_pr.abs() <= beta_fr {
            Ok(beta_pr)
        } else {
            Ok(beta_fr)
        }
    }
}

/// Operator combining the two coefficients of a [`Hybrid`] strategy.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub enum HybridOp {
    /// Take the larger coefficient
    Max,
    /// Take the smaller coefficient
    Min,
}

impl Default for HybridOp {
    fn default() -> Self {
        HybridOp::Max
    }
}

/// Combines two beta strategies with a binary operator (defaults to max).
#[derive(Default, Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub struct Hybrid<B1, B2> {
    b1: B1,
    b2: B2,
    op: HybridOp,
}

impl<B1, B2> Hybrid<B1, B2> {
    /// Constructor combining the coefficients with `max`
    pub fn new(b1: B1, b2: B2) -> Self {
        Hybrid {
            b1,
            b2,
            op: HybridOp::Max,
        }
    }

    /// Select the combining operator
    #[must_use]
    pub fn with_op(mut self, op: HybridOp) -> Self {
        self.op = op;
        self
    }
}

impl<P, F, B1, B2> NLCGBetaUpdate<P, F> for Hybrid<B1, B2>
where
    B1: NLCGBetaUpdate<P, F>,
    B2: NLCGBetaUpdate<P, F>,
    F: GradminFloat,
{
    fn update(&self, g: &P, g_prev: &P, d_prev: &P) -> Result<F, Error> {
        let beta1 = self.b1.update(g, g_prev, d_prev)?;
        let beta2 = self.b2.update(g, g_prev, d_prev)?;
        Ok(match self.op {
            HybridOp::Max => beta1.max(beta2),
            HybridOp::Min => beta1.min(beta2),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GradminError;
    use crate::test_trait_impl;

    test_trait_impl!(fletcher_reeves, FletcherReeves);
    test_trait_impl!(polak_ribiere, PolakRibiere);
    test_trait_impl!(hestenes_stiefel, HestenesStiefel);
    test_trait_impl!(liu_storey, LiuStorey);
    test_trait_impl!(dai_yuan, DaiYuan);
    test_trait_impl!(hager_zhang, HagerZhang);
    test_trait_impl!(fr_pr, FletcherReevesPolakRibiere);
    test_trait_impl!(hybrid, Hybrid<FletcherReeves, PolakRibiere>);

    fn context() -> (Vec<f64>, Vec<f64>, Vec<f64>) {
        // y = g - g_prev = (1, -2)
        (vec![1.0, 0.0], vec![0.0, 2.0], vec![1.0, 1.0])
    }

    #[test]
    fn test_fletcher_reeves() {
        let (g, g_prev, d_prev) = context();
        let beta: f64 = FletcherReeves::new().update(&g, &g_prev, &d_prev).unwrap();
        assert!((beta - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn test_polak_ribiere() {
        let (g, g_prev, d_prev) = context();
        let beta: f64 = PolakRibiere::new().update(&g, &g_prev, &d_prev).unwrap();
        assert!((beta - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn test_hestenes_stiefel() {
        let (g, g_prev, d_prev) = context();
        let beta: f64 = HestenesStiefel::new().update(&g, &g_prev, &d_prev).unwrap();
        // g.y = 1, y.d_prev = -1
        assert!((beta + 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_liu_storey() {
        let (g, g_prev, d_prev) = context();
        let beta: f64 = LiuStorey::new().update(&g, &g_prev, &d_prev).unwrap();
        // -g.y / d_prev.g_prev = -1 / 2
        assert!((beta + 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_dai_yuan() {
        let (g, g_prev, d_prev) = context();
        let beta: f64 = DaiYuan::new().update(&g, &g_prev, &d_prev).unwrap();
        // g.g / y.d_prev = 1 / -1
        assert!((beta + 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_hager_zhang() {
        let (g, g_prev, d_prev) = context();
        let beta: f64 = HagerZhang::new().update(&g, &g_prev, &d_prev).unwrap();
        // theta = 5 / -1; (y - 2 theta d).g = 1 + 10 = 11; / -1
        assert!((beta + 11.0).abs() < 1e-12);
    }

    #[test]
    fn test_fr_pr_clamps() {
        let (g, g_prev, d_prev) = context();
        let beta: f64 = FletcherReevesPolakRibiere::new()
            .update(&g, &g_prev, &d_prev)
            .unwrap();
        // beta_pr = 0.25 lies within [-0.25, 0.25]
        assert!((beta - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn test_hybrid_max_and_min() {
        let (g, g_prev, d_prev) = context();
        // FR = 0.25, DY = -1.0
        let max: f64 = Hybrid::new(FletcherReeves::new(), DaiYuan::new())
            .update(&g, &g_prev, &d_prev)
            .unwrap();
        assert!((max - 0.25).abs() < f64::EPSILON);
        let min: f64 = Hybrid::new(FletcherReeves::new(), DaiYuan::new())
            .with_op(HybridOp::Min)
            .update(&g, &g_prev, &d_prev)
            .unwrap();
        assert!((min + 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_degenerate_previous_gradient() {
        let g = vec![1.0, 0.0];
        let g_prev = vec![0.0, 0.0];
        let d_prev = vec![1.0, 1.0];
        let res: Result<f64, _> = FletcherReeves::new().update(&g, &g_prev, &d_prev);
        assert_error!(
            res,
            GradminError,
            "Degenerate direction: \"NLCGBetaUpdate: previous gradient has zero norm\""
        );
        assert!(NLCGBetaUpdate::<_, f64>::update(&PolakRibiere::new(), &g, &g_prev, &d_prev)
            .is_err());
        assert!(NLCGBetaUpdate::<_, f64>::update(&HagerZhang::new(), &g, &g_prev, &d_prev)
            .is_err());
    }
}
