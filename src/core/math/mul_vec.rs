// Copyright 2024-2026 gradmin developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use crate::core::math::GradminMul;

macro_rules! make_mul_vec {
    ($t:ty) => {
        impl GradminMul<$t, Vec<$t>> for Vec<$t> {
            #[inline]
            fn mul(&self, other: &$t) -> Vec<$t> {
                self.iter().map(|a| a * other).collect()
            }
        }

        impl GradminMul<Vec<$t>, Vec<$t>> for Vec<$t> {
            #[inline]
            fn mul(&self, other: &Vec<$t>) -> Vec<$t> {
                assert_eq!(self.len(), other.len());
                self.iter().zip(other.iter()).map(|(a, b)| a * b).collect()
            }
        }

        impl GradminMul<$t, Vec<Vec<$t>>> for Vec<Vec<$t>> {
            #[inline]
            fn mul(&self, other: &$t) -> Vec<Vec<$t>> {
                self.iter().map(|row| row.mul(other)).collect()
            }
        }
    };
}

make_mul_vec!(f32);
make_mul_vec!(f64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mul_vec_scalar() {
        let a = vec![1.0f64, -2.0];
        let res = a.mul(&2.0);
        assert!((res[0] - 2.0).abs() < f64::EPSILON);
        assert!((res[1] + 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_mul_vec_vec() {
        let a = vec![2.0f64, 3.0];
        let b = vec![4.0f64, 5.0];
        let res = a.mul(&b);
        assert!((res[0] - 8.0).abs() < f64::EPSILON);
        assert!((res[1] - 15.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_mul_mat_scalar() {
        let m = vec![vec![1.0f64, 2.0], vec![3.0, 4.0]];
        let res = m.mul(&0.5);
        assert!((res[1][1] - 2.0).abs() < f64::EPSILON);
    }
}
