// Copyright 2024-2026 gradmin developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use crate::core::math::GradminAdd;

macro_rules! make_add_vec {
    ($t:ty) => {
        impl GradminAdd<Vec<$t>, Vec<$t>> for Vec<$t> {
            #[inline]
            fn add(&self, other: &Vec<$t>) -> Vec<$t> {
                assert_eq!(self.len(), other.len());
                self.iter().zip(other.iter()).map(|(a, b)| a + b).collect()
            }
        }

        impl GradminAdd<$t, Vec<$t>> for Vec<$t> {
            #[inline]
            fn add(&self, other: &$t) -> Vec<$t> {
                self.iter().map(|a| a + other).collect()
            }
        }

        impl GradminAdd<Vec<Vec<$t>>, Vec<Vec<$t>>> for Vec<Vec<$t>> {
            #[inline]
            fn add(&self, other: &Vec<Vec<$t>>) -> Vec<Vec<$t>> {
                assert_eq!(self.len(), other.len());
                self.iter().zip(other.iter()).map(|(a, b)| a.add(b)).collect()
            }
        }
    };
}

make_add_vec!(f32);
make_add_vec!(f64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_vec_vec() {
        let a = vec![1.0f64, 2.0];
        let b = vec![3.0f64, 4.0];
        let res = a.add(&b);
        assert!((res[0] - 4.0).abs() < f64::EPSILON);
        assert!((res[1] - 6.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_add_vec_scalar() {
        let a = vec![1.0f64, 2.0];
        let res = a.add(&1.5);
        assert!((res[0] - 2.5).abs() < f64::EPSILON);
        assert!((res[1] - 3.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_add_mat_mat() {
        let a = vec![vec![1.0f64, 0.0], vec![0.0, 1.0]];
        let b = vec![vec![1.0f64, 2.0], vec![3.0, 4.0]];
        let res = a.add(&b);
        assert!((res[0][1] - 2.0).abs() < f64::EPSILON);
        assert!((res[1][1] - 5.0).abs() < f64::EPSILON);
    }
}
