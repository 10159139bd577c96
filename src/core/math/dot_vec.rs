// Copyright 2024-2026 gradmin developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use crate::core::math::GradminDot;

macro_rules! make_dot_vec {
    ($t:ty) => {
        impl GradminDot<Vec<$t>, $t> for Vec<$t> {
            #[inline]
            fn dot(&self, other: &Vec<$t>) -> $t {
                self.iter().zip(other.iter()).map(|(a, b)| a * b).sum()
            }
        }

        /// Outer product
        impl GradminDot<Vec<$t>, Vec<Vec<$t>>> for Vec<$t> {
            #[inline]
            fn dot(&self, other: &Vec<$t>) -> Vec<Vec<$t>> {
                self.iter()
                    .map(|a| other.iter().map(|b| a * b).collect())
                    .collect()
            }
        }

        /// Matrix-vector product
        impl GradminDot<Vec<$t>, Vec<$t>> for Vec<Vec<$t>> {
            #[inline]
            fn dot(&self, other: &Vec<$t>) -> Vec<$t> {
                self.iter().map(|row| row.dot(other)).collect()
            }
        }

        /// Matrix-matrix product
        impl GradminDot<Vec<Vec<$t>>, Vec<Vec<$t>>> for Vec<Vec<$t>> {
            #[inline]
            fn dot(&self, other: &Vec<Vec<$t>>) -> Vec<Vec<$t>> {
                let sr = self.len();
                assert!(sr > 0);
                let sc = self[0].len();
                let or = other.len();
                assert_eq!(sc, or);
                let oc = other[0].len();
                let mut out = vec![vec![<$t>::default(); oc]; sr];
                for i in 0..sr {
                    assert_eq!(self[i].len(), sc);
                    for j in 0..oc {
                        out[i][j] = (0..sc).map(|k| self[i][k] * other[k][j]).sum();
                    }
                }
                out
            }
        }
    };
}

make_dot_vec!(f32);
make_dot_vec!(f64);
