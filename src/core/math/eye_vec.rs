// Copyright 2024-2026 gradmin developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use crate::core::math::GradminEye;

macro_rules! make_eye_vec {
    ($t:ty) => {
        impl GradminEye for Vec<Vec<$t>> {
            #[inline]
            fn eye(n: usize) -> Vec<Vec<$t>> {
                (0..n)
                    .map(|i| {
                        (0..n)
                            .map(|j| if i == j { 1 as $t } else { 0 as $t })
                            .collect()
                    })
                    .collect()
            }

            #[inline]
            fn eye_like(&self) -> Vec<Vec<$t>> {
                Self::eye(self.len())
            }
        }
    };
}

make_eye_vec!(f32);
make_eye_vec!(f64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eye() {
        let e: Vec<Vec<f64>> = GradminEye::eye(3);
        for i in 0..3 {
            for j in 0..3 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert!((e[i][j] - expected).abs() < f64::EPSILON);
            }
        }
    }

    #[test]
    fn test_eye_like() {
        let m = vec![vec![2.0f64, 3.0], vec![4.0, 5.0]];
        let e = m.eye_like();
        assert_eq!(e.len(), 2);
        assert!((e[0][0] - 1.0).abs() < f64::EPSILON);
        assert!(e[0][1].abs() < f64::EPSILON);
    }
}
