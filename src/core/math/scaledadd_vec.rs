// Copyright 2024-2026 gradmin developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use crate::core::math::GradminScaledAdd;

macro_rules! make_scaledadd_vec {
    ($t:ty) => {
        impl GradminScaledAdd<Vec<$t>, $t, Vec<$t>> for Vec<$t> {
            #[inline]
            fn scaled_add(&self, factor: &$t, vec: &Vec<$t>) -> Vec<$t> {
                assert_eq!(self.len(), vec.len());
                self.iter()
                    .zip(vec.iter())
                    .map(|(a, b)| a + factor * b)
                    .collect()
            }
        }
    };
}

make_scaledadd_vec!(f32);
make_scaledadd_vec!(f64);
