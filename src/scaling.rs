//! Orthonormal rescaling of the engine's unnormalized DCT/DST output.
//!
//! The engine computes the doubled-sum convention of the legacy library.
//! Under orthonormal mode, type III transforms are handled entirely on the
//! input side: pre-conditioning the input makes the engine's native
//! type-III computation produce the orthonormal result directly. Types II
//! and IV are rescaled on the output side. Type I never reaches this module;
//! orthonormal type I is rejected at the dispatch boundary.

use rustfft::FftNum;

use crate::kinds::TransformFamily;

/// Input-side scaling for orthonormal type III transforms, both families:
/// position 0 divided by `sqrt(m)`, the rest by `sqrt(2m)`.
pub(crate) fn ortho_pre_scale<T: FftNum>(lane: &mut [T]) {
    if lane.is_empty() {
        return;
    }
    let m = lane.len() as f64;
    let first = T::from_f64(1.0 / m.sqrt()).unwrap();
    let rest = T::from_f64(1.0 / (2.0 * m).sqrt()).unwrap();
    lane[0] = lane[0] * first;
    for val in lane.iter_mut().skip(1) {
        *val = *val * rest;
    }
}

/// Output-side scaling for orthonormal transforms. Type III needs none
/// (see [`ortho_pre_scale`]); types II and IV are scaled here.
pub(crate) fn ortho_post_scale<T: FftNum>(
    family: TransformFamily,
    type_index: usize,
    lane: &mut [T],
) {
    if lane.is_empty() {
        return;
    }
    let m = lane.len() as f64;
    match (family, type_index) {
        (TransformFamily::Cosine, 2) => {
            let first = T::from_f64(1.0 / (4.0 * m).sqrt()).unwrap();
            let rest = T::from_f64(1.0 / (2.0 * m).sqrt()).unwrap();
            lane[0] = lane[0] * first;
            for val in lane.iter_mut().skip(1) {
                *val = *val * rest;
            }
        }
        (TransformFamily::Sine, 2) => {
            let first = T::from_f64(1.0 / (2.0 * m.sqrt())).unwrap();
            let rest = T::from_f64(1.0 / (2.0 * m).sqrt()).unwrap();
            lane[0] = lane[0] * first;
            for val in lane.iter_mut().skip(1) {
                *val = *val * rest;
            }
        }
        (_, 4) => {
            let scale = T::from_f64(1.0 / (2.0 * m).sqrt()).unwrap();
            for val in lane.iter_mut() {
                *val = *val * scale;
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::{ortho_post_scale, ortho_pre_scale};
    use crate::kinds::TransformFamily;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-12,
            "{} !~= {}",
            actual,
            expected
        );
    }

    #[test]
    fn pre_scale_divides_head_and_tail_differently() {
        let mut lane = vec![1.0f64; 8];
        ortho_pre_scale(&mut lane);
        assert_close(lane[0], 1.0 / 8.0f64.sqrt());
        for val in &lane[1..] {
            assert_close(*val, 1.0 / 16.0f64.sqrt());
        }
    }

    #[test]
    fn cosine_two_post_scale() {
        let mut lane = vec![1.0f64; 4];
        ortho_post_scale(TransformFamily::Cosine, 2, &mut lane);
        assert_close(lane[0], 1.0 / 16.0f64.sqrt());
        for val in &lane[1..] {
            assert_close(*val, 1.0 / 8.0f64.sqrt());
        }
    }

    #[test]
    fn sine_two_post_scale() {
        let mut lane = vec![1.0f64; 4];
        ortho_post_scale(TransformFamily::Sine, 2, &mut lane);
        assert_close(lane[0], 1.0 / (2.0 * 4.0f64.sqrt()));
        for val in &lane[1..] {
            assert_close(*val, 1.0 / 8.0f64.sqrt());
        }
    }

    #[test]
    fn type_four_post_scale_is_uniform() {
        for family in [TransformFamily::Cosine, TransformFamily::Sine] {
            let mut lane = vec![1.0f64; 5];
            ortho_post_scale(family, 4, &mut lane);
            for val in &lane {
                assert_close(*val, 1.0 / 10.0f64.sqrt());
            }
        }
    }

    #[test]
    fn type_three_has_no_post_scale() {
        let mut lane = vec![3.0f64; 6];
        ortho_post_scale(TransformFamily::Cosine, 3, &mut lane);
        ortho_post_scale(TransformFamily::Sine, 3, &mut lane);
        for val in &lane {
            assert_close(*val, 3.0);
        }
    }
}
