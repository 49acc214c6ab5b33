//! Conversion between the Hermitian half-spectrum produced by the transform
//! engine and the packed-real spectrum layout of the legacy interface.
//!
//! The packed layout stores the DFT of a length-`n` real signal in a single
//! real array: `[X0, Re(X1), Im(X1), Re(X2), Im(X2), ...]`. When `n` is even
//! the array ends with the real part of the Nyquist bin, whose imaginary part
//! is zero by construction and is never stored. When `n` is odd the final
//! element is the imaginary part of the last bin.
//!
//! Both directions apply the same 1-D rule to every lane along the chosen
//! axis and leave all other dimensions untouched. Neither direction inspects
//! the values it moves; positions alone decide what goes where, so every
//! even/odd parity case here must match the legacy layout exactly or
//! round trips through the two conventions break.

use ndarray::{ArrayD, ArrayView1, ArrayViewD, ArrayViewMut1, Axis, IxDyn};
use rustfft::num_complex::Complex;
use rustfft::FftNum;

use crate::{FftError, Res};

/// Convert a half-spectrum to the packed-real layout along `axis`.
///
/// `output_len` is the length of the real signal the spectrum describes.
/// It is trusted as given: callers that zero-padded or truncated upstream
/// pass the padded length, and this function does not recompute it from the
/// input's axis length. The output is a freshly allocated real array whose
/// shape equals the input's except for the `axis` dimension, which becomes
/// `output_len`.
pub fn pack_half_spectrum<T: FftNum>(
    half: ArrayViewD<'_, Complex<T>>,
    output_len: usize,
    axis: usize,
) -> Res<ArrayD<T>> {
    if axis >= half.ndim() {
        return Err(FftError::InvalidAxis(axis as isize, half.ndim()));
    }
    let mut shape = half.shape().to_vec();
    shape[axis] = output_len;
    let mut packed = ArrayD::<T>::zeros(IxDyn(&shape));
    for (src, dst) in half
        .lanes(Axis(axis))
        .into_iter()
        .zip(packed.lanes_mut(Axis(axis)))
    {
        pack_lane(src, dst);
    }
    Ok(packed)
}

/// Convert a packed-real spectrum back to a half-spectrum along `axis`.
///
/// For an input of axis length `n` the output axis length is `n/2 + 1`, with
/// the element type promoted to the complex type of the input's precision.
/// Bin 0 always gets a zero imaginary part, and when `n` is even the last
/// bin's imaginary part is forced to exactly zero rather than read from the
/// input, since the Nyquist bin of a real signal is always real.
pub fn unpack_half_spectrum<T: FftNum>(
    packed: ArrayViewD<'_, T>,
    axis: usize,
) -> Res<ArrayD<Complex<T>>> {
    if axis >= packed.ndim() {
        return Err(FftError::InvalidAxis(axis as isize, packed.ndim()));
    }
    let n = packed.len_of(Axis(axis));
    let mut shape = packed.shape().to_vec();
    shape[axis] = n / 2 + 1;
    let mut half = ArrayD::<Complex<T>>::zeros(IxDyn(&shape));
    for (src, dst) in packed
        .lanes(Axis(axis))
        .into_iter()
        .zip(half.lanes_mut(Axis(axis)))
    {
        unpack_lane(src, dst);
    }
    Ok(half)
}

fn pack_lane<T: FftNum>(src: ArrayView1<'_, Complex<T>>, mut dst: ArrayViewMut1<'_, T>) {
    let n = dst.len();
    if n == 0 || src.is_empty() {
        return;
    }
    dst[0] = src[0].re;

    // Real parts of bins 1.. go to the odd slots.
    let mut slot = 1;
    for bin in 1..src.len() {
        if slot >= n {
            break;
        }
        dst[slot] = src[bin].re;
        slot += 2;
    }

    // Imaginary parts of bins 1.. go to the even slots. For even output
    // lengths the last bin is the Nyquist bin and contributes no imaginary
    // part; its slot is the final real slot written above.
    let im_end = if n % 2 == 0 {
        src.len().saturating_sub(1)
    } else {
        src.len()
    };
    let mut slot = 2;
    for bin in 1..im_end {
        if slot >= n {
            break;
        }
        dst[slot] = src[bin].im;
        slot += 2;
    }
}

fn unpack_lane<T: FftNum>(src: ArrayView1<'_, T>, mut dst: ArrayViewMut1<'_, Complex<T>>) {
    let n = src.len();
    if n == 0 {
        return;
    }
    dst[0] = Complex::new(src[0], T::zero());

    let mut slot = 1;
    for bin in 1..dst.len() {
        if slot >= n {
            break;
        }
        dst[bin].re = src[slot];
        slot += 2;
    }

    // For even n the last bin's imaginary part stays at the zero it was
    // allocated with; there is no slot for it in the packed layout.
    let im_end = if n % 2 == 0 { dst.len() - 1 } else { dst.len() };
    let mut slot = 2;
    for bin in 1..im_end {
        if slot >= n {
            break;
        }
        dst[bin].im = src[slot];
        slot += 2;
    }
}

#[cfg(test)]
mod tests {
    use super::{pack_half_spectrum, unpack_half_spectrum};
    use crate::FftError;
    use ndarray::{ArrayD, Axis, IxDyn};
    use rand::Rng;
    use rustfft::num_complex::Complex;

    fn random_half_spectrum(n: usize) -> ArrayD<Complex<f64>> {
        let mut rng = rand::rng();
        let mut half = ArrayD::<Complex<f64>>::zeros(IxDyn(&[n / 2 + 1]));
        for val in half.iter_mut() {
            *val = Complex::new(rng.random::<f64>(), rng.random::<f64>());
        }
        // Positions the packed layout cannot represent.
        half[[0]].im = 0.0;
        if n % 2 == 0 {
            let last = half.len() - 1;
            half[[last]].im = 0.0;
        }
        half
    }

    #[test]
    fn pack_layout_even_length() {
        let mut half = ArrayD::<Complex<f64>>::zeros(IxDyn(&[4]));
        half[[0]] = Complex::new(1.0, 0.0);
        half[[1]] = Complex::new(2.0, 3.0);
        half[[2]] = Complex::new(4.0, 5.0);
        half[[3]] = Complex::new(6.0, 0.0);
        let packed = pack_half_spectrum(half.view(), 6, 0).unwrap();
        let expected = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        for (got, want) in packed.iter().zip(expected.iter()) {
            assert_eq!(got, want);
        }
    }

    #[test]
    fn pack_layout_odd_length() {
        let mut half = ArrayD::<Complex<f64>>::zeros(IxDyn(&[3]));
        half[[0]] = Complex::new(1.0, 0.0);
        half[[1]] = Complex::new(2.0, 3.0);
        half[[2]] = Complex::new(4.0, 5.0);
        let packed = pack_half_spectrum(half.view(), 5, 0).unwrap();
        let expected = [1.0, 2.0, 3.0, 4.0, 5.0];
        for (got, want) in packed.iter().zip(expected.iter()) {
            assert_eq!(got, want);
        }
    }

    #[test]
    fn round_trip_preserves_every_bin() {
        for n in 1..200usize {
            let half = random_half_spectrum(n);
            let packed = pack_half_spectrum(half.view(), n, 0).unwrap();
            assert_eq!(packed.len_of(Axis(0)), n);
            let recovered = unpack_half_spectrum(packed.view(), 0).unwrap();
            assert_eq!(recovered.len_of(Axis(0)), n / 2 + 1);
            for (got, want) in recovered.iter().zip(half.iter()) {
                assert_eq!(got.re, want.re, "real mismatch at length {}", n);
                assert_eq!(got.im, want.im, "imag mismatch at length {}", n);
            }
        }
    }

    #[test]
    fn nyquist_imaginary_part_is_exactly_zero() {
        let mut rng = rand::rng();
        let mut packed = ArrayD::<f64>::zeros(IxDyn(&[8]));
        for val in packed.iter_mut() {
            *val = rng.random::<f64>();
        }
        let half = unpack_half_spectrum(packed.view(), 0).unwrap();
        assert_eq!(half[[0]].im, 0.0);
        let last = half.len() - 1;
        assert_eq!(half[[last]].im, 0.0);
    }

    #[test]
    fn lanes_along_non_last_axis_are_independent() {
        let mut rng = rand::rng();
        let mut half = ArrayD::<Complex<f64>>::zeros(IxDyn(&[3, 4]));
        for val in half.iter_mut() {
            *val = Complex::new(rng.random::<f64>(), rng.random::<f64>());
        }
        for col in 0..4 {
            half[[0, col]].im = 0.0;
            half[[2, col]].im = 0.0;
        }
        let packed = pack_half_spectrum(half.view(), 4, 0).unwrap();
        assert_eq!(packed.shape(), &[4, 4]);
        // Each column must equal the packing of that column alone.
        for col in 0..4 {
            let lane = half.index_axis(Axis(1), col).to_owned().into_dyn();
            let lane_packed = pack_half_spectrum(lane.view(), 4, 0).unwrap();
            for row in 0..4 {
                assert_eq!(packed[[row, col]], lane_packed[[row]]);
            }
        }
    }

    #[test]
    fn axis_out_of_range_is_rejected() {
        let half = ArrayD::<Complex<f64>>::zeros(IxDyn(&[3]));
        let res = pack_half_spectrum(half.view(), 5, 1);
        assert!(matches!(res, Err(FftError::InvalidAxis(1, 1))));
        let packed = ArrayD::<f64>::zeros(IxDyn(&[5]));
        let res = unpack_half_spectrum(packed.view(), 2);
        assert!(matches!(res, Err(FftError::InvalidAxis(2, 1))));
    }
}
