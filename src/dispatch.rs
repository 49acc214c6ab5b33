//! The twelve public entry points and the routing between the engine
//! adapter, the layout codec and the normalization scaler.
//!
//! Every function validates its arguments fully before allocating output or
//! touching the engine, so a failed call never leaves a partial result.

use ndarray::{ArrayD, Axis, IxDyn, Slice};
use rustdct::DctNum;
use rustfft::num_complex::Complex;
use rustfft::num_traits::Zero;

use crate::codec;
use crate::engine::Engine;
use crate::kinds::{self, TransformFamily};
use crate::scaling;
use crate::{FftError, Normalization, Res, Sequence, TransformOptions};

/// Perform a 1-D complex FFT along `axis` (default convention: pass `-1` for
/// the last axis). Real input is promoted to the complex type of its
/// precision. `n` zero-pads or truncates the axis before transforming.
pub fn fft(
    x: &Sequence,
    n: Option<usize>,
    axis: isize,
    options: &TransformOptions,
) -> Res<Sequence> {
    c2c_entry(x, n, axis, false, options)
}

/// Perform a 1-D inverse complex FFT along `axis`, scaled by `1/n` so that
/// `ifft(fft(x))` recovers `x`.
pub fn ifft(
    x: &Sequence,
    n: Option<usize>,
    axis: isize,
    options: &TransformOptions,
) -> Res<Sequence> {
    c2c_entry(x, n, axis, true, options)
}

/// Perform a 2-D complex FFT over `axes` (default: the last two axes).
/// `shape`, if given, must have one entry per transformed axis.
pub fn fft2(
    x: &Sequence,
    shape: Option<&[usize]>,
    axes: Option<&[isize]>,
    options: &TransformOptions,
) -> Res<Sequence> {
    let default_axes = [-2isize, -1];
    let axes = axes.unwrap_or(&default_axes);
    c2c_nd_entry(x, shape, Some(axes), false, options)
}

/// Perform a 2-D inverse complex FFT over `axes` (default: the last two
/// axes), scaled by the product of the transformed lengths.
pub fn ifft2(
    x: &Sequence,
    shape: Option<&[usize]>,
    axes: Option<&[isize]>,
    options: &TransformOptions,
) -> Res<Sequence> {
    let default_axes = [-2isize, -1];
    let axes = axes.unwrap_or(&default_axes);
    c2c_nd_entry(x, shape, Some(axes), true, options)
}

/// Perform an n-D complex FFT over `axes` (default: all axes).
///
/// When `shape` is given its length must equal the length of `axes`, or the
/// input's dimensionality when `axes` is unspecified; a disagreement fails
/// with [`FftError::ShapeMismatch`]. The library this interface emulates
/// silently accepted some of those mismatches; this layer deliberately does
/// not.
pub fn fftn(
    x: &Sequence,
    shape: Option<&[usize]>,
    axes: Option<&[isize]>,
    options: &TransformOptions,
) -> Res<Sequence> {
    c2c_nd_entry(x, shape, axes, false, options)
}

/// Perform an n-D inverse complex FFT over `axes` (default: all axes), with
/// the same `shape` validation as [`fftn`].
pub fn ifftn(
    x: &Sequence,
    shape: Option<&[usize]>,
    axes: Option<&[isize]>,
    options: &TransformOptions,
) -> Res<Sequence> {
    c2c_nd_entry(x, shape, axes, true, options)
}

/// Perform a 1-D real FFT along `axis`, returning the packed-real spectrum
/// layout: `[X0, Re(X1), Im(X1), ...]`, same length and precision as the
/// (possibly resized) input. Complex input fails with
/// [`FftError::TypeMismatch`].
pub fn rfft(
    x: &Sequence,
    n: Option<usize>,
    axis: isize,
    options: &TransformOptions,
) -> Res<Sequence> {
    options.validate()?;
    match x {
        Sequence::Real32(a) => Ok(Sequence::Real32(rfft_impl(a, n, axis, options)?)),
        Sequence::Real64(a) => Ok(Sequence::Real64(rfft_impl(a, n, axis, options)?)),
        _ => Err(FftError::TypeMismatch(
            "Input array must be real to maintain compatibility with the legacy rfft",
        )),
    }
}

/// Perform a 1-D inverse real FFT along `axis`. The input is a packed-real
/// spectrum as produced by [`rfft`]; the output is the real signal of length
/// `n` (default: the input's axis length). Complex input fails with
/// [`FftError::TypeMismatch`].
pub fn irfft(
    x: &Sequence,
    n: Option<usize>,
    axis: isize,
    options: &TransformOptions,
) -> Res<Sequence> {
    options.validate()?;
    match x {
        Sequence::Real32(a) => Ok(Sequence::Real32(irfft_impl(a, n, axis, options)?)),
        Sequence::Real64(a) => Ok(Sequence::Real64(irfft_impl(a, n, axis, options)?)),
        _ => Err(FftError::TypeMismatch(
            "Input array must be real to maintain compatibility with the legacy irfft",
        )),
    }
}

/// Perform a 1-D discrete cosine transform of the given type (1..=4) along
/// `axis`. `n` must be `None`; padding and truncation are not supported for
/// this family. Orthonormal mode is rejected for type 1.
pub fn dct(
    x: &Sequence,
    type_index: usize,
    n: Option<usize>,
    axis: isize,
    norm: Normalization,
    options: &TransformOptions,
) -> Res<Sequence> {
    r2r_entry(
        x,
        TransformFamily::Cosine,
        type_index,
        n,
        axis,
        norm,
        options,
        "Input array must be real to maintain compatibility with the legacy dct",
    )
}

/// Perform the inverse of [`dct`] with the given type: type 1 and type 4
/// invert themselves, types 2 and 3 invert each other. The normalization
/// mode is passed through unchanged.
pub fn idct(
    x: &Sequence,
    type_index: usize,
    n: Option<usize>,
    axis: isize,
    norm: Normalization,
    options: &TransformOptions,
) -> Res<Sequence> {
    let inverse = kinds::inverse_type_index(type_index)?;
    dct(x, inverse, n, axis, norm, options)
}

/// Perform a 1-D discrete sine transform of the given type (1..=4) along
/// `axis`, with the same argument contract as [`dct`].
pub fn dst(
    x: &Sequence,
    type_index: usize,
    n: Option<usize>,
    axis: isize,
    norm: Normalization,
    options: &TransformOptions,
) -> Res<Sequence> {
    r2r_entry(
        x,
        TransformFamily::Sine,
        type_index,
        n,
        axis,
        norm,
        options,
        "Input array must be real to maintain compatibility with the legacy dst",
    )
}

/// Perform the inverse of [`dst`] with the given type, via the same
/// inverse-type relation as [`idct`].
pub fn idst(
    x: &Sequence,
    type_index: usize,
    n: Option<usize>,
    axis: isize,
    norm: Normalization,
    options: &TransformOptions,
) -> Res<Sequence> {
    let inverse = kinds::inverse_type_index(type_index)?;
    dst(x, inverse, n, axis, norm, options)
}

fn resolve_axis(axis: isize, ndim: usize) -> Res<usize> {
    let resolved = if axis < 0 { axis + ndim as isize } else { axis };
    if resolved < 0 || resolved as usize >= ndim {
        return Err(FftError::InvalidAxis(axis, ndim));
    }
    Ok(resolved as usize)
}

fn ensure_nonzero_len(len: usize) -> Res<()> {
    if len == 0 {
        return Err(FftError::InvalidArgument(
            "transform length must be greater than zero".to_string(),
        ));
    }
    Ok(())
}

/// Zero-pad or truncate `data` along `axis` to length `len`.
fn resize_axis<T: Clone + Zero>(data: &ArrayD<T>, len: usize, axis: usize) -> ArrayD<T> {
    if data.len_of(Axis(axis)) == len {
        return data.clone();
    }
    let mut shape = data.shape().to_vec();
    shape[axis] = len;
    let mut out = ArrayD::<T>::zeros(IxDyn(&shape));
    let keep = len.min(data.len_of(Axis(axis)));
    out.slice_axis_mut(Axis(axis), Slice::from(0..keep))
        .assign(&data.slice_axis(Axis(axis), Slice::from(0..keep)));
    out
}

fn promote<T: DctNum>(a: &ArrayD<T>) -> ArrayD<Complex<T>> {
    a.mapv(|v| Complex::new(v, T::zero()))
}

fn c2c_entry(
    x: &Sequence,
    n: Option<usize>,
    axis: isize,
    inverse: bool,
    options: &TransformOptions,
) -> Res<Sequence> {
    options.validate()?;
    match x {
        Sequence::Real32(a) => Ok(Sequence::Complex32(c2c_1d(
            &promote(a),
            n,
            axis,
            inverse,
            options,
        )?)),
        Sequence::Real64(a) => Ok(Sequence::Complex64(c2c_1d(
            &promote(a),
            n,
            axis,
            inverse,
            options,
        )?)),
        Sequence::Complex32(a) => Ok(Sequence::Complex32(c2c_1d(a, n, axis, inverse, options)?)),
        Sequence::Complex64(a) => Ok(Sequence::Complex64(c2c_1d(a, n, axis, inverse, options)?)),
    }
}

fn c2c_1d<T: DctNum>(
    x: &ArrayD<Complex<T>>,
    n: Option<usize>,
    axis: isize,
    inverse: bool,
    options: &TransformOptions,
) -> Res<ArrayD<Complex<T>>> {
    let axis = resolve_axis(axis, x.ndim())?;
    let len = n.unwrap_or_else(|| x.len_of(Axis(axis)));
    ensure_nonzero_len(len)?;
    c2c_axes(x, &[(axis, len)], inverse, options)
}

fn c2c_nd_entry(
    x: &Sequence,
    shape: Option<&[usize]>,
    axes: Option<&[isize]>,
    inverse: bool,
    options: &TransformOptions,
) -> Res<Sequence> {
    options.validate()?;
    match x {
        Sequence::Real32(a) => Ok(Sequence::Complex32(c2c_nd(
            &promote(a),
            shape,
            axes,
            inverse,
            options,
        )?)),
        Sequence::Real64(a) => Ok(Sequence::Complex64(c2c_nd(
            &promote(a),
            shape,
            axes,
            inverse,
            options,
        )?)),
        Sequence::Complex32(a) => Ok(Sequence::Complex32(c2c_nd(a, shape, axes, inverse, options)?)),
        Sequence::Complex64(a) => Ok(Sequence::Complex64(c2c_nd(a, shape, axes, inverse, options)?)),
    }
}

fn c2c_nd<T: DctNum>(
    x: &ArrayD<Complex<T>>,
    shape: Option<&[usize]>,
    axes: Option<&[isize]>,
    inverse: bool,
    options: &TransformOptions,
) -> Res<ArrayD<Complex<T>>> {
    let plan = nd_plan(x.ndim(), x.shape(), shape, axes)?;
    c2c_axes(x, &plan, inverse, options)
}

/// Resolve the axes/shape arguments of the n-D entry points into a list of
/// (axis, target length) pairs, validating shape/axes agreement.
fn nd_plan(
    ndim: usize,
    input_shape: &[usize],
    shape: Option<&[usize]>,
    axes: Option<&[isize]>,
) -> Res<Vec<(usize, usize)>> {
    let resolved: Vec<usize> = match axes {
        Some(list) => list
            .iter()
            .map(|&a| resolve_axis(a, ndim))
            .collect::<Res<_>>()?,
        None => (0..ndim).collect(),
    };
    if let Some(target) = shape {
        if target.len() != resolved.len() {
            return Err(FftError::ShapeMismatch(target.len(), resolved.len()));
        }
    }
    let mut plan = Vec::with_capacity(resolved.len());
    for (i, &axis) in resolved.iter().enumerate() {
        let len = match shape {
            Some(target) => target[i],
            None => input_shape[axis],
        };
        ensure_nonzero_len(len)?;
        plan.push((axis, len));
    }
    Ok(plan)
}

/// Run a complex transform along each planned axis in order, resizing first.
/// Inverse transforms are scaled by `1/len` per axis.
fn c2c_axes<T: DctNum>(
    x: &ArrayD<Complex<T>>,
    plan: &[(usize, usize)],
    inverse: bool,
    options: &TransformOptions,
) -> Res<ArrayD<Complex<T>>> {
    let mut engine = Engine::new(options);
    let mut data = x.clone();
    for &(axis, len) in plan {
        data = resize_axis(&data, len, axis);
        let scale = T::from_f64(1.0 / len as f64).unwrap();
        let mut buffer = vec![Complex::zero(); len];
        for mut lane in data.lanes_mut(Axis(axis)) {
            for (buf, val) in buffer.iter_mut().zip(lane.iter()) {
                *buf = *val;
            }
            engine.c2c(&mut buffer, inverse);
            for (val, buf) in lane.iter_mut().zip(buffer.iter()) {
                *val = if inverse { *buf * scale } else { *buf };
            }
        }
    }
    Ok(data)
}

fn rfft_impl<T: DctNum>(
    x: &ArrayD<T>,
    n: Option<usize>,
    axis: isize,
    options: &TransformOptions,
) -> Res<ArrayD<T>> {
    let axis = resolve_axis(axis, x.ndim())?;
    let n = n.unwrap_or_else(|| x.len_of(Axis(axis)));
    ensure_nonzero_len(n)?;
    let data = resize_axis(x, n, axis);

    let mut half_shape = data.shape().to_vec();
    half_shape[axis] = n / 2 + 1;
    let mut half = ArrayD::<Complex<T>>::zeros(IxDyn(&half_shape));
    let mut engine = Engine::new(options);
    let mut buffer = vec![T::zero(); n];
    for (src, mut dst) in data
        .lanes(Axis(axis))
        .into_iter()
        .zip(half.lanes_mut(Axis(axis)))
    {
        for (buf, val) in buffer.iter_mut().zip(src.iter()) {
            *buf = *val;
        }
        let bins = engine.r2c(&mut buffer)?;
        for (out, bin) in dst.iter_mut().zip(bins.iter()) {
            *out = *bin;
        }
    }
    codec::pack_half_spectrum(half.view(), n, axis)
}

fn irfft_impl<T: DctNum>(
    x: &ArrayD<T>,
    n: Option<usize>,
    axis: isize,
    options: &TransformOptions,
) -> Res<ArrayD<T>> {
    let axis = resolve_axis(axis, x.ndim())?;
    let m = x.len_of(Axis(axis));
    ensure_nonzero_len(m)?;
    let n = n.unwrap_or(m);
    ensure_nonzero_len(n)?;

    let half = codec::unpack_half_spectrum(x.view(), axis)?;
    let mut half = resize_axis(&half, n / 2 + 1, axis);
    if n % 2 == 0 {
        // The Nyquist bin of a real signal carries no imaginary part; after
        // truncation the bin that lands there may still hold one.
        for mut lane in half.lanes_mut(Axis(axis)) {
            let last = lane.len() - 1;
            lane[last].im = T::zero();
        }
    }

    let scale = T::from_f64(1.0 / n as f64).unwrap();
    let mut out_shape = x.shape().to_vec();
    out_shape[axis] = n;
    let mut out = ArrayD::<T>::zeros(IxDyn(&out_shape));
    let mut engine = Engine::new(options);
    let mut buffer = vec![Complex::zero(); n / 2 + 1];
    for (src, mut dst) in half
        .lanes(Axis(axis))
        .into_iter()
        .zip(out.lanes_mut(Axis(axis)))
    {
        for (buf, val) in buffer.iter_mut().zip(src.iter()) {
            *buf = *val;
        }
        let signal = engine.c2r(&mut buffer, n)?;
        for (val, sig) in dst.iter_mut().zip(signal.iter()) {
            *val = *sig * scale;
        }
    }
    Ok(out)
}

#[allow(clippy::too_many_arguments)]
fn r2r_entry(
    x: &Sequence,
    family: TransformFamily,
    type_index: usize,
    n: Option<usize>,
    axis: isize,
    norm: Normalization,
    options: &TransformOptions,
    mismatch: &'static str,
) -> Res<Sequence> {
    options.validate()?;
    match x {
        Sequence::Real32(a) => Ok(Sequence::Real32(r2r_impl(
            a, family, type_index, n, axis, norm, options,
        )?)),
        Sequence::Real64(a) => Ok(Sequence::Real64(r2r_impl(
            a, family, type_index, n, axis, norm, options,
        )?)),
        _ => Err(FftError::TypeMismatch(mismatch)),
    }
}

#[allow(clippy::too_many_arguments)]
fn r2r_impl<T: DctNum>(
    x: &ArrayD<T>,
    family: TransformFamily,
    type_index: usize,
    n: Option<usize>,
    axis: isize,
    norm: Normalization,
    options: &TransformOptions,
) -> Res<ArrayD<T>> {
    let axis = resolve_axis(axis, x.ndim())?;
    if n.is_some() {
        return Err(FftError::UnsupportedResize);
    }
    let kind = kinds::engine_kind(family, type_index)?;
    if type_index == 1 && norm != Normalization::None {
        return Err(FftError::UnsupportedNormalization(
            "orthonormalization is not defined for type I transforms".to_string(),
        ));
    }
    let m = x.len_of(Axis(axis));
    ensure_nonzero_len(m)?;
    if family == TransformFamily::Cosine && type_index == 1 && m < 2 {
        return Err(FftError::InvalidArgument(
            "a type I cosine transform requires an axis length of at least 2".to_string(),
        ));
    }

    let mut out = x.clone();
    let mut engine = Engine::new(options);
    let mut buffer = vec![T::zero(); m];
    for mut lane in out.lanes_mut(Axis(axis)) {
        for (buf, val) in buffer.iter_mut().zip(lane.iter()) {
            *buf = *val;
        }
        if norm == Normalization::Ortho && type_index == 3 {
            scaling::ortho_pre_scale(&mut buffer);
        }
        engine.r2r(kind, &mut buffer);
        if norm == Normalization::Ortho {
            scaling::ortho_post_scale(family, type_index, &mut buffer);
        }
        for (val, buf) in lane.iter_mut().zip(buffer.iter()) {
            *val = *buf;
        }
    }
    Ok(out)
}
