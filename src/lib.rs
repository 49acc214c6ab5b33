#![doc = include_str!("../README.md")]

pub use rustdct::DctNum;
pub use rustfft::num_complex;
pub use rustfft::num_traits;
pub use rustfft::FftNum;

use ndarray::ArrayD;
use rustfft::num_complex::Complex;
use std::error;
use std::fmt;
use std::str::FromStr;

pub mod codec;
mod dispatch;
mod engine;
pub mod kinds;
mod scaling;

pub use dispatch::{
    dct, dst, fft, fft2, fftn, idct, idst, ifft, ifft2, ifftn, irfft, rfft,
};
pub use kinds::{EngineKind, TransformFamily};

pub(crate) type Res<T> = Result<T, FftError>;

/// Custom error returned by the transform entry points.
pub enum FftError {
    /// A real-only entry point was given a complex input array.
    /// No transform was performed and no output was allocated.
    TypeMismatch(&'static str),
    /// The length of an n-D `shape` argument disagrees with the axes it
    /// applies to. The first member is the given length, the second the
    /// expected one.
    ShapeMismatch(usize, usize),
    /// The requested axis does not resolve to a dimension of the input.
    /// The first member is the requested axis, the second the input's
    /// number of dimensions.
    InvalidAxis(isize, usize),
    /// The DCT/DST type index is outside the supported range 1..=4.
    UnsupportedType(usize),
    /// The requested normalization is not defined for this transform,
    /// or the normalization token was not recognized.
    UnsupportedNormalization(String),
    /// A length override was passed to a DCT/DST entry point.
    /// Padding and truncation are not implemented for those transforms.
    UnsupportedResize,
    /// An argument failed validation before any engine call.
    InvalidArgument(String),
    /// An error raised by the external transform engine, propagated unchanged.
    Engine(realfft::FftError),
}

impl FftError {
    fn fmt_internal(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let desc = match self {
            Self::TypeMismatch(what) => what.to_string(),
            Self::ShapeMismatch(given, expected) => {
                format!(
                    "Length of shape argument is {}, expected {} to match the transformed axes",
                    given, expected
                )
            }
            Self::InvalidAxis(axis, ndim) => {
                format!(
                    "Axis {} is out of range for an array of {} dimensions",
                    axis, ndim
                )
            }
            Self::UnsupportedType(index) => {
                format!(
                    "Transform type {} not understood, must be 1, 2, 3 or 4",
                    index
                )
            }
            Self::UnsupportedNormalization(what) => {
                format!("Unsupported normalization: {}", what)
            }
            Self::UnsupportedResize => {
                "Padding and truncation are not supported for DCT/DST transforms".to_string()
            }
            Self::InvalidArgument(what) => what.clone(),
            Self::Engine(err) => format!("Transform engine error: {}", err),
        };
        write!(f, "{}", desc)
    }
}

impl fmt::Debug for FftError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_internal(f)
    }
}

impl fmt::Display for FftError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_internal(f)
    }
}

impl error::Error for FftError {}

/// Normalization convention for the DCT/DST entry points.
///
/// `None` returns the engine's unnormalized output (the doubled-sum
/// convention of the legacy library). `Ortho` rescales so that the transform
/// matrix is orthonormal; it is rejected for type I transforms, where the
/// legacy interface never defined an orthonormal variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Normalization {
    #[default]
    None,
    Ortho,
}

impl FromStr for Normalization {
    type Err = FftError;

    /// Parse the legacy string tokens `"none"` and `"ortho"`.
    fn from_str(token: &str) -> Res<Self> {
        match token {
            "none" => Ok(Self::None),
            "ortho" => Ok(Self::Ortho),
            other => Err(FftError::UnsupportedNormalization(format!(
                "unrecognized token \"{}\"",
                other
            ))),
        }
    }
}

/// An n-dimensional numeric array of one of the four supported element types.
///
/// The legacy interface keyed its behavior on the dtype of the array it was
/// handed: the transform runs in the input's precision, and real-only entry
/// points reject complex data at runtime. This enum carries that contract.
/// All variants own their buffer; entry points never mutate the input.
#[derive(Debug, Clone)]
pub enum Sequence {
    Real32(ArrayD<f32>),
    Real64(ArrayD<f64>),
    Complex32(ArrayD<Complex<f32>>),
    Complex64(ArrayD<Complex<f64>>),
}

impl Sequence {
    /// Number of dimensions of the underlying array.
    pub fn ndim(&self) -> usize {
        match self {
            Self::Real32(a) => a.ndim(),
            Self::Real64(a) => a.ndim(),
            Self::Complex32(a) => a.ndim(),
            Self::Complex64(a) => a.ndim(),
        }
    }

    /// Shape of the underlying array.
    pub fn shape(&self) -> &[usize] {
        match self {
            Self::Real32(a) => a.shape(),
            Self::Real64(a) => a.shape(),
            Self::Complex32(a) => a.shape(),
            Self::Complex64(a) => a.shape(),
        }
    }

    /// True for the `Real32`/`Real64` variants.
    pub fn is_real(&self) -> bool {
        matches!(self, Self::Real32(_) | Self::Real64(_))
    }

    /// Extract the owned `f32` array, if this is the `Real32` variant.
    pub fn into_real32(self) -> Option<ArrayD<f32>> {
        match self {
            Self::Real32(a) => Some(a),
            _ => None,
        }
    }

    /// Extract the owned `f64` array, if this is the `Real64` variant.
    pub fn into_real64(self) -> Option<ArrayD<f64>> {
        match self {
            Self::Real64(a) => Some(a),
            _ => None,
        }
    }

    /// Extract the owned `Complex<f32>` array, if this is the `Complex32` variant.
    pub fn into_complex32(self) -> Option<ArrayD<Complex<f32>>> {
        match self {
            Self::Complex32(a) => Some(a),
            _ => None,
        }
    }

    /// Extract the owned `Complex<f64>` array, if this is the `Complex64` variant.
    pub fn into_complex64(self) -> Option<ArrayD<Complex<f64>>> {
        match self {
            Self::Complex64(a) => Some(a),
            _ => None,
        }
    }
}

impl From<ArrayD<f32>> for Sequence {
    fn from(a: ArrayD<f32>) -> Self {
        Self::Real32(a)
    }
}

impl From<ArrayD<f64>> for Sequence {
    fn from(a: ArrayD<f64>) -> Self {
        Self::Real64(a)
    }
}

impl From<ArrayD<Complex<f32>>> for Sequence {
    fn from(a: ArrayD<Complex<f32>>) -> Self {
        Self::Complex32(a)
    }
}

impl From<ArrayD<Complex<f64>>> for Sequence {
    fn from(a: ArrayD<Complex<f64>>) -> Self {
        Self::Complex64(a)
    }
}

/// Common options accepted by every transform entry point.
///
/// The planner effort token, thread count and the two layout hints exist for
/// call-site compatibility and are forwarded to the engine adapter, which is
/// free to ignore them. `overwrite_input` is a permission, not a guarantee;
/// the current implementation always allocates fresh output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformOptions {
    pub overwrite_input: bool,
    pub planner_effort: String,
    pub threads: usize,
    pub auto_align_input: bool,
    pub auto_contiguous: bool,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            overwrite_input: false,
            planner_effort: "measure".to_string(),
            threads: 1,
            auto_align_input: true,
            auto_contiguous: true,
        }
    }
}

impl TransformOptions {
    #[must_use]
    pub fn with_overwrite_input(mut self, overwrite_input: bool) -> Self {
        self.overwrite_input = overwrite_input;
        self
    }

    #[must_use]
    pub fn with_planner_effort(mut self, effort: &str) -> Self {
        self.planner_effort = effort.to_string();
        self
    }

    #[must_use]
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    pub(crate) fn validate(&self) -> Res<()> {
        if self.threads == 0 {
            return Err(FftError::InvalidArgument(
                "threads must be a positive integer".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{FftError, Normalization, Sequence, TransformOptions};
    use ndarray::{ArrayD, IxDyn};

    #[test]
    fn normalization_tokens_parse() {
        assert_eq!(
            "none".parse::<Normalization>().unwrap(),
            Normalization::None
        );
        assert_eq!(
            "ortho".parse::<Normalization>().unwrap(),
            Normalization::Ortho
        );
        let res = "orthonormal".parse::<Normalization>();
        assert!(matches!(res, Err(FftError::UnsupportedNormalization(_))));
    }

    #[test]
    fn default_options_match_legacy_defaults() {
        let opts = TransformOptions::default();
        assert!(!opts.overwrite_input);
        assert_eq!(opts.planner_effort, "measure");
        assert_eq!(opts.threads, 1);
        assert!(opts.auto_align_input);
        assert!(opts.auto_contiguous);
    }

    #[test]
    fn zero_threads_is_rejected() {
        let opts = TransformOptions::default().with_threads(0);
        assert!(matches!(opts.validate(), Err(FftError::InvalidArgument(_))));
    }

    #[test]
    fn sequence_reports_kind_and_shape() {
        let seq = Sequence::from(ArrayD::<f64>::zeros(IxDyn(&[3, 4])));
        assert!(seq.is_real());
        assert_eq!(seq.ndim(), 2);
        assert_eq!(seq.shape(), &[3, 4]);
        assert!(seq.into_complex64().is_none());
    }

    #[test]
    fn errors_format_without_panicking() {
        let errors = [
            FftError::TypeMismatch("input array must be real"),
            FftError::ShapeMismatch(2, 3),
            FftError::InvalidAxis(-4, 2),
            FftError::UnsupportedType(5),
            FftError::UnsupportedNormalization("token".to_string()),
            FftError::UnsupportedResize,
            FftError::InvalidArgument("threads must be a positive integer".to_string()),
        ];
        for err in &errors {
            assert!(!format!("{}", err).is_empty());
        }
    }
}
