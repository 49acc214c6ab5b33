//! Adapter around the external transform engines.
//!
//! All transform arithmetic is delegated here: RustFFT for complex FFTs,
//! RealFFT for the half-complex real transforms, and RustDCT for the
//! real-even/real-odd kinds. The rest of the crate only sees 1-D lane-level
//! calls; planning and plan caching stay inside the planners.
//!
//! The planner effort token, thread count and layout hints from
//! [`TransformOptions`](crate::TransformOptions) are accepted for call-site
//! compatibility. None of the wrapped engines take planning hints, so they
//! are ignored here.

use realfft::RealFftPlanner;
use rustdct::{DctNum, DctPlanner};
use rustfft::num_complex::Complex;
use rustfft::FftPlanner;

use crate::kinds::EngineKind;
use crate::{FftError, Res, TransformOptions};

pub(crate) struct Engine<T: DctNum> {
    fft: FftPlanner<T>,
    real: RealFftPlanner<T>,
    r2r: DctPlanner<T>,
}

impl<T: DctNum> Engine<T> {
    pub fn new(_options: &TransformOptions) -> Self {
        Self {
            fft: FftPlanner::new(),
            real: RealFftPlanner::new(),
            r2r: DctPlanner::new(),
        }
    }

    /// In-place 1-D complex transform. Unnormalized in both directions;
    /// inverse-direction scaling is the dispatch layer's concern.
    pub fn c2c(&mut self, buffer: &mut [Complex<T>], inverse: bool) {
        let plan = if inverse {
            self.fft.plan_fft_inverse(buffer.len())
        } else {
            self.fft.plan_fft_forward(buffer.len())
        };
        plan.process(buffer);
    }

    /// Forward half-complex transform of a real lane of length `n`,
    /// returning the `n/2 + 1` non-redundant bins.
    pub fn r2c(&mut self, input: &mut [T]) -> Res<Vec<Complex<T>>> {
        let plan = self.real.plan_fft_forward(input.len());
        let mut output = plan.make_output_vec();
        plan.process(input, &mut output).map_err(FftError::Engine)?;
        Ok(output)
    }

    /// Inverse half-complex transform of `n/2 + 1` bins to a real lane of
    /// length `n`. Unnormalized, like the complex inverse.
    pub fn c2r(&mut self, input: &mut [Complex<T>], n: usize) -> Res<Vec<T>> {
        let plan = self.real.plan_fft_inverse(n);
        let mut output = plan.make_output_vec();
        plan.process(input, &mut output).map_err(FftError::Engine)?;
        Ok(output)
    }

    /// In-place 1-D real-even/real-odd transform.
    ///
    /// RustDCT computes plain trigonometric sums; the legacy engine defines
    /// every kind with a factor two on the sum, so the output is doubled
    /// to present that convention to the normalization layer.
    pub fn r2r(&mut self, kind: EngineKind, buffer: &mut [T]) {
        let len = buffer.len();
        match kind {
            EngineKind::RealEven00 => self.r2r.plan_dct1(len).process_dct1(buffer),
            EngineKind::RealEven10 => self.r2r.plan_dct2(len).process_dct2(buffer),
            EngineKind::RealEven01 => self.r2r.plan_dct3(len).process_dct3(buffer),
            EngineKind::RealEven11 => self.r2r.plan_dct4(len).process_dct4(buffer),
            EngineKind::RealOdd00 => self.r2r.plan_dst1(len).process_dst1(buffer),
            EngineKind::RealOdd10 => self.r2r.plan_dst2(len).process_dst2(buffer),
            EngineKind::RealOdd01 => self.r2r.plan_dst3(len).process_dst3(buffer),
            EngineKind::RealOdd11 => self.r2r.plan_dst4(len).process_dst4(buffer),
        }
        let two = T::from_f64(2.0).unwrap();
        for val in buffer.iter_mut() {
            *val = *val * two;
        }
    }
}
