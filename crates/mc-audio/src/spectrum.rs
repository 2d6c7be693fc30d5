//! Forward real FFT producing the polar spectrum consumed by the filterbank.
//!
//! Operates on exactly one frame of samples. Windowing and hop handling
//! belong to the caller.

use std::sync::Arc;

use mc_core::frame::SpectralFrame;
use mc_core::{MfccError, Result};
use realfft::num_complex::Complex32;
use realfft::{RealFftPlanner, RealToComplex};

/// Pre-planned FFT with reusable buffers.
pub struct SpectrumAnalyzer {
    fft: Arc<dyn RealToComplex<f32>>,
    frame_size: usize,
    input: Vec<f32>,
    output: Vec<Complex32>,
    scratch: Vec<Complex32>,
}

impl SpectrumAnalyzer {
    /// Plan a forward FFT of `frame_size` samples.
    ///
    /// # Errors
    /// Returns [`MfccError::ZeroDimension`] if `frame_size` is zero.
    pub fn new(frame_size: usize) -> Result<Self> {
        if frame_size == 0 {
            return Err(MfccError::ZeroDimension { what: "frame_size" });
        }
        let mut planner = RealFftPlanner::<f32>::new();
        let fft = planner.plan_fft_forward(frame_size);
        let input = fft.make_input_vec();
        let output = fft.make_output_vec();
        let scratch = fft.make_scratch_vec();
        Ok(Self {
            fft,
            frame_size,
            input,
            output,
            scratch,
        })
    }

    #[must_use]
    pub fn frame_size(&self) -> usize {
        self.frame_size
    }

    /// Spectrum of one frame in a freshly allocated [`SpectralFrame`].
    ///
    /// # Errors
    /// See [`SpectrumAnalyzer::analyze_into`].
    ///
    /// # Example
    /// ```
    /// use mc_audio::spectrum::SpectrumAnalyzer;
    /// let mut analyzer = SpectrumAnalyzer::new(8).unwrap();
    /// let frame = analyzer.analyze(&[1.0; 8]).unwrap();
    /// assert_eq!(frame.len(), 5);
    /// assert!((frame.norm[0] - 8.0).abs() < 1e-5);
    /// ```
    pub fn analyze(&mut self, samples: &[f32]) -> Result<SpectralFrame> {
        let mut frame = SpectralFrame::new(self.frame_size);
        self.analyze_into(samples, &mut frame)?;
        Ok(frame)
    }

    /// Spectrum of one frame written into `frame` without allocating.
    ///
    /// Magnitudes are unnormalized (`|X[k]|`), phases in radians.
    ///
    /// # Errors
    /// Returns [`MfccError::SampleLength`] if `samples` is not `frame_size` long,
    /// [`MfccError::SpectrumLength`] if `frame` has the wrong bin count, or
    /// [`MfccError::Fft`] if the transform fails.
    pub fn analyze_into(&mut self, samples: &[f32], frame: &mut SpectralFrame) -> Result<()> {
        if samples.len() != self.frame_size {
            return Err(MfccError::SampleLength {
                expected: self.frame_size,
                got: samples.len(),
            });
        }
        if frame.len() != self.output.len() || frame.phase.len() != self.output.len() {
            return Err(MfccError::SpectrumLength {
                expected: self.output.len(),
                got: frame.len(),
            });
        }

        self.input.copy_from_slice(samples);
        self.fft
            .process_with_scratch(&mut self.input, &mut self.output, &mut self.scratch)
            .map_err(|e| MfccError::Fft(e.to_string()))?;

        for ((c, norm), phase) in self
            .output
            .iter()
            .zip(frame.norm.iter_mut())
            .zip(frame.phase.iter_mut())
        {
            *norm = c.norm();
            *phase = c.arg();
        }
        Ok(())
    }
}
