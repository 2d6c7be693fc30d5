//! Triangular mel filterbank.
//!
//! Filters are stored as one weight row per band over the `frame_size / 2 + 1`
//! spectrum bins. Projection sums `norm * weight` per band and log-compresses
//! the result.

use mc_core::frame::SpectralFrame;
use mc_core::traits::Filterbank;
use mc_core::{MfccError, Result};

use crate::try_zeroed_matrix;

/// Lowest band edge of Slaney's layout (Hz).
const SLANEY_LOWEST_HZ: f32 = 133.333_3;
const SLANEY_LINEAR_SPACING: f32 = 66.666_664;
const SLANEY_LOG_SPACING: f32 = 1.071_170_3;
const SLANEY_LINEAR_FILTERS: usize = 13;

/// Floor applied before the log so silent bands stay finite.
const ENERGY_FLOOR: f32 = 1e-10;

/// Mel filterbank with per-bin weights.
pub struct MelFilterbank {
    filter_count: usize,
    frame_size: usize,
    bins: usize,
    /// Row-major `filter_count × bins`.
    weights: Vec<f32>,
}

impl MelFilterbank {
    /// Allocate an all-zero filterbank; call one of the `set_mel_coeffs*` methods to fill it.
    ///
    /// # Errors
    /// Returns [`MfccError::Allocation`] if the weight matrix cannot be allocated,
    /// including when its size overflows `usize`.
    pub fn new(filter_count: usize, frame_size: usize) -> Result<Self> {
        let bins = frame_size / 2 + 1;
        let weights = try_zeroed_matrix(filter_count, bins)?;
        Ok(Self {
            filter_count,
            frame_size,
            bins,
            weights,
        })
    }

    /// Slaney's auditory-toolbox layout: 13 linear bands from 133.33 Hz spaced
    /// 66.67 Hz apart, then bands growing by a constant ratio. Each triangle has
    /// unit area.
    pub fn set_mel_coeffs_slaney(&mut self, sample_rate: u32) {
        let last_linear =
            SLANEY_LOWEST_HZ + (SLANEY_LINEAR_FILTERS - 1) as f32 * SLANEY_LINEAR_SPACING;
        let edges: Vec<f32> = (0..self.filter_count + 2)
            .map(|k| {
                if k < SLANEY_LINEAR_FILTERS {
                    SLANEY_LOWEST_HZ + k as f32 * SLANEY_LINEAR_SPACING
                } else {
                    last_linear * SLANEY_LOG_SPACING.powi((k + 1 - SLANEY_LINEAR_FILTERS) as i32)
                }
            })
            .collect();
        self.fill_triangles(&edges, sample_rate);
    }

    /// Bands evenly spaced on the Slaney mel scale between `f_min` and `f_max`.
    pub fn set_mel_coeffs(&mut self, sample_rate: u32, f_min: f32, f_max: f32) {
        let mel_low = hz_to_mel(f_min);
        let mel_high = hz_to_mel(f_max.min(sample_rate as f32 / 2.0));
        let points = self.filter_count + 1;
        let edges: Vec<f32> = (0..=points)
            .map(|k| mel_to_hz(mel_low + (mel_high - mel_low) * k as f32 / points as f32))
            .collect();
        self.fill_triangles(&edges, sample_rate);
    }

    /// Weights of band `filter`, one per spectrum bin.
    ///
    /// # Panics
    /// Panics if `filter >= filter_count`.
    #[must_use]
    pub fn weights(&self, filter: usize) -> &[f32] {
        &self.weights[filter * self.bins..(filter + 1) * self.bins]
    }

    /// Rebuild every band from `filter_count + 2` ascending edge frequencies.
    fn fill_triangles(&mut self, edges: &[f32], sample_rate: u32) {
        let bin_hz = sample_rate as f32 / self.frame_size as f32;
        let nyquist = sample_rate as f32 / 2.0;
        let mut empty = 0usize;

        self.weights.fill(0.0);
        for f in 0..self.filter_count {
            let (lower, center, upper) = (edges[f], edges[f + 1], edges[f + 2]);
            if lower >= nyquist {
                empty += 1;
                continue;
            }
            let height = 2.0 / (upper - lower);
            let row = &mut self.weights[f * self.bins..(f + 1) * self.bins];
            for (bin, w) in row.iter_mut().enumerate() {
                let freq = bin as f32 * bin_hz;
                *w = if freq > lower && freq < center {
                    (freq - lower) * height / (center - lower)
                } else if freq >= center && freq < upper {
                    (upper - freq) * height / (upper - center)
                } else {
                    0.0
                };
            }
        }

        if empty > 0 {
            log::warn!(
                "{empty} of {} mel bands start above Nyquist ({nyquist} Hz) and stay empty",
                self.filter_count
            );
        }
        log::debug!(
            "Mel filterbank: {} bands over {} bins, {:.1}..{:.1} Hz",
            self.filter_count,
            self.bins,
            edges.first().copied().unwrap_or_default(),
            edges.last().copied().unwrap_or_default()
        );
    }
}

impl Filterbank for MelFilterbank {
    fn filter_count(&self) -> usize {
        self.filter_count
    }

    fn frame_size(&self) -> usize {
        self.frame_size
    }

    fn project(&mut self, frame: &SpectralFrame, energies: &mut [f32]) -> Result<()> {
        if frame.len() != self.bins {
            return Err(MfccError::SpectrumLength {
                expected: self.bins,
                got: frame.len(),
            });
        }
        if energies.len() != self.filter_count {
            return Err(MfccError::OutputLength {
                expected: self.filter_count,
                got: energies.len(),
            });
        }
        for (energy, row) in energies.iter_mut().zip(self.weights.chunks_exact(self.bins)) {
            let sum: f32 = frame.norm.iter().zip(row).map(|(n, w)| n * w).sum();
            *energy = sum.max(ENERGY_FLOOR).ln();
        }
        Ok(())
    }
}

/// Hz to mel, Slaney scale (linear below 1 kHz, logarithmic above).
#[inline]
#[must_use]
pub fn hz_to_mel(hz: f32) -> f32 {
    const F_SP: f32 = 200.0 / 3.0;
    const MIN_LOG_HZ: f32 = 1000.0;
    const MIN_LOG_MEL: f32 = 15.0;
    let logstep = 6.4f32.ln() / 27.0;
    if hz < MIN_LOG_HZ {
        hz / F_SP
    } else {
        MIN_LOG_MEL + (hz / MIN_LOG_HZ).ln() / logstep
    }
}

/// Mel to Hz, inverse of [`hz_to_mel`].
#[inline]
#[must_use]
pub fn mel_to_hz(mel: f32) -> f32 {
    const F_SP: f32 = 200.0 / 3.0;
    const MIN_LOG_HZ: f32 = 1000.0;
    const MIN_LOG_MEL: f32 = 15.0;
    let logstep = 6.4f32.ln() / 27.0;
    if mel < MIN_LOG_MEL {
        mel * F_SP
    } else {
        MIN_LOG_HZ * ((mel - MIN_LOG_MEL) * logstep).exp()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slaney(filters: usize, frame_size: usize, sample_rate: u32) -> MelFilterbank {
        let mut fb = MelFilterbank::new(filters, frame_size).expect("alloc");
        fb.set_mel_coeffs_slaney(sample_rate);
        fb
    }

    #[test]
    fn mel_scale_roundtrip() {
        for hz in [100.0f32, 500.0, 1000.0, 2500.0, 8000.0] {
            let back = mel_to_hz(hz_to_mel(hz));
            assert!((hz - back).abs() / hz < 1e-4, "{hz} -> {back}");
        }
        assert!((hz_to_mel(1000.0) - 15.0).abs() < 1e-5);
    }

    #[test]
    fn oversized_filterbank_is_an_allocation_error() {
        assert!(matches!(
            MelFilterbank::new(40, usize::MAX),
            Err(MfccError::Allocation(_))
        ));
        assert!(matches!(
            MelFilterbank::new(40, 1 << 50),
            Err(MfccError::Allocation(_))
        ));
    }

    #[test]
    fn new_filterbank_is_zero() {
        let fb = MelFilterbank::new(4, 64).expect("alloc");
        assert_eq!(fb.filter_count(), 4);
        assert_eq!(fb.frame_size(), 64);
        assert!((0..4).all(|f| fb.weights(f).iter().all(|&w| w == 0.0)));
    }

    #[test]
    fn slaney_weights_are_non_negative_and_bounded() {
        let fb = slaney(40, 1024, 44_100);
        for f in 0..40 {
            let row = fb.weights(f);
            assert_eq!(row.len(), 513);
            assert!(row.iter().all(|&w| w >= 0.0));
            assert!(row.iter().any(|&w| w > 0.0), "band {f} is empty");
        }
    }

    #[test]
    fn slaney_first_band_peaks_at_second_edge() {
        // 8 kHz over 1024 bins: 7.8125 Hz per bin. Band 0 spans 133.33..266.67 Hz
        // and peaks at 200 Hz, where its height is 2 / 133.33.
        let fb = slaney(40, 1024, 8_000);
        let row = fb.weights(0);
        let bin_hz = 8_000.0 / 1024.0;
        let (peak_bin, peak) = row
            .iter()
            .enumerate()
            .fold((0, 0.0f32), |acc, (b, &w)| if w > acc.1 { (b, w) } else { acc });
        assert!((peak_bin as f32 * bin_hz - 200.0).abs() <= bin_hz);
        assert!(peak <= 2.0 / 133.333 + 1e-6);
        assert_eq!(row[(133.0 / bin_hz) as usize], 0.0);
    }

    #[test]
    fn bands_above_nyquist_stay_empty() {
        // 40 Slaney bands reach past 6 kHz; at 8 kHz sampling the top ones start above 4 kHz.
        let fb = slaney(40, 256, 8_000);
        assert!(fb.weights(39).iter().all(|&w| w == 0.0));
        assert!(fb.weights(0).iter().any(|&w| w > 0.0));
    }

    #[test]
    fn project_log_compresses_and_floors() {
        let mut fb = slaney(4, 64, 8_000);
        let silent = SpectralFrame::new(64);
        let mut energies = [0.0f32; 4];
        fb.project(&silent, &mut energies).expect("project");
        for e in energies {
            assert!((e - ENERGY_FLOOR.ln()).abs() < 1e-4);
        }

        let loud = SpectralFrame::from_norm(vec![1.0; 33]);
        fb.project(&loud, &mut energies).expect("project");
        for (f, e) in energies.iter().enumerate() {
            let expected: f32 = fb.weights(f).iter().sum::<f32>().max(ENERGY_FLOOR).ln();
            assert!((e - expected).abs() < 1e-5);
        }
    }

    #[test]
    fn project_rejects_wrong_lengths() {
        let mut fb = slaney(4, 64, 8_000);
        let mut energies = [0.0f32; 4];
        let short = SpectralFrame::new(32);
        assert!(matches!(
            fb.project(&short, &mut energies),
            Err(MfccError::SpectrumLength { expected: 33, got: 17 })
        ));
        let mut too_few = [0.0f32; 3];
        assert!(matches!(
            fb.project(&SpectralFrame::new(64), &mut too_few),
            Err(MfccError::OutputLength { expected: 4, got: 3 })
        ));
    }

    #[test]
    fn even_mel_spacing_covers_range() {
        let mut fb = MelFilterbank::new(26, 512).expect("alloc");
        fb.set_mel_coeffs(16_000, 300.0, 8_000.0);
        let bin_hz = 16_000.0 / 512.0;
        let first_nonzero = fb.weights(0).iter().position(|&w| w > 0.0).expect("band 0");
        assert!(first_nonzero as f32 * bin_hz > 300.0);
        assert!(fb.weights(25).iter().any(|&w| w > 0.0));
    }
}
