//! Mel-Frequency Cepstral Coefficients (MFCC) extraction.
//!
//! One spectral frame in, `coefficient_count` cepstral coefficients out: the
//! filterbank fills a scratch energy buffer, then the precomputed DCT basis
//! is applied to it. All buffers are allocated at construction.

use mc_core::config::MfccConfig;
use mc_core::frame::SpectralFrame;
use mc_core::traits::Filterbank;
use mc_core::{MfccError, Result};

use crate::dct::DctBasis;
use crate::mel::MelFilterbank;
use crate::try_zeroed;

/// MFCC engine owning its filterbank, DCT basis and scratch energies.
///
/// `transform` takes `&mut self` because it reuses the scratch buffer; use one
/// engine per thread.
pub struct Mfcc<F: Filterbank = MelFilterbank> {
    config: MfccConfig,
    filterbank: F,
    /// Filterbank output, overwritten on every call.
    energies: Vec<f32>,
    basis: DctBasis,
}

impl Mfcc<MelFilterbank> {
    /// Engine with a Slaney mel filterbank.
    ///
    /// # Errors
    /// Returns an error if the configuration is invalid or buffers cannot be allocated.
    ///
    /// # Example
    /// ```
    /// use mc_audio::mfcc::Mfcc;
    /// let mfcc = Mfcc::new(1024, 44_100, 40, 13).unwrap();
    /// assert_eq!(mfcc.config().coefficient_count, 13);
    /// assert!(Mfcc::new(1024, 44_100, 4, 13).is_err());
    /// ```
    pub fn new(
        frame_size: usize,
        sample_rate: u32,
        filter_count: usize,
        coefficient_count: usize,
    ) -> Result<Self> {
        Self::from_config(&MfccConfig::new(
            frame_size,
            sample_rate,
            filter_count,
            coefficient_count,
        ))
    }

    /// Engine with a Slaney mel filterbank built from `config`.
    ///
    /// # Errors
    /// Returns an error if the configuration is invalid or buffers cannot be allocated.
    pub fn from_config(config: &MfccConfig) -> Result<Self> {
        config.validate()?;
        let mut filterbank = MelFilterbank::new(config.filter_count, config.frame_size)?;
        filterbank.set_mel_coeffs_slaney(config.sample_rate);
        Self::with_filterbank(*config, filterbank)
    }
}

impl<F: Filterbank> Mfcc<F> {
    /// Engine around a caller-supplied filterbank.
    ///
    /// # Errors
    /// Returns an error if the configuration is invalid, the filterbank
    /// dimensions disagree with it, or buffers cannot be allocated.
    pub fn with_filterbank(config: MfccConfig, filterbank: F) -> Result<Self> {
        config.validate()?;
        if filterbank.filter_count() != config.filter_count
            || filterbank.frame_size() != config.frame_size
        {
            return Err(MfccError::FilterbankMismatch {
                expected_filters: config.filter_count,
                expected_frame: config.frame_size,
                filters: filterbank.filter_count(),
                frame: filterbank.frame_size(),
            });
        }

        let energies = try_zeroed(config.filter_count)?;
        let basis = DctBasis::new(config.filter_count, config.coefficient_count)?;

        log::debug!(
            "MFCC engine: frame {} @ {} Hz, {} filters -> {} coefficients",
            config.frame_size,
            config.sample_rate,
            config.filter_count,
            config.coefficient_count
        );

        Ok(Self {
            config,
            filterbank,
            energies,
            basis,
        })
    }

    /// Compute the MFCCs of one spectral frame into `out`.
    ///
    /// `out` must hold exactly `coefficient_count` values; it is overwritten,
    /// never accumulated into.
    ///
    /// # Errors
    /// Returns [`MfccError::OutputLength`] for a wrongly sized `out` (left
    /// untouched), or whatever the filterbank reports for `spectrum`.
    pub fn transform(&mut self, spectrum: &SpectralFrame, out: &mut [f32]) -> Result<()> {
        if out.len() != self.config.coefficient_count {
            return Err(MfccError::OutputLength {
                expected: self.config.coefficient_count,
                got: out.len(),
            });
        }
        self.filterbank.project(spectrum, &mut self.energies)?;
        self.basis.apply(&self.energies, out)?;
        log::trace!("MFCC c0 = {:.4}", out[0]);
        Ok(())
    }

    /// Apply only the DCT stage to caller-supplied filter energies.
    ///
    /// Needs no scratch state, so a shared engine can serve several threads.
    ///
    /// # Errors
    /// Returns [`MfccError::EnergyLength`] or [`MfccError::OutputLength`] on size mismatch.
    pub fn transform_energies(&self, energies: &[f32], out: &mut [f32]) -> Result<()> {
        self.basis.apply(energies, out)
    }

    #[must_use]
    pub fn config(&self) -> &MfccConfig {
        &self.config
    }

    #[must_use]
    pub fn basis(&self) -> &DctBasis {
        &self.basis
    }

    #[must_use]
    pub fn filterbank(&self) -> &F {
        &self.filterbank
    }
}
