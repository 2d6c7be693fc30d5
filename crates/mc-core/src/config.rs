//! MFCC transform configuration and TOML loading.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::MfccError;

/// MFCC transform configuration. Immutable once an engine is built from it.
///
/// Missing TOML keys fall back to [`MfccConfig::default`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MfccConfig {
    /// FFT length the filterbank expects.
    pub frame_size: usize,
    pub sample_rate: u32,
    pub filter_count: usize,
    /// Must not exceed `filter_count`.
    pub coefficient_count: usize,
}

impl Default for MfccConfig {
    fn default() -> Self {
        Self {
            frame_size: 512,
            sample_rate: 44_100,
            filter_count: 40,
            coefficient_count: 13,
        }
    }
}

impl MfccConfig {
    /// Build a configuration without validating it.
    #[must_use]
    pub fn new(
        frame_size: usize,
        sample_rate: u32,
        filter_count: usize,
        coefficient_count: usize,
    ) -> Self {
        Self {
            frame_size,
            sample_rate,
            filter_count,
            coefficient_count,
        }
    }

    /// Number of spectrum bins for `frame_size`.
    #[inline]
    #[must_use]
    pub fn bin_count(&self) -> usize {
        self.frame_size / 2 + 1
    }

    /// Reject zero dimensions and more coefficients than filters.
    ///
    /// # Errors
    /// Returns [`MfccError::ZeroDimension`] or [`MfccError::TooManyCoefficients`].
    ///
    /// # Example
    /// ```
    /// use mc_core::config::MfccConfig;
    /// assert!(MfccConfig::default().validate().is_ok());
    /// assert!(MfccConfig::new(512, 44_100, 4, 5).validate().is_err());
    /// ```
    pub fn validate(&self) -> crate::Result<()> {
        let dims = [
            ("frame_size", self.frame_size),
            ("sample_rate", self.sample_rate as usize),
            ("filter_count", self.filter_count),
            ("coefficient_count", self.coefficient_count),
        ];
        if let Some(&(what, _)) = dims.iter().find(|(_, v)| *v == 0) {
            return Err(MfccError::ZeroDimension { what });
        }
        if self.coefficient_count > self.filter_count {
            return Err(MfccError::TooManyCoefficients {
                coefficients: self.coefficient_count,
                filters: self.filter_count,
            });
        }
        Ok(())
    }

    /// Parse and validate a TOML document.
    ///
    /// # Errors
    /// Returns an error if the TOML is malformed or the values are invalid.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text).context("Invalid MFCC configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML configuration file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot read {}", path.display()))?;
        let config = Self::from_toml_str(&text)
            .with_context(|| format!("Cannot load {}", path.display()))?;
        log::debug!("Loaded MFCC configuration from {}: {config:?}", path.display());
        Ok(config)
    }
}
