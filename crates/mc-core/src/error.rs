//! Error type shared by the melcep crates.

use std::collections::TryReserveError;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, MfccError>;

#[derive(Debug, Error)]
pub enum MfccError {
    #[error("{what} must be non-zero")]
    ZeroDimension { what: &'static str },
    #[error("{coefficients} coefficients requested from only {filters} filters")]
    TooManyCoefficients { coefficients: usize, filters: usize },
    #[error("buffer allocation failed: {0}")]
    Allocation(#[from] TryReserveError),
    #[error("filterbank mismatch: expected {expected_filters} filters over {expected_frame} samples, got {filters} over {frame}")]
    FilterbankMismatch {
        expected_filters: usize,
        expected_frame: usize,
        filters: usize,
        frame: usize,
    },
    #[error("spectrum has {got} bins, expected {expected}")]
    SpectrumLength { expected: usize, got: usize },
    #[error("energy vector has {got} bands, expected {expected}")]
    EnergyLength { expected: usize, got: usize },
    #[error("output buffer holds {got} values, expected {expected}")]
    OutputLength { expected: usize, got: usize },
    #[error("frame has {got} samples, expected {expected}")]
    SampleLength { expected: usize, got: usize },
    #[error("fft error: {0}")]
    Fft(String),
}
