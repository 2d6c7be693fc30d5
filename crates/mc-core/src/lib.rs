//! Shared types for melcep: configuration, errors, spectral frames and the filterbank seam.

pub mod config;
pub mod error;
pub mod frame;
pub mod traits;

pub use error::{MfccError, Result};
