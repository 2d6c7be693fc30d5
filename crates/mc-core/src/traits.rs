//! The filterbank seam between spectrum analysis and the DCT stage.

use crate::error::Result;
use crate::frame::SpectralFrame;

/// Projects one spectral frame onto a fixed number of band energies.
///
/// Implementors own their filter design; the MFCC engine only relies on the
/// dimensions reported here and on `project` writing exactly
/// [`filter_count`](Filterbank::filter_count) values.
pub trait Filterbank {
    /// Number of bands produced per frame.
    fn filter_count(&self) -> usize;

    /// FFT length the filterbank was designed for.
    fn frame_size(&self) -> usize;

    /// Compute band energies for `frame` into `energies`.
    ///
    /// # Errors
    /// Returns an error if `frame` or `energies` do not match the filterbank dimensions.
    fn project(&mut self, frame: &SpectralFrame, energies: &mut [f32]) -> Result<()>;
}
