//! Spectral frame passed from the FFT stage to the filterbank.

/// Polar spectrum of one analysis frame.
///
/// Holds `frame_size / 2 + 1` bins: magnitudes in `norm`, phases (radians) in `phase`.
///
/// # Example
/// ```
/// use mc_core::frame::SpectralFrame;
/// let frame = SpectralFrame::new(512);
/// assert_eq!(frame.len(), 257);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SpectralFrame {
    pub norm: Vec<f32>,
    pub phase: Vec<f32>,
}

impl SpectralFrame {
    /// Zeroed frame sized for an FFT of `frame_size` samples.
    #[must_use]
    pub fn new(frame_size: usize) -> Self {
        let bins = frame_size / 2 + 1;
        Self {
            norm: vec![0.0; bins],
            phase: vec![0.0; bins],
        }
    }

    /// Frame with the given magnitudes and zero phase.
    #[must_use]
    pub fn from_norm(norm: Vec<f32>) -> Self {
        let phase = vec![0.0; norm.len()];
        Self { norm, phase }
    }

    /// Number of frequency bins.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.norm.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.norm.is_empty()
    }

    /// Reset magnitudes and phases to zero without reallocating.
    pub fn zeros(&mut self) {
        self.norm.fill(0.0);
        self.phase.fill(0.0);
    }
}
