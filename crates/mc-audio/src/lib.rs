//! MFCC extraction: mel filterbank, DCT basis, engine and FFT front-end.
//!
//! ```
//! use mc_audio::mfcc::Mfcc;
//! use mc_audio::spectrum::SpectrumAnalyzer;
//!
//! let mut analyzer = SpectrumAnalyzer::new(512).unwrap();
//! let mut mfcc = Mfcc::new(512, 44_100, 40, 13).unwrap();
//! let samples: Vec<f32> = (0..512).map(|n| (n as f32 * 0.05).sin()).collect();
//! let spectrum = analyzer.analyze(&samples).unwrap();
//! let mut coefs = [0.0f32; 13];
//! mfcc.transform(&spectrum, &mut coefs).unwrap();
//! ```

pub mod dct;
pub mod mel;
pub mod mfcc;
pub mod spectrum;

/// Zero-filled buffer whose allocation failure is reported instead of aborting.
pub(crate) fn try_zeroed(len: usize) -> mc_core::Result<Vec<f32>> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)?;
    buf.resize(len, 0.0);
    Ok(buf)
}

/// Zero-filled `rows × cols` buffer. A size that overflows `usize` is reported
/// as the capacity overflow `Vec` itself would raise.
pub(crate) fn try_zeroed_matrix(rows: usize, cols: usize) -> mc_core::Result<Vec<f32>> {
    match rows.checked_mul(cols) {
        Some(len) => try_zeroed(len),
        None => try_zeroed(usize::MAX),
    }
}
