//! Precomputed DCT-II basis used to turn log filter energies into cepstral coefficients.

use std::f64::consts::PI;

use mc_core::{MfccError, Result};

use crate::try_zeroed_matrix;

/// Immutable `filters × coefficients` cosine basis, stored filter-major.
///
/// `basis[i][j] = S * cos(j * (i + 0.5) * π / filters)` with
/// `S = 1 / sqrt(filters / 2)`, and column 0 further scaled by `sqrt(2) / 2`.
///
/// Square roots and cosines are single precision; the reciprocal and the DC
/// correction are computed in `f64` and rounded to `f32`.
///
/// # Example
/// ```
/// use mc_audio::dct::DctBasis;
/// let basis = DctBasis::new(4, 2).unwrap();
/// assert_eq!(basis.row(0).len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DctBasis {
    filters: usize,
    coefficients: usize,
    data: Box<[f32]>,
}

impl DctBasis {
    /// Compute the basis for the given dimensions.
    ///
    /// # Errors
    /// Returns [`MfccError::ZeroDimension`] for zero dimensions,
    /// [`MfccError::TooManyCoefficients`] when `coefficients > filters`, and
    /// [`MfccError::Allocation`] if the matrix cannot be allocated.
    pub fn new(filters: usize, coefficients: usize) -> Result<Self> {
        if filters == 0 {
            return Err(MfccError::ZeroDimension {
                what: "filter_count",
            });
        }
        if coefficients == 0 {
            return Err(MfccError::ZeroDimension {
                what: "coefficient_count",
            });
        }
        if coefficients > filters {
            return Err(MfccError::TooManyCoefficients {
                coefficients,
                filters,
            });
        }

        let mut data = try_zeroed_matrix(filters, coefficients)?;
        let n = filters as f64;
        let scaling = (1.0 / f64::from(((n / 2.0) as f32).sqrt())) as f32;
        let dc_correction = f64::from(2.0f32.sqrt()) / 2.0;
        for (i, row) in data.chunks_exact_mut(coefficients).enumerate() {
            for (j, value) in row.iter_mut().enumerate() {
                let angle = j as f64 * (i as f64 + 0.5) * PI / n;
                *value = scaling * (angle as f32).cos();
            }
            row[0] = (f64::from(row[0]) * dc_correction) as f32;
        }

        Ok(Self {
            filters,
            coefficients,
            data: data.into_boxed_slice(),
        })
    }

    #[inline]
    #[must_use]
    pub fn filters(&self) -> usize {
        self.filters
    }

    #[inline]
    #[must_use]
    pub fn coefficients(&self) -> usize {
        self.coefficients
    }

    /// Basis value for filter `i`, coefficient `j`.
    ///
    /// # Panics
    /// Panics if `i >= filters` or `j >= coefficients`.
    #[inline]
    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> f32 {
        self.data[i * self.coefficients + j]
    }

    /// All coefficient weights for filter `i`.
    ///
    /// # Panics
    /// Panics if `i >= filters`.
    #[inline]
    #[must_use]
    pub fn row(&self, i: usize) -> &[f32] {
        &self.data[i * self.coefficients..(i + 1) * self.coefficients]
    }

    /// Row-vector × matrix product: `out[j] = Σ_i energies[i] * basis[i][j]`.
    ///
    /// `out` is zeroed first, then accumulated filter-major, coefficient-minor.
    ///
    /// # Errors
    /// Returns [`MfccError::EnergyLength`] if `energies` is not `filters` long,
    /// or [`MfccError::OutputLength`] if `out` is not `coefficients` long.
    pub fn apply(&self, energies: &[f32], out: &mut [f32]) -> Result<()> {
        if energies.len() != self.filters {
            return Err(MfccError::EnergyLength {
                expected: self.filters,
                got: energies.len(),
            });
        }
        if out.len() != self.coefficients {
            return Err(MfccError::OutputLength {
                expected: self.coefficients,
                got: out.len(),
            });
        }
        out.fill(0.0);
        for (&energy, row) in energies.iter().zip(self.data.chunks_exact(self.coefficients)) {
            for (o, &b) in out.iter_mut().zip(row) {
                *o += energy * b;
            }
        }
        Ok(())
    }
}
