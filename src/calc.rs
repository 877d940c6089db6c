//! Simplified single-layer thin film equation, assuming a silicon substrate
//! and normal incidence:
//!
//! ```text
//! d = m * Δλ / 2 * sqrt(n² - 1)
//! ```
//!
//! where `d` is the film thickness in nm, `Δλ` the spectral bandwidth the
//! spectrum was acquired over, `n` the real part of the film's refractive
//! index and `m` the number of maxima counted within that bandwidth.

use crate::error::{FilmError, FilmResult};

/// Compute the film thickness in nanometers.
///
/// The square root has no real value below `n = 1`, so those indices are
/// reported as [`FilmError::IndexBelowUnity`] instead of producing NaN.
pub fn thickness(index: f64, spectral_range: f64, maxima: f64) -> FilmResult<f64> {
    if index.is_nan() || index < 1.0 {
        return Err(FilmError::IndexBelowUnity { index });
    }
    Ok(maxima * spectral_range / 2.0 * (index * index - 1.0).sqrt())
}
