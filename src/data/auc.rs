//! Pure AUC (definite integral) primitives
//!
//! Standalone functions for integrating a sampled curve over its time base
//! on raw `&[f64]` slices. The CBV pipeline uses them to integrate the
//! concentration-like curve over the bolus window; sibling analyses can use
//! them on any time-activity curve.
//!
//! # Design
//!
//! All functions in this module are **pure math**: no dependency on
//! acquisition state, no allocation. They accept raw slices and an
//! [`AUCMethod`], and return `f64`.
//!
//! Time bases may repeat a timestamp (two frames acquired at the same
//! instant). Such a zero-width segment contributes nothing; it never divides.
//!
//! # Example
//!
//! ```rust
//! use perfsol::data::auc::{auc, AUCMethod};
//!
//! let times = [0.0, 1.0, 2.0, 4.0];
//! let values = [0.0, 10.0, 8.0, 4.0];
//!
//! let total = auc(&times, &values, AUCMethod::Linear).unwrap();
//! assert!((total - 26.0).abs() < 1e-10);
//! ```

use serde::{Deserialize, Serialize};

use super::error::CurveError;

/// Integration rule used between consecutive samples
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AUCMethod {
    /// Linear trapezoidal rule on every segment
    #[default]
    Linear,
    /// Linear for ascending segments, log-linear for strictly descending positive ones
    LinUpLogDown,
}

/// Check if log-linear method should be used for this segment
#[inline]
fn use_log_linear(c1: f64, c2: f64) -> bool {
    c2 < c1 && c1 > 0.0 && c2 > 0.0 && ((c1 / c2) - 1.0).abs() >= 1e-10
}

/// Linear trapezoidal area for a single segment
#[inline]
fn auc_linear(c1: f64, c2: f64, dt: f64) -> f64 {
    (c1 + c2) / 2.0 * dt
}

/// Log-linear area for a single segment (assumes c1 > c2 > 0)
#[inline]
fn auc_log(c1: f64, c2: f64, dt: f64) -> f64 {
    (c1 - c2) * dt / (c1 / c2).ln()
}

/// Area of a single segment between two samples
///
/// A zero-width segment yields `0.0`; a segment whose end precedes its start
/// is an [`CurveError::InvalidTimeSequence`].
#[inline]
pub fn auc_segment(
    t1: f64,
    c1: f64,
    t2: f64,
    c2: f64,
    method: AUCMethod,
) -> Result<f64, CurveError> {
    let dt = t2 - t1;
    if dt < 0.0 {
        return Err(CurveError::InvalidTimeSequence);
    }
    if dt == 0.0 {
        return Ok(0.0);
    }

    Ok(match method {
        AUCMethod::Linear => auc_linear(c1, c2, dt),
        AUCMethod::LinUpLogDown => {
            if use_log_linear(c1, c2) {
                auc_log(c1, c2, dt)
            } else {
                auc_linear(c1, c2, dt)
            }
        }
    })
}

/// Definite integral of `values` over `times`
///
/// Computes ∫ C(t) dt from the first to the last time point, piecewise.
/// Fewer than two samples integrate to `0.0`.
///
/// # Errors
/// [`CurveError::ArrayLengthMismatch`] when the slices differ in length,
/// [`CurveError::InvalidTimeSequence`] when time runs backwards.
pub fn auc(times: &[f64], values: &[f64], method: AUCMethod) -> Result<f64, CurveError> {
    if times.len() != values.len() {
        return Err(CurveError::ArrayLengthMismatch {
            description: format!("times={}, values={}", times.len(), values.len()),
        });
    }

    if times.len() < 2 {
        return Ok(0.0);
    }

    let mut total = 0.0;
    for i in 1..times.len() {
        total += auc_segment(times[i - 1], values[i - 1], times[i], values[i], method)?;
    }
    Ok(total)
}

/// Integral over the closed index range `[start, end]`
///
/// Shorthand for slicing both arrays and calling [`auc`].
pub fn auc_range(
    times: &[f64],
    values: &[f64],
    start: usize,
    end: usize,
    method: AUCMethod,
) -> Result<f64, CurveError> {
    let n = times.len().min(values.len());
    if start > end || end >= n {
        return Err(CurveError::ArrayLengthMismatch {
            description: format!("range [{start}, {end}] outside {n} samples"),
        });
    }
    auc(&times[start..=end], &values[start..=end], method)
}
