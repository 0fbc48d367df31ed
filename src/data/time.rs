//! Relative time base construction
//!
//! Frame timestamps arrive as absolute acquisition times. Every analysis in
//! this crate works on times relative to the first frame, built once per
//! acquisition.

use super::error::CurveError;

/// Convert absolute frame times to a zero-based relative sequence
///
/// The result has the same length as the input and starts at `0.0`.
/// Repeated timestamps are allowed; a timestamp earlier than its predecessor
/// is not.
///
/// # Example
/// ```rust
/// use perfsol::data::time::relative_times;
///
/// let rel = relative_times(&[120.0, 121.5, 123.0]).unwrap();
/// assert_eq!(rel, vec![0.0, 1.5, 3.0]);
/// ```
pub fn relative_times(absolute: &[f64]) -> Result<Vec<f64>, CurveError> {
    let first = match absolute.first() {
        Some(&t) => t,
        None => return Err(CurveError::InsufficientData { n: 0, required: 1 }),
    };

    check_time_base(absolute)?;

    Ok(absolute.iter().map(|&t| t - first).collect())
}

/// Check that a time base is finite and monotonically non-decreasing
pub fn check_time_base(times: &[f64]) -> Result<(), CurveError> {
    if let Some(index) = times.iter().position(|t| !t.is_finite()) {
        return Err(CurveError::NonFinite { index });
    }

    if times.windows(2).any(|w| w[1] < w[0]) {
        return Err(CurveError::InvalidTimeSequence);
    }

    Ok(())
}
