//! Small array statistics used throughout the curve analyses

use super::error::CurveError;

/// Arithmetic mean and sample standard deviation of a slice
///
/// The standard deviation uses the `n - 1` denominator and is `0.0` for a
/// single sample.
///
/// # Example
/// ```rust
/// use perfsol::data::stats::mean_stdev;
///
/// let (mean, sd) = mean_stdev(&[2.0, 4.0, 6.0]).unwrap();
/// assert_eq!(mean, 4.0);
/// assert_eq!(sd, 2.0);
/// ```
pub fn mean_stdev(values: &[f64]) -> Result<(f64, f64), CurveError> {
    let n = values.len();
    if n == 0 {
        return Err(CurveError::InsufficientData { n: 0, required: 1 });
    }

    let mean = values.iter().sum::<f64>() / n as f64;
    if n == 1 {
        return Ok((mean, 0.0));
    }

    let ss: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
    Ok((mean, (ss / (n - 1) as f64).sqrt()))
}

/// Arithmetic mean of a slice
pub fn mean(values: &[f64]) -> Result<f64, CurveError> {
    if values.is_empty() {
        return Err(CurveError::InsufficientData { n: 0, required: 1 });
    }
    Ok(values.iter().sum::<f64>() / values.len() as f64)
}

/// Index and value of the first global minimum
///
/// Returns `None` for an empty slice. Ties resolve to the earliest index.
pub fn argmin(values: &[f64]) -> Option<(usize, f64)> {
    let (&first, rest) = values.split_first()?;
    let mut best = (0, first);
    for (i, &v) in rest.iter().enumerate() {
        if v < best.1 {
            best = (i + 1, v);
        }
    }
    Some(best)
}

/// Index and value of the first global maximum
pub fn argmax(values: &[f64]) -> Option<(usize, f64)> {
    let (&first, rest) = values.split_first()?;
    let mut best = (0, first);
    for (i, &v) in rest.iter().enumerate() {
        if v > best.1 {
            best = (i + 1, v);
        }
    }
    Some(best)
}

/// Smallest absolute value in a slice (`+inf` when empty)
#[inline]
pub fn min_magnitude(values: &[f64]) -> f64 {
    values
        .iter()
        .map(|v| v.abs())
        .fold(f64::INFINITY, f64::min)
}
