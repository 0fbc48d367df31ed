//! Pure measurement functions on converted curves
//!
//! Everything here takes plain slices; frame windows and signal conversion
//! are applied by [`CurveMaps`](super::CurveMaps).

use statrs::statistics::{Data, Distribution, Max, Min, OrderStatistics};

use super::types::{ActiveRise, BasicMeasures, DistanceNorm, InterleavedStats, RiseThresholds};
use crate::data::stats::{argmax, mean_stdev};
use crate::data::CurveError;

// ============================================================================
// Basic measures
// ============================================================================

/// Descriptive statistics of a non-empty slice
pub fn basic_measures(values: &[f64]) -> Result<BasicMeasures, CurveError> {
    let n = values.len();
    if n == 0 {
        return Err(CurveError::InsufficientData { n: 0, required: 1 });
    }

    let mut data = Data::new(values.to_vec());
    let mean = data.mean().unwrap_or(f64::NAN);
    let sd = if n > 1 {
        data.std_dev().unwrap_or(0.0)
    } else {
        0.0
    };
    let (max, min) = (data.max(), data.min());

    // Population central moments for the shape statistics
    let moment = |k: i32| values.iter().map(|v| (v - mean).powi(k)).sum::<f64>() / n as f64;
    let m2 = moment(2);
    let (skewness, kurtosis) = if m2 > 0.0 {
        (moment(3) / m2.powf(1.5), moment(4) / (m2 * m2) - 3.0)
    } else {
        (f64::NAN, f64::NAN)
    };

    Ok(BasicMeasures {
        max,
        spread: max - min,
        median: data.median(),
        mean,
        sd,
        cv: if mean != 0.0 { sd / mean } else { f64::NAN },
        skewness,
        kurtosis,
    })
}

// ============================================================================
// Interleaved frames
// ============================================================================

/// Mean and sample standard deviation of the odd and even frames
///
/// Needs at least two samples so that both series are non-empty.
pub fn interleaved_stats(values: &[f64]) -> Result<InterleavedStats, CurveError> {
    if values.len() < 2 {
        return Err(CurveError::InsufficientData {
            n: values.len(),
            required: 2,
        });
    }

    let odd: Vec<f64> = values.iter().step_by(2).copied().collect();
    let even: Vec<f64> = values.iter().skip(1).step_by(2).copied().collect();
    let (odd_mean, odd_sd) = mean_stdev(&odd)?;
    let (even_mean, even_sd) = mean_stdev(&even)?;

    Ok(InterleavedStats {
        odd_mean,
        odd_sd,
        even_mean,
        even_sd,
    })
}

// ============================================================================
// Reference comparison
// ============================================================================

/// `∫ |d| dt` over one segment of a piecewise-linear difference
#[inline]
fn segment_abs_area(d1: f64, d2: f64, dt: f64) -> f64 {
    if d1 * d2 >= 0.0 {
        (d1.abs() + d2.abs()) / 2.0 * dt
    } else {
        // The difference crosses zero inside the segment
        (d1 * d1 + d2 * d2) / (2.0 * (d1.abs() + d2.abs())) * dt
    }
}

/// `∫ d² dt` over one segment of a piecewise-linear difference
#[inline]
fn segment_square_area(d1: f64, d2: f64, dt: f64) -> f64 {
    (d1 * d1 + d1 * d2 + d2 * d2) / 3.0 * dt
}

/// Integral distance between two piecewise-linear curves
///
/// # Errors
/// [`CurveError::ArrayLengthMismatch`] for unequal lengths,
/// [`CurveError::InvalidTimeSequence`] when time runs backwards.
pub fn distance(
    values: &[f64],
    reference: &[f64],
    times: &[f64],
    norm: DistanceNorm,
) -> Result<f64, CurveError> {
    if values.len() != reference.len() || values.len() != times.len() {
        return Err(CurveError::ArrayLengthMismatch {
            description: format!(
                "values={}, reference={}, times={}",
                values.len(),
                reference.len(),
                times.len()
            ),
        });
    }

    let mut total = 0.0;
    for i in 1..times.len() {
        let dt = times[i] - times[i - 1];
        if dt < 0.0 {
            return Err(CurveError::InvalidTimeSequence);
        }
        let d1 = values[i - 1] - reference[i - 1];
        let d2 = values[i] - reference[i];
        total += match norm {
            DistanceNorm::L1 => segment_abs_area(d1, d2, dt),
            DistanceNorm::L2 => segment_square_area(d1, d2, dt),
        };
    }

    Ok(match norm {
        DistanceNorm::L1 => total,
        DistanceNorm::L2 => total.sqrt(),
    })
}

/// Pearson correlation of two equally long slices
///
/// `None` for fewer than two samples or when either slice is constant.
pub fn correlation(a: &[f64], b: &[f64]) -> Option<f64> {
    let n = a.len().min(b.len());
    if n < 2 {
        return None;
    }
    let (a, b) = (&a[..n], &b[..n]);
    let mean_a = a.iter().sum::<f64>() / n as f64;
    let mean_b = b.iter().sum::<f64>() / n as f64;

    let mut cov = 0.0;
    let mut var_a = 0.0;
    let mut var_b = 0.0;
    for (x, y) in a.iter().zip(b) {
        let (dx, dy) = (x - mean_a, y - mean_b);
        cov += dx * dy;
        var_a += dx * dx;
        var_b += dy * dy;
    }

    if var_a == 0.0 || var_b == 0.0 {
        return None;
    }
    Some(cov / (var_a * var_b).sqrt())
}

// ============================================================================
// Active rise
// ============================================================================

/// Time at which `values` first reaches `threshold`, interpolated linearly
fn crossing_time(values: &[f64], times: &[f64], threshold: f64) -> Option<f64> {
    let i = values.iter().position(|&v| v >= threshold)?;
    if i == 0 {
        return Some(times[0]);
    }
    let (v0, v1) = (values[i - 1], values[i]);
    Some(times[i - 1] + (threshold - v0) / (v1 - v0) * (times[i] - times[i - 1]))
}

/// Rise between the low and high threshold crossings before the maximum
///
/// `None` when the maximum is not positive or both crossings coincide.
pub fn active_rise(
    values: &[f64],
    times: &[f64],
    thresholds: RiseThresholds,
) -> Option<ActiveRise> {
    let n = values.len().min(times.len());
    let (peak, max) = argmax(&values[..n])?;
    if max <= 0.0 {
        return None;
    }

    let low = max * thresholds.low;
    let high = max * thresholds.high;
    let rising = &values[..=peak];
    let t_low = crossing_time(rising, times, low)?;
    let t_high = crossing_time(rising, times, high)?;

    let time = t_high - t_low;
    if time <= f64::EPSILON * t_high.abs().max(1.0) {
        return None;
    }
    Some(ActiveRise {
        time,
        slope: (high - low) / time,
    })
}
