//! Linear baseline correction and the ΔR-like log transform

use super::error::VoxelError;
use super::types::{Baselines, BolusWindow};
use crate::data::neg_log_ratio;

/// Remove the linear drift between the pre- and post-baseline over the bolus
///
/// `out` receives the working curve with the ramp
/// `(post_mean − pre_mean) / (t[end] − t[start]) × (t − t[start])`
/// subtracted on `[start, end]`; samples outside the window are copied as is.
///
/// # Errors
/// [`VoxelError::DegenerateTimeBase`] when `t[end] == t[start]`.
pub fn detrend(
    curve: &[f64],
    times: &[f64],
    bolus: &BolusWindow,
    baselines: &Baselines,
    out: &mut Vec<f64>,
) -> Result<(), VoxelError> {
    let t0 = times[bolus.start];
    let span = times[bolus.end] - t0;
    if span == 0.0 {
        return Err(VoxelError::DegenerateTimeBase {
            start: bolus.start,
            end: bolus.end,
            time: t0,
        });
    }
    let slope = (baselines.post_mean - baselines.pre_mean) / span;

    out.clear();
    out.extend_from_slice(curve);
    for i in bolus.start..=bolus.end {
        out[i] -= slope * (times[i] - t0);
    }
    Ok(())
}

/// Map a corrected signal to `−ln(S / S0)`, clamped to zero outside `(0.01, 1)`
///
/// # Errors
/// [`VoxelError::NonPositiveBaseline`] when `s0` is not a positive finite number.
pub fn to_concentration(corrected: &[f64], s0: f64, out: &mut Vec<f64>) -> Result<(), VoxelError> {
    if !(s0.is_finite() && s0 > 0.0) {
        return Err(VoxelError::NonPositiveBaseline { s0 });
    }

    out.clear();
    out.extend(corrected.iter().map(|s| neg_log_ratio(s / s0)));
    Ok(())
}
