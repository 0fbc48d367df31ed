//! Baseline window estimation on the global curve
//!
//! Runs once per acquisition. The global curve dips during the bolus; each
//! baseline ends where the curve has fallen most of the way from its edge
//! value to the minimum.

use super::error::CbvError;
use super::types::BaselineWindows;
use crate::data::stats::argmin;
use crate::data::CurveError;

/// Estimate pre- and post-bolus window sizes
///
/// `curve` is the global curve with the discarded head already removed;
/// only its first `working_len` samples are considered. The pre window is
/// the first `k ≥ 1` with `curve[k] − min < (curve[0] − min) × pre_fraction`,
/// the post window the mirror image from the last sample. A walk that never
/// stops yields `len − 1` and is flagged as not converged.
///
/// # Errors
/// [`CurveError::InsufficientData`] when fewer than two samples remain.
pub fn estimate_windows(
    curve: &[f64],
    working_len: usize,
    pre_fraction: f64,
    post_fraction: f64,
) -> Result<BaselineWindows, CbvError> {
    let len = curve.len().min(working_len);
    if len < 2 {
        return Err(CurveError::InsufficientData {
            n: len,
            required: 2,
        }
        .into());
    }
    let w = &curve[..len];

    // len >= 2 guarantees a minimum exists
    let min = argmin(w).map(|(_, v)| v).unwrap_or(w[0]);

    let pre_thr = (w[0] - min) * pre_fraction;
    let pre = (1..len).find(|&k| w[k] - min < pre_thr);

    let post_thr = (w[len - 1] - min) * post_fraction;
    let post = (1..len).find(|&k| w[len - 1 - k] - min < post_thr);

    Ok(BaselineWindows {
        pre: pre.unwrap_or(len - 1),
        post: post.unwrap_or(len - 1),
        pre_converged: pre.is_some(),
        post_converged: post.is_some(),
    })
}
