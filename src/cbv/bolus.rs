//! Bolus passage search on a working curve
//!
//! The signal dips while contrast passes. The window starts where the curve
//! leaves the pre-baseline and ends where it either recovers to the
//! post-baseline or turns into a second excursion (recirculation).

use super::types::{BaselineWindows, BolusWindow};
use crate::data::stats::argmin;

/// Locate the bolus start and end indices
///
/// * start: scan back from the minimum, stopping once the predecessor sample
///   rises above `pre_mean − noise`. A minimum inside the pre-baseline is
///   lifted to `windows.pre`, so `start ≥ windows.pre` always holds.
/// * end: scan forward from `peak + 2` up to `len − windows.post`, tracking
///   the running maximum; stop at the first sample above `post_mean − noise`
///   or more than `noise` below the running maximum. The end is the sample
///   before the stop, clamped to `len − windows.post − 1`.
///
/// The window may still be empty (`start ≥ end`); see [`BolusWindow::is_valid`].
pub fn locate_bolus(
    curve: &[f64],
    windows: &BaselineWindows,
    noise: f64,
    pre_mean: f64,
    post_mean: f64,
) -> BolusWindow {
    let len = curve.len();
    let (peak, peak_value) = match argmin(curve) {
        Some(p) => p,
        None => {
            return BolusWindow {
                peak: 0,
                start: 0,
                end: 0,
            }
        }
    };

    let cutoff = pre_mean - noise;
    let mut start = peak;
    while start > windows.pre && curve[start - 1] <= cutoff {
        start -= 1;
    }
    let start = start.max(windows.pre);

    let cutoff = post_mean - noise;
    let last = len.saturating_sub(windows.post);
    let mut mx = peak_value;
    let mut stop = peak + 2;
    while stop < last {
        let v = curve[stop];
        if v > mx {
            mx = v;
        }
        if v > cutoff || v < mx - noise {
            break;
        }
        stop += 1;
    }
    let end = (stop - 1).min(last.saturating_sub(1));

    BolusWindow { peak, start, end }
}
