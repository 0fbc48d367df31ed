//! Signal to concentration conversion
//!
//! Dynamic MR signal drops while contrast passes through tissue. Analyses
//! that work on concentration rather than raw signal convert a curve against
//! its own pre-contrast baseline `S0`, the mean of the first
//! `baseline_frames` samples.
//!
//! [`signal_to_concentration`] feeds the curve measurement maps. The CBV
//! pipeline detrends the raw signal first and applies [`neg_log_ratio`] itself.

use serde::{Deserialize, Serialize};

use super::error::CurveError;
use super::stats::mean;

/// Lower (exclusive) bound of the ratio domain accepted by [`neg_log_ratio`]
pub const MIN_SIGNAL_RATIO: f64 = 0.01;

/// Upper (exclusive) bound of the ratio domain accepted by [`neg_log_ratio`]
pub const MAX_SIGNAL_RATIO: f64 = 1.0;

/// How a raw signal is mapped to a concentration-like curve
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConcentrationConversion {
    /// Keep the raw signal
    #[default]
    None,
    /// `S(t) - S0`
    Difference { baseline_frames: usize },
    /// `(S(t) - S0) / S0`
    Relative { baseline_frames: usize },
    /// `-ln(S(t) / S0)`, clamped to zero outside the valid ratio domain
    NegLogRatio { baseline_frames: usize },
}

/// Clamped `-ln(ratio)`
///
/// Returns `-ln(ratio)` for `0.01 < ratio < 1.0` and exactly `0.0` otherwise,
/// including NaN. `ln` is never evaluated outside that open interval.
#[inline]
pub fn neg_log_ratio(ratio: f64) -> f64 {
    if ratio > MIN_SIGNAL_RATIO && ratio < MAX_SIGNAL_RATIO {
        -ratio.ln()
    } else {
        0.0
    }
}

/// Convert a raw signal curve to a concentration-like curve
///
/// # Errors
/// [`CurveError::InsufficientData`] when `baseline_frames` is zero or longer
/// than the signal.
///
/// # Example
/// ```rust
/// use perfsol::data::concentration::{signal_to_concentration, ConcentrationConversion};
///
/// let signal = [100.0, 100.0, 80.0, 50.0, 90.0];
/// let conc = signal_to_concentration(
///     &signal,
///     ConcentrationConversion::Difference { baseline_frames: 2 },
/// )
/// .unwrap();
/// assert_eq!(conc, vec![0.0, 0.0, -20.0, -50.0, -10.0]);
/// ```
pub fn signal_to_concentration(
    signal: &[f64],
    conversion: ConcentrationConversion,
) -> Result<Vec<f64>, CurveError> {
    let baseline = |frames: usize| -> Result<f64, CurveError> {
        if frames == 0 || frames > signal.len() {
            return Err(CurveError::InsufficientData {
                n: signal.len(),
                required: frames.max(1),
            });
        }
        mean(&signal[..frames])
    };

    Ok(match conversion {
        ConcentrationConversion::None => signal.to_vec(),
        ConcentrationConversion::Difference { baseline_frames } => {
            let s0 = baseline(baseline_frames)?;
            signal.iter().map(|s| s - s0).collect()
        }
        ConcentrationConversion::Relative { baseline_frames } => {
            let s0 = baseline(baseline_frames)?;
            signal
                .iter()
                .map(|s| if s0 != 0.0 { (s - s0) / s0 } else { 0.0 })
                .collect()
        }
        ConcentrationConversion::NegLogRatio { baseline_frames } => {
            let s0 = baseline(baseline_frames)?;
            signal.iter().map(|s| neg_log_ratio(s / s0)).collect()
        }
    })
}
