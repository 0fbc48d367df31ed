//! Error types for the curve measurement maps

use thiserror::Error;

use crate::data::CurveError;

/// Errors from [`CurveMaps`](super::CurveMaps) set-up and evaluation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MapError {
    /// Error in the underlying curve data
    #[error(transparent)]
    Curve(#[from] CurveError),

    /// The frame window does not fit the acquisition
    #[error("Frame window (start {start}, length {length}) does not fit {frames} frames")]
    InvalidWindow {
        start: usize,
        length: usize,
        frames: usize,
    },

    /// A curve does not have one sample per frame
    #[error("{name} has {found} samples, expected {expected}")]
    LengthMismatch {
        name: &'static str,
        expected: usize,
        found: usize,
    },

    /// A parameter is out of range
    #[error("Invalid parameter: {param} = {value}")]
    InvalidParameter { param: String, value: String },
}
