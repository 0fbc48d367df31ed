//! Error types for curve-level processing
//!
//! [`CurveError`] covers problems with the raw arrays themselves: empty inputs,
//! time bases that run backwards, mismatched lengths. These are data-level
//! errors that don't depend on any particular perfusion model.
//!
//! The CBV pipeline propagates these via the [`From`] impls on `CbvError`
//! and `VoxelError`.

use thiserror::Error;

/// Errors arising from curve and time-base processing
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CurveError {
    /// Insufficient data points for the requested operation
    #[error("Insufficient data: {n} points, need at least {required}")]
    InsufficientData {
        /// Number of points available
        n: usize,
        /// Minimum number required
        required: usize,
    },

    /// Time values decrease somewhere along the sequence
    #[error("Invalid time sequence: times must be monotonically non-decreasing")]
    InvalidTimeSequence,

    /// A NaN or infinite value was found
    #[error("Non-finite value at index {index}")]
    NonFinite {
        /// Position of the offending sample
        index: usize,
    },

    /// Array length mismatch between parallel input arrays
    #[error("Array length mismatch: {description}")]
    ArrayLengthMismatch {
        /// Description of which arrays mismatched and their lengths
        description: String,
    },
}
