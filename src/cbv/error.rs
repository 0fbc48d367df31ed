//! CBV error types
//!
//! Two levels, mirroring the pipeline's failure policy: [`CbvError`] aborts
//! acquisition set-up, [`VoxelError`] is isolated to one curve.

use thiserror::Error;

use super::types::BaselineSide;
use crate::data::CurveError;

/// Errors that abort acquisition set-up
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CbvError {
    /// An error from curve or time-base processing
    #[error(transparent)]
    Curve(#[from] CurveError),

    /// More than one reference curve was supplied
    #[error("At most one reference curve is accepted, got {n}")]
    TooManyReferenceCurves { n: usize },

    /// Skipping this many frames leaves no working curve
    #[error("Cannot skip {skip} frames of a {frames}-frame acquisition")]
    SkipExceedsFrames { skip: usize, frames: usize },

    /// An input array has the wrong number of samples
    #[error("{name} has {found} samples, expected {expected}")]
    LengthMismatch {
        name: &'static str,
        expected: usize,
        found: usize,
    },

    /// Invalid parameter value
    #[error("Invalid parameter: {param} = {value}")]
    InvalidParameter { param: String, value: String },

    /// A baseline window search ran to the end of the curve
    #[error("The {side} baseline search did not converge (window size {size})")]
    WindowNotConverged { side: BaselineSide, size: usize },

    /// The reference curve was classified as air
    #[error("Reference curve carries no signal above the air threshold")]
    ReferenceIsAir,

    /// The reference curve failed the per-voxel pipeline
    #[error("Reference curve could not be integrated: {0}")]
    Reference(#[source] VoxelError),

    /// The reference integral cannot be inverted
    #[error("Reference integral must be positive and finite, got {value}")]
    NonPositiveReferenceIntegral { value: f64 },
}

/// Errors isolated to a single voxel
#[derive(Error, Debug, Clone, PartialEq)]
pub enum VoxelError {
    /// The curve does not match the acquisition's frame count
    #[error("Curve has {found} samples, expected {expected}")]
    LengthMismatch { expected: usize, found: usize },

    /// NaN or infinite sample
    #[error("Non-finite sample at frame {index}")]
    NonFiniteSample { index: usize },

    /// The located window is empty (`start ≥ end`)
    #[error("Empty bolus window: start {start} is not before end {end}")]
    NoBolus { start: usize, end: usize },

    /// The bolus window spans zero time, so no detrending slope exists
    #[error("Bolus window [{start}, {end}] spans zero time at t = {time}")]
    DegenerateTimeBase { start: usize, end: usize, time: f64 },

    /// The pre-bolus baseline cannot serve as `S0`
    #[error("Pre-bolus baseline {s0} is not positive")]
    NonPositiveBaseline { s0: f64 },

    /// Integration failed
    #[error(transparent)]
    Integration(#[from] CurveError),
}

impl VoxelError {
    /// Stable short name of the failure kind
    pub fn kind(&self) -> &'static str {
        match self {
            VoxelError::LengthMismatch { .. } => "length_mismatch",
            VoxelError::NonFiniteSample { .. } => "non_finite_sample",
            VoxelError::NoBolus { .. } => "no_bolus",
            VoxelError::DegenerateTimeBase { .. } => "degenerate_time_base",
            VoxelError::NonPositiveBaseline { .. } => "non_positive_baseline",
            VoxelError::Integration(_) => "integration",
        }
    }
}
