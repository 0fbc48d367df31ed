use thiserror::Error;

use crate::cbv::{CbvError, VoxelError};
use crate::data::CurveError;
use crate::maps::MapError;

#[derive(Error, Debug)]
pub enum PerfsolError {
    #[error("Error in curve data: {0}")]
    Curve(#[from] CurveError),
    #[error("Error in acquisition set-up: {0}")]
    Acquisition(#[from] CbvError),
    #[error("Error in voxel evaluation: {0}")]
    Voxel(#[from] VoxelError),
    #[error("Error in curve maps: {0}")]
    Maps(#[from] MapError),
    #[error("Error parsing options: {0}")]
    Options(#[from] serde_json::Error),
}
