//! Per-voxel perfusion analysis of dynamic time-activity curves.
//!
//! The [`cbv`] module computes a cerebral-blood-volume baseline integral from
//! one raw signal curve; [`data`] holds the curve-level primitives it builds
//! on (relative time base, statistics, integration, concentration
//! conversion). [`maps`] derives simpler per-curve measures from the same
//! primitives.

pub mod cbv;
pub mod data;
pub mod error;
pub mod maps;

pub use error::PerfsolError;

pub mod prelude {
    pub mod data {
        pub use crate::data::{
            auc, relative_times, signal_to_concentration, AUCMethod, ConcentrationConversion,
            CurveError,
        };
    }
    pub mod cbv {
        pub use crate::cbv::{
            summarize, Acquisition, AcquisitionConfig, CbvError, CbvOptions, NoiseSource,
            NormalizationMode, Scratch, VoxelError, VoxelOutcome, WindowPolicy,
        };
    }
    pub mod maps {
        pub use crate::maps::{
            CurveMaps, CurveMeasures, DistanceNorm, FrameWindow, MapError, MapOptions,
        };
    }

    pub use crate::cbv::{
        Acquisition, AcquisitionConfig, CbvError, CbvOptions, VoxelError, VoxelOutcome,
    };
    pub use crate::data::{AUCMethod, CurveError};
    pub use crate::maps::{CurveMaps, MapError, MapOptions};
    pub use crate::PerfsolError;
}
