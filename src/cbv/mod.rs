//! Cerebral blood volume (CBV) baseline integral for dynamic susceptibility curves
//!
//! This module turns a single-voxel time-activity curve (TAC) into one scalar:
//! the time integral of `ΔR(t) = −ln(S(t) / S0)` over the bolus passage,
//! optionally normalized by a reference-tissue curve.
//!
//! # Pipeline
//!
//! | Stage | Runs | Module |
//! |-------|------|--------|
//! | Baseline window estimation | once per acquisition | `baseline` |
//! | Air/void classification | per voxel | `air` |
//! | Bolus location | per voxel | `bolus` |
//! | Linear detrending and log transform | per voxel | `transform` |
//! | Integration and normalization | per voxel | `analyze` |
//!
//! # Usage
//!
//! ```rust
//! use perfsol::cbv::{Acquisition, AcquisitionConfig, CbvOptions, VoxelOutcome};
//!
//! let times: Vec<f64> = (0..12).map(|i| 1000.0 + 1.5 * i as f64).collect();
//! let global = vec![
//!     100.0, 100.0, 100.0, 100.0, 100.0, 98.0, 60.0, 40.0, 35.0, 70.0, 100.0, 100.0,
//! ];
//!
//! let config = AcquisitionConfig::new(times, global, 1.0)
//!     .with_options(CbvOptions::default().with_background_threshold(20.0));
//! let acquisition = Acquisition::init(config).expect("valid acquisition");
//!
//! let voxel = [100.0, 100.0, 100.0, 98.0, 60.0, 40.0, 35.0, 42.0, 70.0, 95.0, 100.0, 100.0];
//! match acquisition.evaluate(&voxel) {
//!     Ok(VoxelOutcome::Value(cbv)) => assert!(cbv > 0.0),
//!     Ok(VoxelOutcome::Void) => unreachable!("tissue voxel"),
//!     Err(e) => panic!("voxel failed: {e}"),
//! }
//!
//! acquisition.close();
//! ```
//!
//! Void voxels (air) are a regular outcome, not an error. Per-voxel failures
//! are returned as [`VoxelError`] and never affect other voxels; set-up
//! problems are [`CbvError`] and stop the run before any voxel is evaluated.

// Internal modules
mod analyze;
mod batch;
mod error;
mod summary;
mod types;

// Pipeline stages
pub mod air;
pub mod baseline;
pub mod bolus;
pub mod transform;


// Public API
pub use analyze::{Acquisition, Scratch};
pub use error::{CbvError, VoxelError};
pub use summary::{summarize, CbvSummary, ValueSummary};
pub use types::{
    AcquisitionConfig, BaselineSide, BaselineWindows, Baselines, BolusWindow, CbvOptions,
    NoiseSource, NormalizationMode, VoxelAnalysis, VoxelOutcome, WindowPolicy,
};
