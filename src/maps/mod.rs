//! Per-curve measurement maps
//!
//! Besides the CBV integral, a dynamic acquisition is often summarized by a
//! handful of simpler per-voxel measures. Each is computed on the curve
//! after the configured [`ConcentrationConversion`](crate::data::ConcentrationConversion),
//! except the interleaved statistics, which look at the raw signal.
//!
//! | Measure | Frames | Result |
//! |---------|--------|--------|
//! | Basic statistics | window | [`BasicMeasures`] |
//! | Area under the curve | window | `f64` |
//! | Odd/even frame statistics | all, raw signal | [`InterleavedStats`] |
//! | Distance and correlation to a reference curve | window | [`ReferenceMatch`] |
//! | Active rise before the maximum | all | [`ActiveRise`] |
//!
//! # Usage
//!
//! ```rust
//! use perfsol::data::ConcentrationConversion;
//! use perfsol::maps::{CurveMaps, FrameWindow, MapOptions};
//!
//! let times: Vec<f64> = (0..8).map(|i| 2.0 * i as f64).collect();
//! let options = MapOptions::default()
//!     .with_conversion(ConcentrationConversion::Difference { baseline_frames: 2 })
//!     .with_window(FrameWindow::new(2, 5));
//! let maps = CurveMaps::init(&times, None, options).expect("valid acquisition");
//!
//! let signal = [100.0, 100.0, 80.0, 50.0, 40.0, 60.0, 90.0, 100.0];
//! let measures = maps.evaluate(&signal).unwrap();
//! assert_eq!(measures.basic.max, -10.0);
//! assert!(measures.area < 0.0);
//! assert!(measures.reference.is_none());
//! ```

mod analyze;
mod error;
mod types;

pub mod calc;

pub use analyze::CurveMaps;
pub use error::MapError;
pub use types::{
    ActiveRise, BasicMeasures, CurveMeasures, DistanceNorm, FrameWindow, InterleavedStats,
    MapOptions, ReferenceMatch, RiseThresholds,
};
