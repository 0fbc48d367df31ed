//! Curve-level building blocks
//!
//! Relative time bases, array statistics, definite integration and signal to
//! concentration conversion. Everything here works on plain `&[f64]` slices
//! and knows nothing about acquisitions or voxels.

pub mod auc;
pub mod concentration;
pub mod error;
pub mod stats;
pub mod time;

pub use auc::{auc, auc_range, AUCMethod};
pub use concentration::{neg_log_ratio, signal_to_concentration, ConcentrationConversion};
pub use error::CurveError;
pub use stats::{mean_stdev, min_magnitude};
pub use time::relative_times;
