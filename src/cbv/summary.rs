//! Summary statistics over a batch of voxel outcomes
//!
//! Counts valid, void and failed voxels, tallies failures by kind and
//! describes the distribution of the valid CBV values.
//!
//! # Example
//!
//! ```rust,ignore
//! use perfsol::cbv::summarize;
//!
//! let outcomes = acquisition.evaluate_all(&curves);
//! let summary = summarize(&outcomes);
//! println!("valid: {} void: {} failed: {}", summary.n_valid, summary.n_void, summary.n_failed);
//! if let Some(values) = &summary.values {
//!     println!("median CBV: {:.3}", values.median);
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::error::VoxelError;
use super::types::VoxelOutcome;

// ============================================================================
// Types
// ============================================================================

/// Descriptive statistics of the valid values
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValueSummary {
    /// Number of values
    pub n: usize,
    /// Arithmetic mean
    pub mean: f64,
    /// Standard deviation
    pub sd: f64,
    /// Coefficient of variation (%)
    pub cv_pct: f64,
    /// Median
    pub median: f64,
    /// Minimum
    pub min: f64,
    /// Maximum
    pub max: f64,
    /// 5th percentile
    pub p5: f64,
    /// 25th percentile (Q1)
    pub p25: f64,
    /// 75th percentile (Q3)
    pub p75: f64,
    /// 95th percentile
    pub p95: f64,
}

/// Summary of a batch of voxel evaluations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CbvSummary {
    /// Total number of voxels
    pub n_voxels: usize,
    /// Voxels with a value
    pub n_valid: usize,
    /// Void (air) voxels
    pub n_void: usize,
    /// Failed voxels
    pub n_failed: usize,
    /// Failure counts keyed by [`VoxelError::kind`]
    pub failures: BTreeMap<String, usize>,
    /// Distribution of valid values (None when there are none)
    pub values: Option<ValueSummary>,
}

// ============================================================================
// Public API
// ============================================================================

/// Summarize a batch of voxel outcomes
pub fn summarize(outcomes: &[Result<VoxelOutcome, VoxelError>]) -> CbvSummary {
    let mut values = Vec::new();
    let mut n_void = 0;
    let mut failures: BTreeMap<String, usize> = BTreeMap::new();

    for outcome in outcomes {
        match outcome {
            Ok(VoxelOutcome::Value(v)) => values.push(*v),
            Ok(VoxelOutcome::Void) => n_void += 1,
            Err(e) => *failures.entry(e.kind().to_string()).or_default() += 1,
        }
    }

    CbvSummary {
        n_voxels: outcomes.len(),
        n_valid: values.len(),
        n_void,
        n_failed: failures.values().sum(),
        failures,
        values: (!values.is_empty()).then(|| compute_value_summary(values)),
    }
}

// ============================================================================
// Internal helpers
// ============================================================================

fn compute_value_summary(values: Vec<f64>) -> ValueSummary {
    use statrs::statistics::{Data, Distribution, Max, Min, OrderStatistics};

    let n = values.len();
    let mut data = Data::new(values);

    let mean = data.mean().unwrap_or(f64::NAN);
    let sd = if n > 1 {
        data.std_dev().unwrap_or(0.0)
    } else {
        0.0
    };
    let cv_pct = if mean.abs() > f64::EPSILON {
        (sd / mean) * 100.0
    } else {
        f64::NAN
    };

    ValueSummary {
        n,
        mean,
        sd,
        cv_pct,
        median: data.median(),
        min: data.min(),
        max: data.max(),
        p5: data.percentile(5),
        p25: data.percentile(25),
        p75: data.percentile(75),
        p95: data.percentile(95),
    }
}

// ============================================================================
// Tests
// ============================================================================
