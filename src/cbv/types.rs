//! CBV types: options, acquisition input, windows and per-voxel results
//!
//! This module defines the public types of the CBV pipeline:
//! - [`CbvOptions`]: analysis configuration
//! - [`AcquisitionConfig`]: host-supplied acquisition-level input
//! - [`BaselineWindows`] and [`BolusWindow`]: index windows on the working curve
//! - [`VoxelOutcome`] and [`VoxelAnalysis`]: per-voxel results

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::data::AUCMethod;
use crate::error::PerfsolError;

// ============================================================================
// Configuration Types
// ============================================================================

/// CBV analysis configuration
///
/// Defaults follow the reference DSC workflow: a background threshold of 20×
/// the noise level, no skipped frames, two discarded samples at the head of
/// the global curve and 95% baseline thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CbvOptions {
    /// Multiplier applied to the noise level to obtain the air threshold (default: 20.0)
    pub background_threshold: f64,

    /// Number of leading frames ignored by the per-voxel analysis (default: 0)
    pub skip_frames: usize,

    /// Number of leading samples of the global curve discarded before the
    /// baseline window search (default: 2)
    pub reference_offset: usize,

    /// Fraction of the pre-bolus drop that ends the pre-baseline (default: 0.95)
    pub pre_fraction: f64,

    /// Fraction of the post-bolus drop that ends the post-baseline (default: 0.95)
    pub post_fraction: f64,

    /// Noise estimate used by the bolus search (default: PreBaseline)
    pub noise_source: NoiseSource,

    /// Integration rule over the bolus window (default: Linear)
    pub auc_method: AUCMethod,

    /// How the reference curve scales every voxel (default: ReferenceIntegral)
    pub normalization: NormalizationMode,

    /// What to do when a baseline window search does not converge (default: Accept)
    pub window_policy: WindowPolicy,
}

impl Default for CbvOptions {
    fn default() -> Self {
        Self {
            background_threshold: 20.0,
            skip_frames: 0,
            reference_offset: 2,
            pre_fraction: 0.95,
            post_fraction: 0.95,
            noise_source: NoiseSource::PreBaseline,
            auc_method: AUCMethod::Linear,
            normalization: NormalizationMode::ReferenceIntegral,
            window_policy: WindowPolicy::Accept,
        }
    }
}

impl CbvOptions {
    /// Parse options from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, PerfsolError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize options to pretty-printed JSON
    pub fn to_json(&self) -> Result<String, PerfsolError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Set the background threshold multiplier
    pub fn with_background_threshold(mut self, multiplier: f64) -> Self {
        self.background_threshold = multiplier;
        self
    }

    /// Set the number of leading frames to skip
    pub fn with_skip_frames(mut self, skip: usize) -> Self {
        self.skip_frames = skip;
        self
    }

    /// Set the number of discarded samples at the head of the global curve
    pub fn with_reference_offset(mut self, offset: usize) -> Self {
        self.reference_offset = offset;
        self
    }

    /// Set both baseline fractions
    pub fn with_baseline_fractions(mut self, pre: f64, post: f64) -> Self {
        self.pre_fraction = pre;
        self.post_fraction = post;
        self
    }

    /// Set the noise estimate used by the bolus search
    pub fn with_noise_source(mut self, source: NoiseSource) -> Self {
        self.noise_source = source;
        self
    }

    /// Set the integration rule
    pub fn with_auc_method(mut self, method: AUCMethod) -> Self {
        self.auc_method = method;
        self
    }

    /// Set the normalization mode
    pub fn with_normalization(mut self, mode: NormalizationMode) -> Self {
        self.normalization = mode;
        self
    }

    /// Set the baseline window convergence policy
    pub fn with_window_policy(mut self, policy: WindowPolicy) -> Self {
        self.window_policy = policy;
        self
    }
}

/// Noise estimate used to place the bolus boundaries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoiseSource {
    /// Standard deviation of the voxel's own pre-baseline samples
    #[default]
    PreBaseline,
    /// The acquisition-level noise level supplied by the host
    Acquisition,
}

/// Reference-curve normalization
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum NormalizationMode {
    /// Run the reference curve through the pipeline and scale by `1 / integral`
    #[default]
    ReferenceIntegral,
    /// Always scale by 1, ignoring any reference curve
    Unit,
}

/// Handling of a baseline window search that runs to the end of the curve
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WindowPolicy {
    /// Keep the degenerate window size and log a warning
    #[default]
    Accept,
    /// Fail acquisition set-up
    Reject,
}

/// Acquisition-level input supplied by the host
///
/// `absolute_times` fixes the frame count; every curve must have that many
/// samples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AcquisitionConfig {
    /// Absolute frame times
    pub absolute_times: Vec<f64>,
    /// Representative curve (e.g. whole-volume average) for baseline windows
    pub global_curve: Vec<f64>,
    /// Optional reference-tissue curve; at most one is accepted
    pub reference_curves: Vec<Vec<f64>>,
    /// Voxel-level noise estimate
    pub noise_level: f64,
    /// Analysis options
    pub options: CbvOptions,
}

impl AcquisitionConfig {
    /// Acquisition without a reference curve
    pub fn new(absolute_times: Vec<f64>, global_curve: Vec<f64>, noise_level: f64) -> Self {
        Self {
            absolute_times,
            global_curve,
            reference_curves: Vec::new(),
            noise_level,
            options: CbvOptions::default(),
        }
    }

    /// Add a reference-tissue curve
    pub fn with_reference_curve(mut self, curve: Vec<f64>) -> Self {
        self.reference_curves.push(curve);
        self
    }

    /// Replace the analysis options
    pub fn with_options(mut self, options: CbvOptions) -> Self {
        self.options = options;
        self
    }

    /// Number of frames in the acquisition
    pub fn frames(&self) -> usize {
        self.absolute_times.len()
    }
}

// ============================================================================
// Windows
// ============================================================================

/// Pre- and post-bolus baseline window sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaselineWindows {
    /// Number of leading samples forming the pre-bolus baseline
    pub pre: usize,
    /// Number of trailing samples forming the post-bolus baseline
    pub post: usize,
    /// Whether the forward walk stopped before the end of the curve
    pub pre_converged: bool,
    /// Whether the backward walk stopped before the start of the curve
    pub post_converged: bool,
}

impl BaselineWindows {
    /// Windows with explicit sizes, both marked converged
    pub fn new(pre: usize, post: usize) -> Self {
        Self {
            pre,
            post,
            pre_converged: true,
            post_converged: true,
        }
    }

    /// `true` when the two baselines leave room for a bolus
    pub fn fits(&self, working_len: usize) -> bool {
        self.pre + self.post < working_len
    }
}

/// Side of the bolus a baseline window belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BaselineSide {
    Pre,
    Post,
}

impl fmt::Display for BaselineSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BaselineSide::Pre => write!(f, "pre-bolus"),
            BaselineSide::Post => write!(f, "post-bolus"),
        }
    }
}

/// Bolus passage located on a working curve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BolusWindow {
    /// Index of the signal minimum
    pub peak: usize,
    /// First index of the integration window
    pub start: usize,
    /// Last index (inclusive) of the integration window
    pub end: usize,
}

impl BolusWindow {
    /// `pre ≤ start < end ≤ working_len − post − 1`
    ///
    /// [`locate_bolus`](super::bolus::locate_bolus) already guarantees both
    /// outer bounds, so on its output this only fails for an empty window.
    pub fn is_valid(&self, windows: &BaselineWindows, working_len: usize) -> bool {
        self.start >= windows.pre
            && self.start < self.end
            && self.end + windows.post < working_len
    }
}

// ============================================================================
// Result Types
// ============================================================================

/// Baseline statistics of one working curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Baselines {
    /// Mean of the pre-bolus samples
    pub pre_mean: f64,
    /// Standard deviation of the pre-bolus samples
    pub pre_stdev: f64,
    /// Mean of the post-bolus samples
    pub post_mean: f64,
}

/// Result of a successful per-voxel evaluation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum VoxelOutcome {
    /// The curve carries no measurable signal
    Void,
    /// Normalized CBV baseline integral
    Value(f64),
}

impl VoxelOutcome {
    /// The value, or `None` for a void voxel
    pub fn value(&self) -> Option<f64> {
        match self {
            VoxelOutcome::Void => None,
            VoxelOutcome::Value(v) => Some(*v),
        }
    }

    /// `true` for a void voxel
    pub fn is_void(&self) -> bool {
        matches!(self, VoxelOutcome::Void)
    }
}

/// Full diagnostics of a non-void voxel
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VoxelAnalysis {
    /// Baseline statistics
    pub baselines: Baselines,
    /// Noise used by the bolus search
    pub noise: f64,
    /// Located bolus window
    pub bolus: BolusWindow,
    /// Integral before normalization
    pub integral: f64,
    /// Normalized integral (the emitted value)
    pub value: f64,
}
