//! CBV acquisition set-up and per-voxel orchestration
//!
//! [`Acquisition::init`] validates the host input and computes everything
//! that is shared by all voxels: relative time base, air threshold, baseline
//! windows and the reference normalization factor. The result is immutable;
//! [`Acquisition::evaluate`] can be called concurrently from any number of
//! threads.
//!
//! Per voxel the pipeline is
//! classify → locate bolus → detrend → log transform → integrate → scale.

use tracing::{debug, trace, warn};

use super::air::{air_threshold, is_air};
use super::baseline::estimate_windows;
use super::bolus::locate_bolus;
use super::error::{CbvError, VoxelError};
use super::transform::{detrend, to_concentration};
use super::types::*;
use crate::data::stats::{mean, mean_stdev};
use crate::data::{auc_range, relative_times};

// ============================================================================
// Scratch buffers
// ============================================================================

/// Per-thread working buffers for [`Acquisition::evaluate_with`]
///
/// Holds the detrended and transformed curves of the voxel being evaluated.
/// Nothing in it survives from one voxel to the next; reusing a `Scratch`
/// only saves the allocations.
#[derive(Debug, Clone, Default)]
pub struct Scratch {
    corrected: Vec<f64>,
    transformed: Vec<f64>,
}

impl Scratch {
    /// Buffers sized for `frames` samples
    pub fn new(frames: usize) -> Self {
        Self {
            corrected: Vec::with_capacity(frames),
            transformed: Vec::with_capacity(frames),
        }
    }

    /// Concentration-like curve of the last analyzed voxel
    pub fn transformed(&self) -> &[f64] {
        &self.transformed
    }
}

// ============================================================================
// Acquisition
// ============================================================================

/// Acquisition-level state of the CBV pipeline
#[derive(Debug, Clone)]
pub struct Acquisition {
    times: Vec<f64>,
    frames: usize,
    skip: usize,
    air_threshold: f64,
    noise_level: f64,
    windows: BaselineWindows,
    normalization: f64,
    options: CbvOptions,
}

impl Acquisition {
    /// Validate the host input and build the acquisition state
    ///
    /// # Errors
    /// Any [`CbvError`]; no voxel may be evaluated when this fails.
    pub fn init(config: AcquisitionConfig) -> Result<Self, CbvError> {
        let options = config.options;
        validate_options(&options, config.noise_level)?;

        if config.reference_curves.len() > 1 {
            return Err(CbvError::TooManyReferenceCurves {
                n: config.reference_curves.len(),
            });
        }

        let frames = config.absolute_times.len();
        let skip = options.skip_frames;
        if skip >= frames {
            return Err(CbvError::SkipExceedsFrames { skip, frames });
        }
        let working_len = frames - skip;

        check_length("global curve", frames, config.global_curve.len())?;
        let times = relative_times(&config.absolute_times)?;

        let head = options.reference_offset.min(frames);
        let windows = estimate_windows(
            &config.global_curve[head..],
            working_len,
            options.pre_fraction,
            options.post_fraction,
        )?;
        check_windows(&windows, options.window_policy)?;
        if !windows.fits(working_len) {
            warn!(
                pre = windows.pre,
                post = windows.post,
                working_len,
                "baseline windows overlap; bolus search will degrade"
            );
        }

        let mut acquisition = Self {
            times,
            frames,
            skip,
            air_threshold: air_threshold(options.background_threshold, config.noise_level),
            noise_level: config.noise_level,
            windows,
            normalization: 1.0,
            options,
        };

        if let Some(reference) = config.reference_curves.first() {
            check_length("reference curve", frames, reference.len())?;
            match acquisition.options.normalization {
                NormalizationMode::ReferenceIntegral => {
                    acquisition.normalization = acquisition.reference_factor(reference)?;
                }
                NormalizationMode::Unit => {
                    warn!("reference curve ignored: normalization mode is Unit");
                }
            }
        }

        debug!(
            frames,
            skip,
            pre = acquisition.windows.pre,
            post = acquisition.windows.post,
            air_threshold = acquisition.air_threshold,
            normalization = acquisition.normalization,
            "CBV acquisition initialized"
        );

        Ok(acquisition)
    }

    /// Release the acquisition state
    pub fn close(self) {
        debug!(frames = self.frames, "CBV acquisition closed");
    }

    /// Evaluate one raw curve
    pub fn evaluate(&self, raw: &[f64]) -> Result<VoxelOutcome, VoxelError> {
        let mut scratch = Scratch::new(self.frames);
        self.evaluate_with(raw, &mut scratch)
    }

    /// Evaluate one raw curve reusing caller-owned buffers
    pub fn evaluate_with(
        &self,
        raw: &[f64],
        scratch: &mut Scratch,
    ) -> Result<VoxelOutcome, VoxelError> {
        let result = self
            .analyze(raw, scratch)
            .map(|analysis| match analysis {
                Some(a) => VoxelOutcome::Value(a.value),
                None => VoxelOutcome::Void,
            });
        if let Err(ref e) = result {
            trace!(error = %e, "voxel evaluation failed");
        }
        result
    }

    /// Evaluate one raw curve and return every intermediate
    ///
    /// `Ok(None)` is a void voxel.
    pub fn analyze(
        &self,
        raw: &[f64],
        scratch: &mut Scratch,
    ) -> Result<Option<VoxelAnalysis>, VoxelError> {
        if raw.len() != self.frames {
            return Err(VoxelError::LengthMismatch {
                expected: self.frames,
                found: raw.len(),
            });
        }
        if let Some(index) = raw.iter().position(|v| !v.is_finite()) {
            return Err(VoxelError::NonFiniteSample { index });
        }

        if is_air(raw, self.air_threshold) {
            return Ok(None);
        }

        self.analyze_tissue(raw, scratch).map(Some)
    }

    /// Pipeline past the air check
    fn analyze_tissue(
        &self,
        raw: &[f64],
        scratch: &mut Scratch,
    ) -> Result<VoxelAnalysis, VoxelError> {
        let curve = &raw[self.skip..];
        let times = &self.times[self.skip..];
        let len = curve.len();
        let windows = &self.windows;

        let (pre_mean, pre_stdev) = mean_stdev(&curve[..windows.pre])?;
        let post_mean = mean(&curve[len - windows.post..])?;
        let baselines = Baselines {
            pre_mean,
            pre_stdev,
            post_mean,
        };

        let noise = match self.options.noise_source {
            NoiseSource::PreBaseline => pre_stdev,
            NoiseSource::Acquisition => self.noise_level,
        };

        let bolus = locate_bolus(curve, windows, noise, pre_mean, post_mean);
        if !bolus.is_valid(windows, len) {
            return Err(VoxelError::NoBolus {
                start: bolus.start,
                end: bolus.end,
            });
        }

        detrend(curve, times, &bolus, &baselines, &mut scratch.corrected)?;
        to_concentration(&scratch.corrected, pre_mean, &mut scratch.transformed)?;

        let integral = auc_range(
            times,
            &scratch.transformed,
            bolus.start,
            bolus.end,
            self.options.auc_method,
        )?;

        Ok(VoxelAnalysis {
            baselines,
            noise,
            bolus,
            integral,
            value: integral * self.normalization,
        })
    }

    /// `1 / integral` of the reference curve, taken in magnitude
    fn reference_factor(&self, reference: &[f64]) -> Result<f64, CbvError> {
        let magnitude: Vec<f64> = reference.iter().map(|v| v.abs()).collect();

        let mut scratch = Scratch::new(self.frames);
        let analysis = self
            .analyze(&magnitude, &mut scratch)
            .map_err(CbvError::Reference)?
            .ok_or(CbvError::ReferenceIsAir)?;

        let integral = analysis.integral;
        if !(integral.is_finite() && integral > 0.0) {
            return Err(CbvError::NonPositiveReferenceIntegral { value: integral });
        }
        debug!(integral, "reference integral computed");
        Ok(1.0 / integral)
    }

    /// Relative time base (all frames)
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Number of frames per curve
    pub fn frames(&self) -> usize {
        self.frames
    }

    /// Number of frames after skipping
    pub fn working_len(&self) -> usize {
        self.frames - self.skip
    }

    /// Baseline window sizes
    pub fn windows(&self) -> &BaselineWindows {
        &self.windows
    }

    /// Air threshold applied to raw curves
    pub fn air_threshold(&self) -> f64 {
        self.air_threshold
    }

    /// Factor multiplying every voxel integral
    pub fn normalization(&self) -> f64 {
        self.normalization
    }

    /// Options the acquisition was built with
    pub fn options(&self) -> &CbvOptions {
        &self.options
    }
}

// ============================================================================
// Validation helpers
// ============================================================================

fn validate_options(options: &CbvOptions, noise_level: f64) -> Result<(), CbvError> {
    let invalid = |param: &str, value: f64| CbvError::InvalidParameter {
        param: param.to_string(),
        value: value.to_string(),
    };

    if !(options.background_threshold.is_finite() && options.background_threshold >= 0.0) {
        return Err(invalid("background_threshold", options.background_threshold));
    }
    if !(noise_level.is_finite() && noise_level >= 0.0) {
        return Err(invalid("noise_level", noise_level));
    }
    if !(options.pre_fraction > 0.0 && options.pre_fraction <= 1.0) {
        return Err(invalid("pre_fraction", options.pre_fraction));
    }
    if !(options.post_fraction > 0.0 && options.post_fraction <= 1.0) {
        return Err(invalid("post_fraction", options.post_fraction));
    }
    Ok(())
}

fn check_length(name: &'static str, expected: usize, found: usize) -> Result<(), CbvError> {
    if expected != found {
        return Err(CbvError::LengthMismatch {
            name,
            expected,
            found,
        });
    }
    Ok(())
}

fn check_windows(windows: &BaselineWindows, policy: WindowPolicy) -> Result<(), CbvError> {
    for (side, size, converged) in [
        (BaselineSide::Pre, windows.pre, windows.pre_converged),
        (BaselineSide::Post, windows.post, windows.post_converged),
    ] {
        if converged {
            continue;
        }
        match policy {
            WindowPolicy::Accept => {
                warn!(%side, size, "baseline search did not converge; keeping degenerate window")
            }
            WindowPolicy::Reject => return Err(CbvError::WindowNotConverged { side, size }),
        }
    }
    Ok(())
}
