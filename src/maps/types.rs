//! Options and result types of the curve measurement maps

use serde::{Deserialize, Serialize};

use super::error::MapError;
use crate::data::{AUCMethod, ConcentrationConversion};
use crate::error::PerfsolError;

// ============================================================================
// Configuration Types
// ============================================================================

/// Contiguous run of frames, counted from zero
///
/// A `length` of 0 means "through the last frame", so the default window
/// covers the whole curve.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameWindow {
    /// First frame
    pub start: usize,
    /// Number of frames (0 = all remaining)
    pub length: usize,
}

impl FrameWindow {
    pub fn new(start: usize, length: usize) -> Self {
        Self { start, length }
    }

    /// Inclusive `(first, last)` frame indices for an acquisition of `frames`
    ///
    /// # Errors
    /// [`MapError::InvalidWindow`] when the window is empty or runs past the
    /// last frame.
    pub fn resolve(&self, frames: usize) -> Result<(usize, usize), MapError> {
        let last = if self.length == 0 {
            frames.checked_sub(1)
        } else {
            self.start.checked_add(self.length - 1)
        };
        match last {
            Some(last) if self.start <= last && last < frames => Ok((self.start, last)),
            _ => Err(MapError::InvalidWindow {
                start: self.start,
                length: self.length,
                frames,
            }),
        }
    }
}

/// Metric for the distance between a curve and the reference curve
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DistanceNorm {
    /// `∫ |c − r| dt`
    L1,
    /// `sqrt(∫ (c − r)² dt)`
    #[default]
    L2,
}

/// Fractions of the curve maximum bounding the active rise
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiseThresholds {
    /// Lower fraction (default: 0.2)
    pub low: f64,
    /// Upper fraction (default: 0.95)
    pub high: f64,
}

impl Default for RiseThresholds {
    fn default() -> Self {
        Self {
            low: 0.2,
            high: 0.95,
        }
    }
}

/// Configuration of the curve measurement maps
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapOptions {
    /// Signal to concentration conversion applied before measuring (default: None)
    pub conversion: ConcentrationConversion,
    /// Frames used by the basic measures, the area and the reference match
    pub window: FrameWindow,
    /// Integration rule for the area (default: Linear)
    pub auc_method: AUCMethod,
    /// Distance metric against the reference curve (default: L2)
    pub norm: DistanceNorm,
    /// Active rise thresholds
    pub rise: RiseThresholds,
}

impl MapOptions {
    /// Parse options from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, PerfsolError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize options to pretty-printed JSON
    pub fn to_json(&self) -> Result<String, PerfsolError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn with_conversion(mut self, conversion: ConcentrationConversion) -> Self {
        self.conversion = conversion;
        self
    }

    pub fn with_window(mut self, window: FrameWindow) -> Self {
        self.window = window;
        self
    }

    pub fn with_auc_method(mut self, method: AUCMethod) -> Self {
        self.auc_method = method;
        self
    }

    pub fn with_norm(mut self, norm: DistanceNorm) -> Self {
        self.norm = norm;
        self
    }

    pub fn with_rise_thresholds(mut self, low: f64, high: f64) -> Self {
        self.rise = RiseThresholds { low, high };
        self
    }
}

// ============================================================================
// Result Types
// ============================================================================

/// Descriptive statistics over the frame window
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BasicMeasures {
    pub max: f64,
    /// `max − min`
    pub spread: f64,
    pub median: f64,
    pub mean: f64,
    /// Sample standard deviation
    pub sd: f64,
    /// `sd / mean` (NaN for a zero mean)
    pub cv: f64,
    /// Moment skewness (NaN for a constant window)
    pub skewness: f64,
    /// Excess kurtosis (NaN for a constant window)
    pub kurtosis: f64,
}

/// Statistics of alternating frames, numbered from 1
///
/// Odd frames are the 1st, 3rd, 5th, ... samples; even frames the 2nd,
/// 4th, ... samples.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InterleavedStats {
    pub odd_mean: f64,
    pub odd_sd: f64,
    pub even_mean: f64,
    pub even_sd: f64,
}

/// Agreement between a curve and the reference curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReferenceMatch {
    /// Piecewise-linear integral distance under the configured norm
    pub distance: f64,
    /// Pearson correlation, `None` when either curve is constant
    pub correlation: Option<f64>,
}

/// Rise from the low to the high threshold before the curve maximum
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActiveRise {
    /// Time between the two threshold crossings
    pub time: f64,
    /// Threshold difference over `time`
    pub slope: f64,
}

/// Every measurement of one curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurveMeasures {
    pub basic: BasicMeasures,
    /// Area under the converted curve over the frame window
    pub area: f64,
    /// Computed on the raw signal
    pub interleaved: InterleavedStats,
    /// `None` without a reference curve
    pub reference: Option<ReferenceMatch>,
    /// `None` when the curve has no measurable rise
    pub rise: Option<ActiveRise>,
}
