//! Acquisition-level set-up and per-curve evaluation of the measurement maps

use rayon::prelude::*;
use tracing::debug;

use super::calc::{active_rise, basic_measures, correlation, distance, interleaved_stats};
use super::error::MapError;
use super::types::*;
use crate::data::{auc_range, relative_times, signal_to_concentration, CurveError};

/// Shared state of the curve measurement maps
///
/// Built once per acquisition; every method takes one raw signal curve,
/// converts it with the configured
/// [`ConcentrationConversion`](crate::data::ConcentrationConversion) and
/// measures it. The struct is read-only and can be shared across threads.
#[derive(Debug, Clone)]
pub struct CurveMaps {
    times: Vec<f64>,
    first: usize,
    last: usize,
    reference: Option<Vec<f64>>,
    options: MapOptions,
}

impl CurveMaps {
    /// Validate the acquisition input and build the shared state
    ///
    /// # Errors
    /// * the time base is empty, non-finite or decreasing
    /// * the frame window does not fit
    /// * the rise thresholds are not `0 < low < high ≤ 1`
    /// * the reference curve has the wrong length or a non-finite sample
    pub fn init(
        absolute_times: &[f64],
        reference: Option<Vec<f64>>,
        options: MapOptions,
    ) -> Result<Self, MapError> {
        let times = relative_times(absolute_times)?;
        let frames = times.len();
        let (first, last) = options.window.resolve(frames)?;

        let RiseThresholds { low, high } = options.rise;
        if !(low > 0.0 && low < high && high <= 1.0) {
            return Err(MapError::InvalidParameter {
                param: "rise".to_string(),
                value: format!("low {low}, high {high}"),
            });
        }

        if let Some(curve) = &reference {
            if curve.len() != frames {
                return Err(MapError::LengthMismatch {
                    name: "reference curve",
                    expected: frames,
                    found: curve.len(),
                });
            }
            if let Some(index) = curve.iter().position(|v| !v.is_finite()) {
                return Err(CurveError::NonFinite { index }.into());
            }
        }

        debug!(
            frames,
            first,
            last,
            reference = reference.is_some(),
            "curve maps initialized"
        );

        Ok(Self {
            times,
            first,
            last,
            reference,
            options,
        })
    }

    /// Number of frames per curve
    pub fn frames(&self) -> usize {
        self.times.len()
    }

    /// Inclusive frame window used by the windowed measures
    pub fn window(&self) -> (usize, usize) {
        (self.first, self.last)
    }

    pub fn options(&self) -> &MapOptions {
        &self.options
    }

    fn check_signal(&self, signal: &[f64]) -> Result<(), MapError> {
        if signal.len() != self.frames() {
            return Err(MapError::LengthMismatch {
                name: "signal",
                expected: self.frames(),
                found: signal.len(),
            });
        }
        if let Some(index) = signal.iter().position(|v| !v.is_finite()) {
            return Err(CurveError::NonFinite { index }.into());
        }
        Ok(())
    }

    fn concentration(&self, signal: &[f64]) -> Result<Vec<f64>, MapError> {
        self.check_signal(signal)?;
        Ok(signal_to_concentration(signal, self.options.conversion)?)
    }

    /// Descriptive statistics of the converted curve over the frame window
    pub fn basic(&self, signal: &[f64]) -> Result<BasicMeasures, MapError> {
        let conc = self.concentration(signal)?;
        self.basic_of(&conc)
    }

    /// Area under the converted curve over the frame window
    pub fn area(&self, signal: &[f64]) -> Result<f64, MapError> {
        let conc = self.concentration(signal)?;
        self.area_of(&conc)
    }

    /// Odd/even frame statistics of the raw signal
    pub fn interleaved(&self, signal: &[f64]) -> Result<InterleavedStats, MapError> {
        self.check_signal(signal)?;
        Ok(interleaved_stats(signal)?)
    }

    /// Distance and correlation to the reference curve over the frame window
    ///
    /// `Ok(None)` when no reference curve was supplied.
    pub fn reference_match(&self, signal: &[f64]) -> Result<Option<ReferenceMatch>, MapError> {
        let conc = self.concentration(signal)?;
        self.reference_of(&conc)
    }

    /// Active rise of the converted curve, `Ok(None)` when it has none
    pub fn active_rise(&self, signal: &[f64]) -> Result<Option<ActiveRise>, MapError> {
        let conc = self.concentration(signal)?;
        Ok(active_rise(&conc, &self.times, self.options.rise))
    }

    /// Every measurement of one curve, converting it once
    pub fn evaluate(&self, signal: &[f64]) -> Result<CurveMeasures, MapError> {
        let conc = self.concentration(signal)?;
        Ok(CurveMeasures {
            basic: self.basic_of(&conc)?,
            area: self.area_of(&conc)?,
            interleaved: interleaved_stats(signal)?,
            reference: self.reference_of(&conc)?,
            rise: active_rise(&conc, &self.times, self.options.rise),
        })
    }

    /// Evaluate a set of curves in parallel, keeping their order
    pub fn evaluate_all<C>(&self, signals: &[C]) -> Vec<Result<CurveMeasures, MapError>>
    where
        C: AsRef<[f64]> + Sync,
    {
        signals
            .par_iter()
            .map(|signal| self.evaluate(signal.as_ref()))
            .collect()
    }

    fn basic_of(&self, conc: &[f64]) -> Result<BasicMeasures, MapError> {
        Ok(basic_measures(&conc[self.first..=self.last])?)
    }

    fn area_of(&self, conc: &[f64]) -> Result<f64, MapError> {
        Ok(auc_range(
            &self.times,
            conc,
            self.first,
            self.last,
            self.options.auc_method,
        )?)
    }

    fn reference_of(&self, conc: &[f64]) -> Result<Option<ReferenceMatch>, MapError> {
        let Some(reference) = &self.reference else {
            return Ok(None);
        };
        let range = self.first..=self.last;
        let values = &conc[range.clone()];
        let reference = &reference[range.clone()];

        Ok(Some(ReferenceMatch {
            distance: distance(values, reference, &self.times[range], self.options.norm)?,
            correlation: correlation(values, reference),
        }))
    }
}
