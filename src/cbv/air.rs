//! Air/void voxel classification

use crate::data::stats::min_magnitude;

/// Air threshold from the host noise level
#[inline]
pub fn air_threshold(background_threshold: f64, noise_level: f64) -> f64 {
    background_threshold * noise_level
}

/// `true` when the curve's smallest magnitude falls below `threshold`
///
/// Applied to the raw curve over all frames. An empty curve is air.
#[inline]
pub fn is_air(curve: &[f64], threshold: f64) -> bool {
    min_magnitude(curve) < threshold
}
