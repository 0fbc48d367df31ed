//! Parallel evaluation of many voxels against one acquisition
//!
//! Each rayon worker owns one [`Scratch`]; the acquisition itself is shared
//! read-only. Results keep the input order and a failing voxel never affects
//! its neighbours.
//!
//! ```rust,ignore
//! use perfsol::cbv::{Acquisition, AcquisitionConfig};
//!
//! let acquisition = Acquisition::init(config)?;
//! let outcomes = acquisition.evaluate_all(&curves);
//! let summary = perfsol::cbv::summarize(&outcomes);
//! ```

use ndarray::{ArrayView2, Axis};
use rayon::prelude::*;
use tracing::info;

use super::analyze::{Acquisition, Scratch};
use super::error::{CbvError, VoxelError};
use super::types::VoxelOutcome;

impl Acquisition {
    /// Evaluate a set of curves in parallel
    pub fn evaluate_all<C>(&self, curves: &[C]) -> Vec<Result<VoxelOutcome, VoxelError>>
    where
        C: AsRef<[f64]> + Sync,
    {
        let outcomes: Vec<_> = curves
            .par_iter()
            .map_init(
                || Scratch::new(self.frames()),
                |scratch, curve| self.evaluate_with(curve.as_ref(), scratch),
            )
            .collect();
        log_batch(&outcomes);
        outcomes
    }

    /// Evaluate every row of a voxel × frame matrix in parallel
    ///
    /// # Errors
    /// [`CbvError::LengthMismatch`] when the column count differs from the
    /// acquisition's frame count.
    pub fn evaluate_rows(
        &self,
        curves: ArrayView2<'_, f64>,
    ) -> Result<Vec<Result<VoxelOutcome, VoxelError>>, CbvError> {
        if curves.ncols() != self.frames() {
            return Err(CbvError::LengthMismatch {
                name: "curve matrix columns",
                expected: self.frames(),
                found: curves.ncols(),
            });
        }

        let outcomes: Vec<_> = curves
            .axis_iter(Axis(0))
            .into_par_iter()
            .map_init(
                || Scratch::new(self.frames()),
                |scratch, row| match row.as_slice() {
                    Some(curve) => self.evaluate_with(curve, scratch),
                    None => self.evaluate_with(&row.to_vec(), scratch),
                },
            )
            .collect();
        log_batch(&outcomes);
        Ok(outcomes)
    }
}

fn log_batch(outcomes: &[Result<VoxelOutcome, VoxelError>]) {
    let failed = outcomes.iter().filter(|r| r.is_err()).count();
    let void = outcomes
        .iter()
        .filter(|r| matches!(r, Ok(VoxelOutcome::Void)))
        .count();
    info!(
        voxels = outcomes.len(),
        void,
        failed,
        "CBV batch evaluated"
    );
}
