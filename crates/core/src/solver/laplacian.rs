//! Laplacian-stencil diffusion
//!
//! Explicit finite-difference heat equation on continuous state:
//! ```text
//! ∇²T = T_up + T_down + T_left + T_right - 4T
//! T'  = clamp(T + D∇²T, 0, 100)
//! ```
//!
//! The continuous temperature lives in an accumulator pair owned by the solver;
//! the integer grid is its rounded projection. Stable for `0 < D <= 0.25`.
//!
//! Boundary: insulated (zero-flux). An out-of-bounds neighbor reuses the
//! centre value, so every cell has exactly four stencil terms.
//!
//! # Edit reconciliation
//!
//! Before each frame every cell's grid value is compared against its rounded
//! accumulator value. A mismatch can only come from an external edit (paint,
//! random fill, resize seed), so that cell's accumulator is overwritten with
//! the grid value and its fractional part discarded. This comparison is the
//! only channel by which edits reach the continuous state.

use super::buffers::{ensure_buffer, AccumulatorPair};
use super::config::{LaplacianParams, SolverKind};
use super::DiffusionSolver;
use crate::error::ConfigError;
use crate::grid::{round_temp, TemperatureGrid, TEMP_MAX, TEMP_MIN};
use rayon::prelude::*;
use std::borrow::Cow;
use tracing::trace;

/// Absorb external edits into the accumulator
///
/// Returns the number of cells whose accumulator was overwritten.
pub fn reconcile_edits(field: &[u8], current: &mut [f32]) -> usize {
    current
        .par_iter_mut()
        .zip(field.par_iter())
        .map(|(acc, &published)| {
            if round_temp(*acc) == published {
                0
            } else {
                *acc = f32::from(published);
                1
            }
        })
        .sum()
}

/// CPU implementation of one Laplacian frame
///
/// # Arguments
///
/// * `current` - Accumulator at frame start (read-only)
/// * `next` - Accumulator receiving the new state
/// * `width` - Grid width in cells
/// * `height` - Grid height in cells
/// * `params` - Solver constants
pub fn step_laplacian_cpu(
    current: &[f32],
    next: &mut [f32],
    width: usize,
    height: usize,
    params: LaplacianParams,
) {
    let d = params.diffusivity;
    let (lo, hi) = (f32::from(TEMP_MIN), f32::from(TEMP_MAX));

    next.par_chunks_mut(width).enumerate().for_each(|(y, row)| {
        for (x, out) in row.iter_mut().enumerate() {
            let idx = y * width + x;
            let t = current[idx];

            // Insulated boundary: missing neighbors mirror the centre
            let t_left = if x > 0 { current[idx - 1] } else { t };
            let t_right = if x + 1 < width { current[idx + 1] } else { t };
            let t_up = if y > 0 { current[idx - width] } else { t };
            let t_down = if y + 1 < height { current[idx + width] } else { t };

            let laplacian = t_up + t_down + t_left + t_right - 4.0 * t;
            *out = (t + d * laplacian).clamp(lo, hi);
        }
    });
}

/// Write the rounded accumulator into the grid
pub fn publish_accumulator(next: &[f32], field: &mut [u8]) {
    field
        .par_iter_mut()
        .zip(next.par_iter())
        .for_each(|(cell, &value)| *cell = round_temp(value));
}

/// Laplacian solver with persistent sub-integer state
#[derive(Debug, Clone)]
pub struct LaplacianSolver {
    params: LaplacianParams,
    accumulators: Option<AccumulatorPair>,
}

impl LaplacianSolver {
    /// Create a solver with validated constants
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DiffusivityOutOfRange`] for a diffusivity outside
    /// `(0, 0.25]`.
    pub fn new(params: LaplacianParams) -> Result<Self, ConfigError> {
        params.validate()?;
        Ok(Self {
            params,
            accumulators: None,
        })
    }

    /// Solver constants
    pub fn params(&self) -> LaplacianParams {
        self.params
    }
}

impl DiffusionSolver for LaplacianSolver {
    fn step(&mut self, grid: &mut TemperatureGrid) {
        let acc = ensure_buffer(&mut self.accumulators, grid);

        let edits = reconcile_edits(grid.cells(), acc.current_mut());
        if edits > 0 {
            trace!("Absorbed {} edited cells into accumulator", edits);
        }

        let (width, height) = grid.dimensions();
        let (current, next) = acc.split();
        step_laplacian_cpu(current, next, width, height, self.params);

        // All reads of `current` are done; publish, then exchange roles
        publish_accumulator(next, grid.cells_mut());
        acc.swap();
    }

    fn reset(&mut self) {
        self.accumulators = None;
    }

    fn read_state(&self) -> Cow<'_, [f32]> {
        match &self.accumulators {
            Some(acc) => Cow::Borrowed(acc.current()),
            None => Cow::Borrowed(&[]),
        }
    }

    fn kind(&self) -> SolverKind {
        SolverKind::Laplacian
    }
}
