//! Neighbor-transfer diffusion
//!
//! Integer, pairwise flow model. For each cell `c` and each in-bounds cardinal
//! neighbor `n`:
//! ```text
//! diff     = n - c
//! raw      = round(diff × flow_rate)
//! transfer = clamp(raw, 0, trunc(diff / 2))     diff > 0
//!            clamp(raw, trunc(diff / 2), 0)     diff < 0
//! c'       = clamp(c + Σ transfer, 0, 100)
//! ```
//!
//! Both ends of an edge compute their transfer from the same frame-start
//! snapshot, so an unbounded transfer on each side could overshoot and flip
//! the sign of their difference. Capping each side at half the difference
//! (truncated toward zero, symmetric for both signs) rules that out.
//!
//! Boundary: out-of-bounds neighbors are omitted from the sum. Small
//! differences can round to a zero transfer, so the field may settle with
//! residual unequal neighbors; that dead zone is expected.

use super::buffers::{ensure_buffer, SnapshotBuffer};
use super::config::{NeighborTransferParams, SolverKind};
use super::DiffusionSolver;
use crate::error::ConfigError;
use crate::grid::{clamp_temp, TemperatureGrid};
use rayon::prelude::*;
use std::borrow::Cow;
use tracing::trace;

/// Signed amount flowing into a cell at `center` from a neighbor at `neighbor`
///
/// Positive when heat flows in. Never exceeds half the difference in
/// magnitude, so the pair cannot swap order within one frame.
#[inline]
pub fn pair_transfer(center: i32, neighbor: i32, flow_rate: f32) -> i32 {
    let diff = neighbor - center;
    if diff == 0 {
        return 0;
    }

    let raw = (diff as f32 * flow_rate).round() as i32;
    // Integer division truncates toward zero for both signs
    let max_transfer = diff / 2;

    if diff > 0 {
        raw.clamp(0, max_transfer)
    } else {
        raw.clamp(max_transfer, 0)
    }
}

/// CPU implementation of one neighbor-transfer frame
///
/// # Arguments
///
/// * `snapshot` - Field values at frame start (read-only)
/// * `field` - Live field, overwritten with the new values
/// * `width` - Grid width in cells
/// * `height` - Grid height in cells
/// * `params` - Solver constants
pub fn step_neighbor_transfer_cpu(
    snapshot: &[u8],
    field: &mut [u8],
    width: usize,
    height: usize,
    params: NeighborTransferParams,
) {
    let rate = params.flow_rate;

    // Rows are independent: every read comes from the snapshot
    field
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, cell) in row.iter_mut().enumerate() {
                let idx = y * width + x;
                let c = i32::from(snapshot[idx]);
                let mut delta = 0;

                if x > 0 {
                    delta += pair_transfer(c, i32::from(snapshot[idx - 1]), rate);
                }
                if x + 1 < width {
                    delta += pair_transfer(c, i32::from(snapshot[idx + 1]), rate);
                }
                if y > 0 {
                    delta += pair_transfer(c, i32::from(snapshot[idx - width]), rate);
                }
                if y + 1 < height {
                    delta += pair_transfer(c, i32::from(snapshot[idx + width]), rate);
                }

                *cell = clamp_temp(c + delta);
            }
        });
}

/// Neighbor-transfer solver
///
/// Its only persistent state is the reusable snapshot buffer.
#[derive(Debug, Clone)]
pub struct NeighborTransferSolver {
    params: NeighborTransferParams,
    snapshot: Option<SnapshotBuffer>,
}

impl NeighborTransferSolver {
    /// Create a solver with validated constants
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::FlowRateOutOfRange`] for an invalid flow rate.
    pub fn new(params: NeighborTransferParams) -> Result<Self, ConfigError> {
        params.validate()?;
        Ok(Self {
            params,
            snapshot: None,
        })
    }

    /// Solver constants
    pub fn params(&self) -> NeighborTransferParams {
        self.params
    }
}

impl DiffusionSolver for NeighborTransferSolver {
    fn step(&mut self, grid: &mut TemperatureGrid) {
        let snapshot = ensure_buffer(&mut self.snapshot, grid);
        snapshot.refresh(grid);

        let (width, height) = grid.dimensions();
        step_neighbor_transfer_cpu(
            snapshot.as_slice(),
            grid.cells_mut(),
            width,
            height,
            self.params,
        );
        trace!("Neighbor-transfer step on {}x{} grid", width, height);
    }

    fn reset(&mut self) {
        self.snapshot = None;
    }

    fn read_state(&self) -> Cow<'_, [f32]> {
        match &self.snapshot {
            Some(snapshot) => Cow::Owned(
                snapshot
                    .as_slice()
                    .iter()
                    .map(|&v| f32::from(v))
                    .collect(),
            ),
            None => Cow::Borrowed(&[]),
        }
    }

    fn kind(&self) -> SolverKind {
        SolverKind::NeighborTransfer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solver(flow_rate: f32) -> NeighborTransferSolver {
        NeighborTransferSolver::new(NeighborTransferParams::new(flow_rate).unwrap()).unwrap()
    }

    #[test]
    fn test_pair_transfer_zero_diff() {
        assert_eq!(pair_transfer(40, 40, 1.0), 0);
    }

    #[test]
    fn test_pair_transfer_is_antisymmetric() {
        for (a, b) in [(0, 100), (13, 50), (99, 100), (70, 20)] {
            assert_eq!(pair_transfer(a, b, 0.25), -pair_transfer(b, a, 0.25));
        }
    }

    #[test]
    fn test_pair_transfer_capped_at_half_difference() {
        // raw = round(10 × 1.0) = 10, capped at trunc(10 / 2) = 5
        assert_eq!(pair_transfer(0, 10, 1.0), 5);
        assert_eq!(pair_transfer(10, 0, 1.0), -5);
        // Odd differences truncate toward zero on both sides
        assert_eq!(pair_transfer(0, 7, 1.0), 3);
        assert_eq!(pair_transfer(7, 0, 1.0), -3);
    }

    #[test]
    fn test_pair_transfer_dead_zone() {
        // diff = 1: cap is trunc(1 / 2) = 0
        assert_eq!(pair_transfer(50, 51, 1.0), 0);
        // diff = 3, rate 0.1: round(0.3) = 0
        assert_eq!(pair_transfer(50, 53, 0.1), 0);
    }

    #[test]
    fn test_pair_transfer_rounds_half_away_from_zero() {
        // 10 × 0.25 = 2.5
        assert_eq!(pair_transfer(0, 10, 0.25), 3);
        assert_eq!(pair_transfer(10, 0, 0.25), -3);
    }

    #[test]
    fn test_hot_center_spreads_to_cardinals() {
        let mut grid = TemperatureGrid::new(3, 3, 0).unwrap();
        grid.set_temp(1, 1, 100);
        let mut solver = solver(0.25);

        solver.step(&mut grid);

        assert_eq!(grid.cells(), &[0, 25, 0, 25, 0, 25, 0, 25, 0]);
    }

    #[test]
    fn test_uniform_field_is_fixed_point() {
        let mut grid = TemperatureGrid::new(6, 4, 37).unwrap();
        let mut solver = solver(1.0);
        for _ in 0..20 {
            solver.step(&mut grid);
        }
        assert!(grid.cells().iter().all(|&v| v == 37));
    }

    #[test]
    fn test_single_cell_grid_is_unchanged() {
        let mut grid = TemperatureGrid::new(1, 1, 64).unwrap();
        let mut solver = solver(0.5);
        solver.step(&mut grid);
        assert_eq!(grid.get_temp(0, 0), Some(64));
    }

    #[test]
    fn test_read_state_is_frame_start_snapshot() {
        let mut grid = TemperatureGrid::from_values(2, 1, &[100, 0]).unwrap();
        let mut solver = solver(0.25);
        assert!(solver.read_state().is_empty());

        solver.step(&mut grid);
        assert_eq!(solver.read_state().as_ref(), &[100.0, 0.0]);
        assert_eq!(grid.cells(), &[75, 25]);

        solver.reset();
        assert!(solver.read_state().is_empty());
    }

    #[test]
    fn test_rejects_invalid_flow_rate() {
        let params = NeighborTransferParams { flow_rate: 2.0 };
        assert!(NeighborTransferSolver::new(params).is_err());
    }
}
