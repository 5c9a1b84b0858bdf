//! Buffer manager shared by both solvers
//!
//! Solver buffers are allocated lazily on the first step and reallocated
//! whenever the grid's dimensions differ from the ones the buffer was built
//! for. Reallocation always reseeds from the live field; stale contents never
//! survive a size change.

use super::fields::FieldData;
use crate::grid::{round_temp, TemperatureGrid};
use tracing::debug;

/// A solver buffer whose shape tracks the grid it was seeded from
pub trait GridBuffer: Sized {
    /// Short label used in log output
    const LABEL: &'static str;

    /// Allocate a buffer matching `grid` and seed it from the field
    fn seeded_from(grid: &TemperatureGrid) -> Self;

    /// Dimensions the buffer was allocated for
    fn dimensions(&self) -> (usize, usize);
}

/// Return the buffer in `slot`, (re)allocating it if missing or mis-sized
pub fn ensure_buffer<'a, B: GridBuffer>(
    slot: &'a mut Option<B>,
    grid: &TemperatureGrid,
) -> &'a mut B {
    if let Some(stale) = slot.as_ref().filter(|b| b.dimensions() != grid.dimensions()) {
        let (old_w, old_h) = stale.dimensions();
        debug!(
            "Grid resized {}x{} -> {}x{}, reseeding {}",
            old_w,
            old_h,
            grid.width(),
            grid.height(),
            B::LABEL
        );
        *slot = None;
    }

    slot.get_or_insert_with(|| {
        debug!(
            "Allocating {} for {}x{} grid",
            B::LABEL,
            grid.width(),
            grid.height()
        );
        B::seeded_from(grid)
    })
}

/// Frame-start copy of the field used by the neighbor-transfer solver
///
/// Read-only while a frame is computed; overwritten wholesale at the start of
/// the next frame.
#[derive(Debug, Clone)]
pub struct SnapshotBuffer {
    field: FieldData<u8>,
}

impl SnapshotBuffer {
    /// Overwrite the snapshot with the grid's current values
    ///
    /// The grid must have the dimensions this buffer was allocated for.
    pub fn refresh(&mut self, grid: &TemperatureGrid) {
        debug_assert!(self.field.has_dimensions(grid.width(), grid.height()));
        self.field.as_mut_slice().copy_from_slice(grid.cells());
    }

    /// Snapshot values in row-major order
    pub fn as_slice(&self) -> &[u8] {
        self.field.as_slice()
    }
}

impl GridBuffer for SnapshotBuffer {
    const LABEL: &'static str = "snapshot buffer";

    fn seeded_from(grid: &TemperatureGrid) -> Self {
        Self {
            field: FieldData::from_source(grid.width(), grid.height(), grid.cells(), |v| v),
        }
    }

    fn dimensions(&self) -> (usize, usize) {
        (self.field.width, self.field.height)
    }
}

/// Current/next accumulator pair used by the Laplacian solver
///
/// Holds the continuous temperature that the integer field is a rounded
/// projection of. The two arrays exchange roles after every frame.
#[derive(Debug, Clone)]
pub struct AccumulatorPair {
    current: FieldData<f32>,
    next: FieldData<f32>,
}

impl AccumulatorPair {
    /// Accumulator state the next frame will read from
    pub fn current(&self) -> &[f32] {
        self.current.as_slice()
    }

    /// Mutable access to the current accumulator (edit reconciliation)
    pub fn current_mut(&mut self) -> &mut [f32] {
        self.current.as_mut_slice()
    }

    /// Borrow `current` for reading and `next` for writing
    pub fn split(&mut self) -> (&[f32], &mut [f32]) {
        (self.current.as_slice(), self.next.as_mut_slice())
    }

    /// Exchange the roles of `current` and `next` without copying
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.current, &mut self.next);
    }

    /// Integer value `current[idx]` publishes to
    #[inline]
    pub fn published(&self, idx: usize) -> u8 {
        round_temp(self.current.as_slice()[idx])
    }
}

impl GridBuffer for AccumulatorPair {
    const LABEL: &'static str = "accumulator pair";

    fn seeded_from(grid: &TemperatureGrid) -> Self {
        let current = FieldData::from_source(grid.width(), grid.height(), grid.cells(), f32::from);
        let next = current.clone();
        Self { current, next }
    }

    fn dimensions(&self) -> (usize, usize) {
        (self.current.width, self.current.height)
    }
}
