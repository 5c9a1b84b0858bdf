//! Diffusion solver trait definition
//!
//! This module defines the `DiffusionSolver` trait, the single contract behind
//! which the diffusion models are swapped. The host calls [`DiffusionSolver::step`]
//! exactly once per frame and may edit the grid freely between calls.

use super::config::SolverKind;
use crate::grid::TemperatureGrid;
use std::borrow::Cow;

/// Backend-agnostic interface for one frame of temperature diffusion
///
/// Implementations read the field's state at the start of the frame, compute
/// a full-grid update from that state alone, and publish the result into the
/// grid clamped to `[TEMP_MIN, TEMP_MAX]`. The result is independent of cell
/// visitation order.
///
/// Any buffers a solver keeps are private to the instance. They are sized
/// lazily from the grid and reseeded when its dimensions change.
pub trait DiffusionSolver: Send + Sync {
    /// Advance the field by one frame, in place
    ///
    /// Never fails for a well-formed grid (at least 1x1, values in range).
    fn step(&mut self, grid: &mut TemperatureGrid);

    /// Drop all persistent state so the next step reseeds from the grid
    fn reset(&mut self);

    /// Read the solver's internal state (for diagnostics and tests)
    ///
    /// Returns the frame-start snapshot or the current accumulator in
    /// row-major order, or an empty slice before the first step.
    fn read_state(&self) -> Cow<'_, [f32]>;

    /// Which model this solver implements
    fn kind(&self) -> SolverKind;

    /// Backend name for logging
    fn name(&self) -> &'static str {
        self.kind().name()
    }
}
