//! Diffusion solver module
//!
//! This module provides the pluggable per-frame update kernel for the
//! temperature grid. The core abstraction is the `DiffusionSolver` trait,
//! implemented by two algorithmically distinct models:
//!
//! - [`NeighborTransferSolver`]: integer pairwise flow with an equilibrium
//!   safety clamp; out-of-bounds neighbors are omitted.
//! - [`LaplacianSolver`]: explicit finite-difference stencil on persistent
//!   sub-integer state, with insulated boundaries and edit reconciliation.
//!
//! The two boundary policies are deliberately different and are not unified.
//!
//! # Backend Selection
//!
//! The host picks a model through [`SolverConfig`] and owns exactly one live
//! solver at a time. Switching means building a fresh solver, which resets all
//! persistent state.
//!
//! # Example
//!
//! ```rust
//! use heat_grid_core::grid::TemperatureGrid;
//! use heat_grid_core::solver::{
//!     create_diffusion_solver, DiffusionSolver, SolverConfig, SolverKind,
//! };
//!
//! let mut grid = TemperatureGrid::new(32, 32, 20).unwrap();
//! grid.paint_disc(16, 16, 4, 100);
//!
//! let config = SolverConfig::with_kind(SolverKind::Laplacian);
//! let mut solver = create_diffusion_solver(&config).unwrap();
//! solver.step(&mut grid);
//! assert!(grid.get_temp(16, 16).unwrap() <= 100);
//! ```

pub mod buffers;
mod config;
mod fields;
mod laplacian;
mod neighbor_transfer;
pub mod profiler;
#[allow(clippy::module_name_repetitions)]
mod r#trait;

// Re-exports
pub use config::{LaplacianParams, NeighborTransferParams, SolverConfig, SolverKind};
pub use fields::FieldData;
pub use laplacian::{publish_accumulator, reconcile_edits, step_laplacian_cpu, LaplacianSolver};
pub use neighbor_transfer::{pair_transfer, step_neighbor_transfer_cpu, NeighborTransferSolver};
pub use profiler::{FrameTimer, ProfilerScope};
pub use r#trait::DiffusionSolver;

use crate::error::ConfigError;
use tracing::info;

/// Create a diffusion solver for the configured model
///
/// # Arguments
///
/// * `config` - Solver selection and constants
///
/// # Returns
///
/// A boxed `DiffusionSolver` with no persistent state; it seeds itself from
/// the grid on its first step.
///
/// # Errors
///
/// Returns the [`ConfigError`] of the active solver's constants.
pub fn create_diffusion_solver(
    config: &SolverConfig,
) -> Result<Box<dyn DiffusionSolver>, ConfigError> {
    let solver: Box<dyn DiffusionSolver> = match config.kind {
        SolverKind::NeighborTransfer => {
            let solver = NeighborTransferSolver::new(config.neighbor_transfer)?;
            info!(
                "Using neighbor-transfer backend (flow_rate={})",
                config.neighbor_transfer.flow_rate
            );
            Box::new(solver)
        }
        SolverKind::Laplacian => {
            let solver = LaplacianSolver::new(config.laplacian)?;
            info!(
                "Using laplacian backend (diffusivity={})",
                config.laplacian.diffusivity
            );
            Box::new(solver)
        }
    };
    Ok(solver)
}
