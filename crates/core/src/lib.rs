//! Heat Grid Core Library
//!
//! Per-frame diffusion kernel for a 2D temperature field on a rectangular
//! grid. The field is a row-major array of integers in `[0, 100]`, owned by
//! the host and passed into the active solver once per frame.
//!
//! ## Diffusion models
//!
//! Two interchangeable models sit behind the [`DiffusionSolver`] trait:
//! - **Neighbor transfer**: integer pairwise flow from a frame-start snapshot,
//!   with a clamp that keeps a pair from swapping order in one frame
//! - **Laplacian stencil**: explicit heat equation on persistent floating-point
//!   state, reconciling external edits cell by cell
//!
//! Solver buffers are allocated lazily and reseeded when the grid is resized.

pub mod error;
pub mod grid;
pub mod simulation;
pub mod solver;

// Re-export main types
pub use error::ConfigError;
pub use grid::{GridStats, TemperatureGrid, TEMP_MAX, TEMP_MIN};
pub use simulation::HeatSimulation;
pub use solver::{
    create_diffusion_solver, DiffusionSolver, LaplacianParams, LaplacianSolver,
    NeighborTransferParams, NeighborTransferSolver, SolverConfig, SolverKind,
};
