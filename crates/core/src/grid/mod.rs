//! Host-owned temperature grid
//!
//! The grid is the single source of truth read by the renderer and written by
//! both the diffusion solvers and external editors (painting, random fill,
//! resize). Editors go through the clamped accessors so every cell stays in
//! `[TEMP_MIN, TEMP_MAX]`.

pub mod temperature_grid;

// Re-export main types
pub use temperature_grid::*;
