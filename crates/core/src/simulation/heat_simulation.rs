//! Host loop around a `DiffusionSolver`
//!
//! `HeatSimulation` owns the grid and exactly one live solver. The host calls
//! [`HeatSimulation::update`] once per rendered frame and edits the grid
//! between frames through [`HeatSimulation::grid_mut`]; the solver is the sole
//! writer during `update`, the host is the sole writer otherwise.

use crate::error::ConfigError;
use crate::grid::{GridStats, TemperatureGrid};
use crate::solver::{
    create_diffusion_solver, DiffusionSolver, FrameTimer, ProfilerScope, SolverConfig,
    SolverKind,
};
use std::borrow::Cow;
use tracing::{debug, info, trace};

/// Temperature grid plus the active diffusion model
pub struct HeatSimulation {
    /// Shared field read by the renderer and edited by the host
    grid: TemperatureGrid,

    /// Active backend
    solver: Box<dyn DiffusionSolver>,

    /// Configuration the active backend was built from
    config: SolverConfig,

    /// Frames advanced since construction
    frame: u64,

    /// Cost of the last `step()`
    frame_timer: FrameTimer,
}

impl HeatSimulation {
    /// Create a simulation over `grid` with the configured solver
    ///
    /// # Errors
    ///
    /// Returns the [`ConfigError`] of the active solver's constants.
    pub fn new(grid: TemperatureGrid, config: SolverConfig) -> Result<Self, ConfigError> {
        let solver = create_diffusion_solver(&config)?;

        info!(
            "Heat simulation initialized: {}x{} grid, solver={}",
            grid.width(),
            grid.height(),
            solver.name()
        );

        Ok(Self {
            grid,
            solver,
            config,
            frame: 0,
            frame_timer: FrameTimer::new(),
        })
    }

    /// Advance one frame: exactly one `step()` on the active solver
    pub fn update(&mut self) {
        let scope = ProfilerScope::new("diffusion step");
        self.solver.step(&mut self.grid);
        self.frame_timer.record(scope.elapsed_ms());
        self.frame += 1;

        trace!(
            "Frame {}: {} step on {}x{} grid in {:.3}ms",
            self.frame,
            self.solver.name(),
            self.grid.width(),
            self.grid.height(),
            self.frame_timer.last_frame_time_ms()
        );
    }

    /// Replace the active solver
    ///
    /// The new solver starts with no persistent state and reseeds from the
    /// grid on its next step, even when `config` selects the same model.
    ///
    /// # Errors
    ///
    /// Returns the [`ConfigError`] of the requested constants; the current
    /// solver is kept on error.
    pub fn set_solver(&mut self, config: SolverConfig) -> Result<(), ConfigError> {
        let solver = create_diffusion_solver(&config)?;
        info!(
            "Switching solver {} -> {} at frame {}",
            self.solver.name(),
            solver.name(),
            self.frame
        );
        self.solver = solver;
        self.config = config;
        Ok(())
    }

    /// Clear the active solver's persistent state without replacing it
    pub fn reset_solver(&mut self) {
        debug!("Resetting {} solver state", self.solver.name());
        self.solver.reset();
    }

    /// Resize the grid; the solver reallocates its buffers on the next step
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidDimensions`] for a zero dimension.
    pub fn resize(&mut self, width: usize, height: usize, fill: i32) -> Result<(), ConfigError> {
        self.grid.resize(width, height, fill)
    }

    /// Read-only grid for rendering
    pub fn grid(&self) -> &TemperatureGrid {
        &self.grid
    }

    /// Mutable grid for host edits between frames
    pub fn grid_mut(&mut self) -> &mut TemperatureGrid {
        &mut self.grid
    }

    /// Frames advanced so far
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Active model
    pub fn solver_kind(&self) -> SolverKind {
        self.solver.kind()
    }

    /// Active backend name
    pub fn solver_name(&self) -> &'static str {
        self.solver.name()
    }

    /// Configuration of the active solver
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Active solver's internal state (snapshot or accumulator)
    pub fn read_solver_state(&self) -> Cow<'_, [f32]> {
        self.solver.read_state()
    }

    /// Grid summary statistics
    pub fn stats(&self) -> GridStats {
        self.grid.stats()
    }

    /// Wall time of the last `update()` in milliseconds
    pub fn last_frame_time_ms(&self) -> f64 {
        self.frame_timer.last_frame_time_ms()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_advances_one_frame() {
        let grid = TemperatureGrid::new(8, 8, 50).unwrap();
        let mut sim = HeatSimulation::new(grid, SolverConfig::default()).unwrap();
        assert_eq!(sim.frame(), 0);

        sim.update();
        sim.update();
        assert_eq!(sim.frame(), 2);
        assert!(sim.last_frame_time_ms() >= 0.0);
        // Uniform field is a fixed point
        assert_eq!(sim.stats().min, 50);
        assert_eq!(sim.stats().max, 50);
    }

    #[test]
    fn test_set_solver_resets_state() {
        let grid = TemperatureGrid::new(4, 4, 10).unwrap();
        let mut sim =
            HeatSimulation::new(grid, SolverConfig::with_kind(SolverKind::Laplacian)).unwrap();
        sim.update();
        assert_eq!(sim.read_solver_state().len(), 16);

        sim.set_solver(SolverConfig::with_kind(SolverKind::Laplacian))
            .unwrap();
        assert!(sim.read_solver_state().is_empty());
        assert_eq!(sim.solver_kind(), SolverKind::Laplacian);
    }

    #[test]
    fn test_invalid_switch_keeps_current_solver() {
        let grid = TemperatureGrid::new(4, 4, 10).unwrap();
        let mut sim = HeatSimulation::new(grid, SolverConfig::default()).unwrap();

        let mut bad = SolverConfig::with_kind(SolverKind::Laplacian);
        bad.laplacian.diffusivity = 1.0;
        assert!(sim.set_solver(bad).is_err());
        assert_eq!(sim.solver_kind(), SolverKind::NeighborTransfer);
        assert_eq!(sim.config(), &SolverConfig::default());
    }

    #[test]
    fn test_reset_solver_keeps_backend() {
        let grid = TemperatureGrid::new(3, 3, 0).unwrap();
        let mut sim = HeatSimulation::new(grid, SolverConfig::default()).unwrap();
        sim.grid_mut().set_temp(1, 1, 100);
        sim.update();
        assert!(!sim.read_solver_state().is_empty());

        sim.reset_solver();
        assert!(sim.read_solver_state().is_empty());
        assert_eq!(sim.solver_name(), "neighbor-transfer");
    }
}
