//! Host-side simulation loop

mod heat_simulation;

pub use heat_simulation::HeatSimulation;
