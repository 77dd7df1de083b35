//! N-body gravitational core for animated orbit scenes
//!
//! A host application creates a [`Simulation`] from a named preset, calls
//! [`advance`] once per rendered frame and reads body positions and fading
//! trails between calls. Nothing here knows about rendering:
//!
//! - **Presets**: hand-tuned initial conditions, including periodic three-body orbits
//! - **Physics**: O(n²) pairwise gravity with semi-implicit Euler substeps
//! - **Trails**: per-body position history whose weight fades over simulated time

pub mod body;
pub mod config;
pub mod error;
pub mod physics;
pub mod presets;
pub mod simulation;
pub mod trail;

pub use body::{Body, BodyId};
pub use common::Vector3;
pub use config::SimulationConfig;
pub use error::{Result, SimulationError};
pub use presets::{Preset, PresetBodies};
pub use simulation::Simulation;
pub use trail::{TrailSample, TrailView};

/// Create a simulation from a preset name with the default configuration.
pub fn create_simulation(preset_name: &str) -> Result<Simulation> {
    Simulation::from_preset_name(preset_name, SimulationConfig::default())
}

/// Advance the simulation by one frame of `dt` seconds.
pub fn advance(simulation: &mut Simulation, dt: f64) -> Result<()> {
    simulation.advance(dt)
}

/// Current position of every body, in preset order.
pub fn get_positions(simulation: &Simulation) -> Vec<Vector3> {
    simulation.positions()
}

/// Trail samples of one body, oldest first.
pub fn get_trail(simulation: &Simulation, body_index: usize) -> Result<Vec<TrailSample>> {
    simulation.trail(BodyId(body_index)).map(|trail| trail.to_vec())
}
