//! Path preview
//!
//! Runs a preset in path-predictor mode for the whole scene runtime without
//! real-time pacing, then reports where every trail ended up and how far the
//! total energy drifted. Useful for checking a preset before rendering it.
//!
//! Set `RUST_LOG=info` (or `debug` for per-frame output) to see progress.

use anyhow::{Context, Result};
use common::constants::FRAMES_PER_SECOND;
use log::info;
use orbit_sim::{Preset, Simulation, SimulationConfig};

const PRESET: Preset = Preset::ThreeBodies4;
const RUNTIME_SECONDS: f64 = 40.0;
const STEPS_PER_FRAME: u32 = 60;

fn main() -> Result<()> {
    env_logger::init();

    let config = SimulationConfig::new()
        .with_steps_per_frame(STEPS_PER_FRAME)
        .with_path_predictor_mode(true);
    let mut simulation = Simulation::from_preset(PRESET, config)
        .with_context(|| format!("failed to create preset {PRESET}"))?;

    let frames = (FRAMES_PER_SECOND * RUNTIME_SECONDS) as u64;
    let total_substeps = frames * STEPS_PER_FRAME as u64;
    let dt = 1.0 / FRAMES_PER_SECOND;
    let initial_energy = simulation.total_energy();

    for frame in 0..frames {
        simulation
            .advance(dt)
            .with_context(|| format!("simulation failed at frame {frame}"))?;
        if frame % FRAMES_PER_SECOND as u64 == 0 {
            info!(
                "frame: {} / {}",
                frame * STEPS_PER_FRAME as u64,
                total_substeps
            );
        }
    }

    let final_energy = simulation.total_energy();
    info!(
        "Energy {:.6} -> {:.6} (relative drift {:.3e})",
        initial_energy,
        final_energy,
        ((final_energy - initial_energy) / initial_energy).abs()
    );
    for id in simulation.body_ids() {
        let trail = simulation.trail(id)?;
        let end = trail.latest().map(|s| s.position).unwrap_or_default();
        println!(
            "body {}: {} samples, final position ({:.4}, {:.4}, {:.4})",
            id.index(),
            trail.len(),
            end.x,
            end.y,
            end.z
        );
    }

    Ok(())
}
