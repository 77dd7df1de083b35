//! The simulation aggregate driven once per rendered frame

use crate::body::{Body, BodyId};
use crate::config::SimulationConfig;
use crate::error::{Result, SimulationError};
use crate::physics;
use crate::presets::{Preset, PresetBodies};
use crate::trail::{TrailRecorder, TrailView};
use common::Vector3;
use log::{debug, info, warn};

/// Bodies, gravitational constant, elapsed time and trails for one run
#[derive(Debug, Clone)]
pub struct Simulation {
    bodies: Vec<Body>,
    initial_bodies: Vec<Body>,
    g: f64,
    time: f64,
    config: SimulationConfig,
    trails: TrailRecorder,
}

impl Simulation {
    pub fn from_preset(preset: Preset, config: SimulationConfig) -> Result<Self> {
        let PresetBodies { bodies, g } = preset.generate();
        info!("Loading preset {} ({} bodies, G = {})", preset, bodies.len(), g);
        Self::from_bodies(bodies, g, config)
    }

    pub fn from_preset_name(name: &str, config: SimulationConfig) -> Result<Self> {
        Self::from_preset(name.parse()?, config)
    }

    /// Build a simulation from an explicit body list.
    ///
    /// Body order becomes the identity used by [`BodyId`].
    pub fn from_bodies(bodies: Vec<Body>, g: f64, config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        if !(g.is_finite() && g > 0.0) {
            return Err(SimulationError::InvalidConfig(format!(
                "gravitational constant must be positive and finite, got {g}"
            )));
        }
        for (index, body) in bodies.iter().enumerate() {
            validate_body(index, body)?;
        }

        let mut simulation = Self {
            trails: TrailRecorder::new(bodies.len(), config.path_predictor_mode),
            initial_bodies: bodies.clone(),
            bodies,
            g,
            time: 0.0,
            config,
        };
        simulation.seed_trails();
        Ok(simulation)
    }

    /// Advance by `dt` seconds using `steps_per_frame` equal substeps.
    ///
    /// On a degenerate configuration the bodies and time are restored to
    /// their values before the call and the trails are left untouched.
    pub fn advance(&mut self, dt: f64) -> Result<()> {
        if !(dt.is_finite() && dt >= 0.0) {
            return Err(SimulationError::InvalidTimeStep(dt));
        }

        let substeps = self.config.steps_per_frame;
        let step = dt / substeps as f64;
        let snapshot = self.bodies.clone();

        for k in 0..substeps {
            if let Err(pair) = physics::substep(&mut self.bodies, self.g, step) {
                let time = self.time + step * k as f64;
                self.bodies = snapshot;
                warn!(
                    "Degenerate configuration between bodies {} and {} at t = {:.6}, rolled back to t = {:.6}",
                    pair.first, pair.second, time, self.time
                );
                return Err(SimulationError::DegenerateConfiguration {
                    first: pair.first,
                    second: pair.second,
                    time,
                });
            }
        }

        self.time += dt;
        let pruned = self.trails.decay(dt, self.config.trail_decay_duration);
        self.trails.record_frame(self.bodies.iter().map(Body::position));
        debug!(
            "t = {:.4}: {} substeps, {} trail samples pruned",
            self.time, substeps, pruned
        );

        Ok(())
    }

    /// Restore the initial bodies, zero the clock and restart the trails.
    pub fn reset(&mut self) {
        self.bodies = self.initial_bodies.clone();
        self.time = 0.0;
        self.trails.clear();
        self.seed_trails();
    }

    fn seed_trails(&mut self) {
        self.trails.record_frame(self.bodies.iter().map(Body::position));
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn body_ids(&self) -> impl Iterator<Item = BodyId> {
        (0..self.bodies.len()).map(BodyId)
    }

    pub fn g(&self) -> f64 {
        self.g
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Snapshot of every body's position in preset order
    pub fn positions(&self) -> Vec<Vector3> {
        self.bodies.iter().map(Body::position).collect()
    }

    pub fn trail(&self, body: BodyId) -> Result<TrailView<'_>> {
        self.trails
            .trail(body)
            .ok_or(SimulationError::UnknownBody(body.index()))
    }

    pub fn trails(&self) -> &TrailRecorder {
        &self.trails
    }

    pub fn total_momentum(&self) -> Vector3 {
        physics::total_momentum(&self.bodies)
    }

    pub fn center_of_mass(&self) -> Vector3 {
        physics::center_of_mass(&self.bodies)
    }

    pub fn total_energy(&self) -> f64 {
        physics::kinetic_energy(&self.bodies) + physics::potential_energy(&self.bodies, self.g)
    }
}

fn validate_body(index: usize, body: &Body) -> Result<()> {
    let reason = if !(body.mass().is_finite() && body.mass() > 0.0) {
        format!("mass must be positive and finite, got {}", body.mass())
    } else if !body.position().is_finite() {
        format!("position is not finite: {}", body.position())
    } else if !body.velocity().is_finite() {
        format!("velocity is not finite: {}", body.velocity())
    } else {
        return Ok(());
    };
    Err(SimulationError::InvalidBody { index, reason })
}
