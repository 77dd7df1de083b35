//! Simulation configuration, fixed when a simulation is created

use crate::error::{Result, SimulationError};

/// Substep count, trail fade and preview mode for one run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationConfig {
    /// Integration substeps per `advance` call
    pub steps_per_frame: u32,
    /// Seconds of simulated time over which a trail sample fades (see [`crate::trail`])
    pub trail_decay_duration: f64,
    /// Keep every trail sample instead of fading them out
    pub path_predictor_mode: bool,
}

impl SimulationConfig {
    pub fn new() -> Self {
        Self {
            steps_per_frame: 60,
            trail_decay_duration: 15.0,
            path_predictor_mode: false,
        }
    }

    pub fn with_steps_per_frame(mut self, steps: u32) -> Self {
        self.steps_per_frame = steps;
        self
    }

    pub fn with_trail_decay_duration(mut self, seconds: f64) -> Self {
        self.trail_decay_duration = seconds;
        self
    }

    pub fn with_path_predictor_mode(mut self, enabled: bool) -> Self {
        self.path_predictor_mode = enabled;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.steps_per_frame == 0 {
            return Err(SimulationError::InvalidConfig(
                "steps_per_frame must be at least 1".to_string(),
            ));
        }
        if !(self.trail_decay_duration.is_finite() && self.trail_decay_duration > 0.0) {
            return Err(SimulationError::InvalidConfig(format!(
                "trail_decay_duration must be positive and finite, got {}",
                self.trail_decay_duration
            )));
        }
        Ok(())
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self::new()
    }
}
