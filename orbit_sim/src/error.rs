//! Error types for the simulation core.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimulationError {
    #[error("unknown preset: {0}")]
    UnknownPreset(String),

    #[error("bodies {first} and {second} reached a degenerate configuration at t = {time}")]
    DegenerateConfiguration {
        first: usize,
        second: usize,
        time: f64,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid body {index}: {reason}")]
    InvalidBody { index: usize, reason: String },

    #[error("invalid time step: {0}")]
    InvalidTimeStep(f64),

    #[error("no body with index {0}")]
    UnknownBody(usize),
}

pub type Result<T> = std::result::Result<T, SimulationError>;
