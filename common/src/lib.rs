//! Common utilities for the orbit simulation
//!
//! This crate provides the vector type, rotation helpers and the handful of
//! constants shared by the physics core and its drivers.

pub mod vector;

pub use vector::*;

/// Constants used when building and driving simulations
pub mod constants {
    /// Default gravitational constant (scaled for visualization)
    pub const DEFAULT_G: f64 = 5.0;

    /// Frame rate the scenes are authored against
    pub const FRAMES_PER_SECOND: f64 = 60.0;

    /// Unit vectors in scene convention (x right, y up, z out of the screen)
    pub mod directions {
        use crate::Vector3;

        pub const RIGHT: Vector3 = Vector3::X;
        pub const LEFT: Vector3 = Vector3::NEG_X;
        pub const UP: Vector3 = Vector3::Y;
        pub const OUT: Vector3 = Vector3::Z;
        pub const ORIGIN: Vector3 = Vector3::ZERO;
    }
}
