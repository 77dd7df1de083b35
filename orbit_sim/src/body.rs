//! Point-mass bodies

use common::Vector3;
use std::f64::consts::PI;

/// Stable handle for a body: its index in preset order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(pub usize);

impl BodyId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A spherical point mass with position, velocity and the force acting on it
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    position: Vector3,
    velocity: Vector3,
    mass: f64,
    radius: f64,
    force: Vector3,
}

impl Body {
    /// Create a body whose mass is the volume of a unit-density sphere.
    pub fn new(position: Vector3, velocity: Vector3, radius: f64) -> Self {
        debug_assert!(radius > 0.0, "body radius must be positive");
        Self {
            position,
            velocity,
            mass: sphere_volume(radius),
            radius,
            force: Vector3::ZERO,
        }
    }

    pub fn with_mass(mut self, mass: f64) -> Self {
        self.set_mass(mass);
        self
    }

    /// Divide the mass by the radius so small bodies stay light.
    pub fn with_radius_scaled_mass(self) -> Self {
        let mass = self.mass / self.radius;
        self.with_mass(mass)
    }

    pub fn position(&self) -> Vector3 {
        self.position
    }

    pub fn velocity(&self) -> Vector3 {
        self.velocity
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn force(&self) -> Vector3 {
        self.force
    }

    pub fn set_mass(&mut self, mass: f64) {
        debug_assert!(mass > 0.0, "body mass must be positive");
        self.mass = mass;
    }

    pub fn set_position(&mut self, position: Vector3) {
        self.position = position;
    }

    pub fn set_velocity(&mut self, velocity: Vector3) {
        self.velocity = velocity;
    }

    /// Replace the force. Use [`Body::add_force`] to accumulate.
    pub fn set_force(&mut self, force: Vector3) {
        self.force = force;
    }

    pub fn add_force(&mut self, force: Vector3) {
        self.force += force;
    }

    pub fn momentum(&self) -> Vector3 {
        self.velocity * self.mass
    }

    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.velocity.length_squared()
    }
}

/// Volume of a sphere, used as the base mass of a body
pub fn sphere_volume(radius: f64) -> f64 {
    4.0 * PI * radius * radius * radius / 3.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn mass_derives_from_radius() {
        let body = Body::new(Vector3::ZERO, Vector3::ZERO, 0.5);
        assert_relative_eq!(body.mass(), PI / 6.0, epsilon = 1e-15);

        let scaled = body.with_radius_scaled_mass();
        assert_relative_eq!(scaled.mass(), PI / 3.0, epsilon = 1e-15);
        assert_eq!(scaled.radius(), 0.5);
    }

    #[test]
    fn set_force_replaces_and_add_force_accumulates() {
        let mut body = Body::new(Vector3::ZERO, Vector3::ZERO, 1.0);
        body.add_force(Vector3::X);
        body.add_force(Vector3::X);
        assert_eq!(body.force(), Vector3::new(2.0, 0.0, 0.0));

        body.set_force(Vector3::Y);
        assert_eq!(body.force(), Vector3::Y);
    }

    #[test]
    fn momentum_and_kinetic_energy() {
        let body = Body::new(Vector3::ZERO, Vector3::new(3.0, 4.0, 0.0), 1.0).with_mass(2.0);
        assert_eq!(body.momentum(), Vector3::new(6.0, 8.0, 0.0));
        assert_relative_eq!(body.kinetic_energy(), 25.0);
    }
}
