//! Pairwise Newtonian gravity and semi-implicit Euler integration

use crate::body::Body;
use common::{squared_distance, Vector3};

/// Bodies whose interaction produced a singular or non-finite result.
///
/// `first == second` when a single body's state overflowed during integration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DegeneratePair {
    pub first: usize,
    pub second: usize,
}

/// Reset every force, then add the gravitational pull of each pair.
///
/// Each unordered pair is visited once and the result applied to both bodies
/// with opposite signs. There is no softening: coincident bodies are reported
/// as a [`DegeneratePair`] and the forces are left partially accumulated.
pub fn accumulate_forces(bodies: &mut [Body], g: f64) -> Result<(), DegeneratePair> {
    let n = bodies.len();

    for body in bodies.iter_mut() {
        body.set_force(Vector3::ZERO);
    }

    for i in 0..n {
        for j in (i + 1)..n {
            let r_squared = squared_distance(bodies[i].position(), bodies[j].position());
            if r_squared == 0.0 {
                return Err(DegeneratePair { first: i, second: j });
            }

            let magnitude = g * bodies[i].mass() * bodies[j].mass() / r_squared;
            let direction = (bodies[j].position() - bodies[i].position()) / r_squared.sqrt();
            let force = direction * magnitude;
            if !force.is_finite() {
                return Err(DegeneratePair { first: i, second: j });
            }

            bodies[i].add_force(force);
            bodies[j].add_force(-force);
        }
    }

    Ok(())
}

/// Kick then drift every body by `step` using its current force.
pub fn integrate(bodies: &mut [Body], step: f64) -> Result<(), DegeneratePair> {
    for (i, body) in bodies.iter_mut().enumerate() {
        let velocity = body.velocity() + body.force() / body.mass() * step;
        let position = body.position() + velocity * step;
        if !(velocity.is_finite() && position.is_finite()) {
            return Err(DegeneratePair { first: i, second: i });
        }
        body.set_velocity(velocity);
        body.set_position(position);
    }
    Ok(())
}

/// One full substep: fresh forces followed by integration.
pub fn substep(bodies: &mut [Body], g: f64, step: f64) -> Result<(), DegeneratePair> {
    accumulate_forces(bodies, g)?;
    integrate(bodies, step)
}

/// Total gravitational potential energy of all pairs
pub fn potential_energy(bodies: &[Body], g: f64) -> f64 {
    let mut potential = 0.0;
    for (i, body_i) in bodies.iter().enumerate() {
        for body_j in bodies.iter().skip(i + 1) {
            let r = (body_j.position() - body_i.position()).length();
            potential -= g * body_i.mass() * body_j.mass() / r;
        }
    }
    potential
}

pub fn kinetic_energy(bodies: &[Body]) -> f64 {
    bodies.iter().map(Body::kinetic_energy).sum()
}

pub fn total_momentum(bodies: &[Body]) -> Vector3 {
    bodies.iter().map(Body::momentum).sum()
}

pub fn center_of_mass(bodies: &[Body]) -> Vector3 {
    let mut total_mass = 0.0;
    let mut com = Vector3::ZERO;

    for body in bodies {
        com += body.position() * body.mass();
        total_mass += body.mass();
    }

    if total_mass > 0.0 {
        com / total_mass
    } else {
        Vector3::ZERO
    }
}
