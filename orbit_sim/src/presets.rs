//! Preset initial conditions
//!
//! Each preset places a handful of bodies with positions and velocities chosen
//! to form orbits that stay stable for the length of a scene. All presets have
//! zero total momentum so the barycenter stays put. Where a body's velocity is
//! not a documented constant it is back-computed from the others' momenta.
//!
//! The variant docs give the worst relative energy drift measured over a 40 s
//! scene (2400 frames of 1/60 s) at the default 60 substeps per frame. There is
//! no softening, so a close encounter between two bodies shows up as a burst
//! of drift rather than an error. `three_bodies_3` and `planetary_system` both
//! have such an encounter inside the scene.

use crate::body::{sphere_volume, Body};
use crate::error::SimulationError;
use common::constants::directions::{LEFT, ORIGIN, OUT, RIGHT, UP};
use common::constants::DEFAULT_G;
use common::{rotate, Vector3};
use std::fmt;
use std::str::FromStr;

/// Chenciner-Montgomery figure-eight, initial position of the first body
pub const FIGURE_EIGHT_POSITION: (f64, f64) = (-0.97000436, 0.24308753);
/// Chenciner-Montgomery figure-eight, initial velocity of the outer bodies
pub const FIGURE_EIGHT_VELOCITY: (f64, f64) = (0.4662036850, 0.4323657300);
/// Chenciner-Montgomery figure-eight, initial velocity of the middle body
pub const FIGURE_EIGHT_CENTER_VELOCITY: (f64, f64) = (-0.93240737, -0.86473146);

/// Isosceles periodic orbit with a central mass of 0.75
pub const ISOSCELES_A_VELOCITY: (f64, f64) = (0.4227625247, 0.2533646387);
/// Isosceles periodic orbit with a central mass of 0.5
pub const ISOSCELES_B_VELOCITY: (f64, f64) = (0.2374365149, 0.2536896353);

/// A named initial configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Preset {
    /// Light body circling a heavy one. Drift stays below 2e-5.
    TwoBodies,
    /// Two moons thrown out of the plane around a heavy body. Drift stays
    /// below 3e-5.
    ThreeBodies1,
    /// Five planets around a star, the outermost on an eccentric orbit.
    ///
    /// Drift is around 2e-4 until t = 26 s, when planets 1 and 2 pass within
    /// 0.007 of each other and the drift jumps to 2.4e-2. The encounter is
    /// chaotic, so more substeps move it rather than remove it.
    PlanetarySystem,
    /// Figure-eight choreography. Drift stays below 6e-5.
    ThreeBodies2,
    /// Isosceles orbit with a 0.75 central mass.
    ///
    /// Not robust at the default substep count. Around t = 36.5 s bodies 0
    /// and 2 pass within 0.023 of each other and the relative energy error
    /// reaches about 4, after which the orbit no longer follows the periodic
    /// solution. A shorter pass near t = 33.4 s already costs 3e-2. With 240
    /// substeps the worst drift is 8e-3 and with 960 it is 1.6e-4.
    ThreeBodies3,
    /// Isosceles orbit with a 0.5 central mass. Drift stays below 6e-4.
    ThreeBodies4,
}

/// Bodies produced by a preset together with the G they were tuned for
#[derive(Debug, Clone, PartialEq)]
pub struct PresetBodies {
    pub bodies: Vec<Body>,
    pub g: f64,
}

impl Preset {
    pub const ALL: [Preset; 6] = [
        Preset::TwoBodies,
        Preset::ThreeBodies1,
        Preset::PlanetarySystem,
        Preset::ThreeBodies2,
        Preset::ThreeBodies3,
        Preset::ThreeBodies4,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Preset::TwoBodies => "two_bodies",
            Preset::ThreeBodies1 => "three_bodies_1",
            Preset::PlanetarySystem => "planetary_system",
            Preset::ThreeBodies2 => "three_bodies_2",
            Preset::ThreeBodies3 => "three_bodies_3",
            Preset::ThreeBodies4 => "three_bodies_4",
        }
    }

    pub fn generate(self) -> PresetBodies {
        match self {
            Preset::TwoBodies => two_bodies(),
            Preset::ThreeBodies1 => three_bodies_1(),
            Preset::PlanetarySystem => planetary_system(),
            Preset::ThreeBodies2 => figure_eight(),
            Preset::ThreeBodies3 => isosceles(
                (0.0, 3.9, 3.9),
                ISOSCELES_A_VELOCITY,
                3.0,
                0.75,
            ),
            Preset::ThreeBodies4 => isosceles(
                (0.7, 1.2, 4.4),
                ISOSCELES_B_VELOCITY,
                2.0,
                0.5,
            ),
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = SimulationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Preset::ALL
            .into_iter()
            .find(|preset| preset.name() == s)
            .ok_or_else(|| SimulationError::UnknownPreset(s.to_string()))
    }
}

/// Set the velocity of `bodies[index]` so the total momentum is zero.
///
/// # Panics
///
/// Panics if `index` is out of bounds for `bodies`.
pub fn balance_momentum(bodies: &mut [Body], index: usize) {
    let others: Vector3 = bodies
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != index)
        .map(|(_, body)| body.momentum())
        .sum();
    let mass = bodies[index].mass();
    bodies[index].set_velocity(-others / mass);
}

/// Orbital plane basis: the x and y axes under the given rotation
fn plane(phi_x: f64, phi_y: f64, phi_z: f64) -> [Vector3; 2] {
    [rotate(RIGHT, phi_x, phi_y, phi_z), rotate(UP, phi_x, phi_y, phi_z)]
}

fn two_bodies() -> PresetBodies {
    let spawn_distance = 1.0;
    let max_init_speed = 1.0;
    let max_radius = 0.5;

    let mut bodies = vec![
        Body::new(
            Vector3::new(0.0, -spawn_distance, 1.5),
            RIGHT * max_init_speed,
            max_radius * 0.5,
        )
        .with_radius_scaled_mass(),
        Body::new(Vector3::new(0.0, spawn_distance, -1.5), Vector3::ZERO, max_radius)
            .with_radius_scaled_mass(),
    ];
    balance_momentum(&mut bodies, 1);

    PresetBodies { bodies, g: DEFAULT_G }
}

/// Two light moons launched out of the plane around a heavy body
fn three_bodies_1() -> PresetBodies {
    let spawn_distance = 4.0;
    let max_init_speed = 1.0;
    let max_radius = 0.5;
    let lift = (UP + OUT) / 2f64.sqrt();

    let mut bodies = vec![
        Body::new(
            Vector3::new(0.0, -0.2, 0.0) + RIGHT * spawn_distance,
            (RIGHT / 2.0 + lift) * max_init_speed,
            max_radius * 0.2,
        )
        .with_radius_scaled_mass(),
        Body::new(
            Vector3::new(0.0, 0.2, 0.0) + RIGHT * spawn_distance,
            (LEFT / 2.0 + lift) * max_init_speed,
            max_radius * 0.2,
        )
        .with_radius_scaled_mass(),
        Body::new(ORIGIN, Vector3::ZERO, max_radius).with_radius_scaled_mass(),
    ];
    balance_momentum(&mut bodies, 2);

    PresetBodies { bodies, g: DEFAULT_G }
}

/// Five planets on a tilted plane around a central star
fn planetary_system() -> PresetBodies {
    let g = DEFAULT_G;
    let spawn_distance = 6.0;
    let max_radius = 0.5;
    let [u, v] = plane(0.0, 0.5f64.atan(), 0.0);

    let star = Body::new(ORIGIN, Vector3::ZERO, max_radius).with_radius_scaled_mass();
    let circular_speed = |distance: f64| (g * star.mass() / distance).sqrt();

    // (position, velocity direction, distance used for the launch speed).
    // The outermost planet launches at the speed of a closer orbit, which
    // makes its orbit elliptical.
    let layout = [
        (u * spawn_distance / 6.0, v, spawn_distance / 6.0),
        (-u * spawn_distance / 4.0, -v, spawn_distance / 4.0),
        (v * spawn_distance / 3.0, -u, spawn_distance / 3.0),
        (-v * spawn_distance / 2.0, u, spawn_distance / 2.0),
        (u * 2.0 * spawn_distance / 3.0, v, 2.0 * spawn_distance / 6.0),
    ];

    let mut bodies: Vec<Body> = layout
        .into_iter()
        .map(|(position, direction, launch_distance)| {
            Body::new(
                position,
                direction * circular_speed(launch_distance),
                max_radius / 10.0,
            )
            .with_radius_scaled_mass()
        })
        .collect();
    bodies.push(star);
    let last = bodies.len() - 1;
    balance_momentum(&mut bodies, last);

    PresetBodies { bodies, g }
}

/// Equal-mass figure-eight choreography
fn figure_eight() -> PresetBodies {
    let scale = 4.0;
    let radius = 1.0 / 3.0;
    let [u, v] = plane(0.0, 0.6, 0.6);
    let in_plane = |(a, b): (f64, f64)| u * scale * a + v * scale * b;

    let (px, py) = FIGURE_EIGHT_POSITION;
    let bodies = vec![
        Body::new(in_plane((px, py)), in_plane(FIGURE_EIGHT_VELOCITY), radius),
        Body::new(ORIGIN, in_plane(FIGURE_EIGHT_CENTER_VELOCITY), radius),
        Body::new(in_plane((-px, -py)), in_plane(FIGURE_EIGHT_VELOCITY), radius),
    ]
    .into_iter()
    .map(|body| body.with_mass(4.0))
    .collect();

    PresetBodies { bodies, g: 16.0 }
}

/// Two equal masses either side of a lighter central body.
///
/// `mass_ratio` is the central mass relative to the outer ones in the
/// published solution.
fn isosceles(
    (phi_x, phi_y, phi_z): (f64, f64, f64),
    (a, b): (f64, f64),
    center_mass: f64,
    mass_ratio: f64,
) -> PresetBodies {
    let radius = 0.1;
    let [u, v] = plane(phi_x, phi_y, phi_z);
    let outer_velocity = u * 4.0 * a + v * 4.0 * b;

    let bodies = vec![
        Body::new(-u * 4.0, outer_velocity, radius).with_mass(4.0),
        Body::new(u * 4.0, outer_velocity, radius).with_mass(4.0),
        Body::new(
            ORIGIN,
            u * -8.0 * a / mass_ratio + v * -8.0 * b / mass_ratio,
            radius,
        )
        .with_mass(center_mass),
    ];

    PresetBodies { bodies, g: 16.0 }
}
