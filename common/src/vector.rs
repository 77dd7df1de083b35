//! 3D vector math
//!
//! Arithmetic (`+`, `-`, scaling, `length`, `normalize`) comes straight from
//! [`glam::DVec3`]. This module adds the pieces glam does not name directly.

use glam::DMat3;

/// Double precision 3D vector used throughout the simulation
pub type Vector3 = glam::DVec3;

/// Rotate `v` about the x, then y, then z axis.
///
/// Equivalent to `R_z(phi_z) * R_y(phi_y) * R_x(phi_x) * v` with right-handed
/// elemental rotation matrices.
pub fn rotate(v: Vector3, phi_x: f64, phi_y: f64, phi_z: f64) -> Vector3 {
    rotation_matrix(phi_x, phi_y, phi_z) * v
}

/// The composed matrix applied by [`rotate`]
pub fn rotation_matrix(phi_x: f64, phi_y: f64, phi_z: f64) -> DMat3 {
    DMat3::from_rotation_z(phi_z) * DMat3::from_rotation_y(phi_y) * DMat3::from_rotation_x(phi_x)
}

/// Squared Euclidean distance between two points
pub fn squared_distance(a: Vector3, b: Vector3) -> f64 {
    (b - a).length_squared()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn quarter_turns_follow_right_hand_rule() {
        let tol = 1e-12;
        assert!(rotate(Vector3::Y, FRAC_PI_2, 0.0, 0.0).abs_diff_eq(Vector3::Z, tol));
        assert!(rotate(Vector3::Z, 0.0, FRAC_PI_2, 0.0).abs_diff_eq(Vector3::X, tol));
        assert!(rotate(Vector3::X, 0.0, 0.0, FRAC_PI_2).abs_diff_eq(Vector3::Y, tol));
    }

    #[test]
    fn x_rotation_is_applied_before_z() {
        // x-turn leaves X alone, then the z-turn carries it to Y.
        let v = rotate(Vector3::X, FRAC_PI_2, 0.0, FRAC_PI_2);
        assert!(v.abs_diff_eq(Vector3::Y, 1e-12));

        // Y goes to Z under the x-turn, and Z is fixed by the z-turn.
        let v = rotate(Vector3::Y, FRAC_PI_2, 0.0, FRAC_PI_2);
        assert!(v.abs_diff_eq(Vector3::Z, 1e-12));
    }

    #[test]
    fn rotation_preserves_length_and_orthogonality() {
        let a = rotate(Vector3::X, 0.7, 1.2, 4.4);
        let b = rotate(Vector3::Y, 0.7, 1.2, 4.4);
        assert_relative_eq!(a.length(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(b.length(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(a.dot(b), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn squared_distance_is_symmetric() {
        let a = Vector3::new(1.0, 2.0, 3.0);
        let b = Vector3::new(-2.0, 6.0, 3.0);
        assert_relative_eq!(squared_distance(a, b), 25.0);
        assert_relative_eq!(squared_distance(b, a), 25.0);
    }
}
