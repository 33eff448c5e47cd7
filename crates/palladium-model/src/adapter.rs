//! Coordinate adapter between scene-graph and interchange conventions.
//!
//! The scene graph uses the editor's axis convention; the interchange format
//! uses the game's, which has the X and Y axes pointing the other way. Every
//! function here is pure and total.

/// A 3D vector `[X, Y, Z]`.
pub type Vec3 = [f64; 3];

/// A 2D vector `[U, V]`.
pub type Vec2 = [f64; 2];

/// The zero vector, also the origin of the virtual scene root.
pub const ZERO: Vec3 = [0.0, 0.0, 0.0];

// `0.0 - v` rather than `-v` so zero never turns into -0.0 in output.
#[inline]
fn negate(v: f64) -> f64 {
    0.0 - v
}

/// Converts a position between scene-graph and interchange axes.
///
/// Negates X and Y. The mapping is its own inverse, so the same function
/// converts in both directions.
pub fn flip_position(v: Vec3) -> Vec3 {
    [negate(v[0]), negate(v[1]), v[2]]
}

/// Converts Euler angles between scene-graph and interchange sign conventions.
///
/// Negates the X and Y rotations and keeps Z.
pub fn flip_rotation(r: Vec3) -> Vec3 {
    [negate(r[0]), negate(r[1]), r[2]]
}

/// Exact zero test used to decide field omission. `-0.0` counts as zero.
pub fn is_zero(v: Vec3) -> bool {
    v.iter().all(|c| *c == 0.0)
}

/// Component-wise `a + b`.
pub fn add(a: Vec3, b: Vec3) -> Vec3 {
    [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
}

/// Component-wise `a - b`.
pub fn sub(a: Vec3, b: Vec3) -> Vec3 {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

/// Returns true when every component of `a` and `b` differs by at most `tolerance`.
pub fn approx_eq(a: Vec3, b: Vec3, tolerance: f64) -> bool {
    a.iter().zip(b.iter()).all(|(x, y)| (x - y).abs() <= tolerance)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flip_position_negates_x_and_y() {
        assert_eq!(flip_position([1.0, 2.0, 3.0]), [-1.0, -2.0, 3.0]);
    }

    #[test]
    fn test_flip_position_is_involution() {
        for v in [[2.0, 3.0, -1.0], [-0.5, 0.0, 12.25], [1e9, -1e-9, 0.0]] {
            assert_eq!(flip_position(flip_position(v)), v);
        }
    }

    #[test]
    fn test_flip_rotation_keeps_z() {
        assert_eq!(flip_rotation([10.0, -20.0, 30.0]), [-10.0, 20.0, 30.0]);
        assert_eq!(
            flip_rotation(flip_rotation([10.0, -20.0, 30.0])),
            [10.0, -20.0, 30.0]
        );
    }

    #[test]
    fn test_flip_never_emits_negative_zero() {
        let flipped = flip_position(ZERO);
        assert!(flipped.iter().all(|c| c.is_sign_positive()));
    }

    #[test]
    fn test_is_zero_is_exact() {
        assert!(is_zero(ZERO));
        assert!(is_zero([-0.0, 0.0, -0.0]));
        assert!(!is_zero([0.0, 1e-12, 0.0]));
    }

    #[test]
    fn test_add_sub_inverse() {
        let a = [2.0, 3.0, -1.0];
        let b = [0.5, -4.0, 8.0];
        assert_eq!(sub(add(a, b), b), a);
    }

    #[test]
    fn test_approx_eq() {
        assert!(approx_eq([1.0, 2.0, 3.0], [1.0 + 1e-9, 2.0, 3.0], 1e-6));
        assert!(!approx_eq([1.0, 2.0, 3.0], [1.1, 2.0, 3.0], 1e-6));
    }
}
