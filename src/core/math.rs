//! Angle utilities.
//!
//! All angles are in radians, counter-clockwise positive. Headings are
//! kept in the canonical range [-π, π).

/// Normalize an angle to [-π, π).
///
/// Implemented as atan2(sin a, cos a) so values far outside the range and
/// values right at the wrap boundary come out consistent, with no
/// branch-sensitive subtraction loop.
///
/// # Example
/// ```
/// use gati_odom::core::math::normalize_angle;
/// use std::f64::consts::PI;
///
/// assert!((normalize_angle(2.5 * PI) - 0.5 * PI).abs() < 1e-12);
/// assert!((normalize_angle(-0.5 * PI) + 0.5 * PI).abs() < 1e-12);
/// ```
#[inline]
pub fn normalize_angle(angle: f64) -> f64 {
    angle.sin().atan2(angle.cos())
}

/// Signed angular difference from `from` to `to`, in [-π, π).
///
/// Positive result means counter-clockwise rotation from `from` to `to`.
#[inline]
pub fn angle_diff(from: f64, to: f64) -> f64 {
    normalize_angle(to - from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_normalize_in_range() {
        // Values near ±π may normalize to either sign of π; allow both.
        for k in -20..=20 {
            let a = 0.37 * k as f64;
            let n = normalize_angle(a);
            assert!(n >= -PI - 1e-12 && n <= PI + 1e-12, "out of range: {}", n);
        }
    }

    #[test]
    fn test_normalize_preserves_direction() {
        for k in -20..=20 {
            let a = 0.91 * k as f64;
            let n = normalize_angle(a);
            assert_relative_eq!(n.sin(), a.sin(), epsilon = 1e-12);
            assert_relative_eq!(n.cos(), a.cos(), epsilon = 1e-12);
        }
    }

    #[test]
    fn test_normalize_identity_on_canonical_values() {
        assert_eq!(normalize_angle(0.0), 0.0);
        assert_relative_eq!(normalize_angle(PI / 2.0), PI / 2.0, epsilon = 1e-12);
        assert_relative_eq!(normalize_angle(-PI / 2.0), -PI / 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_normalize_multiple_turns() {
        assert_relative_eq!(normalize_angle(3.0 * PI + 0.1), -PI + 0.1, epsilon = 1e-9);
        assert_relative_eq!(normalize_angle(-3.0 * PI - 0.1), PI - 0.1, epsilon = 1e-9);
        assert_relative_eq!(normalize_angle(2.0 * PI), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_angle_diff() {
        assert_relative_eq!(angle_diff(0.0, PI / 2.0), PI / 2.0, epsilon = 1e-12);
        assert_relative_eq!(angle_diff(PI / 2.0, 0.0), -PI / 2.0, epsilon = 1e-12);

        // Crossing the -π/π boundary takes the short way around.
        assert_relative_eq!(angle_diff(-0.9 * PI, 0.9 * PI), -0.2 * PI, epsilon = 1e-9);
        assert_relative_eq!(angle_diff(0.9 * PI, -0.9 * PI), 0.2 * PI, epsilon = 1e-9);
    }
}
