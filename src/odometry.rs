//! Wheel odometry for differential drive robots.
//!
//! Dead-reckons a 2D pose from wheel angular velocities using the
//! half-track kinematic model:
//!
//! ```text
//! vr = wr · R          vl = wl · R
//! v  = (vr + vl) / 2   ω  = (vr − vl) / (2 · L_half)
//! ```
//!
//! The pose update is explicit first-order Euler: x/y advance along the
//! heading held from before the angular update of the same step. This is
//! intentionally not arc integration; estimates produced here must stay
//! reproducible across runs that compare against exact reference motion.

use crate::core::math::normalize_angle;
use crate::core::Pose2D;
use crate::error::{Error, Result};

/// Fixed kinematic parameters of the drive base.
///
/// Captured once at run start (from the scene, a config file, or a
/// calibration table) and read-only afterwards.
#[derive(Debug, Clone, Copy)]
pub struct KinematicParams {
    /// Wheel radius in meters.
    pub wheel_radius: f64,
    /// Half of the lateral wheel separation in meters.
    pub half_track: f64,
}

impl KinematicParams {
    /// Create validated parameters.
    ///
    /// Both values must be strictly positive; anything else is a fatal
    /// configuration error caught before any integration happens.
    pub fn new(wheel_radius: f64, half_track: f64) -> Result<Self> {
        if !(wheel_radius > 0.0) {
            return Err(Error::InvalidParameter(format!(
                "wheel_radius must be positive, got {}",
                wheel_radius
            )));
        }
        if !(half_track > 0.0) {
            return Err(Error::InvalidParameter(format!(
                "half_track must be positive, got {}",
                half_track
            )));
        }
        Ok(Self {
            wheel_radius,
            half_track,
        })
    }
}

/// Wheel odometry integrator.
///
/// Owns the running pose estimate, starting at the origin of its own
/// local frame. Ground truth must be projected into the same frame
/// before the two are comparable (see [`crate::ground_truth`]).
#[derive(Debug, Clone)]
pub struct WheelOdometry {
    params: KinematicParams,
    pose: Pose2D,
}

impl WheelOdometry {
    /// Create a new integrator at the origin.
    pub fn new(params: KinematicParams) -> Self {
        log::debug!(
            "WheelOdometry: R={:.4}m, L_half={:.4}m",
            params.wheel_radius,
            params.half_track
        );
        Self {
            params,
            pose: Pose2D::identity(),
        }
    }

    /// Integrate one step of wheel motion and return the updated pose.
    ///
    /// # Arguments
    /// * `left` - Left wheel angular velocity (rad/s)
    /// * `right` - Right wheel angular velocity (rad/s)
    /// * `dt` - Time step in seconds, must be > 0 (the sample loop
    ///   filters non-advancing ticks before calling)
    pub fn integrate(&mut self, left: f64, right: f64, dt: f64) -> Pose2D {
        debug_assert!(dt > 0.0, "non-advancing tick reached the integrator");

        let vr = right * self.params.wheel_radius;
        let vl = left * self.params.wheel_radius;
        let v = 0.5 * (vr + vl);
        let omega = (vr - vl) / (2.0 * self.params.half_track);

        // x/y use the pre-update heading; theta updates afterwards.
        self.pose.x += v * self.pose.theta.cos() * dt;
        self.pose.y += v * self.pose.theta.sin() * dt;
        self.pose.theta = normalize_angle(self.pose.theta + omega * dt);

        log::trace!(
            "integrate: wl={:.3} wr={:.3} dt={:.4} -> ({:.4}, {:.4}, {:.4})",
            left,
            right,
            dt,
            self.pose.x,
            self.pose.y,
            self.pose.theta
        );

        self.pose
    }

    /// Current pose estimate.
    #[inline]
    pub fn pose(&self) -> Pose2D {
        self.pose
    }

    /// Kinematic parameters in use.
    #[inline]
    pub fn params(&self) -> KinematicParams {
        self.params
    }

    /// Reset the estimate back to the origin.
    pub fn reset(&mut self) {
        self.pose = Pose2D::identity();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn test_params() -> KinematicParams {
        KinematicParams::new(0.1, 0.2).unwrap()
    }

    #[test]
    fn test_params_reject_nonpositive() {
        assert!(KinematicParams::new(0.0, 0.2).is_err());
        assert!(KinematicParams::new(-0.1, 0.2).is_err());
        assert!(KinematicParams::new(0.1, 0.0).is_err());
        assert!(KinematicParams::new(0.1, -0.2).is_err());
        assert!(KinematicParams::new(0.1, f64::NAN).is_err());
    }

    #[test]
    fn test_zero_input_leaves_pose_unchanged() {
        let mut odom = WheelOdometry::new(test_params());

        for _ in 0..10 {
            let pose = odom.integrate(0.0, 0.0, 0.05);
            assert_eq!(pose.x, 0.0);
            assert_eq!(pose.y, 0.0);
            assert_eq!(pose.theta, 0.0);
        }
    }

    #[test]
    fn test_straight_line() {
        let mut odom = WheelOdometry::new(test_params());

        // Equal wheel speeds: pure translation along the initial heading.
        // v = w * R = 1.0 * 0.1 = 0.1 m/s
        let mut pose = Pose2D::identity();
        for _ in 0..100 {
            pose = odom.integrate(1.0, 1.0, 0.1);
        }

        assert_relative_eq!(pose.x, 1.0, epsilon = 1e-9);
        assert_relative_eq!(pose.y, 0.0, epsilon = 1e-12);
        assert_relative_eq!(pose.theta, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_straight_line_backward() {
        let mut odom = WheelOdometry::new(test_params());

        let mut pose = Pose2D::identity();
        for _ in 0..10 {
            pose = odom.integrate(-1.0, -1.0, 0.1);
        }

        assert_relative_eq!(pose.x, -0.1, epsilon = 1e-9);
        assert_relative_eq!(pose.y, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_pure_rotation() {
        let mut odom = WheelOdometry::new(test_params());

        // Opposite wheel speeds: rotation in place.
        // omega = w * R / L_half = 2.0 * 0.1 / 0.2 = 1.0 rad/s
        let mut prev_theta = 0.0;
        for _ in 0..10 {
            let pose = odom.integrate(-2.0, 2.0, 0.05);
            assert_relative_eq!(pose.x, 0.0, epsilon = 1e-12);
            assert_relative_eq!(pose.y, 0.0, epsilon = 1e-12);
            assert_relative_eq!(pose.theta - prev_theta, 0.05, epsilon = 1e-12);
            prev_theta = pose.theta;
        }

        assert_relative_eq!(prev_theta, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_rotation_direction() {
        let mut odom = WheelOdometry::new(test_params());

        // Right wheel faster -> CCW (positive theta).
        let pose = odom.integrate(1.0, 2.0, 0.1);
        assert!(pose.theta > 0.0);

        let mut odom = WheelOdometry::new(test_params());
        let pose = odom.integrate(2.0, 1.0, 0.1);
        assert!(pose.theta < 0.0);
    }

    #[test]
    fn test_heading_held_over_step() {
        // First-order Euler: the translation of a step uses the heading
        // from before that step's rotation.
        let mut odom = WheelOdometry::new(test_params());

        let pose = odom.integrate(1.0, 3.0, 0.1);

        // v = 0.2 m/s, heading was 0 when x/y advanced.
        assert_relative_eq!(pose.x, 0.02, epsilon = 1e-12);
        assert_relative_eq!(pose.y, 0.0, epsilon = 1e-12);
        assert!(pose.theta > 0.0);
    }

    #[test]
    fn test_reset() {
        let mut odom = WheelOdometry::new(test_params());

        odom.integrate(1.0, 1.0, 0.1);
        assert!(odom.pose().x > 0.0);

        odom.reset();
        assert_eq!(odom.pose(), Pose2D::identity());
    }
}
