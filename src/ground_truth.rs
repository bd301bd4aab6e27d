//! Ground-truth frame projection.
//!
//! The odometry estimate always starts at the origin of its own frame,
//! while the reference source reports poses in a fixed world frame. To
//! compare the two, the first absolute reading of a run is captured as
//! the reference pose and every later reading is rotated/translated into
//! the frame it defines.

use crate::core::math::angle_diff;
use crate::core::Pose2D;

/// Run-local reference frame anchored at the first ground-truth pose.
///
/// Immutable after capture; `to_local` is a pure function of its input
/// and the captured pose.
#[derive(Debug, Clone, Copy)]
pub struct ReferenceFrame {
    origin: Pose2D,
    cos0: f64,
    sin0: f64,
}

impl ReferenceFrame {
    /// Capture the reference pose and precompute its rotation terms.
    pub fn capture(origin: Pose2D) -> Self {
        log::debug!(
            "ReferenceFrame: captured ({:.4}, {:.4}, {:.4})",
            origin.x,
            origin.y,
            origin.theta
        );
        Self {
            origin,
            cos0: origin.theta.cos(),
            sin0: origin.theta.sin(),
        }
    }

    /// Project an absolute world pose into the run-local frame.
    ///
    /// Projecting the captured reference pose itself yields exactly
    /// (0, 0, 0).
    pub fn to_local(&self, world: Pose2D) -> Pose2D {
        let dx = world.x - self.origin.x;
        let dy = world.y - self.origin.y;
        Pose2D {
            x: self.cos0 * dx + self.sin0 * dy,
            y: -self.sin0 * dx + self.cos0 * dy,
            theta: angle_diff(self.origin.theta, world.theta),
        }
    }

    /// The captured reference pose in world coordinates.
    #[inline]
    pub fn origin(&self) -> Pose2D {
        self.origin
    }
}
