//! External collaborator interfaces.
//!
//! The sampling loop never talks to a simulation engine directly; it is
//! handed implementations of these traits at construction. Anything that
//! can answer them (a remote-API bridge, a replay log, the in-process
//! [`mock`] plant) can drive a run.
//!
//! All methods return [`crate::Result`] so a failed read propagates out
//! of the loop instead of being retried or swallowed.

use crate::core::Pose2D;
use crate::error::Result;
use serde::{Deserialize, Serialize};

pub mod mock;

pub use mock::{DriveSegment, MockSim, MockSimConfig};

/// Simulation state as seen by the sampling loop.
///
/// A closed set; whatever encoding the underlying engine uses (bitmask,
/// string, enum) is mapped to these three variants at the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimState {
    /// Reference time is advancing; integrate on eligible ticks.
    Running,
    /// Temporarily halted; idle without integrating.
    Paused,
    /// Terminal; the run is over.
    Stopped,
}

/// How the loop obtains new reference time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DriveMode {
    /// The loop asks the source to advance one discrete step per tick.
    Stepped,
    /// The source advances on its own; the loop polls the clock.
    Polled,
}

/// Static kinematic parameters read from the scene or device.
pub trait ParameterSource {
    /// Wheel radius in meters.
    fn wheel_radius(&mut self) -> Result<f64>;

    /// Half of the lateral wheel separation in meters.
    fn half_track(&mut self) -> Result<f64>;

    /// Nominal reference time step in seconds.
    ///
    /// Informational only; the loop derives dt from successive
    /// timestamps rather than trusting this value.
    fn reference_time_step(&mut self) -> Result<f64>;
}

/// Simulation state and reference clock.
pub trait TimeStateSource {
    /// Current simulation state.
    fn state(&mut self) -> Result<SimState>;

    /// Current reference (simulation) time in seconds.
    fn reference_time(&mut self) -> Result<f64>;

    /// Advance the reference clock one discrete step.
    ///
    /// Only called in [`DriveMode::Stepped`].
    fn advance_step(&mut self) -> Result<()>;
}

/// Instantaneous wheel angular velocities.
pub trait VelocitySource {
    /// Left wheel angular velocity in rad/s.
    fn left_angular_velocity(&mut self) -> Result<f64>;

    /// Right wheel angular velocity in rad/s.
    fn right_angular_velocity(&mut self) -> Result<f64>;
}

/// Independent reference trajectory in a fixed world frame.
pub trait GroundTruthSource {
    /// Current absolute pose of the robot base.
    fn absolute_pose(&mut self) -> Result<Pose2D>;
}
