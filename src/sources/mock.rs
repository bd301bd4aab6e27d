//! In-process differential drive plant for hardware-free runs.
//!
//! Implements every source trait against a simulated robot: a piecewise
//! wheel-command script, an exact arc-model ground-truth integrator, and
//! a discrete reference clock. The reported wheel velocities are the
//! commanded ones, while optional slip noise perturbs the motion the
//! plant actually executes, so the odometry estimate drifts from ground
//! truth the way it would against a real reference source.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;
use serde::{Deserialize, Serialize};

use crate::core::math::normalize_angle;
use crate::core::Pose2D;
use crate::error::Result;
use crate::sources::{
    GroundTruthSource, ParameterSource, SimState, TimeStateSource, VelocitySource,
};

/// One piece of the wheel-command script.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DriveSegment {
    /// How long this command holds, in seconds
    pub duration: f64,
    /// Left wheel angular velocity (rad/s)
    pub left: f64,
    /// Right wheel angular velocity (rad/s)
    pub right: f64,
}

/// Mock plant configuration.
#[derive(Debug, Clone)]
pub struct MockSimConfig {
    /// Wheel radius in meters
    pub wheel_radius: f64,
    /// Half of the lateral wheel separation in meters
    pub half_track: f64,
    /// Discrete reference time step in seconds
    pub time_step: f64,
    /// Total simulated duration; the plant reports Stopped afterwards
    pub duration: f64,
    /// Advance the clock on every time read instead of on `advance_step`
    pub auto_advance: bool,
    /// Initial ground-truth pose in the world frame
    pub initial_pose: Pose2D,
    /// Std-dev of multiplicative wheel slip (0 disables noise)
    pub slip_stddev: f64,
    /// Noise seed for reproducible runs
    pub noise_seed: u64,
    /// Wheel-command script; past its end the wheels hold still
    pub segments: Vec<DriveSegment>,
}

impl Default for MockSimConfig {
    fn default() -> Self {
        Self {
            // Pioneer P3DX-like drive base.
            wheel_radius: 0.0975,
            half_track: 0.1655,
            time_step: 0.05,
            duration: 20.0,
            auto_advance: false,
            initial_pose: Pose2D::new(0.8, -0.4, 0.6),
            slip_stddev: 0.0,
            noise_seed: 42,
            segments: vec![
                DriveSegment {
                    duration: 8.0,
                    left: 2.0,
                    right: 2.0,
                },
                DriveSegment {
                    duration: 6.0,
                    left: 2.0,
                    right: 1.2,
                },
                DriveSegment {
                    duration: 6.0,
                    left: 1.2,
                    right: 2.0,
                },
            ],
        }
    }
}

/// Simulated robot implementing all source traits.
pub struct MockSim {
    config: MockSimConfig,
    // Reference time is step * time_step; the counter keeps the clock
    // free of accumulated rounding.
    step: u64,
    pose: Pose2D,
    last_command: (f64, f64),
    rng: SmallRng,
    stop: Arc<AtomicBool>,
}

impl MockSim {
    /// Create a plant at reference time zero.
    pub fn new(config: MockSimConfig) -> Self {
        let initial_command = Self::command_at(&config.segments, 0.0);
        let pose = config.initial_pose;
        let rng = SmallRng::seed_from_u64(config.noise_seed);
        Self {
            config,
            step: 0,
            pose,
            last_command: initial_command,
            rng,
            stop: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Flag that makes the plant report Stopped on the next state poll.
    ///
    /// Shareable with a signal handler.
    pub fn stop_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop)
    }

    /// Ground-truth world pose right now (test/report access).
    pub fn world_pose(&self) -> Pose2D {
        self.pose
    }

    /// Wheel command scheduled at time `t`.
    fn command_at(segments: &[DriveSegment], t: f64) -> (f64, f64) {
        let mut start = 0.0;
        for segment in segments {
            if t < start + segment.duration {
                return (segment.left, segment.right);
            }
            start += segment.duration;
        }
        (0.0, 0.0)
    }

    /// Multiplicative slip factor for one wheel over one step.
    fn slip(&mut self) -> f64 {
        if self.config.slip_stddev == 0.0 {
            return 1.0;
        }
        let n: f64 = self.rng.sample(StandardNormal);
        1.0 + n * self.config.slip_stddev
    }

    /// Current reference time in seconds.
    fn now(&self) -> f64 {
        self.step as f64 * self.config.time_step
    }

    /// Advance the plant by one time step.
    ///
    /// Ground truth integrates the exact arc model, so straight segments
    /// agree with a first-order estimate to rounding while curved
    /// segments expose its integration error.
    fn step_plant(&mut self) {
        let (left, right) = Self::command_at(&self.config.segments, self.now());
        self.last_command = (left, right);

        let dt = self.config.time_step;
        let vl = left * self.config.wheel_radius * self.slip();
        let vr = right * self.config.wheel_radius * self.slip();
        let v = 0.5 * (vr + vl);
        let omega = (vr - vl) / (2.0 * self.config.half_track);

        if omega.abs() < 1e-12 {
            self.pose.x += v * self.pose.theta.cos() * dt;
            self.pose.y += v * self.pose.theta.sin() * dt;
        } else {
            let r = v / omega;
            let theta_new = self.pose.theta + omega * dt;
            self.pose.x += r * (theta_new.sin() - self.pose.theta.sin());
            self.pose.y += r * (self.pose.theta.cos() - theta_new.cos());
            self.pose.theta = normalize_angle(theta_new);
        }

        self.step += 1;
    }
}

impl ParameterSource for MockSim {
    fn wheel_radius(&mut self) -> Result<f64> {
        Ok(self.config.wheel_radius)
    }

    fn half_track(&mut self) -> Result<f64> {
        Ok(self.config.half_track)
    }

    fn reference_time_step(&mut self) -> Result<f64> {
        Ok(self.config.time_step)
    }
}

impl TimeStateSource for MockSim {
    fn state(&mut self) -> Result<SimState> {
        // Stop once within half a step of the duration; step * time_step
        // does not always land on it exactly.
        let done = self.now() >= self.config.duration - 0.5 * self.config.time_step;
        if self.stop.load(Ordering::Relaxed) || done {
            Ok(SimState::Stopped)
        } else {
            Ok(SimState::Running)
        }
    }

    fn reference_time(&mut self) -> Result<f64> {
        if self.config.auto_advance {
            self.step_plant();
        }
        Ok(self.now())
    }

    fn advance_step(&mut self) -> Result<()> {
        self.step_plant();
        Ok(())
    }
}

impl VelocitySource for MockSim {
    fn left_angular_velocity(&mut self) -> Result<f64> {
        Ok(self.last_command.0)
    }

    fn right_angular_velocity(&mut self) -> Result<f64> {
        Ok(self.last_command.1)
    }
}

impl GroundTruthSource for MockSim {
    fn absolute_pose(&mut self) -> Result<Pose2D> {
        Ok(self.pose)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn straight_config() -> MockSimConfig {
        MockSimConfig {
            wheel_radius: 0.1,
            half_track: 0.2,
            time_step: 0.1,
            duration: 1.0,
            auto_advance: false,
            initial_pose: Pose2D::identity(),
            slip_stddev: 0.0,
            noise_seed: 1,
            segments: vec![DriveSegment {
                duration: 10.0,
                left: 1.0,
                right: 1.0,
            }],
        }
    }

    #[test]
    fn test_stepped_clock() {
        let mut sim = MockSim::new(straight_config());

        assert_eq!(sim.reference_time().unwrap(), 0.0);
        sim.advance_step().unwrap();
        assert_relative_eq!(sim.reference_time().unwrap(), 0.1, epsilon = 1e-12);
        sim.advance_step().unwrap();
        assert_relative_eq!(sim.reference_time().unwrap(), 0.2, epsilon = 1e-12);
    }

    #[test]
    fn test_straight_motion_ground_truth() {
        let mut sim = MockSim::new(straight_config());

        // v = 1.0 * 0.1 = 0.1 m/s for one second.
        for _ in 0..10 {
            sim.advance_step().unwrap();
        }
        let pose = sim.world_pose();
        assert_relative_eq!(pose.x, 0.1, epsilon = 1e-9);
        assert_relative_eq!(pose.y, 0.0, epsilon = 1e-12);
        assert_relative_eq!(pose.theta, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_stops_after_duration() {
        let mut sim = MockSim::new(straight_config());

        assert_eq!(sim.state().unwrap(), SimState::Running);
        for _ in 0..10 {
            sim.advance_step().unwrap();
        }
        assert_eq!(sim.state().unwrap(), SimState::Stopped);
    }

    #[test]
    fn test_stop_handle() {
        let mut sim = MockSim::new(straight_config());

        sim.stop_handle().store(true, Ordering::Relaxed);
        assert_eq!(sim.state().unwrap(), SimState::Stopped);
    }

    #[test]
    fn test_command_script_lookup() {
        let segments = vec![
            DriveSegment {
                duration: 1.0,
                left: 1.0,
                right: 1.0,
            },
            DriveSegment {
                duration: 1.0,
                left: -1.0,
                right: 1.0,
            },
        ];

        assert_eq!(MockSim::command_at(&segments, 0.0), (1.0, 1.0));
        assert_eq!(MockSim::command_at(&segments, 0.99), (1.0, 1.0));
        assert_eq!(MockSim::command_at(&segments, 1.5), (-1.0, 1.0));
        // Past the script the wheels hold still.
        assert_eq!(MockSim::command_at(&segments, 5.0), (0.0, 0.0));
    }

    #[test]
    fn test_auto_advance_clock() {
        let mut sim = MockSim::new(MockSimConfig {
            auto_advance: true,
            ..straight_config()
        });

        let t1 = sim.reference_time().unwrap();
        let t2 = sim.reference_time().unwrap();
        assert!(t2 > t1);
    }

    #[test]
    fn test_slip_noise_is_reproducible() {
        let noisy = MockSimConfig {
            slip_stddev: 0.05,
            noise_seed: 7,
            ..straight_config()
        };

        let mut a = MockSim::new(noisy.clone());
        let mut b = MockSim::new(noisy);
        for _ in 0..10 {
            a.advance_step().unwrap();
            b.advance_step().unwrap();
        }
        assert_eq!(a.world_pose(), b.world_pose());
    }
}
