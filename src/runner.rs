//! The sampling-and-integration loop.
//!
//! Drives one validation run: polls the reference time/state source every
//! tick, integrates wheel velocities on eligible ticks, projects ground
//! truth into the run frame, accumulates errors, and records history
//! until the source reports Stopped.
//!
//! Single logical thread of control: the loop exclusively owns all
//! mutable run state, and the only suspension points are the bounded
//! idle sleeps while paused or waiting for the reference clock to move.

use std::thread;
use std::time::Duration;

use crate::core::Pose2D;
use crate::error::Result;
use crate::ground_truth::ReferenceFrame;
use crate::history::{HistoryBuffer, HistoryEntry};
use crate::metrics::{ErrorSummary, ErrorTracker};
use crate::odometry::{KinematicParams, WheelOdometry};
use crate::sources::{DriveMode, GroundTruthSource, SimState, TimeStateSource, VelocitySource};

/// Loop pacing and drive-mode configuration.
#[derive(Debug, Clone, Copy)]
pub struct RunnerConfig {
    /// How the reference clock is advanced.
    pub mode: DriveMode,
    /// Idle sleep while the source reports Paused.
    pub pause_idle: Duration,
    /// Idle sleep in polled mode when the clock has not moved yet.
    pub poll_idle: Duration,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            mode: DriveMode::Stepped,
            pause_idle: Duration::from_millis(20),
            poll_idle: Duration::from_millis(10),
        }
    }
}

/// Sampling loop state machine.
///
/// Owns the odometry integrator, error tracker, and history for one run.
/// After [`run`](SampleLoop::run) returns, normally on Stopped or with an
/// error when a source read fails, the accumulated history and aggregates
/// stay readable on this value.
pub struct SampleLoop {
    config: RunnerConfig,
    odometry: WheelOdometry,
    tracker: ErrorTracker,
    history: HistoryBuffer,
}

impl SampleLoop {
    /// Create a loop for one run.
    pub fn new(params: KinematicParams, config: RunnerConfig) -> Self {
        Self {
            config,
            odometry: WheelOdometry::new(params),
            tracker: ErrorTracker::new(),
            history: HistoryBuffer::new(),
        }
    }

    /// Drive the run until the source reports Stopped.
    ///
    /// Per tick:
    /// 1. Stopped → terminal, return with everything accumulated.
    /// 2. Paused → bounded idle sleep, re-poll. No integration.
    /// 3. Running → advance the clock (stepped mode only), read the time,
    ///    and skip the tick silently when `dt <= 0`: a repeated or
    ///    backwards reference sample, expected around state transitions,
    ///    must not produce a history entry or touch any state.
    /// 4. Otherwise integrate, relativize, observe, append, and commit
    ///    `t_prev`. A tick that starts integrating always completes
    ///    before the next state poll.
    ///
    /// Any failed source read aborts the run with that error; whatever
    /// was recorded up to the failure remains available.
    pub fn run<S>(&mut self, source: &mut S) -> Result<()>
    where
        S: TimeStateSource + VelocitySource + GroundTruthSource,
    {
        let t_start = source.reference_time()?;
        let reference = ReferenceFrame::capture(source.absolute_pose()?);
        let mut t_prev = t_start;

        log::info!(
            "run start: mode={:?}, t_start={:.3}s, reference=({:.3}, {:.3}, {:.3})",
            self.config.mode,
            t_start,
            reference.origin().x,
            reference.origin().y,
            reference.origin().theta
        );

        loop {
            match source.state()? {
                SimState::Stopped => {
                    log::info!(
                        "run stopped after {:.3}s, {} samples",
                        t_prev - t_start,
                        self.history.len()
                    );
                    return Ok(());
                }
                SimState::Paused => {
                    log::debug!("paused, idling");
                    thread::sleep(self.config.pause_idle);
                    continue;
                }
                SimState::Running => {}
            }

            if self.config.mode == DriveMode::Stepped {
                source.advance_step()?;
            }
            let t_now = source.reference_time()?;
            let dt = t_now - t_prev;
            if dt <= 0.0 {
                log::trace!("non-advancing tick (t={:.6}), skipping", t_now);
                if self.config.mode == DriveMode::Polled {
                    thread::sleep(self.config.poll_idle);
                }
                continue;
            }

            // Every input is read before anything mutates; a failed tick
            // must leave the run untouched.
            let left = source.left_angular_velocity()?;
            let right = source.right_angular_velocity()?;
            let world = source.absolute_pose()?;

            let estimate = self.odometry.integrate(left, right, dt);
            let truth = reference.to_local(world);
            let error = self.tracker.observe(estimate, truth);

            self.history.push(HistoryEntry {
                t: t_now - t_start,
                odometry: estimate,
                ground_truth: truth,
                error,
            });
            t_prev = t_now;
        }
    }

    /// Recorded history of the run so far.
    #[inline]
    pub fn history(&self) -> &HistoryBuffer {
        &self.history
    }

    /// Latest odometry pose estimate.
    #[inline]
    pub fn estimate(&self) -> Pose2D {
        self.odometry.pose()
    }

    /// Aggregate error metrics; [`crate::Error::EmptyRun`] when no tick
    /// was recorded.
    pub fn summary(&self) -> Result<ErrorSummary> {
        self.tracker.summary()
    }

    /// Clear all run state so the loop can drive a fresh run.
    pub fn reset(&mut self) {
        self.odometry.reset();
        self.tracker.reset();
        self.history.clear();
    }
}
