//! Configuration for the gati-odom binary.
//!
//! Loads run parameters from a TOML file: drive-base geometry, reference
//! clock settings, the wheel-command script for the mock plant, and
//! logging. The library itself takes these values through constructors
//! and source traits; only the binary reads files.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::Pose2D;
use crate::error::Result;
use crate::runner::RunnerConfig;
use crate::sources::{DriveMode, DriveSegment, MockSimConfig};

/// Top-level application configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    pub robot: RobotConfig,
    pub run: RunConfig,
    pub drive: DriveConfig,
    pub logging: LoggingConfig,
}

/// Drive-base geometry.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RobotConfig {
    /// Wheel radius in meters
    pub wheel_radius: f64,
    /// Half of the lateral wheel separation in meters
    pub half_track: f64,
}

/// Reference clock and loop pacing.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RunConfig {
    /// Clock drive mode: "stepped" or "polled"
    pub mode: DriveMode,
    /// Discrete reference time step in seconds
    pub time_step: f64,
    /// Simulated run duration in seconds
    pub duration: f64,
    /// Idle sleep while paused, in milliseconds
    pub pause_idle_ms: u64,
    /// Idle sleep between polls when the clock has not moved, in
    /// milliseconds (polled mode only)
    pub poll_idle_ms: u64,
    /// Initial ground-truth world pose x (meters)
    pub initial_x: f64,
    /// Initial ground-truth world pose y (meters)
    pub initial_y: f64,
    /// Initial ground-truth world heading (radians)
    pub initial_heading: f64,
}

/// Wheel-command script and slip noise for the mock plant.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DriveConfig {
    /// Std-dev of multiplicative wheel slip (0 disables noise)
    pub slip_stddev: f64,
    /// Noise seed for reproducible runs
    pub noise_seed: u64,
    /// Piecewise-constant wheel commands
    pub segments: Vec<DriveSegment>,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Default log level (trace, debug, info, warn, error)
    pub level: String,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save configuration to a TOML file.
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Defaults modeled on a Pioneer P3DX drive base.
    pub fn p3dx_defaults() -> Self {
        Self {
            robot: RobotConfig {
                wheel_radius: 0.0975,
                half_track: 0.1655,
            },
            run: RunConfig {
                mode: DriveMode::Stepped,
                time_step: 0.05,
                duration: 20.0,
                pause_idle_ms: 20,
                poll_idle_ms: 10,
                initial_x: 0.8,
                initial_y: -0.4,
                initial_heading: 0.6,
            },
            drive: DriveConfig {
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
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
        }
    }

    /// Loop pacing derived from the run section.
    pub fn runner_config(&self) -> RunnerConfig {
        RunnerConfig {
            mode: self.run.mode,
            pause_idle: Duration::from_millis(self.run.pause_idle_ms),
            poll_idle: Duration::from_millis(self.run.poll_idle_ms),
        }
    }

    /// Mock plant configuration derived from all sections.
    pub fn mock_sim_config(&self) -> MockSimConfig {
        MockSimConfig {
            wheel_radius: self.robot.wheel_radius,
            half_track: self.robot.half_track,
            time_step: self.run.time_step,
            duration: self.run.duration,
            auto_advance: self.run.mode == DriveMode::Polled,
            initial_pose: Pose2D::new(
                self.run.initial_x,
                self.run.initial_y,
                self.run.initial_heading,
            ),
            slip_stddev: self.drive.slip_stddev,
            noise_seed: self.drive.noise_seed,
            segments: self.drive.segments.clone(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::p3dx_defaults()
    }
}
