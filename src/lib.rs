//! gati-odom: wheel-odometry validation harness for differential drive
//! robots.
//!
//! Dead-reckons a 2D pose from wheel angular velocities, projects an
//! independently supplied ground-truth pose stream into the same local
//! frame, and accumulates pose-error metrics over a run.
//!
//! # Architecture
//!
//! The crate is organized in layers, foundation first:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                      main                           │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                          │
//! ┌─────────────────────────────────────────────────────┐
//! │                    runner/                          │  ← Sampling loop
//! └─────────────────────────────────────────────────────┘
//!                          │
//! ┌─────────────────────────────────────────────────────┐
//! │                    sources/                         │  ← Collaborator
//! │              (traits, mock plant)                   │    interfaces
//! └─────────────────────────────────────────────────────┘
//!                          │
//! ┌─────────────────────────────────────────────────────┐
//! │      odometry / ground_truth / metrics / history    │  ← Run components
//! └─────────────────────────────────────────────────────┘
//!                          │
//! ┌─────────────────────────────────────────────────────┐
//! │                     core/                           │  ← Foundation
//! │                 (pose, math)                        │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use gati_odom::{
//!     KinematicParams, MockSim, MockSimConfig, RunnerConfig, SampleLoop,
//! };
//!
//! let mut sim = MockSim::new(MockSimConfig::default());
//! let params = KinematicParams::new(0.0975, 0.1655)?;
//! let mut run = SampleLoop::new(params, RunnerConfig::default());
//!
//! run.run(&mut sim)?;
//! let summary = run.summary()?;
//! println!("rmse: {:.4} m over {} samples", summary.rmse_position, summary.samples);
//! # Ok::<(), gati_odom::Error>(())
//! ```
//!
//! # Coordinate Frame
//!
//! All coordinates follow the ROS REP-103 convention: X-forward, Y-left,
//! counter-clockwise positive rotation. The odometry estimate lives in a
//! local frame anchored at the run's first ground-truth pose.

pub mod config;
pub mod core;
pub mod error;
pub mod ground_truth;
pub mod history;
pub mod metrics;
pub mod odometry;
pub mod runner;
pub mod sources;

// Re-export commonly used types
pub use config::AppConfig;
pub use core::Pose2D;
pub use error::{Error, Result};
pub use ground_truth::ReferenceFrame;
pub use history::{HistoryBuffer, HistoryEntry};
pub use metrics::{ErrorSummary, ErrorTracker, PoseError};
pub use odometry::{KinematicParams, WheelOdometry};
pub use runner::{RunnerConfig, SampleLoop};
pub use sources::{
    DriveMode, DriveSegment, GroundTruthSource, MockSim, MockSimConfig, ParameterSource, SimState,
    TimeStateSource, VelocitySource,
};
