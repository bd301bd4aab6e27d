//! Pose-error tracking over a run.
//!
//! Compares the odometry estimate against the relativized ground truth
//! tick by tick and keeps the running aggregates needed for the end-of-run
//! report: sample count, sum of squared planar error, and the worst
//! absolute heading error.

use serde::{Deserialize, Serialize};

use crate::core::math::angle_diff;
use crate::core::Pose2D;
use crate::error::{Error, Result};

/// Signed per-tick pose error (estimate − reference), heading normalized.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PoseError {
    /// X error in meters
    pub x: f64,
    /// Y error in meters
    pub y: f64,
    /// Heading error in radians, in [-π, π)
    pub theta: f64,
}

/// Aggregate error metrics for a run.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ErrorSummary {
    /// Root-mean-square planar position error in meters
    pub rmse_position: f64,
    /// Maximum absolute heading error in degrees
    pub max_heading_error_deg: f64,
    /// Number of ticks that contributed
    pub samples: usize,
}

/// Running error aggregator.
#[derive(Debug, Clone, Default)]
pub struct ErrorTracker {
    samples: usize,
    sum_sq_position: f64,
    max_abs_heading: f64,
}

impl ErrorTracker {
    /// Create an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Compare one estimate/reference pair, update the aggregates, and
    /// return the per-tick error.
    pub fn observe(&mut self, estimate: Pose2D, reference: Pose2D) -> PoseError {
        let error = PoseError {
            x: estimate.x - reference.x,
            y: estimate.y - reference.y,
            theta: angle_diff(reference.theta, estimate.theta),
        };

        self.samples += 1;
        self.sum_sq_position += error.x * error.x + error.y * error.y;
        self.max_abs_heading = self.max_abs_heading.max(error.theta.abs());

        error
    }

    /// Number of observed ticks.
    #[inline]
    pub fn samples(&self) -> usize {
        self.samples
    }

    /// Aggregate metrics for the run so far.
    ///
    /// Returns [`Error::EmptyRun`] if nothing was observed; a zero RMSE
    /// for an empty run would be indistinguishable from a perfect one.
    pub fn summary(&self) -> Result<ErrorSummary> {
        if self.samples == 0 {
            return Err(Error::EmptyRun);
        }
        Ok(ErrorSummary {
            rmse_position: (self.sum_sq_position / self.samples as f64).sqrt(),
            max_heading_error_deg: self.max_abs_heading.to_degrees(),
            samples: self.samples,
        })
    }

    /// Discard all accumulated state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
