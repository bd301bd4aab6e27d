//! Run history.
//!
//! Append-only record of every eligible tick of a run, in temporal order.
//! Entries are never mutated after append; the buffer lives only as long
//! as the run object that produced it.

use serde::{Deserialize, Serialize};

use crate::core::Pose2D;
use crate::metrics::PoseError;

/// One recorded tick.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Elapsed reference time since run start, in seconds
    pub t: f64,
    /// Odometry pose estimate at this tick
    pub odometry: Pose2D,
    /// Ground-truth pose, relativized to the run frame
    pub ground_truth: Pose2D,
    /// Per-tick error (odometry − ground truth)
    pub error: PoseError,
}

/// Ordered, append-only sequence of recorded ticks.
#[derive(Debug, Clone, Default)]
pub struct HistoryBuffer {
    entries: Vec<HistoryEntry>,
}

impl HistoryBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one tick. Ticks arrive in temporal order by construction.
    pub fn push(&mut self, entry: HistoryEntry) {
        self.entries.push(entry);
    }

    /// All recorded ticks in order.
    #[inline]
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// The most recent tick, if any.
    #[inline]
    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    /// Number of recorded ticks.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been recorded.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Discard all recorded ticks.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(t: f64) -> HistoryEntry {
        HistoryEntry {
            t,
            odometry: Pose2D::identity(),
            ground_truth: Pose2D::identity(),
            error: PoseError {
                x: 0.0,
                y: 0.0,
                theta: 0.0,
            },
        }
    }

    #[test]
    fn test_push_preserves_order() {
        let mut history = HistoryBuffer::new();
        history.push(entry(0.1));
        history.push(entry(0.2));
        history.push(entry(0.3));

        assert_eq!(history.len(), 3);
        let times: Vec<f64> = history.entries().iter().map(|e| e.t).collect();
        assert_eq!(times, vec![0.1, 0.2, 0.3]);
        assert_eq!(history.last().unwrap().t, 0.3);
    }

    #[test]
    fn test_empty() {
        let history = HistoryBuffer::new();
        assert!(history.is_empty());
        assert!(history.last().is_none());
    }

    #[test]
    fn test_clear() {
        let mut history = HistoryBuffer::new();
        history.push(entry(0.1));
        history.clear();
        assert!(history.is_empty());
    }
}
