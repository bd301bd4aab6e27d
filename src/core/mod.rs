//! Foundation types and math shared by every layer.

pub mod math;
pub mod pose;

pub use pose::Pose2D;
