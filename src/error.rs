//! Error types for gati-odom

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// gati-odom error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Kinematic parameter outside its valid range
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Error aggregates requested before any tick was recorded
    #[error("No samples recorded for this run")]
    EmptyRun,

    /// Failure reported by an external time/velocity/pose source
    #[error("Source error: {0}")]
    Source(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be parsed
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Configuration could not be serialized
    #[error("Config serialize error: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),
}
