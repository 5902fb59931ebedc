//! Error types for tagprep

use thiserror::Error;

/// tagprep error type
#[derive(Error, Debug)]
pub enum Error {
    /// Column length mismatch or a source buffer shorter than the declared count
    #[error("Shape error: {0}")]
    Shape(String),

    /// Source representation has no defined conversion to the required element kind
    #[error("Type mismatch: {0}")]
    TypeMismatch(String),

    /// Malformed supplemental-column key
    #[error("Key error: {0}")]
    Key(String),

    /// Illegal input combination or engine configuration failure
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Failure reported by the tagging engine during a run
    #[error("Engine error: {0}")]
    Engine(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
