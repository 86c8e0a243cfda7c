//! Error types for quickentry.
//!
//! The parser and suggestion engine are total and never fail; these errors
//! cover the surrounding application: configuration, I/O and output.

use thiserror::Error;

/// Errors raised outside the command grammar.
#[derive(Debug, Error)]
pub enum QuickEntryError {
    /// Configuration could not be located, read or parsed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input supplied on the command line was malformed.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Reading stdin or a file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization failed.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl QuickEntryError {
    /// Process exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidInput(_) => 2,
            Self::Config(_) | Self::Io(_) | Self::Json(_) | Self::Yaml(_) => 1,
        }
    }
}
