//! Error types shared by the non-grading parts of the core

use thiserror::Error;

/// Result type for Penmark operations
pub type Result<T> = std::result::Result<T, PenmarkError>;

/// Errors raised by configuration loading, storage, content ingestion and playback.
///
/// Grading itself is infallible and never produces one of these.
#[derive(Error, Debug)]
pub enum PenmarkError {
    /// Grading configuration failed validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration file could not be parsed
    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Vocabulary database failure
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Backend payload was not valid JSON
    #[error("Failed to decode payload: {0}")]
    Decode(#[from] serde_json::Error),

    /// Backend payload decoded but did not match any known version
    #[error("Unrecognized {0} payload")]
    UnrecognizedPayload(&'static str),

    /// Input rejected before it reached storage or grading
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Speech engine failed to start playback
    #[error("Speech engine '{engine}' failed: {reason}")]
    Speech { engine: String, reason: String },

    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PenmarkError {
    /// Create an invalid config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a speech error for the named engine
    pub fn speech(engine: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Speech {
            engine: engine.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(feature = "python")]
impl From<PenmarkError> for pyo3::PyErr {
    fn from(err: PenmarkError) -> Self {
        pyo3::exceptions::PyRuntimeError::new_err(err.to_string())
    }
}
