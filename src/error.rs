//! Error types for litcoref.

use thiserror::Error;

/// Result type for litcoref operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for litcoref operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Pipeline preset could not be loaded.
    #[error("Model initialization failed: {0}")]
    ModelInit(String),

    /// Pipeline assembly failed (unknown factory, duplicate pipe, missing dependency).
    #[error("Pipeline error: {0}")]
    Pipeline(String),

    /// Invalid input provided.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration file could not be read or parsed.
    #[error("Config error: {0}")]
    Config(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Create a model initialization error.
    pub fn model_init(msg: impl Into<String>) -> Self {
        Error::ModelInit(msg.into())
    }

    /// Create a pipeline assembly error.
    pub fn pipeline(msg: impl Into<String>) -> Self {
        Error::Pipeline(msg.into())
    }

    /// Create an invalid input error.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Error::InvalidInput(msg.into())
    }

    /// Create a config error.
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }
}
