//! Error types for the `chatdocs-model` crate.

use thiserror::Error;

/// Errors that can occur in language model operations.
#[derive(Debug, Error)]
pub enum ModelError {
    /// The model call failed (transport, quota, or malformed response).
    #[error("Language model error ({provider}): {message}")]
    GenerationError {
        /// The model provider that produced the error.
        provider: String,
        /// A description of the failure.
        message: String,
    },

    /// A configuration validation error.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// A convenience result type for language model operations.
pub type Result<T> = std::result::Result<T, ModelError>;
