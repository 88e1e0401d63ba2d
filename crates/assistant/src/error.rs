//! Assistant error types.

use thiserror::Error;

/// Errors that can occur while producing a chat reply.
#[derive(Debug, Error)]
pub enum AssistantError {
    /// Missing or invalid configuration (e.g. no API key).
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Failed to reach the model API.
    #[error("network error: {0}")]
    Network(String),

    /// The model API returned an error status.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The model API returned a response we could not use.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// Database error while assembling context.
    #[error(transparent)]
    Database(#[from] database::DatabaseError),
}
