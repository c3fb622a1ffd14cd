//! Error types for the DSP engine client.

use soul_dsp_sync::SyncError;
use thiserror::Error;

/// Errors that can occur when talking to a DSP engine over HTTP.
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Engine returned an error response
    #[error("Engine error ({status}): {message}")]
    ServerError { status: u16, message: String },

    /// Invalid engine URL
    #[error("Invalid engine URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse engine response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Engine is offline or unreachable
    #[error("Engine unreachable: {0}")]
    ServerUnreachable(String),
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

impl From<ClientError> for SyncError {
    fn from(error: ClientError) -> Self {
        match error {
            ClientError::ServerError { message, .. } => SyncError::Rejected(message),
            ClientError::ParseError(message) => SyncError::InvalidResponse(message),
            ClientError::ServerUnreachable(message) | ClientError::InvalidUrl(message) => {
                SyncError::Unreachable(message)
            }
            ClientError::Request(e) => SyncError::Unreachable(e.to_string()),
        }
    }
}
