//! Error types for the chain backend contract and the sync adapter.

use soul_dsp::ChainError;
use thiserror::Error;

/// Errors returned by a chain backend or surfaced by the adapter
#[derive(Error, Debug)]
pub enum SyncError {
    /// Chain model rejected the operation (bad slot index, empty slot, ...)
    #[error(transparent)]
    Chain(#[from] ChainError),

    /// No chain preset with this id
    #[error("Preset not found: {0}")]
    PresetNotFound(i64),

    /// Built-in presets are read-only
    #[error("Cannot delete built-in preset")]
    BuiltinPresetDelete,

    #[error("Cannot overwrite built-in preset: {0}")]
    BuiltinPresetOverwrite(String),

    /// Backend refused the request
    #[error("Request rejected: {0}")]
    Rejected(String),

    /// Backend could not be reached
    #[error("Backend unreachable: {0}")]
    Unreachable(String),

    /// Backend answered with something that is not a valid chain
    #[error("Invalid backend response: {0}")]
    InvalidResponse(String),

    /// Snapshot file IO failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for backend and adapter operations.
pub type Result<T> = std::result::Result<T, SyncError>;
