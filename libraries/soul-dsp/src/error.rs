//! Error types for the effect chain model.

use crate::chain::SLOT_COUNT;
use thiserror::Error;

/// Result type for chain model operations.
pub type Result<T> = std::result::Result<T, ChainError>;

/// Errors raised by the chain model itself (no transport involved).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChainError {
    /// Slot index outside `0..SLOT_COUNT`
    #[error("Slot index must be 0-{max}, got {0}", max = SLOT_COUNT - 1)]
    InvalidSlot(usize),

    /// Operation needs an effect but the slot is empty
    #[error("No effect at slot {0}")]
    EmptySlot(usize),

    /// A chain snapshot did not contain exactly `SLOT_COUNT` slots
    #[error("Expected {expected} slots, got {actual}")]
    SlotCount { expected: usize, actual: usize },

    /// A chain snapshot listed a slot out of position
    #[error("Slot at position {position} reports index {index}")]
    SlotIndexMismatch { position: usize, index: usize },

    /// Unrecognized effect type tag
    #[error("Unknown effect type: {0}")]
    UnknownEffect(String),

    /// Parameter edit rejected (band count limits, unknown bundled IR, ...)
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Chain preset does not fit into the chain
    #[error("Preset has {0} effects, the chain holds at most {max}", max = SLOT_COUNT)]
    TooManyEffects(usize),
}

impl ChainError {
    /// Create an invalid parameter error
    pub fn invalid_parameter(msg: impl Into<String>) -> Self {
        Self::InvalidParameter(msg.into())
    }
}
