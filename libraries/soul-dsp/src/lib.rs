//! Soul DSP chain model
//!
//! Data model for the DSP effect chain: a fixed run of four slots, each
//! holding at most one effect configuration that can be bypassed
//! independently. The audio engine owns the authoritative chain; this crate
//! only describes, validates and labels configurations.
//!
//! - [`Effect`]: tagged union of the seven effect payloads
//! - [`EffectKind`]: payload-less tag with the centralized defaults lookup
//! - [`EffectSlot`] / [`EffectChain`]: slot container with stable indices
//! - [`presets`]: tolerance-based preset matching
//! - [`ChainPreset`]: whole-chain presets

pub mod chain;
pub mod chain_preset;
pub mod effect;
pub mod error;
pub mod param;
pub mod presets;
pub mod settings;
pub mod slot;

pub use chain::{EffectChain, SLOT_COUNT};
pub use chain_preset::{builtin_chain_presets, ChainPreset};
pub use effect::{Effect, EffectKind};
pub use error::{ChainError, Result};
pub use param::{ParamRange, Scale};
pub use settings::*;
pub use slot::{EffectSlot, SlotState};
