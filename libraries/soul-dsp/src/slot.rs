//! Effect slot
//!
//! One position in the chain. `enabled` is only meaningful while an effect
//! is present; an empty slot is always bypassed.

use crate::effect::Effect;
use serde::{Deserialize, Serialize};

/// Effect slot as exchanged with the engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectSlot {
    pub index: usize,
    pub effect: Option<Effect>,
    pub enabled: bool,
}

/// Observable state of a slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotState {
    Empty,
    Enabled,
    Bypassed,
}

impl EffectSlot {
    pub fn empty(index: usize) -> Self {
        Self {
            index,
            effect: None,
            enabled: false,
        }
    }

    /// Slot holding an enabled effect
    pub fn with_effect(index: usize, effect: Effect) -> Self {
        Self {
            index,
            effect: Some(effect),
            enabled: true,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.effect.is_none()
    }

    /// Whether the slot takes part in processing
    pub fn is_active(&self) -> bool {
        self.effect.is_some() && self.enabled
    }

    pub fn state(&self) -> SlotState {
        match (&self.effect, self.enabled) {
            (None, _) => SlotState::Empty,
            (Some(_), true) => SlotState::Enabled,
            (Some(_), false) => SlotState::Bypassed,
        }
    }
}
