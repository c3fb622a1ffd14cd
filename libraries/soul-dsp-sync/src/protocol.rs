//! Named calls and request bodies shared by every backend transport
//!
//! Bodies use camelCase field names. Calls without a request body take no
//! JSON at all; calls without a response return no content.

use serde::{Deserialize, Serialize};
use soul_dsp::{Effect, SLOT_COUNT};
use uuid::Uuid;

pub const GET_DSP_CHAIN: &str = "get_dsp_chain";
pub const ADD_EFFECT_TO_CHAIN: &str = "add_effect_to_chain";
pub const REMOVE_EFFECT_FROM_CHAIN: &str = "remove_effect_from_chain";
pub const TOGGLE_EFFECT: &str = "toggle_effect";
pub const UPDATE_EFFECT_PARAMETERS: &str = "update_effect_parameters";
pub const CLEAR_DSP_CHAIN: &str = "clear_dsp_chain";
pub const GET_AVAILABLE_EFFECTS: &str = "get_available_effects";
pub const GET_EQ_PRESETS: &str = "get_eq_presets";
pub const GET_COMPRESSOR_PRESETS: &str = "get_compressor_presets";
pub const GET_LIMITER_PRESETS: &str = "get_limiter_presets";
pub const GET_CROSSFEED_PRESETS: &str = "get_crossfeed_presets";
pub const GET_STEREO_PRESETS: &str = "get_stereo_presets";
pub const GET_GRAPHIC_EQ_PRESETS: &str = "get_graphic_eq_presets";
pub const GET_DSP_CHAIN_PRESETS: &str = "get_dsp_chain_presets";
pub const SAVE_DSP_CHAIN_PRESET: &str = "save_dsp_chain_preset";
pub const DELETE_DSP_CHAIN_PRESET: &str = "delete_dsp_chain_preset";
pub const LOAD_DSP_CHAIN_PRESET: &str = "load_dsp_chain_preset";

/// Ordering stamp attached to parameter writes.
///
/// Sequence numbers increase per slot within one session. A backend drops a
/// write whose `seq` is not greater than the last one it applied from the
/// same session to the same slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStamp {
    pub session: Uuid,
    pub seq: u64,
}

impl UpdateStamp {
    /// Whether this write must be dropped given the last applied stamp
    pub fn is_stale_after(&self, last: Option<&UpdateStamp>) -> bool {
        matches!(last, Some(last) if last.session == self.session && self.seq <= last.seq)
    }
}

/// Per-slot sequence counters for one session
#[derive(Debug, Clone)]
pub struct StampSequencer {
    session: Uuid,
    next: [u64; SLOT_COUNT],
}

impl StampSequencer {
    pub fn new() -> Self {
        Self::with_session(Uuid::new_v4())
    }

    pub fn with_session(session: Uuid) -> Self {
        Self {
            session,
            next: [0; SLOT_COUNT],
        }
    }

    pub fn session(&self) -> Uuid {
        self.session
    }

    /// Next stamp for a slot. Sequence numbers start at 1.
    pub fn next(&mut self, slot_index: usize) -> Option<UpdateStamp> {
        let counter = self.next.get_mut(slot_index)?;
        *counter += 1;
        Some(UpdateStamp {
            session: self.session,
            seq: *counter,
        })
    }
}

impl Default for StampSequencer {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotRequest {
    pub slot_index: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddEffectRequest {
    pub slot_index: usize,
    pub effect: Effect,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleEffectRequest {
    pub slot_index: usize,
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEffectRequest {
    pub slot_index: usize,
    pub effect: Effect,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stamp: Option<UpdateStamp>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavePresetRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub effect_chain: Vec<Effect>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresetIdRequest {
    pub preset_id: i64,
}
