//! Chain backend contract
//!
//! One method per named call. The engine in this crate implements it in
//! process; `soul-dsp-client` implements it over HTTP.

use crate::error::Result;
use crate::protocol::UpdateStamp;
use async_trait::async_trait;
use soul_dsp::{
    ChainPreset, CompressorSettings, CrossfeedSettings, Effect, EffectSlot, EqBand,
    GraphicEqSettings, LimiterSettings, StereoSettings,
};

/// Authoritative owner of the effect chain
#[async_trait]
pub trait ChainBackend: Send + Sync {
    /// Full chain snapshot, one entry per slot
    async fn get_dsp_chain(&self) -> Result<Vec<EffectSlot>>;

    /// Install an effect (enabled) into a slot, replacing anything there
    async fn add_effect_to_chain(&self, slot_index: usize, effect: Effect) -> Result<()>;

    async fn remove_effect_from_chain(&self, slot_index: usize) -> Result<()>;

    async fn toggle_effect(&self, slot_index: usize, enabled: bool) -> Result<()>;

    /// Replace the payload of a populated slot, keeping its enabled flag
    async fn update_effect_parameters(
        &self,
        slot_index: usize,
        effect: Effect,
        stamp: Option<UpdateStamp>,
    ) -> Result<()>;

    async fn clear_dsp_chain(&self) -> Result<()>;

    /// Wire tags of the effect types the backend can host
    async fn get_available_effects(&self) -> Result<Vec<String>>;

    async fn get_eq_presets(&self) -> Result<Vec<(String, Vec<EqBand>)>>;

    async fn get_compressor_presets(&self) -> Result<Vec<(String, CompressorSettings)>>;

    async fn get_limiter_presets(&self) -> Result<Vec<(String, LimiterSettings)>>;

    async fn get_crossfeed_presets(&self) -> Result<Vec<(String, CrossfeedSettings)>>;

    async fn get_stereo_presets(&self) -> Result<Vec<(String, StereoSettings)>>;

    async fn get_graphic_eq_presets(&self) -> Result<Vec<(String, GraphicEqSettings)>>;

    async fn get_dsp_chain_presets(&self) -> Result<Vec<ChainPreset>>;

    /// Save (or overwrite by name) a user chain preset, returning its id
    async fn save_dsp_chain_preset(
        &self,
        name: String,
        description: Option<String>,
        effect_chain: Vec<Effect>,
    ) -> Result<i64>;

    async fn delete_dsp_chain_preset(&self, preset_id: i64) -> Result<()>;

    /// Clear the chain, then install the preset's effects into slots 0..n
    async fn load_dsp_chain_preset(&self, preset_id: i64) -> Result<()>;
}
