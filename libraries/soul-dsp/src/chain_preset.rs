//! Whole-chain presets
//!
//! A chain preset stores the populated effects of a chain in slot order.
//! Loading one clears the chain and installs effect `i` into slot `i`.

use crate::chain::{EffectChain, SLOT_COUNT};
use crate::effect::Effect;
use crate::error::{ChainError, Result};
use crate::settings::{
    CompressorSettings, CrossfeedPreset, CrossfeedSettings, GraphicEqPreset, GraphicEqSettings,
    LimiterSettings,
};
use serde::{Deserialize, Serialize};

/// Chain preset as exchanged with the engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainPreset {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub is_builtin: bool,
    pub effect_chain: Vec<Effect>,
    /// Unix timestamp (seconds)
    pub created_at: i64,
    /// Unix timestamp (seconds)
    pub updated_at: i64,
}

impl ChainPreset {
    /// Chain this preset produces when loaded
    pub fn to_chain(&self) -> Result<EffectChain> {
        if self.effect_chain.len() > SLOT_COUNT {
            return Err(ChainError::TooManyEffects(self.effect_chain.len()));
        }
        let mut chain = EffectChain::new();
        for (index, effect) in self.effect_chain.iter().enumerate() {
            chain.install(index, effect.clone().sanitized())?;
        }
        Ok(chain)
    }
}

/// Presets every engine starts with. Ids 1-3 are reserved for them.
pub fn builtin_chain_presets() -> Vec<ChainPreset> {
    let builtin = |id: i64, name: &str, description: &str, effect_chain: Vec<Effect>| ChainPreset {
        id,
        name: name.to_string(),
        description: Some(description.to_string()),
        is_builtin: true,
        effect_chain,
        created_at: 0,
        updated_at: 0,
    };

    vec![
        builtin(
            1,
            "Headphone Comfort",
            "Natural crossfeed with a safety limiter",
            vec![
                Effect::Crossfeed {
                    settings: CrossfeedSettings::from_preset(CrossfeedPreset::Natural),
                },
                Effect::Limiter {
                    settings: LimiterSettings::default(),
                },
            ],
        ),
        builtin(
            2,
            "Night Listening",
            "Gentle compression to tame loud passages",
            vec![
                Effect::Compressor {
                    settings: CompressorSettings::gentle(),
                },
                Effect::Limiter {
                    settings: LimiterSettings::soft(),
                },
            ],
        ),
        builtin(
            3,
            "Bass Boost",
            "Graphic EQ bass boost with limiting",
            vec![
                Effect::GraphicEq {
                    settings: GraphicEqSettings::from_preset(GraphicEqPreset::BassBoost),
                },
                Effect::Limiter {
                    settings: LimiterSettings::brickwall(),
                },
            ],
        ),
    ]
}
