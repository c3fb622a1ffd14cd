//! 10-band graphic equalizer
//!
//! Bands sit at the ISO octave centre frequencies with per-band gain of
//! -12 to +12 dB. The `preset` field names the preset the gains came from,
//! or "Custom" once they have been edited away from every preset.

use crate::error::{ChainError, Result};
use crate::param::ParamRange;
use crate::presets::{find_preset, gains_match, normalize_gains, CUSTOM_LABEL, GAIN_EPSILON_DB};
use serde::{Deserialize, Serialize};

/// Number of bands in the graphic EQ
pub const BAND_COUNT: usize = 10;

/// 10-band ISO standard frequencies (Hz)
pub const ISO_10_BAND_FREQUENCIES: [f32; BAND_COUNT] = [
    31.5, 63.0, 125.0, 250.0, 500.0, 1000.0, 2000.0, 4000.0, 8000.0, 16000.0,
];

pub const GAIN_RANGE: ParamRange = ParamRange::linear(-12.0, 12.0);

/// Built-in graphic EQ presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GraphicEqPreset {
    /// All bands at 0 dB
    #[default]
    Flat,
    BassBoost,
    TrebleBoost,
    /// Boosted lows and highs, reduced mids
    VShape,
    Vocal,
    Rock,
    Electronic,
    Acoustic,
}

impl GraphicEqPreset {
    pub const ALL: [GraphicEqPreset; 8] = [
        Self::Flat,
        Self::BassBoost,
        Self::TrebleBoost,
        Self::VShape,
        Self::Vocal,
        Self::Rock,
        Self::Electronic,
        Self::Acoustic,
    ];

    /// Gain values for this preset
    pub fn gains(&self) -> [f32; BAND_COUNT] {
        match self {
            Self::Flat => [0.0; BAND_COUNT],
            Self::BassBoost => [6.0, 5.0, 4.0, 2.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
            Self::TrebleBoost => [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 2.0, 4.0, 5.0, 6.0],
            Self::VShape => [5.0, 4.0, 2.0, -1.0, -2.0, -2.0, -1.0, 2.0, 4.0, 5.0],
            Self::Vocal => [-2.0, -1.0, 0.0, 2.0, 4.0, 4.0, 2.0, 0.0, -1.0, -2.0],
            Self::Rock => [4.0, 3.0, 1.0, 0.0, -1.0, 0.0, 1.0, 3.0, 4.0, 4.0],
            Self::Electronic => [5.0, 4.0, 2.0, 0.0, 1.0, 2.0, 1.0, 3.0, 4.0, 4.0],
            Self::Acoustic => [2.0, 1.0, 0.0, 1.0, 2.0, 2.0, 1.0, 2.0, 2.0, 1.0],
        }
    }

    /// Display name, also used as the `preset` label
    pub fn name(&self) -> &'static str {
        match self {
            Self::Flat => "Flat",
            Self::BassBoost => "Bass Boost",
            Self::TrebleBoost => "Treble Boost",
            Self::VShape => "V-Shape",
            Self::Vocal => "Vocal",
            Self::Rock => "Rock",
            Self::Electronic => "Electronic",
            Self::Acoustic => "Acoustic",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|preset| preset.name() == name)
    }
}

/// Graphic EQ payload as exchanged with the engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphicEqSettings {
    pub preset: String,
    pub band_count: u8,
    pub gains: Vec<f32>,
}

impl Default for GraphicEqSettings {
    fn default() -> Self {
        Self::from_preset(GraphicEqPreset::Flat)
    }
}

impl GraphicEqSettings {
    pub fn from_preset(preset: GraphicEqPreset) -> Self {
        Self {
            preset: preset.name().to_string(),
            band_count: BAND_COUNT as u8,
            gains: preset.gains().to_vec(),
        }
    }

    /// Gains as exactly ten bands.
    ///
    /// Payloads from older engines or hand-written presets may carry fewer or
    /// more entries; short lists are padded with 0 dB and long ones truncated.
    pub fn effective_gains(&self) -> [f32; BAND_COUNT] {
        let mut gains = [0.0; BAND_COUNT];
        for (slot, gain) in gains
            .iter_mut()
            .zip(normalize_gains(&self.gains, BAND_COUNT))
        {
            *slot = GAIN_RANGE.clamp(gain);
        }
        gains
    }

    /// Rewrite the payload into canonical 10-band form
    pub fn normalize(&mut self) {
        self.gains = self.effective_gains().to_vec();
        self.band_count = BAND_COUNT as u8;
    }

    /// Snap all gains to a preset
    pub fn apply_preset(&mut self, preset: GraphicEqPreset) {
        *self = Self::from_preset(preset);
    }

    /// Set one band's gain and relabel against the built-in presets
    pub fn set_band_gain(&mut self, band: usize, gain_db: f32) -> Result<()> {
        if band >= BAND_COUNT {
            return Err(ChainError::invalid_parameter(format!(
                "Graphic EQ band {band} does not exist"
            )));
        }
        self.normalize();
        self.gains[band] = GAIN_RANGE.clamp(gain_db);
        self.relabel();
        Ok(())
    }

    /// Replace all gains and relabel against the built-in presets
    pub fn set_gains(&mut self, gains: &[f32]) {
        self.gains = gains.to_vec();
        self.normalize();
        self.relabel();
    }

    /// Relabel against the built-in preset table
    pub fn relabel(&mut self) {
        self.relabel_with(&graphic_eq_presets());
    }

    /// Relabel against an arbitrary preset table (e.g. one fetched from the engine).
    ///
    /// Entries in the table may have any number of gains; both sides are
    /// normalized to ten bands before comparing.
    pub fn relabel_with(&mut self, presets: &[(String, GraphicEqSettings)]) {
        self.preset = self.match_label(presets);
    }

    /// Name of the first preset whose gains match within [`GAIN_EPSILON_DB`]
    pub fn match_label(&self, presets: &[(String, GraphicEqSettings)]) -> String {
        find_preset(presets, |candidate| {
            gains_match(&self.gains, &candidate.gains, BAND_COUNT, GAIN_EPSILON_DB)
        })
        .unwrap_or(CUSTOM_LABEL)
        .to_string()
    }

    pub fn is_custom(&self) -> bool {
        self.preset == CUSTOM_LABEL
    }
}

/// Built-in graphic EQ presets as `(name, settings)` pairs
pub fn graphic_eq_presets() -> Vec<(String, GraphicEqSettings)> {
    GraphicEqPreset::ALL
        .iter()
        .map(|preset| (preset.name().to_string(), GraphicEqSettings::from_preset(*preset)))
        .collect()
}
