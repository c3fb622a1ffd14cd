//! Crossfeed (Bauer stereophonic-to-binaural) settings
//!
//! Selecting a named preset snaps level and cutoff to that preset's values.
//! Moving level or cutoff by hand re-checks the presets and labels the
//! settings "custom" unless the new values land on one of them.

use crate::param::ParamRange;
use crate::presets::{approx_eq, FREQUENCY_EPSILON_HZ, GAIN_EPSILON_DB};
use serde::{Deserialize, Serialize};

pub const LEVEL_RANGE: ParamRange = ParamRange::linear(-10.0, 0.0);
pub const CUTOFF_RANGE: ParamRange = ParamRange::linear(300.0, 2000.0);

/// Crossfeed preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CrossfeedPreset {
    /// Subtle crossfeed for a more natural soundstage
    /// Level: -4.5 dB, Cutoff: 700 Hz
    #[default]
    Natural,

    /// Moderate crossfeed for casual listening
    /// Level: -6 dB, Cutoff: 650 Hz
    Relaxed,

    /// Based on Jan Meier's crossfeed
    /// Level: -9 dB, Cutoff: 550 Hz
    Meier,

    /// User-defined settings
    Custom,
}

impl CrossfeedPreset {
    /// Presets with fixed values (everything except `Custom`)
    pub const NAMED: [CrossfeedPreset; 3] = [Self::Natural, Self::Relaxed, Self::Meier];

    pub fn level_db(&self) -> f32 {
        match self {
            Self::Natural => -4.5,
            Self::Relaxed => -6.0,
            Self::Meier => -9.0,
            Self::Custom => -6.0,
        }
    }

    pub fn cutoff_hz(&self) -> f32 {
        match self {
            Self::Natural => 700.0,
            Self::Relaxed => 650.0,
            Self::Meier => 550.0,
            Self::Custom => 650.0,
        }
    }

    /// Wire name ("natural", "relaxed", "meier", "custom")
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Natural => "natural",
            Self::Relaxed => "relaxed",
            Self::Meier => "meier",
            Self::Custom => "custom",
        }
    }

    /// Parse a wire name; anything unknown is treated as custom
    pub fn from_name(name: &str) -> Self {
        match name {
            "natural" => Self::Natural,
            "relaxed" => Self::Relaxed,
            "meier" => Self::Meier,
            _ => Self::Custom,
        }
    }
}

/// Crossfeed payload as exchanged with the engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrossfeedSettings {
    pub preset: String,
    /// Crossfeed level in dB (-10 to 0)
    pub level_db: f32,
    /// Low-pass cutoff in Hz (300 to 2000)
    pub cutoff_hz: f32,
}

impl Default for CrossfeedSettings {
    fn default() -> Self {
        Self::from_preset(CrossfeedPreset::Natural)
    }
}

impl CrossfeedSettings {
    pub fn from_preset(preset: CrossfeedPreset) -> Self {
        Self {
            preset: preset.as_str().to_string(),
            level_db: preset.level_db(),
            cutoff_hz: preset.cutoff_hz(),
        }
    }

    /// Select a preset. Named presets snap level and cutoff; `Custom` only
    /// changes the label and keeps the current values.
    pub fn apply_preset(&mut self, preset: CrossfeedPreset) {
        if preset == CrossfeedPreset::Custom {
            self.preset = preset.as_str().to_string();
        } else {
            *self = Self::from_preset(preset);
        }
    }

    pub fn preset(&self) -> CrossfeedPreset {
        CrossfeedPreset::from_name(&self.preset)
    }

    /// Manual level edit
    pub fn set_level_db(&mut self, level_db: f32) {
        self.level_db = LEVEL_RANGE.clamp(level_db);
        self.relabel();
    }

    /// Manual cutoff edit
    pub fn set_cutoff_hz(&mut self, cutoff_hz: f32) {
        self.cutoff_hz = CUTOFF_RANGE.clamp(cutoff_hz);
        self.relabel();
    }

    /// Named preset matching the current values, if any
    pub fn matching_preset(&self) -> Option<CrossfeedPreset> {
        CrossfeedPreset::NAMED.into_iter().find(|preset| {
            approx_eq(self.level_db, preset.level_db(), GAIN_EPSILON_DB)
                && approx_eq(self.cutoff_hz, preset.cutoff_hz(), FREQUENCY_EPSILON_HZ)
        })
    }

    pub fn relabel(&mut self) {
        self.preset = self
            .matching_preset()
            .unwrap_or(CrossfeedPreset::Custom)
            .as_str()
            .to_string();
    }

    pub fn sanitize(&mut self) {
        self.level_db = LEVEL_RANGE.clamp(self.level_db);
        self.cutoff_hz = CUTOFF_RANGE.clamp(self.cutoff_hz);
        let named = CrossfeedPreset::from_name(&self.preset);
        if named == CrossfeedPreset::Custom {
            self.preset = CrossfeedPreset::Custom.as_str().to_string();
        } else if !(approx_eq(self.level_db, named.level_db(), GAIN_EPSILON_DB)
            && approx_eq(self.cutoff_hz, named.cutoff_hz(), FREQUENCY_EPSILON_HZ))
        {
            // Label no longer describes the values
            self.relabel();
        }
    }
}

/// Named crossfeed presets as `(name, settings)` pairs
pub fn crossfeed_presets() -> Vec<(String, CrossfeedSettings)> {
    CrossfeedPreset::NAMED
        .iter()
        .map(|preset| {
            (
                preset.as_str().to_string(),
                CrossfeedSettings::from_preset(*preset),
            )
        })
        .collect()
}
