//! Effect variants
//!
//! [`Effect`] is the tagged union stored in a chain slot. On the wire it is a
//! JSON object discriminated by `type`:
//!
//! ```json
//! { "type": "limiter", "settings": { "thresholdDb": -0.3, "releaseMs": 50.0 } }
//! { "type": "eq", "bands": [{ "frequency": 100.0, "gain": 0.0, "q": 1.0 }] }
//! ```
//!
//! Default payloads for every type come from one place,
//! [`EffectKind::default_effect`], so adding an effect and resetting one to
//! defaults always agree.

use crate::error::ChainError;
use crate::settings::{
    compressor_presets, eq, limiter_presets, stereo_presets, CompressorSettings,
    ConvolutionSettings, CrossfeedSettings, EqBand, GraphicEqSettings, LimiterSettings,
    StereoSettings,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Effect type tag without a payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectKind {
    Eq,
    GraphicEq,
    Compressor,
    Limiter,
    Crossfeed,
    Stereo,
    Convolution,
}

impl EffectKind {
    pub const ALL: [EffectKind; 7] = [
        Self::Eq,
        Self::GraphicEq,
        Self::Compressor,
        Self::Limiter,
        Self::Crossfeed,
        Self::Stereo,
        Self::Convolution,
    ];

    /// Wire tag
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Eq => "eq",
            Self::GraphicEq => "graphic_eq",
            Self::Compressor => "compressor",
            Self::Limiter => "limiter",
            Self::Crossfeed => "crossfeed",
            Self::Stereo => "stereo",
            Self::Convolution => "convolution",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Eq => "Parametric EQ",
            Self::GraphicEq => "Graphic EQ",
            Self::Compressor => "Compressor",
            Self::Limiter => "Limiter",
            Self::Crossfeed => "Crossfeed",
            Self::Stereo => "Stereo Enhancer",
            Self::Convolution => "Convolution Reverb",
        }
    }

    /// Default payload for a freshly added effect of this type
    pub fn default_effect(self) -> Effect {
        match self {
            Self::Eq => Effect::Eq {
                bands: eq::default_bands(),
            },
            Self::GraphicEq => Effect::GraphicEq {
                settings: GraphicEqSettings::default(),
            },
            Self::Compressor => Effect::Compressor {
                settings: CompressorSettings::default(),
            },
            Self::Limiter => Effect::Limiter {
                settings: LimiterSettings::default(),
            },
            Self::Crossfeed => Effect::Crossfeed {
                settings: CrossfeedSettings::default(),
            },
            Self::Stereo => Effect::Stereo {
                settings: StereoSettings::default(),
            },
            Self::Convolution => Effect::Convolution {
                settings: ConvolutionSettings::default(),
            },
        }
    }
}

impl fmt::Display for EffectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EffectKind {
    type Err = ChainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ChainError::UnknownEffect(s.to_string()))
    }
}

/// Effect configuration held by a chain slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Effect {
    #[serde(rename = "eq")]
    Eq { bands: Vec<EqBand> },
    #[serde(rename = "graphic_eq")]
    GraphicEq { settings: GraphicEqSettings },
    #[serde(rename = "compressor")]
    Compressor { settings: CompressorSettings },
    #[serde(rename = "limiter")]
    Limiter { settings: LimiterSettings },
    #[serde(rename = "crossfeed")]
    Crossfeed { settings: CrossfeedSettings },
    #[serde(rename = "stereo")]
    Stereo { settings: StereoSettings },
    #[serde(rename = "convolution")]
    Convolution { settings: ConvolutionSettings },
}

impl Effect {
    pub fn kind(&self) -> EffectKind {
        match self {
            Self::Eq { .. } => EffectKind::Eq,
            Self::GraphicEq { .. } => EffectKind::GraphicEq,
            Self::Compressor { .. } => EffectKind::Compressor,
            Self::Limiter { .. } => EffectKind::Limiter,
            Self::Crossfeed { .. } => EffectKind::Crossfeed,
            Self::Stereo { .. } => EffectKind::Stereo,
            Self::Convolution { .. } => EffectKind::Convolution,
        }
    }

    /// Clamp every parameter into range and canonicalize shapes
    /// (EQ band count, 10 graphic EQ gains, crossfeed preset name).
    pub fn sanitize(&mut self) {
        match self {
            Self::Eq { bands } => eq::sanitize_bands(bands),
            Self::GraphicEq { settings } => settings.normalize(),
            Self::Compressor { settings } => settings.sanitize(),
            Self::Limiter { settings } => settings.sanitize(),
            Self::Crossfeed { settings } => settings.sanitize(),
            Self::Stereo { settings } => settings.sanitize(),
            Self::Convolution { settings } => settings.sanitize(),
        }
    }

    pub fn sanitized(mut self) -> Self {
        self.sanitize();
        self
    }

    /// Replace the payload with the defaults for its type
    pub fn reset_to_default(&mut self) {
        *self = self.kind().default_effect();
    }

    /// Cosmetic preset label shown next to the effect, if the type has one
    pub fn preset_label(&self) -> Option<String> {
        match self {
            Self::Eq { .. } => None,
            Self::GraphicEq { settings } => Some(settings.preset.clone()),
            Self::Crossfeed { settings } => Some(settings.preset.clone()),
            Self::Stereo { settings } => Some(settings.preset_label(&stereo_presets())),
            Self::Compressor { settings } => settings
                .matching_preset(&compressor_presets())
                .map(str::to_string),
            Self::Limiter { settings } => settings
                .matching_preset(&limiter_presets())
                .map(str::to_string),
            Self::Convolution { settings } => Some(settings.ir_label()),
        }
    }

    /// One-line description of the effect's parameters
    pub fn summary(&self) -> String {
        match self {
            Self::Eq { bands } => {
                let bands: Vec<String> = bands
                    .iter()
                    .map(|b| format!("{:.0} Hz {:+.1} dB", b.frequency, b.gain))
                    .collect();
                format!("{} bands: {}", bands.len(), bands.join(", "))
            }
            Self::GraphicEq { settings } => {
                let gains: Vec<String> = settings
                    .effective_gains()
                    .iter()
                    .map(|g| format!("{g:+.1}"))
                    .collect();
                format!("{} [{}]", settings.preset, gains.join(" "))
            }
            Self::Compressor { settings } => format!(
                "threshold {:.1} dB, ratio {}, attack {:.1} ms, release {:.0} ms, knee {:.1} dB, makeup {:.1} dB",
                settings.threshold_db,
                settings.ratio_label(),
                settings.attack_ms,
                settings.release_ms,
                settings.knee_db,
                settings.makeup_gain_db
            ),
            Self::Limiter { settings } => format!(
                "ceiling {:.1} dB, release {:.0} ms",
                settings.threshold_db, settings.release_ms
            ),
            Self::Crossfeed { settings } => format!(
                "{}: level {:.1} dB, cutoff {:.0} Hz",
                settings.preset, settings.level_db, settings.cutoff_hz
            ),
            Self::Stereo { settings } => format!(
                "width {:.0}%, mid {:+.1} dB, side {:+.1} dB, balance {:+.2}",
                settings.width * 100.0,
                settings.mid_gain_db,
                settings.side_gain_db,
                settings.balance
            ),
            Self::Convolution { settings } => format!(
                "{}: mix {:.0}%, pre-delay {:.0} ms, decay {:.2}x",
                settings.ir_label(),
                settings.wet_dry_mix * 100.0,
                settings.pre_delay_ms,
                settings.decay
            ),
        }
    }
}
