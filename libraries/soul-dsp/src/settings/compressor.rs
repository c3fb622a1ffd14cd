/// Dynamic range compressor settings
///
/// A ratio at or above [`RATIO_INFINITY`] is shown as an infinite ratio
/// (limiting), but the payload always carries the finite value.
use crate::param::ParamRange;
use crate::presets::{approx_eq, find_preset, GAIN_EPSILON_DB, TIME_EPSILON_MS};
use serde::{Deserialize, Serialize};

/// Ratio value treated as ∞:1
pub const RATIO_INFINITY: f32 = 20.0;

pub const THRESHOLD_RANGE: ParamRange = ParamRange::linear(-60.0, 0.0);
pub const RATIO_RANGE: ParamRange = ParamRange::linear(1.0, RATIO_INFINITY);
pub const ATTACK_RANGE: ParamRange = ParamRange::logarithmic(0.1, 100.0);
pub const RELEASE_RANGE: ParamRange = ParamRange::logarithmic(10.0, 1000.0);
pub const KNEE_RANGE: ParamRange = ParamRange::linear(0.0, 12.0);
pub const MAKEUP_GAIN_RANGE: ParamRange = ParamRange::linear(0.0, 24.0);

/// Compressor settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompressorSettings {
    /// Threshold in dB (-60 to 0)
    pub threshold_db: f32,

    /// Ratio (1.0 to 20.0, 20 = ∞)
    pub ratio: f32,

    /// Attack time in milliseconds (0.1 to 100)
    pub attack_ms: f32,

    /// Release time in milliseconds (10 to 1000)
    pub release_ms: f32,

    /// Knee width in dB (0 to 12)
    pub knee_db: f32,

    /// Makeup gain in dB (0 to 24)
    pub makeup_gain_db: f32,
}

impl Default for CompressorSettings {
    /// Defaults used when a compressor is added to a slot
    /// - Threshold: -20 dB
    /// - Ratio: 4:1
    /// - Attack: 10 ms
    /// - Release: 100 ms
    /// - Knee: 2 dB
    /// - Makeup gain: 0 dB
    fn default() -> Self {
        Self {
            threshold_db: -20.0,
            ratio: 4.0,
            attack_ms: 10.0,
            release_ms: 100.0,
            knee_db: 2.0,
            makeup_gain_db: 0.0,
        }
    }
}

impl CompressorSettings {
    /// Gentle compression (vocals, acoustic)
    pub fn gentle() -> Self {
        Self {
            threshold_db: -15.0,
            ratio: 2.5,
            attack_ms: 10.0,
            release_ms: 100.0,
            knee_db: 8.0,
            makeup_gain_db: 3.0,
        }
    }

    /// Moderate compression (mix bus)
    pub fn moderate() -> Self {
        Self {
            threshold_db: -18.0,
            ratio: 4.0,
            attack_ms: 5.0,
            release_ms: 50.0,
            knee_db: 6.0,
            makeup_gain_db: 4.0,
        }
    }

    /// Aggressive compression
    pub fn aggressive() -> Self {
        Self {
            threshold_db: -12.0,
            ratio: 10.0,
            attack_ms: 1.0,
            release_ms: 30.0,
            knee_db: 2.0,
            makeup_gain_db: 6.0,
        }
    }

    /// Clamp settings to safe ranges
    pub fn sanitize(&mut self) {
        self.threshold_db = THRESHOLD_RANGE.clamp(self.threshold_db);
        self.ratio = RATIO_RANGE.clamp(self.ratio);
        self.attack_ms = ATTACK_RANGE.clamp(self.attack_ms);
        self.release_ms = RELEASE_RANGE.clamp(self.release_ms);
        self.knee_db = KNEE_RANGE.clamp(self.knee_db);
        self.makeup_gain_db = MAKEUP_GAIN_RANGE.clamp(self.makeup_gain_db);
    }

    pub fn is_infinite_ratio(&self) -> bool {
        self.ratio >= RATIO_INFINITY
    }

    /// Ratio as shown to the user ("4.0:1", "∞:1")
    pub fn ratio_label(&self) -> String {
        if self.is_infinite_ratio() {
            "∞:1".to_string()
        } else {
            format!("{:.1}:1", self.ratio)
        }
    }

    fn matches(&self, other: &Self) -> bool {
        approx_eq(self.threshold_db, other.threshold_db, GAIN_EPSILON_DB)
            && approx_eq(self.ratio, other.ratio, GAIN_EPSILON_DB)
            && approx_eq(self.attack_ms, other.attack_ms, TIME_EPSILON_MS)
            && approx_eq(self.release_ms, other.release_ms, TIME_EPSILON_MS)
            && approx_eq(self.knee_db, other.knee_db, GAIN_EPSILON_DB)
            && approx_eq(self.makeup_gain_db, other.makeup_gain_db, GAIN_EPSILON_DB)
    }

    /// Name of the matching preset in `presets`, if any
    pub fn matching_preset<'a>(&self, presets: &'a [(String, CompressorSettings)]) -> Option<&'a str> {
        find_preset(presets, |candidate| self.matches(candidate))
    }
}

/// Built-in compressor presets
pub fn compressor_presets() -> Vec<(String, CompressorSettings)> {
    vec![
        ("Gentle".to_string(), CompressorSettings::gentle()),
        ("Moderate".to_string(), CompressorSettings::moderate()),
        ("Aggressive".to_string(), CompressorSettings::aggressive()),
    ]
}
