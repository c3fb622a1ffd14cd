/// Brick-wall limiter settings
///
/// The threshold is presented to the user as the output "ceiling".
use crate::param::ParamRange;
use crate::presets::{approx_eq, find_preset, GAIN_EPSILON_DB, TIME_EPSILON_MS};
use serde::{Deserialize, Serialize};

pub const THRESHOLD_RANGE: ParamRange = ParamRange::linear(-12.0, 0.0);
pub const RELEASE_RANGE: ParamRange = ParamRange::logarithmic(10.0, 1000.0);

/// Limiter settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LimiterSettings {
    /// Ceiling in dB (-12 to 0)
    pub threshold_db: f32,
    /// Release time in milliseconds (10 to 1000)
    pub release_ms: f32,
}

impl Default for LimiterSettings {
    fn default() -> Self {
        Self {
            threshold_db: -0.3,
            release_ms: 50.0,
        }
    }
}

impl LimiterSettings {
    /// Aggressive brick-wall limiting
    pub fn brickwall() -> Self {
        Self {
            threshold_db: -0.1,
            release_ms: 100.0,
        }
    }

    /// Soft limiting (more transparent)
    pub fn soft() -> Self {
        Self {
            threshold_db: -1.0,
            release_ms: 200.0,
        }
    }

    pub fn sanitize(&mut self) {
        self.threshold_db = THRESHOLD_RANGE.clamp(self.threshold_db);
        self.release_ms = RELEASE_RANGE.clamp(self.release_ms);
    }

    pub fn matching_preset<'a>(&self, presets: &'a [(String, LimiterSettings)]) -> Option<&'a str> {
        find_preset(presets, |candidate| {
            approx_eq(self.threshold_db, candidate.threshold_db, GAIN_EPSILON_DB)
                && approx_eq(self.release_ms, candidate.release_ms, TIME_EPSILON_MS)
        })
    }
}

/// Built-in limiter presets
pub fn limiter_presets() -> Vec<(String, LimiterSettings)> {
    vec![
        ("Soft".to_string(), LimiterSettings::soft()),
        ("Default".to_string(), LimiterSettings::default()),
        ("Brickwall".to_string(), LimiterSettings::brickwall()),
    ]
}
