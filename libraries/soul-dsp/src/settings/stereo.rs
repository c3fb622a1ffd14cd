//! Stereo enhancer settings
//!
//! Width (0.0 = mono, 1.0 = unity, 2.0 = extra wide), mid/side gain and
//! balance. The wire payload has no preset field; the preset label is
//! computed from the values.

use crate::param::ParamRange;
use crate::presets::{approx_eq, find_preset, CUSTOM_LABEL, GAIN_EPSILON_DB, NORMALIZED_EPSILON};
use serde::{Deserialize, Serialize};

pub const WIDTH_RANGE: ParamRange = ParamRange::linear(0.0, 2.0);
pub const MID_SIDE_GAIN_RANGE: ParamRange = ParamRange::linear(-12.0, 12.0);
pub const BALANCE_RANGE: ParamRange = ParamRange::linear(-1.0, 1.0);

/// Stereo enhancer settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StereoSettings {
    pub width: f32,
    pub mid_gain_db: f32,
    pub side_gain_db: f32,
    /// -1.0 = full left, 0.0 = center, 1.0 = full right
    pub balance: f32,
}

impl Default for StereoSettings {
    fn default() -> Self {
        Self {
            width: 1.0,
            mid_gain_db: 0.0,
            side_gain_db: 0.0,
            balance: 0.0,
        }
    }
}

impl StereoSettings {
    pub fn with_width(width: f32) -> Self {
        Self {
            width: WIDTH_RANGE.clamp(width),
            ..Default::default()
        }
    }

    pub fn mono() -> Self {
        Self::with_width(0.0)
    }

    pub fn wide() -> Self {
        Self::with_width(1.5)
    }

    pub fn extra_wide() -> Self {
        Self::with_width(2.0)
    }

    pub fn sanitize(&mut self) {
        self.width = WIDTH_RANGE.clamp(self.width);
        self.mid_gain_db = MID_SIDE_GAIN_RANGE.clamp(self.mid_gain_db);
        self.side_gain_db = MID_SIDE_GAIN_RANGE.clamp(self.side_gain_db);
        self.balance = BALANCE_RANGE.clamp(self.balance);
    }

    fn matches(&self, other: &Self) -> bool {
        approx_eq(self.width, other.width, NORMALIZED_EPSILON)
            && approx_eq(self.balance, other.balance, NORMALIZED_EPSILON)
            && approx_eq(self.mid_gain_db, other.mid_gain_db, GAIN_EPSILON_DB)
            && approx_eq(self.side_gain_db, other.side_gain_db, GAIN_EPSILON_DB)
    }

    /// Label against a preset table, "Custom" when nothing matches
    pub fn preset_label(&self, presets: &[(String, StereoSettings)]) -> String {
        find_preset(presets, |candidate| self.matches(candidate))
            .unwrap_or(CUSTOM_LABEL)
            .to_string()
    }
}

/// Built-in stereo presets
pub fn stereo_presets() -> Vec<(String, StereoSettings)> {
    vec![
        ("Normal".to_string(), StereoSettings::default()),
        ("Mono".to_string(), StereoSettings::mono()),
        ("Narrow".to_string(), StereoSettings::with_width(0.5)),
        ("Wide".to_string(), StereoSettings::wide()),
        ("Extra Wide".to_string(), StereoSettings::extra_wide()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_clamps_all_fields() {
        let mut settings = StereoSettings {
            width: 5.0,
            mid_gain_db: 20.0,
            side_gain_db: -20.0,
            balance: 2.0,
        };
        settings.sanitize();
        assert_eq!(settings.width, 2.0);
        assert_eq!(settings.mid_gain_db, 12.0);
        assert_eq!(settings.side_gain_db, -12.0);
        assert_eq!(settings.balance, 1.0);
    }

    #[test]
    fn width_uses_normalized_tolerance() {
        let presets = stereo_presets();
        let close = StereoSettings::with_width(1.505);
        assert_eq!(close.preset_label(&presets), "Wide");

        // 0.05 is inside the dB tolerance but outside the normalized one
        let off = StereoSettings::with_width(1.55);
        assert_eq!(off.preset_label(&presets), "Custom");
    }

    #[test]
    fn balance_change_is_custom() {
        let presets = stereo_presets();
        let settings = StereoSettings {
            balance: -0.2,
            ..Default::default()
        };
        assert_eq!(settings.preset_label(&presets), "Custom");
    }
}
