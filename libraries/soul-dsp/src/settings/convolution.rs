//! Convolution reverb settings
//!
//! The impulse response is referenced by path. An empty path means no IR is
//! loaded; built-in IRs use the `bundled://presets/<id>.wav` pseudo-path.

use crate::error::{ChainError, Result};
use crate::param::ParamRange;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Pseudo-path prefix for impulse responses shipped with the engine
pub const BUNDLED_IR_PREFIX: &str = "bundled://presets/";
const BUNDLED_IR_EXTENSION: &str = ".wav";

pub const WET_DRY_RANGE: ParamRange = ParamRange::linear(0.0, 1.0);
pub const PRE_DELAY_RANGE: ParamRange = ParamRange::linear(0.0, 100.0);
pub const DECAY_RANGE: ParamRange = ParamRange::linear(0.5, 2.0);

/// Impulse response shipped with the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BundledImpulseResponse {
    pub id: &'static str,
    pub name: &'static str,
}

pub const BUNDLED_IMPULSE_RESPONSES: &[BundledImpulseResponse] = &[
    BundledImpulseResponse {
        id: "small-room",
        name: "Small Room",
    },
    BundledImpulseResponse {
        id: "medium-room",
        name: "Medium Room",
    },
    BundledImpulseResponse {
        id: "large-hall",
        name: "Large Hall",
    },
    BundledImpulseResponse {
        id: "plate",
        name: "Plate",
    },
    BundledImpulseResponse {
        id: "cathedral",
        name: "Cathedral",
    },
];

/// Where a convolution slot's impulse response comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImpulseSource<'a> {
    Unloaded,
    Bundled(&'a str),
    File(&'a Path),
}

/// Convolution payload as exchanged with the engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvolutionSettings {
    pub ir_file_path: String,
    /// 0.0 = dry only, 1.0 = wet only
    pub wet_dry_mix: f32,
    pub pre_delay_ms: f32,
    /// Decay multiplier (0.5 to 2.0)
    pub decay: f32,
}

impl Default for ConvolutionSettings {
    fn default() -> Self {
        Self {
            ir_file_path: String::new(),
            wet_dry_mix: 0.3,
            pre_delay_ms: 0.0,
            decay: 1.0,
        }
    }
}

impl ConvolutionSettings {
    /// Pseudo-path for a bundled impulse response
    pub fn bundled_path(id: &str) -> String {
        format!("{BUNDLED_IR_PREFIX}{id}{BUNDLED_IR_EXTENSION}")
    }

    /// Point the slot at a bundled impulse response
    pub fn use_bundled(&mut self, id: &str) -> Result<()> {
        if !BUNDLED_IMPULSE_RESPONSES.iter().any(|ir| ir.id == id) {
            return Err(ChainError::invalid_parameter(format!(
                "Unknown bundled impulse response: {id}"
            )));
        }
        self.ir_file_path = Self::bundled_path(id);
        Ok(())
    }

    pub fn source(&self) -> ImpulseSource<'_> {
        if self.ir_file_path.is_empty() {
            return ImpulseSource::Unloaded;
        }
        match self.ir_file_path.strip_prefix(BUNDLED_IR_PREFIX) {
            Some(rest) => {
                ImpulseSource::Bundled(rest.strip_suffix(BUNDLED_IR_EXTENSION).unwrap_or(rest))
            }
            None => ImpulseSource::File(Path::new(&self.ir_file_path)),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.source() != ImpulseSource::Unloaded
    }

    /// Human-readable name of the impulse response
    pub fn ir_label(&self) -> String {
        match self.source() {
            ImpulseSource::Unloaded => "No impulse response".to_string(),
            ImpulseSource::Bundled(id) => BUNDLED_IMPULSE_RESPONSES
                .iter()
                .find(|ir| ir.id == id)
                .map(|ir| ir.name.to_string())
                .unwrap_or_else(|| id.to_string()),
            ImpulseSource::File(path) => path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| self.ir_file_path.clone()),
        }
    }

    pub fn sanitize(&mut self) {
        self.wet_dry_mix = WET_DRY_RANGE.clamp(self.wet_dry_mix);
        self.pre_delay_ms = PRE_DELAY_RANGE.clamp(self.pre_delay_ms);
        self.decay = DECAY_RANGE.clamp(self.decay);
    }
}
