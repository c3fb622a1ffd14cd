//! Parametric EQ bands

use crate::error::{ChainError, Result};
use crate::param::ParamRange;
use serde::{Deserialize, Serialize};

/// Minimum number of bands in a parametric EQ
pub const MIN_BANDS: usize = 1;
/// Maximum number of bands in a parametric EQ
pub const MAX_BANDS: usize = 8;

pub const FREQUENCY_RANGE: ParamRange = ParamRange::logarithmic(20.0, 20000.0);
pub const GAIN_RANGE: ParamRange = ParamRange::linear(-24.0, 24.0);
pub const Q_RANGE: ParamRange = ParamRange::logarithmic(0.1, 10.0);

/// Single parametric EQ band
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EqBand {
    /// Center frequency in Hz (20-20000)
    pub frequency: f32,
    /// Gain in dB (-24 to +24)
    pub gain: f32,
    /// Resonance (0.1 to 10)
    pub q: f32,
}

impl EqBand {
    /// Create a band with every parameter clamped into range
    pub fn new(frequency: f32, gain: f32, q: f32) -> Self {
        Self {
            frequency: FREQUENCY_RANGE.clamp(frequency),
            gain: GAIN_RANGE.clamp(gain),
            q: Q_RANGE.clamp(q),
        }
    }

    /// Flat band at the given frequency
    pub fn flat(frequency: f32) -> Self {
        Self::new(frequency, 0.0, 1.0)
    }

    pub fn sanitized(self) -> Self {
        Self::new(self.frequency, self.gain, self.q)
    }
}

/// Default three-band flat layout (low / mid / high)
pub fn default_bands() -> Vec<EqBand> {
    vec![EqBand::flat(100.0), EqBand::flat(1000.0), EqBand::flat(10000.0)]
}

/// Clamp every band and enforce the 1-8 band count.
///
/// Excess bands are dropped; an empty list gets one flat 1 kHz band.
pub fn sanitize_bands(bands: &mut Vec<EqBand>) {
    bands.truncate(MAX_BANDS);
    for band in bands.iter_mut() {
        *band = band.sanitized();
    }
    if bands.is_empty() {
        bands.push(EqBand::flat(1000.0));
    }
}

/// Append a band, refusing to grow past `MAX_BANDS`
pub fn add_band(bands: &mut Vec<EqBand>, band: EqBand) -> Result<()> {
    if bands.len() >= MAX_BANDS {
        return Err(ChainError::invalid_parameter(format!(
            "EQ supports at most {MAX_BANDS} bands"
        )));
    }
    bands.push(band.sanitized());
    Ok(())
}

/// Remove a band, refusing to drop below `MIN_BANDS`
pub fn remove_band(bands: &mut Vec<EqBand>, index: usize) -> Result<EqBand> {
    if bands.len() <= MIN_BANDS {
        return Err(ChainError::invalid_parameter(format!(
            "EQ needs at least {MIN_BANDS} band"
        )));
    }
    if index >= bands.len() {
        return Err(ChainError::invalid_parameter(format!(
            "EQ band {index} does not exist"
        )));
    }
    Ok(bands.remove(index))
}

/// Built-in parametric EQ presets
pub fn eq_presets() -> Vec<(String, Vec<EqBand>)> {
    vec![
        ("Flat".to_string(), default_bands()),
        (
            "Bass Boost".to_string(),
            vec![
                EqBand::new(60.0, 6.0, 1.0),
                EqBand::new(200.0, 3.0, 1.0),
                EqBand::flat(1000.0),
            ],
        ),
        (
            "Treble Boost".to_string(),
            vec![
                EqBand::flat(1000.0),
                EqBand::new(5000.0, 3.0, 1.0),
                EqBand::new(12000.0, 6.0, 1.0),
            ],
        ),
    ]
}
