//! Preset matching
//!
//! Editing band gains or crossfeed level/cutoff directly re-checks the known
//! presets. If the edited values match one within tolerance the configuration
//! is relabeled with that preset's name, otherwise it becomes "Custom". The
//! label is cosmetic and never affects processing.
//!
//! Tolerances are per field class rather than one global epsilon.

/// Tolerance for gain and level values in dB
pub const GAIN_EPSILON_DB: f32 = 0.1;

/// Tolerance for normalized values (stereo width, balance)
pub const NORMALIZED_EPSILON: f32 = 0.01;

/// Tolerance for frequencies in Hz
pub const FREQUENCY_EPSILON_HZ: f32 = 1.0;

/// Tolerance for time constants in milliseconds
pub const TIME_EPSILON_MS: f32 = 0.1;

/// Label used when no preset matches
pub const CUSTOM_LABEL: &str = "Custom";

/// Compare two values within a tolerance
pub fn approx_eq(a: f32, b: f32, epsilon: f32) -> bool {
    (a - b).abs() < epsilon
}

/// Pad with 0.0 or truncate a gains list to exactly `len` entries.
///
/// Non-finite entries are treated as 0.0.
pub fn normalize_gains(gains: &[f32], len: usize) -> Vec<f32> {
    (0..len)
        .map(|i| match gains.get(i) {
            Some(gain) if gain.is_finite() => *gain,
            _ => 0.0,
        })
        .collect()
}

/// Compare two gain lists band by band after normalizing both to `len`.
pub fn gains_match(a: &[f32], b: &[f32], len: usize, epsilon: f32) -> bool {
    let a = normalize_gains(a, len);
    let b = normalize_gains(b, len);
    a.iter().zip(&b).all(|(x, y)| approx_eq(*x, *y, epsilon))
}

/// Find the first preset in a `(name, settings)` table satisfying `matches`.
pub fn find_preset<'a, T>(
    presets: &'a [(String, T)],
    mut matches: impl FnMut(&T) -> bool,
) -> Option<&'a str> {
    presets
        .iter()
        .find(|(_, settings)| matches(settings))
        .map(|(name, _)| name.as_str())
}
