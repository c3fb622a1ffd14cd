//! Parameter ranges and slider scaling
//!
//! Every numeric effect parameter has a bounded range. Time constants
//! (compressor attack/release) are edited on a logarithmic slider so the
//! short end of the range gets most of the travel.

/// How a range maps onto a 0..1 slider position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scale {
    Linear,
    Logarithmic,
}

/// Inclusive numeric range of an effect parameter
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamRange {
    pub min: f32,
    pub max: f32,
    pub scale: Scale,
}

impl ParamRange {
    /// Linear range
    pub const fn linear(min: f32, max: f32) -> Self {
        Self {
            min,
            max,
            scale: Scale::Linear,
        }
    }

    /// Logarithmic range (both bounds must be positive)
    pub const fn logarithmic(min: f32, max: f32) -> Self {
        Self {
            min,
            max,
            scale: Scale::Logarithmic,
        }
    }

    /// Clamp a value into the range. NaN maps to the lower bound.
    pub fn clamp(&self, value: f32) -> f32 {
        if value.is_nan() {
            self.min
        } else {
            value.clamp(self.min, self.max)
        }
    }

    /// Check whether a value lies inside the range
    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }

    /// Map a parameter value to a slider position in `0.0..=1.0`
    pub fn to_position(&self, value: f32) -> f32 {
        let value = self.clamp(value);
        match self.scale {
            Scale::Linear => (value - self.min) / (self.max - self.min),
            Scale::Logarithmic => {
                (value.ln() - self.min.ln()) / (self.max.ln() - self.min.ln())
            }
        }
    }

    /// Map a slider position in `0.0..=1.0` back to a parameter value
    pub fn from_position(&self, position: f32) -> f32 {
        let position = if position.is_nan() {
            0.0
        } else {
            position.clamp(0.0, 1.0)
        };
        let value = match self.scale {
            Scale::Linear => self.min + position * (self.max - self.min),
            Scale::Logarithmic => {
                (self.min.ln() + position * (self.max.ln() - self.min.ln())).exp()
            }
        };
        self.clamp(value)
    }
}
