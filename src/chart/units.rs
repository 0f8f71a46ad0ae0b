//! Celsius/Fahrenheit axis conversion
//!
//! Uses the factor 0.5556, not 5/9. Existing charts' right-axis limits are
//! computed with it.

/// Multiplier from Fahrenheit degrees to Celsius degrees
pub const FAHRENHEIT_TO_CELSIUS: f64 = 0.5556;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemperatureUnit {
    Celsius,
    Fahrenheit,
}

impl TemperatureUnit {
    /// The unit shown on the opposite axis
    pub fn complement(self) -> Self {
        match self {
            Self::Celsius => Self::Fahrenheit,
            Self::Fahrenheit => Self::Celsius,
        }
    }

    /// Convert a value in this unit to its complement
    pub fn convert_to_complement(self, value: f64) -> f64 {
        match self {
            Self::Celsius => celsius_to_fahrenheit(value),
            Self::Fahrenheit => fahrenheit_to_celsius(value),
        }
    }
}

pub fn celsius_to_fahrenheit(c: f64) -> f64 {
    c / FAHRENHEIT_TO_CELSIUS + 32.0
}

pub fn fahrenheit_to_celsius(f: f64) -> f64 {
    (f - 32.0) * FAHRENHEIT_TO_CELSIUS
}

/// Right-axis limits for the final left-axis limits
///
/// Always derived from the rendered left range so right ticks are an affine
/// transform of the left ones.
pub fn secondary_limits(left: (f64, f64), left_unit: TemperatureUnit) -> (f64, f64) {
    (
        left_unit.convert_to_complement(left.0),
        left_unit.convert_to_complement(left.1),
    )
}
