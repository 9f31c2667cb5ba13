//! Temperature unit preference and conversion.
//!
//! The gateway normalizes everything to Celsius once; conversion to the
//! display unit happens here and nowhere else.

use serde::{Deserialize, Serialize};

/// Temperature unit preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

impl TemperatureUnit {
    /// The other unit, for toggle actions.
    pub fn toggled(self) -> Self {
        match self {
            Self::Celsius => Self::Fahrenheit,
            Self::Fahrenheit => Self::Celsius,
        }
    }

    /// Display symbol without the degree sign.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Celsius => "C",
            Self::Fahrenheit => "F",
        }
    }

    /// Convert a Celsius value into this unit.
    pub fn from_celsius(self, celsius: f64) -> f64 {
        match self {
            Self::Celsius => celsius,
            Self::Fahrenheit => celsius * 9.0 / 5.0 + 32.0,
        }
    }

    /// Convert a value in this unit back to Celsius.
    pub fn to_celsius(self, value: f64) -> f64 {
        match self {
            Self::Celsius => value,
            Self::Fahrenheit => (value - 32.0) * 5.0 / 9.0,
        }
    }
}

/// Format a Celsius temperature in the given unit, rounded to whole degrees.
pub fn format_temperature(celsius: f64, unit: TemperatureUnit) -> String {
    let converted = unit.from_celsius(celsius);
    format!("{}°{}", converted.round() as i64, unit.symbol())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_freezing_point() {
        assert_eq!(TemperatureUnit::Fahrenheit.from_celsius(0.0), 32.0);
        assert_eq!(TemperatureUnit::Celsius.from_celsius(0.0), 0.0);
    }

    #[test]
    fn test_boiling_point() {
        assert_eq!(TemperatureUnit::Fahrenheit.from_celsius(100.0), 212.0);
    }

    #[test]
    fn test_round_trip_within_display_rounding() {
        for celsius in [-40.0, -17.8, 0.0, 21.3, 37.0, 100.0] {
            let fahrenheit = TemperatureUnit::Fahrenheit.from_celsius(celsius);
            let back = TemperatureUnit::Fahrenheit.to_celsius(fahrenheit);
            // Display layer rounds to whole degrees; exact float equality not required
            assert!((back - celsius).abs() < 0.5, "{} -> {} -> {}", celsius, fahrenheit, back);
        }
    }

    #[test]
    fn test_format_rounds_to_whole_degrees() {
        assert_eq!(format_temperature(21.4, TemperatureUnit::Celsius), "21°C");
        assert_eq!(format_temperature(21.5, TemperatureUnit::Celsius), "22°C");
        assert_eq!(format_temperature(0.0, TemperatureUnit::Fahrenheit), "32°F");
    }

    #[test]
    fn test_toggled() {
        assert_eq!(TemperatureUnit::Celsius.toggled(), TemperatureUnit::Fahrenheit);
        assert_eq!(TemperatureUnit::Fahrenheit.toggled(), TemperatureUnit::Celsius);
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&TemperatureUnit::Fahrenheit).unwrap();
        assert_eq!(json, "\"fahrenheit\"");
        let unit: TemperatureUnit = serde_json::from_str("\"celsius\"").unwrap();
        assert_eq!(unit, TemperatureUnit::Celsius);
    }
}
