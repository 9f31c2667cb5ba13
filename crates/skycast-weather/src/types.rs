use serde::{Deserialize, Serialize};

/// Current conditions for one city. Transient: owned by the dashboard
/// controller, never persisted.
///
/// Units are normalized at the gateway: temperatures in Celsius, wind speed
/// in m/s, visibility in meters, timestamps in unix seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub city: String,
    pub country: String,
    pub temperature: f64,
    pub feels_like: f64,
    pub humidity: f64,
    pub wind_speed: f64,
    pub description: String,
    pub icon: String,
    /// Millibars.
    pub pressure: f64,
    /// Meters.
    pub visibility: f64,
    /// Approximated, see [`crate::gateway`]; not precise.
    pub sunrise: i64,
    /// Approximated, see [`crate::gateway`]; not precise.
    pub sunset: i64,
    /// UTC offset in seconds.
    pub timezone: i64,
    /// Provider's local time at the reading, unix seconds.
    pub date: i64,
}

/// One day of the 5-day forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    pub date: i64,
    pub temperature: f64,
    pub feels_like: f64,
    pub humidity: f64,
    pub wind_speed: f64,
    pub description: String,
    pub icon: String,
    /// Chance of rain, 0-100 percent.
    pub precipitation: u8,
}

/// Gateway errors.
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    /// Network failure, non-success response, or malformed payload, tagged
    /// with the operation that was attempted.
    #[error("{operation} failed: {reason}")]
    Fetch {
        operation: &'static str,
        reason: String,
    },

    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

impl WeatherError {
    /// Returns a user-friendly message suitable for display.
    pub fn user_message(&self) -> &'static str {
        match self {
            WeatherError::Fetch { .. } => "Failed to fetch weather data. Please try again.",
            WeatherError::Client(_) => "Weather service could not start. Please try again.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_names_operation() {
        let err = WeatherError::Fetch {
            operation: "fetch_current",
            reason: "status 500".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("fetch_current"));
        assert!(message.contains("status 500"));
    }

    #[test]
    fn test_snapshot_serde_round_trip() {
        let snapshot = WeatherSnapshot {
            city: "Paris".into(),
            country: "France".into(),
            temperature: 18.5,
            feels_like: 17.9,
            humidity: 60.0,
            wind_speed: 3.2,
            description: "Partly cloudy".into(),
            icon: "//cdn.weatherapi.com/weather/64x64/day/116.png".into(),
            pressure: 1013.0,
            visibility: 10000.0,
            sunrise: 1_700_000_000,
            sunset: 1_700_043_200,
            timezone: 3600,
            date: 1_700_020_000,
        };
        let json = serde_json::to_string(&snapshot).unwrap();
        let back: WeatherSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snapshot);
    }
}
