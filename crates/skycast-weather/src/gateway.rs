//! Request/response wrapper around the weather provider.
//!
//! Single-shot calls, no retry, no caching. All provider-specific payload
//! shapes and unit conversions are absorbed here; downstream code only ever
//! sees Celsius, m/s, and meters.

use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;

use skycast_core::ReqwestErrorExt;

use crate::types::{ForecastDay, WeatherError, WeatherSnapshot};

const FORECAST_DAYS: u8 = 5;
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Stateless client for the provider's `current.json` / `forecast.json`
/// endpoints.
#[derive(Debug, Clone)]
pub struct WeatherGateway {
    client: Client,
    base_url: String,
    api_key: String,
}

impl WeatherGateway {
    /// Create a gateway against `base_url` (injectable so tests can point it
    /// at a mock server).
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    /// Fetch current conditions for a city name query.
    pub async fn fetch_current(&self, city: &str) -> Result<WeatherSnapshot, WeatherError> {
        self.current("fetch_current", city).await
    }

    /// Fetch current conditions for a coordinate pair.
    pub async fn fetch_current_by_coords(
        &self,
        lat: f64,
        lon: f64,
    ) -> Result<WeatherSnapshot, WeatherError> {
        let query = format!("{},{}", lat, lon);
        self.current("fetch_current_by_coords", &query).await
    }

    async fn current(
        &self,
        operation: &'static str,
        query: &str,
    ) -> Result<WeatherSnapshot, WeatherError> {
        let url = format!("{}/current.json", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("key", self.api_key.as_str()), ("q", query)])
            .send()
            .await
            .map_err(|e| fetch_error(operation, e))?;

        if !response.status().is_success() {
            return Err(WeatherError::Fetch {
                operation,
                reason: format!("provider returned status {}", response.status()),
            });
        }

        let payload: CurrentPayload =
            response.json().await.map_err(|e| fetch_error(operation, e))?;

        tracing::debug!("Fetched current conditions for {}", payload.location.name);
        Ok(payload.into_snapshot())
    }

    /// Fetch the 5-day forecast for a city name query.
    pub async fn fetch_forecast(&self, city: &str) -> Result<Vec<ForecastDay>, WeatherError> {
        let operation = "fetch_forecast";
        let url = format!("{}/forecast.json", self.base_url);
        let days = FORECAST_DAYS.to_string();
        let response = self
            .client
            .get(&url)
            .query(&[
                ("key", self.api_key.as_str()),
                ("q", city),
                ("days", days.as_str()),
            ])
            .send()
            .await
            .map_err(|e| fetch_error(operation, e))?;

        if !response.status().is_success() {
            return Err(WeatherError::Fetch {
                operation,
                reason: format!("provider returned status {}", response.status()),
            });
        }

        let payload: ForecastPayload =
            response.json().await.map_err(|e| fetch_error(operation, e))?;

        let forecast = payload
            .forecast
            .forecastday
            .into_iter()
            .map(ForecastDayPayload::into_forecast_day)
            .collect();

        tracing::debug!("Fetched {}-day forecast for {}", FORECAST_DAYS, city);
        Ok(forecast)
    }
}

fn fetch_error(operation: &'static str, error: reqwest::Error) -> WeatherError {
    WeatherError::Fetch {
        operation,
        reason: error.into_network_error().to_string(),
    }
}

// --- Provider payload shapes (WeatherAPI.com). Field renames stop here. ---

#[derive(Debug, Deserialize)]
struct CurrentPayload {
    location: LocationPayload,
    current: ConditionsPayload,
}

#[derive(Debug, Deserialize)]
struct LocationPayload {
    name: String,
    country: String,
    localtime_epoch: i64,
}

#[derive(Debug, Deserialize)]
struct ConditionsPayload {
    temp_c: f64,
    feelslike_c: f64,
    humidity: f64,
    wind_kph: f64,
    condition: ConditionPayload,
    pressure_mb: f64,
    vis_km: f64,
}

#[derive(Debug, Deserialize)]
struct ConditionPayload {
    text: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct ForecastPayload {
    forecast: ForecastDaysPayload,
}

#[derive(Debug, Deserialize)]
struct ForecastDaysPayload {
    forecastday: Vec<ForecastDayPayload>,
}

#[derive(Debug, Deserialize)]
struct ForecastDayPayload {
    date_epoch: i64,
    day: DayPayload,
}

#[derive(Debug, Deserialize)]
struct DayPayload {
    avgtemp_c: f64,
    avghumidity: f64,
    maxwind_kph: f64,
    daily_chance_of_rain: f64,
    condition: ConditionPayload,
}

impl CurrentPayload {
    fn into_snapshot(self) -> WeatherSnapshot {
        let local = self.location.localtime_epoch;
        WeatherSnapshot {
            city: self.location.name,
            country: self.location.country,
            temperature: self.current.temp_c,
            feels_like: self.current.feelslike_c,
            humidity: self.current.humidity,
            wind_speed: kph_to_mps(self.current.wind_kph),
            description: self.current.condition.text,
            icon: self.current.condition.icon,
            pressure: self.current.pressure_mb,
            visibility: self.current.vis_km * 1000.0,
            sunrise: fixed_local_hour(local, 6),
            sunset: fixed_local_hour(local, 18),
            timezone: utc_offset_secs(local),
            date: local,
        }
    }
}

impl ForecastDayPayload {
    fn into_forecast_day(self) -> ForecastDay {
        ForecastDay {
            date: self.date_epoch,
            temperature: self.day.avgtemp_c,
            // Provider supplies no feels-like for forecast days
            feels_like: self.day.avgtemp_c,
            humidity: self.day.avghumidity,
            wind_speed: kph_to_mps(self.day.maxwind_kph),
            description: self.day.condition.text,
            icon: self.day.condition.icon,
            precipitation: self.day.daily_chance_of_rain.clamp(0.0, 100.0).round() as u8,
        }
    }
}

fn kph_to_mps(kph: f64) -> f64 {
    kph / 3.6
}

/// The current-conditions endpoint supplies no precise sunrise/sunset, so a
/// fixed local hour is derived from the provider's local date. An
/// approximation, not something precision-sensitive consumers can rely on.
fn fixed_local_hour(localtime_epoch: i64, hour: u32) -> i64 {
    match DateTime::<Utc>::from_timestamp(localtime_epoch, 0)
        .and_then(|dt| dt.date_naive().and_hms_opt(hour, 0, 0))
    {
        Some(naive) => naive.and_utc().timestamp(),
        None => localtime_epoch,
    }
}

/// The provider reports local wall-clock seconds; the difference from our
/// clock approximates the UTC offset. Snapped to the nearest quarter hour to
/// absorb clock skew and transfer latency.
fn utc_offset_secs(localtime_epoch: i64) -> i64 {
    let delta = localtime_epoch - Utc::now().timestamp();
    ((delta as f64 / 900.0).round() as i64) * 900
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAY: i64 = 86_400;

    #[test]
    fn test_current_payload_mapping_normalizes_units() {
        let raw = serde_json::json!({
            "location": {
                "name": "Paris",
                "country": "France",
                "localtime_epoch": 1_700_000_000,
            },
            "current": {
                "temp_c": 18.5,
                "feelslike_c": 17.9,
                "humidity": 60,
                "wind_kph": 18.0,
                "condition": {
                    "text": "Partly cloudy",
                    "icon": "//cdn.weatherapi.com/weather/64x64/day/116.png",
                },
                "pressure_mb": 1013.0,
                "vis_km": 10.0,
            },
        });

        let payload: CurrentPayload = serde_json::from_value(raw).unwrap();
        let snapshot = payload.into_snapshot();

        assert_eq!(snapshot.city, "Paris");
        assert_eq!(snapshot.temperature, 18.5);
        assert!((snapshot.wind_speed - 5.0).abs() < 1e-9, "18 kph is 5 m/s");
        assert_eq!(snapshot.visibility, 10_000.0);
        assert_eq!(snapshot.date, 1_700_000_000);
    }

    #[test]
    fn test_sun_times_are_fixed_local_hours() {
        let noon = 1_700_000_000;
        let sunrise = fixed_local_hour(noon, 6);
        let sunset = fixed_local_hour(noon, 18);

        assert_eq!(sunset - sunrise, 12 * 3600);
        // Same provider-local day as the reading
        assert_eq!(sunrise.div_euclid(DAY), noon.div_euclid(DAY));
        assert_eq!(sunrise.rem_euclid(DAY), 6 * 3600);
    }

    #[test]
    fn test_forecast_payload_mapping() {
        let raw = serde_json::json!({
            "date_epoch": 1_700_000_000,
            "day": {
                "avgtemp_c": 12.0,
                "avghumidity": 70.0,
                "maxwind_kph": 36.0,
                "daily_chance_of_rain": 85.0,
                "condition": { "text": "Rain", "icon": "//icon" },
            },
        });

        let payload: ForecastDayPayload = serde_json::from_value(raw).unwrap();
        let day = payload.into_forecast_day();

        assert_eq!(day.temperature, 12.0);
        assert_eq!(day.feels_like, 12.0);
        assert!((day.wind_speed - 10.0).abs() < 1e-9);
        assert_eq!(day.precipitation, 85);
    }

    #[test]
    fn test_precipitation_clamped_to_percent_range() {
        let payload = DayPayload {
            avgtemp_c: 0.0,
            avghumidity: 0.0,
            maxwind_kph: 0.0,
            daily_chance_of_rain: 140.0,
            condition: ConditionPayload { text: String::new(), icon: String::new() },
        };
        let day = ForecastDayPayload { date_epoch: 0, day: payload }.into_forecast_day();
        assert_eq!(day.precipitation, 100);
    }

    #[test]
    fn test_utc_offset_snaps_to_quarter_hours() {
        let offset = utc_offset_secs(Utc::now().timestamp() + 3590);
        assert_eq!(offset, 3600);
    }
}
