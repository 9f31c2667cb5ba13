//! IP-based geolocation for the initial load.
//!
//! Stands in for browser geolocation: one GET with a fixed 5-second timeout.
//! Callers degrade silently to the default-city path on any failure.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;

const GEOLOCATION_URL: &str = "http://ip-api.com/json";
const GEOLOCATION_TIMEOUT_SECS: u64 = 5;

/// A resolved position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPosition {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, thiserror::Error)]
pub enum LocationError {
    #[error("Geolocation request timed out")]
    Timeout,

    #[error("Geolocation unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: String,
    lat: Option<f64>,
    lon: Option<f64>,
    message: Option<String>,
}

/// Resolve the host's approximate position from its public IP.
pub async fn locate() -> Result<GeoPosition, LocationError> {
    locate_at(GEOLOCATION_URL).await
}

/// Same as [`locate`] with an injectable endpoint, so tests can point it at
/// a mock server.
pub async fn locate_at(url: &str) -> Result<GeoPosition, LocationError> {
    let client = Client::builder()
        .timeout(Duration::from_secs(GEOLOCATION_TIMEOUT_SECS))
        .build()
        .map_err(|e| LocationError::Unavailable(e.to_string()))?;

    let response = client.get(url).send().await.map_err(|e| {
        if e.is_timeout() {
            LocationError::Timeout
        } else {
            LocationError::Unavailable(e.to_string())
        }
    })?;

    if !response.status().is_success() {
        return Err(LocationError::Unavailable(format!(
            "status {}",
            response.status()
        )));
    }

    let body: IpApiResponse = response
        .json()
        .await
        .map_err(|e| LocationError::Unavailable(e.to_string()))?;

    if body.status != "success" {
        return Err(LocationError::Unavailable(
            body.message.unwrap_or_else(|| "lookup failed".to_string()),
        ));
    }

    match (body.lat, body.lon) {
        (Some(latitude), Some(longitude)) => {
            tracing::info!("Geolocated to {:.3}, {:.3}", latitude, longitude);
            Ok(GeoPosition { latitude, longitude })
        }
        _ => Err(LocationError::Unavailable(
            "response missing coordinates".to_string(),
        )),
    }
}
