//! Weather data gateway for SkyCast
//!
//! Stateless wrapper around the remote weather provider, normalizing its
//! payloads into the domain model (Celsius, m/s, meters), plus IP-based
//! geolocation for the initial load.

pub mod gateway;
pub mod locate;
pub mod types;

pub use gateway::WeatherGateway;
pub use locate::{locate, GeoPosition, LocationError};
pub use types::{ForecastDay, WeatherError, WeatherSnapshot};
