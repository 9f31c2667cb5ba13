//! Text rendering of controller state. Purely derived; no state of its own.

use chrono::DateTime;

use skycast_core::units::format_temperature;
use skycast_core::TemperatureUnit;
use skycast_store::{FavoriteCity, JournalEntry};
use skycast_weather::{ForecastDay, WeatherSnapshot};

/// Format a unix-seconds timestamp as a calendar date.
pub fn format_date(timestamp: i64) -> String {
    match DateTime::from_timestamp(timestamp, 0) {
        Some(dt) => dt.format("%-d %B %Y").to_string(),
        None => timestamp.to_string(),
    }
}

/// Format a unix-seconds timestamp as wall-clock time.
pub fn format_time(timestamp: i64) -> String {
    match DateTime::from_timestamp(timestamp, 0) {
        Some(dt) => dt.format("%H:%M").to_string(),
        None => timestamp.to_string(),
    }
}

/// Multi-line summary of the current conditions.
pub fn current_summary(snapshot: &WeatherSnapshot, unit: TemperatureUnit) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}, {}\n", snapshot.city, snapshot.country));
    out.push_str(&format!(
        "{} (feels like {})  {}\n",
        format_temperature(snapshot.temperature, unit),
        format_temperature(snapshot.feels_like, unit),
        snapshot.description,
    ));
    out.push_str(&format!(
        "Humidity {:.0}%  Wind {:.1} m/s  Pressure {:.0} mb  Visibility {:.1} km\n",
        snapshot.humidity,
        snapshot.wind_speed,
        snapshot.pressure,
        snapshot.visibility / 1000.0,
    ));
    out.push_str(&format!(
        "Sunrise ~{}  Sunset ~{}  ({})\n",
        format_time(snapshot.sunrise),
        format_time(snapshot.sunset),
        format_date(snapshot.date),
    ));
    out
}

/// One line per forecast day.
pub fn forecast_table(forecast: &[ForecastDay], unit: TemperatureUnit) -> String {
    let mut out = String::new();
    for day in forecast {
        let date = match DateTime::from_timestamp(day.date, 0) {
            Some(dt) => dt.format("%a %-d %b").to_string(),
            None => day.date.to_string(),
        };
        out.push_str(&format!(
            "{:<11} {:>6}  {:<20} rain {:>3}%  wind {:.1} m/s\n",
            date,
            format_temperature(day.temperature, unit),
            day.description,
            day.precipitation,
            day.wind_speed,
        ));
    }
    out
}

/// Numbered favorites listing; positions are what the CLI's reorder and
/// select commands take.
pub fn favorites_list(favorites: &[FavoriteCity]) -> String {
    if favorites.is_empty() {
        return "No favorite cities yet.\n".to_string();
    }
    let mut out = String::new();
    for (i, fav) in favorites.iter().enumerate() {
        out.push_str(&format!("{:>2}. {}\n", i + 1, fav.name));
    }
    out
}

/// Numbered journal listing, newest first.
pub fn journal_list(entries: &[JournalEntry], unit: TemperatureUnit) -> String {
    if entries.is_empty() {
        return "No journal entries yet. Add your first entry!\n".to_string();
    }
    let mut out = String::new();
    for (i, entry) in entries.iter().enumerate() {
        out.push_str(&format!(
            "{:>2}. {} - {}  ({}, {})\n    {}\n",
            i + 1,
            entry.city,
            format_date(entry.date),
            format_temperature(entry.temperature, unit),
            entry.description,
            entry.notes,
        ));
    }
    out
}
