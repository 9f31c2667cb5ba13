//! Typed access to preference slots.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use skycast_core::{TemperatureUnit, Theme};

use crate::slot::SlotStore;

/// Slot key for the temperature unit preference.
pub const UNIT_KEY: &str = "unit";
/// Slot key for the theme preference.
pub const THEME_KEY: &str = "theme";
/// Slot key for the favorites collection.
pub const FAVORITES_KEY: &str = "favorites";
/// Slot key for the journal collection.
pub const JOURNAL_KEY: &str = "journal";

/// Typed get/set over a slot store.
///
/// `get` falls back to the default on missing or unparseable content without
/// re-persisting it; `set` persists synchronously and swallows storage
/// failures after logging them.
#[derive(Clone)]
pub struct Preferences {
    store: Arc<dyn SlotStore>,
}

impl Preferences {
    pub fn new(store: Arc<dyn SlotStore>) -> Self {
        Self { store }
    }

    /// Read a slot, returning `default` when absent or unparseable.
    pub fn get<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        match self.store.load(key) {
            Some(raw) => match serde_json::from_str(&raw) {
                Ok(value) => value,
                Err(e) => {
                    tracing::warn!("Slot {} holds unparseable content, using default: {}", key, e);
                    default
                }
            },
            None => default,
        }
    }

    /// Write a slot. Best-effort: failures are logged, never surfaced.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) {
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!("Failed to serialize slot {}: {}", key, e);
                return;
            }
        };
        if let Err(e) = self.store.save(key, &raw) {
            tracing::warn!("Failed to persist slot {}: {}", key, e);
        }
    }

    pub fn unit(&self) -> TemperatureUnit {
        self.get(UNIT_KEY, TemperatureUnit::default())
    }

    pub fn set_unit(&self, unit: TemperatureUnit) {
        self.set(UNIT_KEY, &unit);
    }

    pub fn theme(&self) -> Theme {
        self.get(THEME_KEY, Theme::default())
    }

    pub fn set_theme(&self, theme: Theme) {
        self.set(THEME_KEY, &theme);
    }
}
