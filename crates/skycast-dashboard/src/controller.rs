//! Dashboard controller: transient weather state and user-action wiring.

use thiserror::Error;

use skycast_core::{TemperatureUnit, Theme};
use skycast_store::{
    FavoriteCity, FavoritesError, FavoritesManager, JournalEntry, JournalError, JournalManager,
    Observation, Preferences,
};
use skycast_weather::{ForecastDay, GeoPosition, WeatherError, WeatherGateway, WeatherSnapshot};

/// Fetch lifecycle. `Failed` keeps the previous snapshot visible; retry goes
/// through the last successfully displayed city.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardState {
    Idle,
    Loading,
    Ready,
    Failed { message: String },
}

#[derive(Debug, Error)]
pub enum DashboardError {
    /// Actions that need a displayed snapshot (favorite/journal the current
    /// city) before one is loaded.
    #[error("No weather loaded yet")]
    NoSnapshot,

    #[error("Favorite not found: {0}")]
    FavoriteNotFound(String),

    #[error(transparent)]
    Favorites(#[from] FavoritesError),

    #[error(transparent)]
    Journal(#[from] JournalError),

    #[error(transparent)]
    Weather(#[from] WeatherError),
}

/// Orchestrates fetches and owns the transient snapshot/forecast pair.
///
/// Single consumer, event-at-a-time: every mutation runs to completion on
/// the caller's task. Fetch completions still pass through a monotonic
/// sequence token so a superseded response can never overwrite fresher
/// state.
pub struct Dashboard {
    gateway: WeatherGateway,
    prefs: Preferences,
    favorites: FavoritesManager,
    journal: JournalManager,
    default_city: String,

    state: DashboardState,
    snapshot: Option<WeatherSnapshot>,
    forecast: Vec<ForecastDay>,
    last_city: Option<String>,
    seq: u64,
}

impl Dashboard {
    pub fn new(gateway: WeatherGateway, prefs: Preferences, default_city: impl Into<String>) -> Self {
        let favorites = FavoritesManager::load(prefs.clone());
        let journal = JournalManager::load(prefs.clone());
        Self {
            gateway,
            prefs,
            favorites,
            journal,
            default_city: default_city.into(),
            state: DashboardState::Idle,
            snapshot: None,
            forecast: Vec::new(),
            last_city: None,
            seq: 0,
        }
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    pub fn snapshot(&self) -> Option<&WeatherSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn forecast(&self) -> &[ForecastDay] {
        &self.forecast
    }

    /// Last successfully displayed city, the retry target after a failure.
    pub fn last_city(&self) -> Option<&str> {
        self.last_city.as_deref()
    }

    // --- Fetch lifecycle -------------------------------------------------

    /// Enter `Loading` and draw a sequence token for the new fetch.
    pub fn begin_fetch(&mut self) -> u64 {
        self.seq += 1;
        self.state = DashboardState::Loading;
        self.seq
    }

    /// Apply a fetch completion. Discarded when `token` is stale, i.e. a
    /// newer fetch has started since this one was issued.
    pub fn apply_fetch(
        &mut self,
        token: u64,
        result: Result<(WeatherSnapshot, Vec<ForecastDay>), WeatherError>,
    ) {
        if token != self.seq {
            tracing::debug!("Discarding stale fetch completion (token {})", token);
            return;
        }

        match result {
            Ok((snapshot, forecast)) => {
                self.last_city = Some(snapshot.city.clone());
                self.snapshot = Some(snapshot);
                self.forecast = forecast;
                self.state = DashboardState::Ready;
            }
            Err(e) => {
                tracing::warn!("Weather fetch failed: {}", e);
                // Previous snapshot stays visible as the last good state
                self.state = DashboardState::Failed {
                    message: e.user_message().to_string(),
                };
            }
        }
    }

    /// Initial load: position if geolocation produced one, else the default
    /// city. The caller resolves geolocation first (bounded by its own
    /// timeout) so there is exactly one fetch, never a race.
    pub async fn start(&mut self, position: Option<GeoPosition>) {
        match position {
            Some(pos) => self.load_coords(pos.latitude, pos.longitude).await,
            None => {
                let city = self.default_city.clone();
                self.load_city(&city).await;
            }
        }
    }

    /// Fetch current conditions and forecast for a city query.
    pub async fn load_city(&mut self, city: &str) {
        let token = self.begin_fetch();
        let result = self.fetch_pair_by_city(city).await;
        self.apply_fetch(token, result);
    }

    /// Fetch by coordinates; the forecast uses the resolved city name.
    pub async fn load_coords(&mut self, lat: f64, lon: f64) {
        let token = self.begin_fetch();
        let result = self.fetch_pair_by_coords(lat, lon).await;
        self.apply_fetch(token, result);
    }

    /// Re-fetch the last successfully displayed city, if any.
    pub async fn retry(&mut self) -> bool {
        match self.last_city.clone() {
            Some(city) => {
                self.load_city(&city).await;
                true
            }
            None => false,
        }
    }

    /// Both calls must succeed in sequence; a forecast failure after a good
    /// snapshot is still a fetch failure.
    async fn fetch_pair_by_city(
        &self,
        city: &str,
    ) -> Result<(WeatherSnapshot, Vec<ForecastDay>), WeatherError> {
        let snapshot = self.gateway.fetch_current(city).await?;
        let forecast = self.gateway.fetch_forecast(city).await?;
        Ok((snapshot, forecast))
    }

    async fn fetch_pair_by_coords(
        &self,
        lat: f64,
        lon: f64,
    ) -> Result<(WeatherSnapshot, Vec<ForecastDay>), WeatherError> {
        let snapshot = self.gateway.fetch_current_by_coords(lat, lon).await?;
        let forecast = self.gateway.fetch_forecast(&snapshot.city).await?;
        Ok((snapshot, forecast))
    }

    // --- Favorites -------------------------------------------------------

    pub fn favorites(&self) -> &[FavoriteCity] {
        self.favorites.list()
    }

    /// Add the currently displayed city to favorites.
    pub fn add_current_to_favorites(&mut self) -> Result<FavoriteCity, DashboardError> {
        let city = self.snapshot.as_ref().ok_or(DashboardError::NoSnapshot)?.city.clone();
        Ok(self.favorites.add(&city)?)
    }

    pub fn remove_favorite(&mut self, id: &str) {
        self.favorites.remove(id);
    }

    pub fn reorder_favorites(&mut self, ids: &[String]) -> Result<(), DashboardError> {
        Ok(self.favorites.reorder(ids)?)
    }

    /// Resolve a favorite and fetch its weather.
    pub async fn select_favorite(&mut self, id: &str) -> Result<(), DashboardError> {
        let city = self
            .favorites
            .select(id)
            .ok_or_else(|| DashboardError::FavoriteNotFound(id.to_string()))?
            .to_string();
        self.load_city(&city).await;
        Ok(())
    }

    // --- Journal ---------------------------------------------------------

    pub fn journal_entries(&self) -> &[JournalEntry] {
        self.journal.entries()
    }

    /// Create a journal entry against the currently displayed weather.
    pub fn add_journal_entry(&mut self, notes: &str) -> Result<JournalEntry, DashboardError> {
        let snapshot = self.snapshot.as_ref().ok_or(DashboardError::NoSnapshot)?;
        let observation = Observation {
            city: snapshot.city.clone(),
            temperature: snapshot.temperature,
            description: snapshot.description.clone(),
            icon: snapshot.icon.clone(),
        };
        Ok(self.journal.add_entry(&observation, notes)?)
    }

    pub fn update_journal_entry(
        &mut self,
        id: &str,
        notes: &str,
    ) -> Result<JournalEntry, DashboardError> {
        Ok(self.journal.update_entry(id, notes)?)
    }

    pub fn delete_journal_entry(&mut self, id: &str) {
        self.journal.delete_entry(id);
    }

    // --- Preferences -----------------------------------------------------

    pub fn unit(&self) -> TemperatureUnit {
        self.prefs.unit()
    }

    pub fn toggle_unit(&self) -> TemperatureUnit {
        let unit = self.prefs.unit().toggled();
        self.prefs.set_unit(unit);
        unit
    }

    pub fn set_unit(&self, unit: TemperatureUnit) {
        self.prefs.set_unit(unit);
    }

    pub fn theme(&self) -> Theme {
        self.prefs.theme()
    }

    pub fn toggle_theme(&self) -> Theme {
        let theme = self.prefs.theme().toggled();
        self.prefs.set_theme(theme);
        theme
    }

    pub fn set_theme(&self, theme: Theme) {
        self.prefs.set_theme(theme);
    }
}
