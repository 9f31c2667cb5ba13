//! Ordered collection of favorite cities.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::prefs::{Preferences, FAVORITES_KEY};

/// A saved city. Never mutated in place; order changes replace the whole
/// sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteCity {
    pub id: String,
    pub name: String,
}

/// Validation rejections from the favorites manager. Never fatal; surfaced
/// as transient notices.
#[derive(Debug, Error)]
pub enum FavoritesError {
    /// City names are unique (case-sensitive, exact match).
    #[error("{0} is already in your favorites")]
    DuplicateName(String),

    /// The supplied order is not a permutation of the current id set.
    #[error("Reorder rejected: sequence does not match the current favorites")]
    InvalidOrder,
}

/// Ordered favorites, persisted to the `favorites` slot after every change.
pub struct FavoritesManager {
    prefs: Preferences,
    cities: Vec<FavoriteCity>,
}

impl FavoritesManager {
    /// Load the persisted collection, falling back to empty.
    pub fn load(prefs: Preferences) -> Self {
        let cities = prefs.get(FAVORITES_KEY, Vec::new());
        Self { prefs, cities }
    }

    /// Current collection, in display order.
    pub fn list(&self) -> &[FavoriteCity] {
        &self.cities
    }

    /// Add a city, appended at the end of the order.
    pub fn add(&mut self, name: &str) -> Result<FavoriteCity, FavoritesError> {
        if self.cities.iter().any(|fav| fav.name == name) {
            return Err(FavoritesError::DuplicateName(name.to_string()));
        }

        let favorite = FavoriteCity {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
        };
        self.cities.push(favorite.clone());
        self.persist();

        tracing::debug!("Added favorite: {}", favorite.name);
        Ok(favorite)
    }

    /// Remove by id. No-op when the id is absent.
    pub fn remove(&mut self, id: &str) {
        let before = self.cities.len();
        self.cities.retain(|fav| fav.id != id);
        if self.cities.len() != before {
            self.persist();
            tracing::debug!("Removed favorite: {}", id);
        }
    }

    /// Replace the display order wholesale.
    ///
    /// The supplied ids must be a permutation of the current id set;
    /// otherwise the reorder is rejected and the collection is unchanged.
    pub fn reorder(&mut self, ids: &[String]) -> Result<(), FavoritesError> {
        if ids.len() != self.cities.len() {
            return Err(FavoritesError::InvalidOrder);
        }

        // Equal length plus no duplicate plus every id known means permutation
        let mut seen: Vec<&String> = ids.iter().collect();
        seen.sort();
        seen.dedup();
        if seen.len() != ids.len() {
            return Err(FavoritesError::InvalidOrder);
        }

        let mut reordered = Vec::with_capacity(ids.len());
        for id in ids {
            match self.cities.iter().find(|fav| &fav.id == id) {
                Some(fav) => reordered.push(fav.clone()),
                None => return Err(FavoritesError::InvalidOrder),
            }
        }

        self.cities = reordered;
        self.persist();
        Ok(())
    }

    /// Look up a city name by id. Fetching is the caller's concern.
    pub fn select(&self, id: &str) -> Option<&str> {
        self.cities.iter().find(|fav| fav.id == id).map(|fav| fav.name.as_str())
    }

    fn persist(&self) {
        self.prefs.set(FAVORITES_KEY, &self.cities);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slot::MemorySlotStore;
    use std::sync::Arc;

    fn manager() -> FavoritesManager {
        FavoritesManager::load(Preferences::new(Arc::new(MemorySlotStore::new())))
    }

    #[test]
    fn test_add_appends_in_order() {
        let mut favorites = manager();
        favorites.add("Paris").unwrap();
        favorites.add("Tokyo").unwrap();

        let names: Vec<_> = favorites.list().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["Paris", "Tokyo"]);
    }

    #[test]
    fn test_duplicate_name_rejected_and_collection_unchanged() {
        let mut favorites = manager();
        favorites.add("Paris").unwrap();

        let result = favorites.add("Paris");
        assert!(matches!(result, Err(FavoritesError::DuplicateName(_))));
        assert_eq!(favorites.list().len(), 1);
    }

    #[test]
    fn test_duplicate_check_is_case_sensitive() {
        let mut favorites = manager();
        favorites.add("Paris").unwrap();
        assert!(favorites.add("paris").is_ok());
        assert_eq!(favorites.list().len(), 2);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut favorites = manager();
        let paris = favorites.add("Paris").unwrap();
        favorites.add("Tokyo").unwrap();

        favorites.remove(&paris.id);
        assert_eq!(favorites.list().len(), 1);
        favorites.remove(&paris.id);
        assert_eq!(favorites.list().len(), 1);
        assert_eq!(favorites.list()[0].name, "Tokyo");
    }

    #[test]
    fn test_reorder_permutation_applies_exactly() {
        let mut favorites = manager();
        let a = favorites.add("Paris").unwrap();
        let b = favorites.add("Tokyo").unwrap();
        let c = favorites.add("Oslo").unwrap();

        favorites.reorder(&[c.id.clone(), a.id.clone(), b.id.clone()]).unwrap();

        let names: Vec<_> = favorites.list().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["Oslo", "Paris", "Tokyo"]);
        assert_eq!(favorites.list().len(), 3);
    }

    #[test]
    fn test_reorder_rejects_wrong_length() {
        let mut favorites = manager();
        let a = favorites.add("Paris").unwrap();
        favorites.add("Tokyo").unwrap();

        let result = favorites.reorder(&[a.id.clone()]);
        assert!(matches!(result, Err(FavoritesError::InvalidOrder)));
        assert_eq!(favorites.list()[0].name, "Paris");
    }

    #[test]
    fn test_reorder_rejects_unknown_id() {
        let mut favorites = manager();
        let a = favorites.add("Paris").unwrap();
        favorites.add("Tokyo").unwrap();

        let result = favorites.reorder(&[a.id.clone(), "bogus".to_string()]);
        assert!(matches!(result, Err(FavoritesError::InvalidOrder)));
    }

    #[test]
    fn test_reorder_rejects_duplicated_id() {
        let mut favorites = manager();
        let a = favorites.add("Paris").unwrap();
        favorites.add("Tokyo").unwrap();

        let result = favorites.reorder(&[a.id.clone(), a.id.clone()]);
        assert!(matches!(result, Err(FavoritesError::InvalidOrder)));
        assert_eq!(favorites.list().len(), 2);
    }

    #[test]
    fn test_select_returns_name() {
        let mut favorites = manager();
        let paris = favorites.add("Paris").unwrap();

        assert_eq!(favorites.select(&paris.id), Some("Paris"));
        assert_eq!(favorites.select("missing"), None);
    }

    #[test]
    fn test_round_trip_through_store() {
        let store = Arc::new(MemorySlotStore::new());
        let order;
        {
            let mut favorites = FavoritesManager::load(Preferences::new(store.clone()));
            favorites.add("Paris").unwrap();
            favorites.add("Tokyo").unwrap();
            order = favorites.list().to_vec();
        }
        // Simulated restart: reload from the same backing store
        let reloaded = FavoritesManager::load(Preferences::new(store));
        assert_eq!(reloaded.list(), order.as_slice());
    }
}
