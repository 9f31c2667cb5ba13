//! Local persisted state for SkyCast.
//!
//! Preferences, favorites, and journal entries each live in an independent
//! slot (one serialized value per key). In-memory state is the source of
//! truth; persistence is synchronous and best-effort.

pub mod favorites;
pub mod journal;
pub mod prefs;
pub mod slot;

pub use favorites::{FavoriteCity, FavoritesError, FavoritesManager};
pub use journal::{JournalEntry, JournalError, JournalManager, Observation};
pub use prefs::Preferences;
pub use slot::{FileSlotStore, MemorySlotStore, SlotStore};
