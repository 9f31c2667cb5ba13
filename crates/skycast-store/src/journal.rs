//! Timestamped weather journal, newest-first.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::prefs::{Preferences, JOURNAL_KEY};

/// The weather reading a journal entry is written against. The dashboard
/// fills this from the currently displayed snapshot.
#[derive(Debug, Clone)]
pub struct Observation {
    pub city: String,
    /// Degrees Celsius; conversion is a display concern.
    pub temperature: f64,
    pub description: String,
    pub icon: String,
}

/// One journal entry. Only `notes` is mutable after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: String,
    /// Unix seconds at creation time.
    pub date: i64,
    pub city: String,
    /// Degrees Celsius, the canonical storage unit.
    pub temperature: f64,
    pub description: String,
    pub notes: String,
    pub icon: String,
}

/// Validation rejections from the journal manager. Never fatal; surfaced as
/// transient notices.
#[derive(Debug, Error)]
pub enum JournalError {
    /// Notes may be empty only while editing, never committed empty.
    #[error("Journal notes cannot be empty")]
    EmptyNotes,

    #[error("Journal entry not found: {0}")]
    NotFound(String),
}

/// Journal collection, persisted to the `journal` slot after every change.
/// Stateless between calls: edit buffering is a view concern.
pub struct JournalManager {
    prefs: Preferences,
    entries: Vec<JournalEntry>,
}

impl JournalManager {
    /// Load the persisted collection, falling back to empty.
    pub fn load(prefs: Preferences) -> Self {
        let entries = prefs.get(JOURNAL_KEY, Vec::new());
        Self { prefs, entries }
    }

    /// Entries in display order (newest first).
    pub fn entries(&self) -> &[JournalEntry] {
        &self.entries
    }

    pub fn find(&self, id: &str) -> Option<&JournalEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    /// Create an entry from the observed weather plus user notes, prepended
    /// so display order stays newest-first.
    pub fn add_entry(
        &mut self,
        observation: &Observation,
        notes: &str,
    ) -> Result<JournalEntry, JournalError> {
        if notes.trim().is_empty() {
            return Err(JournalError::EmptyNotes);
        }

        let entry = JournalEntry {
            id: Uuid::new_v4().to_string(),
            date: Utc::now().timestamp(),
            city: observation.city.clone(),
            temperature: observation.temperature,
            description: observation.description.clone(),
            notes: notes.to_string(),
            icon: observation.icon.clone(),
        };
        self.entries.insert(0, entry.clone());
        self.persist();

        tracing::debug!("Added journal entry for {}", entry.city);
        Ok(entry)
    }

    /// Replace `notes` on the matching entry. Every other field is immutable
    /// after creation.
    pub fn update_entry(&mut self, id: &str, notes: &str) -> Result<JournalEntry, JournalError> {
        if notes.trim().is_empty() {
            return Err(JournalError::EmptyNotes);
        }

        let entry = self
            .entries
            .iter_mut()
            .find(|entry| entry.id == id)
            .ok_or_else(|| JournalError::NotFound(id.to_string()))?;

        entry.notes = notes.to_string();
        let updated = entry.clone();
        self.persist();

        tracing::debug!("Updated journal entry: {}", id);
        Ok(updated)
    }

    /// Delete by id. No-op when the id is absent.
    pub fn delete_entry(&mut self, id: &str) {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        if self.entries.len() != before {
            self.persist();
            tracing::debug!("Deleted journal entry: {}", id);
        }
    }

    fn persist(&self) {
        self.prefs.set(JOURNAL_KEY, &self.entries);
    }
}
