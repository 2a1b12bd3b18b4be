use std::sync::{Arc, Mutex};
use std::collections::{HashMap, VecDeque};

use crate::models::reading::StoredReading;
use super::errors::RepositoryError;

/// Readings kept per user; older ones are dropped on insert
pub const HISTORY_RETENTION: usize = 100;

/// In-memory storage for submitted readings, keyed by username
#[derive(Debug, Clone)]
pub struct InMemoryStorage {
    /// Readings per user, oldest first, at most [`HISTORY_RETENTION`] each
    readings: Arc<Mutex<HashMap<String, VecDeque<StoredReading>>>>,
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStorage {
    /// Create a new in-memory storage
    pub fn new() -> Self {
        Self {
            readings: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Store a reading in memory, evicting the user's oldest reading past the retention limit
    pub fn store_reading(&self, reading: &StoredReading) -> Result<StoredReading, RepositoryError> {
        let mut store = self.readings.lock()?;
        let history = store.entry(reading.username.clone()).or_default();

        // Equal timestamps keep insertion order
        let position = history.partition_point(|r| r.recorded_at <= reading.recorded_at);
        history.insert(position, reading.clone());

        while history.len() > HISTORY_RETENTION {
            history.pop_front();
        }

        Ok(reading.clone())
    }

    /// Get the newest readings for a user, newest first
    pub fn get_recent(&self, username: &str, limit: usize) -> Result<Vec<StoredReading>, RepositoryError> {
        let store = self.readings.lock()?;

        Ok(store
            .get(username)
            .map(|history| history.iter().rev().take(limit).cloned().collect())
            .unwrap_or_default())
    }

    /// Count the readings stored for every user
    pub fn count(&self) -> Result<usize, RepositoryError> {
        let store = self.readings.lock()?;
        Ok(store.values().map(VecDeque::len).sum())
    }
}
