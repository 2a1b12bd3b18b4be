use tracing::debug;
use uuid::Uuid;
use async_trait::async_trait;

use crate::models::reading::{CreateReadingRecord, StoredReading};
use super::errors::RepositoryError;
use super::in_memory::InMemoryStorage;

/// Repository trait for submitted readings
#[async_trait]
pub trait ReadingRepositoryTrait {
    /// Store a new reading from a record
    async fn create(&self, record: CreateReadingRecord) -> Result<StoredReading, RepositoryError>;

    /// Get the newest readings for a user, newest first
    async fn get_recent(&self, username: &str, limit: usize) -> Result<Vec<StoredReading>, RepositoryError>;

    /// Number of readings held by the repository
    async fn count(&self) -> Result<usize, RepositoryError>;
}

/// Repository for submitted readings.
/// Readings live in process memory only and are lost on restart.
#[derive(Debug, Clone, Default)]
pub struct ReadingRepository {
    storage: InMemoryStorage,
}

impl ReadingRepository {
    /// Create a new repository
    pub fn new() -> Self {
        Self {
            storage: InMemoryStorage::new(),
        }
    }
}

#[async_trait]
impl ReadingRepositoryTrait for ReadingRepository {
    async fn create(&self, record: CreateReadingRecord) -> Result<StoredReading, RepositoryError> {
        if record.username.trim().is_empty() {
            return Err(RepositoryError::Validation("username must not be empty".to_string()));
        }

        let reading = StoredReading {
            id: Uuid::new_v4().to_string(),
            username: record.username,
            weight_kg: record.weight_kg,
            height_cm: record.height_cm,
            systolic: record.systolic,
            diastolic: record.diastolic,
            heart_rate_bpm: record.heart_rate_bpm,
            cholesterol_mg_dl: record.cholesterol_mg_dl,
            sugar_mg_dl: record.sugar_mg_dl,
            sleep_hours: record.sleep_hours,
            bmi: record.bmi,
            recorded_at: record.recorded_at,
        };

        debug!("Storing reading {} for user {}", reading.id, reading.username);
        self.storage.store_reading(&reading)
    }

    async fn get_recent(&self, username: &str, limit: usize) -> Result<Vec<StoredReading>, RepositoryError> {
        self.storage.get_recent(username, limit)
    }

    async fn count(&self) -> Result<usize, RepositoryError> {
        self.storage.count()
    }
}

/// Mock reading repository for testing
#[cfg(any(test, feature = "mock"))]
pub mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Mock implementation of ReadingRepositoryTrait for testing
    #[derive(Default)]
    pub struct MockReadingRepository {
        readings: Mutex<Vec<StoredReading>>,
        failing: bool,
    }

    impl MockReadingRepository {
        /// Create a new empty mock repository
        pub fn new() -> Self {
            Self::default()
        }

        /// Create a mock repository whose every operation fails
        pub fn failing() -> Self {
            Self {
                readings: Mutex::new(Vec::new()),
                failing: true,
            }
        }

        fn check_failing(&self) -> Result<(), RepositoryError> {
            if self.failing {
                return Err(RepositoryError::Lock("mock repository is configured to fail".to_string()));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl ReadingRepositoryTrait for MockReadingRepository {
        async fn create(&self, record: CreateReadingRecord) -> Result<StoredReading, RepositoryError> {
            self.check_failing()?;

            let reading = StoredReading {
                id: Uuid::new_v4().to_string(),
                username: record.username,
                weight_kg: record.weight_kg,
                height_cm: record.height_cm,
                systolic: record.systolic,
                diastolic: record.diastolic,
                heart_rate_bpm: record.heart_rate_bpm,
                cholesterol_mg_dl: record.cholesterol_mg_dl,
                sugar_mg_dl: record.sugar_mg_dl,
                sleep_hours: record.sleep_hours,
                bmi: record.bmi,
                recorded_at: record.recorded_at,
            };

            self.readings.lock()?.push(reading.clone());
            Ok(reading)
        }

        async fn get_recent(&self, username: &str, limit: usize) -> Result<Vec<StoredReading>, RepositoryError> {
            self.check_failing()?;
            let mut readings: Vec<StoredReading> = self.readings.lock()?
                .iter()
                .filter(|r| r.username == username)
                .cloned()
                .collect();

            readings.sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at));
            readings.truncate(limit);
            Ok(readings)
        }

        async fn count(&self) -> Result<usize, RepositoryError> {
            self.check_failing()?;
            Ok(self.readings.lock()?.len())
        }
    }
}
