use chrono::{DateTime, Utc};
use health_dashboard_data::models::reading::{CreateReadingRecord, SavePayload, StoredReading};

use crate::entities::reading::{Reading, ReadingHistoryEntry};

/// Conversion functions between domain entities and data models.
/// Names follow the pattern convert_to_[target_layer]_[model_name].

/// Convert a reading into the record the history repository stores
pub fn convert_to_data_create_record(
    username: &str,
    reading: &Reading,
    recorded_at: DateTime<Utc>,
) -> CreateReadingRecord {
    CreateReadingRecord {
        username: username.to_string(),
        weight_kg: reading.weight_kg,
        height_cm: reading.height_cm,
        systolic: reading.systolic,
        diastolic: reading.diastolic,
        heart_rate_bpm: reading.heart_rate_bpm,
        cholesterol_mg_dl: reading.cholesterol_mg_dl,
        sugar_mg_dl: reading.sugar_mg_dl,
        sleep_hours: reading.sleep_hours,
        bmi: reading.bmi(),
        recorded_at,
    }
}

/// Convert a reading into the body posted to the save endpoint
pub fn convert_to_data_save_payload(username: &str, reading: &Reading) -> SavePayload {
    SavePayload {
        username: username.to_string(),
        weight: reading.weight_kg,
        height: reading.height_cm,
        systolic: reading.systolic,
        diastolic: reading.diastolic,
        heartrate: reading.heart_rate_bpm,
        cholesterol: reading.cholesterol_mg_dl,
        sugar: reading.sugar_mg_dl,
        sleep: reading.sleep_hours,
    }
}

/// Convert a stored reading into a history entry
pub fn convert_to_domain_history_entry(stored: StoredReading) -> ReadingHistoryEntry {
    ReadingHistoryEntry {
        id: stored.id,
        reading: Reading {
            weight_kg: stored.weight_kg,
            height_cm: stored.height_cm,
            systolic: stored.systolic,
            diastolic: stored.diastolic,
            heart_rate_bpm: stored.heart_rate_bpm,
            cholesterol_mg_dl: stored.cholesterol_mg_dl,
            sugar_mg_dl: stored.sugar_mg_dl,
            sleep_hours: stored.sleep_hours,
        },
        bmi: stored.bmi,
        recorded_at: stored.recorded_at,
    }
}
