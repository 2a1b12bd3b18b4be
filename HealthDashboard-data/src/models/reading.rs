use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

/// Storage model for a submitted biometric reading
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoredReading {
    /// Unique identifier for the reading
    pub id: String,

    /// User the reading belongs to
    pub username: String,

    /// Body weight in kilograms
    pub weight_kg: f64,

    /// Height in centimetres
    pub height_cm: f64,

    /// Systolic blood pressure (mmHg)
    pub systolic: f64,

    /// Diastolic blood pressure (mmHg)
    pub diastolic: f64,

    /// Resting heart rate in beats per minute
    pub heart_rate_bpm: f64,

    /// Total cholesterol (mg/dL)
    pub cholesterol_mg_dl: f64,

    /// Blood sugar (mg/dL)
    pub sugar_mg_dl: f64,

    /// Hours slept
    pub sleep_hours: f64,

    /// Body mass index, rounded to two decimals
    pub bmi: f64,

    /// When the reading was submitted
    pub recorded_at: DateTime<Utc>,
}

/// Input data for storing a new reading
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreateReadingRecord {
    pub username: String,
    pub weight_kg: f64,
    pub height_cm: f64,
    pub systolic: f64,
    pub diastolic: f64,
    pub heart_rate_bpm: f64,
    pub cholesterol_mg_dl: f64,
    pub sugar_mg_dl: f64,
    pub sleep_hours: f64,
    pub bmi: f64,
    pub recorded_at: DateTime<Utc>,
}

/// JSON body posted to the external save endpoint.
///
/// Field names follow the endpoint's form contract, hence `heartrate`
/// and the unit-less names.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SavePayload {
    pub username: String,
    pub weight: f64,
    pub height: f64,
    pub systolic: f64,
    pub diastolic: f64,
    pub heartrate: f64,
    pub cholesterol: f64,
    pub sugar: f64,
    pub sleep: f64,
}

/// Response body returned by the external save endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SaveResponse {
    /// `"success"` when the endpoint stored the reading
    pub status: String,

    /// Error or informational message from the endpoint
    #[serde(default)]
    pub message: Option<String>,
}

impl SaveResponse {
    /// Whether the endpoint reported success
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}
