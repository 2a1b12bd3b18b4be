use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

#[cfg(feature = "with-api")]
use utoipa::ToSchema;

use super::reading::Reading;
use super::status::{BloodPressureStatus, CholesterolStatus, HeartRateStatus, SugarStatus, WeightStatus};
use crate::services::scores::HealthScores;
use crate::services::suggestions::Suggestion;

/// Category of every metric in a reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct StatusSummary {
    pub weight: WeightStatus,
    pub blood_pressure: BloodPressureStatus,
    pub heart_rate: HeartRateStatus,
    pub cholesterol: CholesterolStatus,
    pub sugar: SugarStatus,
}

/// Human readable status lines, e.g. `Heart Rate: 75 BPM (Normal)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct StatusLines {
    pub bmi: String,
    pub blood_pressure: String,
    pub heart_rate: String,
    pub cholesterol: String,
    pub sugar: String,
}

/// Result of forwarding a reading to the external save endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum SaveStatus {
    /// The endpoint stored the reading
    Saved,
    /// The endpoint answered but refused the reading
    Rejected,
    /// The endpoint could not be reached or answered garbage
    Unavailable,
    /// No save endpoint is configured
    Disabled,
}

/// Outcome of the best-effort save, shown to the user as a notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct SaveOutcome {
    pub status: SaveStatus,

    /// Notification text for the user
    pub message: String,
}

impl SaveOutcome {
    pub fn saved() -> Self {
        Self {
            status: SaveStatus::Saved,
            message: "Data saved successfully.".to_string(),
        }
    }

    pub fn rejected(reason: impl AsRef<str>) -> Self {
        Self {
            status: SaveStatus::Rejected,
            message: format!("Save endpoint error: {}", reason.as_ref()),
        }
    }

    pub fn unavailable() -> Self {
        Self {
            status: SaveStatus::Unavailable,
            message: "Could not connect to the save endpoint or save data.".to_string(),
        }
    }

    pub fn disabled() -> Self {
        Self {
            status: SaveStatus::Disabled,
            message: "Remote saving is disabled; the report was generated locally.".to_string(),
        }
    }
}

/// Everything the dashboard shows after a submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct HealthReport {
    /// User the report was generated for
    pub username: String,

    /// The reading after defaults were applied
    pub reading: Reading,

    /// Body mass index, rounded to two decimals
    pub bmi: f64,

    /// Category per metric
    pub statuses: StatusSummary,

    /// Formatted status lines
    pub status_lines: StatusLines,

    /// Advisory blocks in evaluation order
    pub suggestions: Vec<Suggestion>,

    /// Normalized chart scores (0-120, higher is better)
    pub scores: HealthScores,

    /// Chart configuration produced by the chart renderer
    #[cfg_attr(feature = "with-api", schema(value_type = Object))]
    pub chart: serde_json::Value,

    /// Outcome of the best-effort remote save
    pub save_outcome: SaveOutcome,

    /// When the report was generated
    pub generated_at: DateTime<Utc>,
}
