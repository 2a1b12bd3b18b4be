use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use validator::Validate;

#[cfg(feature = "with-api")]
use utoipa::ToSchema;

/// Systolic pressure used when the form leaves the field empty
pub const DEFAULT_SYSTOLIC: f64 = 120.0;
/// Diastolic pressure used when the form leaves the field empty
pub const DEFAULT_DIASTOLIC: f64 = 80.0;
/// Heart rate used when the form leaves the field empty
pub const DEFAULT_HEART_RATE: f64 = 75.0;
/// Total cholesterol used when the form leaves the field empty
pub const DEFAULT_CHOLESTEROL: f64 = 180.0;
/// Blood sugar used when the form leaves the field empty
pub const DEFAULT_SUGAR: f64 = 100.0;
/// Sleep hours used when the form leaves the field empty
pub const DEFAULT_SLEEP_HOURS: f64 = 8.0;

/// One submitted snapshot of biometric values
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct Reading {
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
}

impl Reading {
    /// Body mass index of this reading, rounded to two decimals
    pub fn bmi(&self) -> f64 {
        compute_bmi(self.weight_kg, self.height_cm)
    }
}

/// Body mass index: `weight / (height in metres)^2`, rounded to two decimals
pub fn compute_bmi(weight_kg: f64, height_cm: f64) -> f64 {
    let height_m = height_cm / 100.0;
    round_to_two_decimals(weight_kg / (height_m * height_m))
}

/// Round half away from zero to two decimal places
pub fn round_to_two_decimals(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Request payload for submitting a reading.
///
/// Field names match the dashboard form. Only weight and height are required;
/// every other field falls back to a default when it is missing or zero.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct SubmitReadingRequest {
    /// Weight in kilograms
    #[validate(
        required(message = "Weight is required"),
        range(min = 1.0, max = 700.0, message = "Weight must be between 1 and 700 kg")
    )]
    pub weight: Option<f64>,

    /// Height in centimetres
    #[validate(
        required(message = "Height is required"),
        range(min = 30.0, max = 300.0, message = "Height must be between 30 and 300 cm")
    )]
    pub height: Option<f64>,

    /// Systolic blood pressure (default 120)
    #[validate(range(min = 0.0, max = 350.0, message = "Systolic must be between 0 and 350"))]
    pub systolic: Option<f64>,

    /// Diastolic blood pressure (default 80)
    #[validate(range(min = 0.0, max = 250.0, message = "Diastolic must be between 0 and 250"))]
    pub diastolic: Option<f64>,

    /// Heart rate in BPM (default 75)
    #[validate(range(min = 0.0, max = 300.0, message = "Heart rate must be between 0 and 300"))]
    pub heartrate: Option<f64>,

    /// Total cholesterol in mg/dL (default 180)
    #[validate(range(min = 0.0, max = 1000.0, message = "Cholesterol must be between 0 and 1000"))]
    pub cholesterol: Option<f64>,

    /// Blood sugar in mg/dL (default 100)
    #[validate(range(min = 0.0, max = 1000.0, message = "Sugar must be between 0 and 1000"))]
    pub sugar: Option<f64>,

    /// Hours slept (default 8)
    #[validate(range(min = 0.0, max = 24.0, message = "Sleep must be between 0 and 24 hours"))]
    pub sleep: Option<f64>,
}

impl SubmitReadingRequest {
    /// Build a [`Reading`], substituting defaults for empty fields.
    ///
    /// Returns `None` when weight or height is missing; call `validate` first
    /// to get a field-level message.
    pub fn to_reading(&self) -> Option<Reading> {
        Some(Reading {
            weight_kg: self.weight?,
            height_cm: self.height?,
            systolic: or_default(self.systolic, DEFAULT_SYSTOLIC),
            diastolic: or_default(self.diastolic, DEFAULT_DIASTOLIC),
            heart_rate_bpm: or_default(self.heartrate, DEFAULT_HEART_RATE),
            cholesterol_mg_dl: or_default(self.cholesterol, DEFAULT_CHOLESTEROL),
            sugar_mg_dl: or_default(self.sugar, DEFAULT_SUGAR),
            sleep_hours: or_default(self.sleep, DEFAULT_SLEEP_HOURS),
        })
    }
}

/// Empty, zero and NaN all count as "not provided"
fn or_default(value: Option<f64>, default: f64) -> f64 {
    match value {
        Some(v) if v != 0.0 && !v.is_nan() => v,
        _ => default,
    }
}

/// A previously submitted reading as returned by the history endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct ReadingHistoryEntry {
    /// Unique identifier for the stored reading
    pub id: String,

    /// The submitted values, after defaults
    pub reading: Reading,

    /// Body mass index computed at submission
    pub bmi: f64,

    /// When the reading was submitted
    pub recorded_at: DateTime<Utc>,
}
