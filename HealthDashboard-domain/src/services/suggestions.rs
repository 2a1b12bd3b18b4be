use std::fmt;
use serde::{Deserialize, Serialize};

#[cfg(feature = "with-api")]
use utoipa::ToSchema;

use super::classification::{
    classify_blood_pressure, classify_cholesterol, classify_heart_rate, classify_sugar,
};
use crate::entities::status::{HeartRateStatus, SugarStatus};

/// Condition that produced a suggestion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum SuggestionKind {
    /// BMI of 25 or more
    DietReduce,
    /// BMI below 18.5
    DietIncrease,
    /// Either hypertension stage
    BloodPressure,
    /// Heart rate outside 60-100
    HeartRate,
    /// Borderline high or high-risk cholesterol
    Cholesterol,
    /// Sugar outside the normal band
    Sugar,
    /// Sleep below 7 or above 9 hours
    Sleep,
    /// Nothing triggered
    AllNormal,
}

/// One advisory block shown on the dashboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct Suggestion {
    pub kind: SuggestionKind,
    pub icon: String,
    pub title: String,
    pub message: String,
}

impl Suggestion {
    fn new(kind: SuggestionKind, icon: &str, title: &str, message: impl Into<String>) -> Self {
        Self {
            kind,
            icon: icon.to_string(),
            title: title.to_string(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Suggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}", self.icon, self.title, self.message)
    }
}

/// Sleep duration considered healthy, inclusive
const SLEEP_RANGE_HOURS: (f64, f64) = (7.0, 9.0);

/// Compose the advisory blocks for a reading.
///
/// Conditions are evaluated in a fixed order (weight, blood pressure, heart
/// rate, cholesterol, sugar, sleep) and may all fire. When none fire the
/// result is a single [`SuggestionKind::AllNormal`] block.
pub fn generate_suggestions(
    bmi: f64,
    systolic: f64,
    diastolic: f64,
    heart_rate: f64,
    cholesterol: f64,
    sugar: f64,
    sleep_hours: f64,
) -> Vec<Suggestion> {
    let mut suggestions = Vec::new();

    if bmi >= 25.0 {
        suggestions.push(Suggestion::new(
            SuggestionKind::DietReduce,
            "🥗",
            "Diet",
            "Your BMI is high. Focus on reducing carb intake and increase lean protein/fiber. Portion control is key.",
        ));
    } else if bmi < 18.5 {
        suggestions.push(Suggestion::new(
            SuggestionKind::DietIncrease,
            "🍎",
            "Diet",
            "Your BMI is low. Increase healthy calorie intake from complex carbs, nuts, and healthy fats.",
        ));
    }

    if classify_blood_pressure(systolic, diastolic).is_hypertension() {
        suggestions.push(Suggestion::new(
            SuggestionKind::BloodPressure,
            "🛑",
            "BP Alert",
            "High Blood Pressure detected. Reduce sodium (salt) and alcohol intake. Increase potassium-rich foods (banana, spinach).",
        ));
    }

    if classify_heart_rate(heart_rate) != HeartRateStatus::Normal {
        suggestions.push(Suggestion::new(
            SuggestionKind::HeartRate,
            "💖",
            "Heart Rate",
            "Heart Rate is outside the normal range. Practice deep breathing exercises and avoid excessive caffeine.",
        ));
    }

    if classify_cholesterol(cholesterol).is_high() {
        suggestions.push(Suggestion::new(
            SuggestionKind::Cholesterol,
            "🧈",
            "Cholesterol Alert",
            "High Cholesterol. Replace saturated fats (butter, red meat) with unsaturated fats (avocado, olive oil). Increase oats and barley.",
        ));
    }

    if classify_sugar(sugar) != SugarStatus::Normal {
        suggestions.push(Suggestion::new(
            SuggestionKind::Sugar,
            "🩸",
            "Sugar Alert",
            "Sugar is not in the normal range. Avoid sugary drinks and processed foods. Regular exercise helps regulate blood sugar.",
        ));
    }

    let (min_sleep, max_sleep) = SLEEP_RANGE_HOURS;
    if sleep_hours < min_sleep || sleep_hours > max_sleep {
        suggestions.push(Suggestion::new(
            SuggestionKind::Sleep,
            "😴",
            "Rest",
            format!(
                "You reported {} hours. Aim for 7-9 hours. Maintain a fixed sleep schedule, even on weekends.",
                sleep_hours
            ),
        ));
    }

    if suggestions.is_empty() {
        suggestions.push(Suggestion::new(
            SuggestionKind::AllNormal,
            "✅",
            "Great Job!",
            "Your key health metrics are currently in the healthy range. Maintain your current lifestyle!",
        ));
    }

    suggestions
}
