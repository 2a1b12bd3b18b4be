use serde::{Deserialize, Serialize};

#[cfg(feature = "with-api")]
use utoipa::ToSchema;

/// Upper bound of the chart's y axis
pub const SCORE_AXIS_MAX: f64 = 120.0;

/// Normalized "higher is better" scores shown as bars on the dashboard chart
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct HealthScores {
    pub bmi: f64,
    pub blood_pressure: f64,
    pub heart_rate: f64,
    pub cholesterol: f64,
    pub sugar: f64,
}

impl HealthScores {
    /// Scores in chart order: BMI, blood pressure, heart rate, cholesterol, sugar
    pub fn as_array(&self) -> [f64; 5] {
        [self.bmi, self.blood_pressure, self.heart_rate, self.cholesterol, self.sugar]
    }
}

/// Compute the chart scores. None of them is ever negative.
pub fn compute_scores(bmi: f64, systolic: f64, heart_rate: f64, cholesterol: f64, sugar: f64) -> HealthScores {
    HealthScores {
        bmi: ((24.9 - (22.0 - bmi).abs()) * 5.0).max(0.0),
        blood_pressure: (150.0 - systolic).max(0.0),
        heart_rate: (100.0 - (75.0 - heart_rate).abs()).max(0.0),
        cholesterol: (250.0 - cholesterol).max(0.0),
        sugar: (150.0 - sugar).max(0.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_scores_for_typical_reading() {
        let scores = compute_scores(22.86, 120.0, 75.0, 180.0, 100.0);

        assert!(approx(scores.bmi, 120.2));
        assert_eq!(scores.blood_pressure, 30.0);
        assert_eq!(scores.heart_rate, 100.0);
        assert_eq!(scores.cholesterol, 70.0);
        assert_eq!(scores.sugar, 50.0);
    }

    #[test]
    fn test_scores_never_negative() {
        let scores = compute_scores(80.0, 300.0, 250.0, 900.0, 600.0);

        assert_eq!(scores.as_array(), [0.0; 5]);
    }

    #[test]
    fn test_heart_rate_score_is_symmetric_around_75() {
        let low = compute_scores(22.0, 120.0, 55.0, 180.0, 100.0);
        let high = compute_scores(22.0, 120.0, 95.0, 180.0, 100.0);

        assert_eq!(low.heart_rate, 80.0);
        assert_eq!(high.heart_rate, 80.0);
    }
}
