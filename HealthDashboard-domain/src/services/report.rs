use chrono::Utc;

use super::chart::{ChartDataset, ChartRenderer};
use super::classification::{
    classify_blood_pressure, classify_cholesterol, classify_heart_rate, classify_sugar, classify_weight,
};
use super::scores::compute_scores;
use super::suggestions::generate_suggestions;
use crate::auth::session::Session;
use crate::entities::reading::Reading;
use crate::entities::report::{HealthReport, SaveOutcome, StatusLines, StatusSummary};

/// Classify every metric of a reading
pub fn summarize(reading: &Reading, bmi: f64) -> StatusSummary {
    StatusSummary {
        weight: classify_weight(bmi),
        blood_pressure: classify_blood_pressure(reading.systolic, reading.diastolic),
        heart_rate: classify_heart_rate(reading.heart_rate_bpm),
        cholesterol: classify_cholesterol(reading.cholesterol_mg_dl),
        sugar: classify_sugar(reading.sugar_mg_dl),
    }
}

/// Format the five `<Metric>: <value> (<category>)` lines
pub fn format_status_lines(reading: &Reading, bmi: f64, statuses: &StatusSummary) -> StatusLines {
    StatusLines {
        bmi: format!("BMI: {:.2} ({})", bmi, statuses.weight),
        blood_pressure: format!(
            "Blood Pressure: {}/{} mmHg ({})",
            reading.systolic, reading.diastolic, statuses.blood_pressure
        ),
        heart_rate: format!("Heart Rate: {} BPM ({})", reading.heart_rate_bpm, statuses.heart_rate),
        cholesterol: format!(
            "Total Cholesterol: {} mg/dL ({})",
            reading.cholesterol_mg_dl, statuses.cholesterol
        ),
        sugar: format!("Sugar Level: {} mg/dL ({})", reading.sugar_mg_dl, statuses.sugar),
    }
}

/// Build the full dashboard report for a reading.
///
/// Pure apart from the generation timestamp: the session, chart renderer and
/// save outcome are all supplied by the caller.
pub fn build_report(
    session: &Session,
    reading: &Reading,
    renderer: &dyn ChartRenderer,
    save_outcome: SaveOutcome,
) -> HealthReport {
    let bmi = reading.bmi();
    let statuses = summarize(reading, bmi);
    let status_lines = format_status_lines(reading, bmi, &statuses);

    let suggestions = generate_suggestions(
        bmi,
        reading.systolic,
        reading.diastolic,
        reading.heart_rate_bpm,
        reading.cholesterol_mg_dl,
        reading.sugar_mg_dl,
        reading.sleep_hours,
    );

    let scores = compute_scores(
        bmi,
        reading.systolic,
        reading.heart_rate_bpm,
        reading.cholesterol_mg_dl,
        reading.sugar_mg_dl,
    );
    let chart = renderer.render(&ChartDataset::from_scores(&scores));

    HealthReport {
        username: session.username.clone(),
        reading: *reading,
        bmi,
        statuses,
        status_lines,
        suggestions,
        scores,
        chart,
        save_outcome,
        generated_at: Utc::now(),
    }
}
