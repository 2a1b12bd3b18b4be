use serde::{Deserialize, Serialize};
use serde_json::json;

use super::scores::{HealthScores, SCORE_AXIS_MAX};

/// Bar labels, in score order
pub const CHART_LABELS: [&str; 5] = ["BMI", "Blood Pressure", "Heart Rate", "Cholesterol", "Sugar Level"];

/// Bar colours, in score order
pub const CHART_COLORS: [&str; 5] = [
    "rgba(75, 192, 192, 0.8)",
    "rgba(255, 159, 64, 0.8)",
    "rgba(255, 99, 132, 0.8)",
    "rgba(54, 162, 235, 0.8)",
    "rgba(153, 102, 255, 0.8)",
];

/// Data handed to a chart renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartDataset {
    pub labels: Vec<String>,
    pub label: String,
    pub data: Vec<f64>,
    pub background_colors: Vec<String>,
    pub y_max: f64,
    pub y_title: String,
}

impl ChartDataset {
    /// Build the bar dataset for a set of scores
    pub fn from_scores(scores: &HealthScores) -> Self {
        Self {
            labels: CHART_LABELS.iter().map(|l| l.to_string()).collect(),
            label: "Your Current Metrics Score".to_string(),
            data: scores.as_array().to_vec(),
            background_colors: CHART_COLORS.iter().map(|c| c.to_string()).collect(),
            y_max: SCORE_AXIS_MAX,
            y_title: "Health Score (Higher is Better)".to_string(),
        }
    }
}

/// Turns a dataset into whatever the front end draws with
#[cfg_attr(test, mockall::automock)]
pub trait ChartRenderer: Send + Sync {
    fn render(&self, dataset: &ChartDataset) -> serde_json::Value;
}

/// Emits a Chart.js bar chart configuration
#[derive(Debug, Clone, Default)]
pub struct ChartJsRenderer;

impl ChartRenderer for ChartJsRenderer {
    fn render(&self, dataset: &ChartDataset) -> serde_json::Value {
        json!({
            "type": "bar",
            "data": {
                "labels": dataset.labels,
                "datasets": [{
                    "label": dataset.label,
                    "data": dataset.data,
                    "backgroundColor": dataset.background_colors,
                    "borderWidth": 1
                }]
            },
            "options": {
                "responsive": true,
                "scales": {
                    "y": {
                        "beginAtZero": true,
                        "max": dataset.y_max,
                        "title": { "display": true, "text": dataset.y_title }
                    }
                },
                "plugins": { "legend": { "display": false } },
                "animation": { "duration": 1200, "easing": "easeOutQuart" }
            }
        })
    }
}
