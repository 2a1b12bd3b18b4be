use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use health_dashboard_domain::entities::ReadingHistoryEntry;

/// Query parameters for the reading history
#[derive(Debug, Clone, Deserialize, IntoParams, ToSchema)]
pub struct HistoryQueryParams {
    /// Maximum number of readings (default: 10, max: 100)
    pub limit: Option<usize>,
}

/// Newest readings of the current user
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReadingHistoryResponse {
    pub username: String,

    /// Number of readings returned
    pub count: usize,

    /// Newest first
    pub readings: Vec<ReadingHistoryEntry>,
}
