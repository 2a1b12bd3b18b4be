use axum::{
    extract::{Json, Query, State},
    Extension,
};
use tracing::{error, info, instrument};

use health_dashboard_domain::auth::session::Session;
use health_dashboard_domain::entities::{HealthReport, SubmitReadingRequest};
use health_dashboard_domain::services::ReportServiceError;

use crate::api::routes::AppState;
use crate::entities::common::ErrorResponse;
use crate::entities::readings::{HistoryQueryParams, ReadingHistoryResponse};

impl From<ReportServiceError> for ErrorResponse {
    fn from(err: ReportServiceError) -> Self {
        match err {
            ReportServiceError::ValidationError(msg) => ErrorResponse::validation_error(msg, None),
            ReportServiceError::RepositoryError(msg) => {
                error!("Reading history error: {}", msg);
                ErrorResponse::internal_error()
            }
        }
    }
}

/// Submit a reading and get the dashboard report
#[utoipa::path(
    post,
    path = "/api/v1/readings",
    request_body = SubmitReadingRequest,
    responses(
        (status = 200, description = "Report for the submitted reading", body = HealthReport),
        (status = 400, description = "Weight or height missing, or a value out of range", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
    ),
    security(
        ("bearer" = [])
    ),
    tag = "readings"
)]
#[instrument(skip(state, session, request), fields(username = %session.username))]
pub async fn submit_reading(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Json(request): Json<SubmitReadingRequest>,
) -> Result<Json<HealthReport>, ErrorResponse> {
    let report = state.reports.submit_reading(&session, request).await?;

    info!(
        "Report generated for {} (BMI {}, save {:?})",
        session.username, report.bmi, report.save_outcome.status
    );
    Ok(Json(report))
}

/// Newest readings of the current user
#[utoipa::path(
    get,
    path = "/api/v1/readings/history",
    params(HistoryQueryParams),
    responses(
        (status = 200, description = "Stored readings, newest first", body = ReadingHistoryResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 500, description = "History store failure", body = ErrorResponse),
    ),
    security(
        ("bearer" = [])
    ),
    tag = "readings"
)]
#[instrument(skip(state, session), fields(username = %session.username))]
pub async fn reading_history(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Query(params): Query<HistoryQueryParams>,
) -> Result<Json<ReadingHistoryResponse>, ErrorResponse> {
    let readings = state.reports.recent_readings(&session, params.limit).await?;

    Ok(Json(ReadingHistoryResponse {
        username: session.username,
        count: readings.len(),
        readings,
    }))
}
