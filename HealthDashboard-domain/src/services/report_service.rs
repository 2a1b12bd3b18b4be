use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use thiserror::Error;
use tracing::{info, instrument, warn};
use validator::Validate;

use health_dashboard_data::remote::SaveEndpointTrait;
use health_dashboard_data::repository::{
    ReadingRepository, ReadingRepositoryTrait, RepositoryError, HISTORY_RETENTION,
};

use super::chart::{ChartJsRenderer, ChartRenderer};
use super::report::build_report;
use crate::auth::session::Session;
use crate::entities::conversions;
use crate::entities::reading::{Reading, ReadingHistoryEntry, SubmitReadingRequest};
use crate::entities::report::{HealthReport, SaveOutcome};

/// History entries returned when no limit is given
pub const DEFAULT_HISTORY_LIMIT: usize = 10;
/// Largest history page a caller can ask for; the store keeps no more than this per user
pub const MAX_HISTORY_LIMIT: usize = HISTORY_RETENTION;

/// Save endpoint shared across requests
pub type SharedSaveEndpoint = Arc<dyn SaveEndpointTrait + Send + Sync>;

/// Report service errors
#[derive(Debug, Error)]
pub enum ReportServiceError {
    /// The submitted reading is incomplete or out of range
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// The history store failed
    #[error("Repository error: {0}")]
    RepositoryError(String),
}

impl From<RepositoryError> for ReportServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Validation(msg) => ReportServiceError::ValidationError(msg),
            other => ReportServiceError::RepositoryError(other.to_string()),
        }
    }
}

/// Turns submitted readings into dashboard reports
#[async_trait]
pub trait ReportServiceTrait: Send + Sync {
    /// Validate a submission, forward it to the save endpoint, record it and build the report
    async fn submit_reading(
        &self,
        session: &Session,
        request: SubmitReadingRequest,
    ) -> Result<HealthReport, ReportServiceError>;

    /// Newest stored readings of the session user
    async fn recent_readings(
        &self,
        session: &Session,
        limit: Option<usize>,
    ) -> Result<Vec<ReadingHistoryEntry>, ReportServiceError>;
}

/// Default report service
pub struct ReportService<R> {
    repository: R,
    save_endpoint: Option<SharedSaveEndpoint>,
    renderer: Arc<dyn ChartRenderer>,
}

impl<R: ReadingRepositoryTrait + Send + Sync> ReportService<R> {
    pub fn new(repository: R, save_endpoint: Option<SharedSaveEndpoint>, renderer: Arc<dyn ChartRenderer>) -> Self {
        Self {
            repository,
            save_endpoint,
            renderer,
        }
    }

    /// Turn validator output into a single `field: message` line
    fn validate_request(request: &SubmitReadingRequest) -> Result<Reading, ReportServiceError> {
        if let Err(validation_errors) = request.validate() {
            let mut fields: Vec<String> = validation_errors
                .field_errors()
                .iter()
                .map(|(field, errors)| {
                    let messages: Vec<String> = errors
                        .iter()
                        .map(|err| match &err.message {
                            Some(msg) => msg.to_string(),
                            None => format!("Invalid {}", field),
                        })
                        .collect();
                    format!("{}: {}", field, messages.join(", "))
                })
                .collect();
            fields.sort();

            return Err(ReportServiceError::ValidationError(fields.join("; ")));
        }

        request.to_reading().ok_or_else(|| {
            ReportServiceError::ValidationError("Weight and height are required".to_string())
        })
    }

    /// Best-effort forward to the save endpoint. Never fails the submission.
    async fn forward_to_save_endpoint(&self, session: &Session, reading: &Reading) -> SaveOutcome {
        let Some(endpoint) = &self.save_endpoint else {
            return SaveOutcome::disabled();
        };

        let payload = conversions::convert_to_data_save_payload(&session.username, reading);
        match endpoint.save(&payload).await {
            Ok(response) if response.is_success() => {
                info!("Reading for {} saved to {}", session.username, endpoint.endpoint());
                SaveOutcome::saved()
            }
            Ok(response) => {
                let reason = response
                    .message
                    .unwrap_or_else(|| format!("status {}", response.status));
                warn!("Save endpoint rejected reading for {}: {}", session.username, reason);
                SaveOutcome::rejected(reason)
            }
            Err(e) => {
                warn!("Could not save reading for {}: {}", session.username, e);
                SaveOutcome::unavailable()
            }
        }
    }
}

#[async_trait]
impl<R: ReadingRepositoryTrait + Send + Sync> ReportServiceTrait for ReportService<R> {
    #[instrument(skip(self, session, request), fields(username = %session.username))]
    async fn submit_reading(
        &self,
        session: &Session,
        request: SubmitReadingRequest,
    ) -> Result<HealthReport, ReportServiceError> {
        let reading = Self::validate_request(&request)?;

        let save_outcome = self.forward_to_save_endpoint(session, &reading).await;

        let record = conversions::convert_to_data_create_record(&session.username, &reading, Utc::now());
        if let Err(e) = self.repository.create(record).await {
            warn!("Failed to record reading history for {}: {}", session.username, e);
        }

        Ok(build_report(session, &reading, self.renderer.as_ref(), save_outcome))
    }

    #[instrument(skip(self, session), fields(username = %session.username))]
    async fn recent_readings(
        &self,
        session: &Session,
        limit: Option<usize>,
    ) -> Result<Vec<ReadingHistoryEntry>, ReportServiceError> {
        let limit = limit
            .unwrap_or(DEFAULT_HISTORY_LIMIT)
            .clamp(1, MAX_HISTORY_LIMIT);

        let stored = self.repository.get_recent(&session.username, limit).await?;

        Ok(stored
            .into_iter()
            .map(conversions::convert_to_domain_history_entry)
            .collect())
    }
}

/// Report service over the in-memory history store and the Chart.js renderer
pub fn create_default_report_service(
    repository: ReadingRepository,
    save_endpoint: Option<SharedSaveEndpoint>,
) -> Arc<dyn ReportServiceTrait> {
    Arc::new(ReportService::new(repository, save_endpoint, Arc::new(ChartJsRenderer)))
}
