use std::collections::BTreeMap;
use std::time::{SystemTime, UNIX_EPOCH};

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use utoipa::ToSchema;

use health_dashboard_domain::health::{ComponentStatus as DomainComponentStatus, SystemHealth, SystemStatus};

use crate::api::routes::AppState;

/// Health check response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Current service status ("ok", "degraded", or "error")
    pub status: String,
    /// Current application version from Cargo manifest
    pub version: String,
    /// Timestamp of when the response was generated
    pub timestamp: u64,
    /// Uptime of the service in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uptime: Option<u64>,
    /// Status per component (api, credential_store, reading_store, save_endpoint)
    pub components: BTreeMap<String, ComponentHealthStatus>,
    /// Environment information
    pub environment: String,
}

/// Health status for an individual component
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ComponentHealthStatus {
    /// Status of the component ("ok", "degraded", or "error")
    pub status: String,
    /// Optional message with more details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

static SERVER_START_TIME: OnceCell<u64> = OnceCell::new();

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Record the server start time; later calls are no-ops
pub fn initialize_server_start_time() {
    SERVER_START_TIME.get_or_init(unix_now);
}

/// Health check endpoint to verify the API is running
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "API is healthy", body = HealthResponse),
        (status = 500, description = "API is not healthy", body = HealthResponse),
        (status = 503, description = "API is degraded", body = HealthResponse)
    ),
    tag = "health"
)]
#[instrument(skip(state))]
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    info!("Health check requested");

    let system_health = state.health.get_system_health().await;
    let code = status_code(&system_health.status);

    (code, Json(to_response(system_health, &state.environment)))
}

fn to_response(system_health: SystemHealth, environment: &str) -> HealthResponse {
    let now = unix_now();
    let uptime = SERVER_START_TIME.get().map(|start| now.saturating_sub(*start));

    let components = system_health
        .components
        .into_iter()
        .map(|(name, component)| {
            (
                name,
                ComponentHealthStatus {
                    status: map_component_status(&component.status).to_string(),
                    message: component.details,
                },
            )
        })
        .collect();

    let status = match system_health.status {
        SystemStatus::Healthy => "ok",
        SystemStatus::Degraded => "degraded",
        SystemStatus::Unhealthy => "error",
    };

    HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: now,
        uptime,
        components,
        environment: environment.to_string(),
    }
}

fn status_code(status: &SystemStatus) -> StatusCode {
    match status {
        SystemStatus::Healthy => StatusCode::OK,
        SystemStatus::Degraded => StatusCode::SERVICE_UNAVAILABLE,
        SystemStatus::Unhealthy => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Map domain component status to API status string
fn map_component_status(status: &DomainComponentStatus) -> &'static str {
    match status {
        DomainComponentStatus::Healthy => "ok",
        DomainComponentStatus::Degraded => "degraded",
        DomainComponentStatus::Unhealthy => "error",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use health_dashboard_domain::health::tests::MockHealthService;
    use health_dashboard_domain::health::HealthServiceTrait;

    #[tokio::test]
    async fn test_components_are_mapped() {
        let service = MockHealthService::new().with_component(
            "save_endpoint",
            DomainComponentStatus::Degraded,
            Some("slow".to_string()),
        );
        let health = service.get_system_health().await;

        assert_eq!(status_code(&health.status), StatusCode::SERVICE_UNAVAILABLE);

        let response = to_response(health, "test");
        assert_eq!(response.status, "degraded");
        assert_eq!(response.environment, "test");
        assert_eq!(response.components["api"].status, "ok");
        assert_eq!(response.components["save_endpoint"].status, "degraded");
        assert_eq!(response.components["save_endpoint"].message.as_deref(), Some("slow"));
    }

    #[tokio::test]
    async fn test_unhealthy_maps_to_server_error() {
        let service = MockHealthService::new().with_component(
            "reading_store",
            DomainComponentStatus::Unhealthy,
            None,
        );
        let health = service.get_system_health().await;

        assert_eq!(status_code(&health.status), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(to_response(health, "test").status, "error");
    }

    #[test]
    fn test_start_time_is_recorded_once() {
        initialize_server_start_time();
        let first = SERVER_START_TIME.get().copied();
        initialize_server_start_time();

        assert!(first.is_some());
        assert_eq!(SERVER_START_TIME.get().copied(), first);
    }
}
