use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

/// Configure Swagger UI endpoints
pub fn configure_swagger_routes() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi())
}

/// Registers the bearer scheme referenced by protected paths
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

// API Documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health endpoints
        crate::api::handlers::health::health_check,

        // Auth endpoints
        crate::api::handlers::auth::register,
        crate::api::handlers::auth::login,
        crate::api::handlers::auth::google_sign_in,
        crate::api::handlers::auth::logout,
        crate::api::handlers::auth::me,

        // Reading endpoints
        crate::api::handlers::readings::submit_reading,
        crate::api::handlers::readings::reading_history,
    ),
    components(
        schemas(
            // Envelopes
            crate::entities::common::ErrorResponse,
            crate::entities::common::MessageResponse,

            // Health handlers
            crate::api::handlers::health::HealthResponse,
            crate::api::handlers::health::ComponentHealthStatus,

            // Auth schemas
            crate::entities::auth::PublicRegistrationRequest,
            crate::entities::auth::PublicLoginRequest,
            crate::entities::auth::PublicLoginResponse,
            crate::entities::auth::PublicSessionInfo,

            // Reading schemas
            crate::entities::readings::HistoryQueryParams,
            crate::entities::readings::ReadingHistoryResponse,
            health_dashboard_domain::entities::SubmitReadingRequest,
            health_dashboard_domain::entities::Reading,
            health_dashboard_domain::entities::ReadingHistoryEntry,
            health_dashboard_domain::entities::HealthReport,
            health_dashboard_domain::entities::StatusSummary,
            health_dashboard_domain::entities::StatusLines,
            health_dashboard_domain::entities::SaveOutcome,
            health_dashboard_domain::entities::SaveStatus,
            health_dashboard_domain::entities::WeightStatus,
            health_dashboard_domain::entities::BloodPressureStatus,
            health_dashboard_domain::entities::HeartRateStatus,
            health_dashboard_domain::entities::CholesterolStatus,
            health_dashboard_domain::entities::SugarStatus,
            health_dashboard_domain::services::suggestions::Suggestion,
            health_dashboard_domain::services::suggestions::SuggestionKind,
            health_dashboard_domain::services::scores::HealthScores,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "health", description = "Health check endpoint"),
        (name = "Authentication", description = "Registration, login and session endpoints"),
        (name = "readings", description = "Reading submission, dashboard report and history")
    ),
    info(
        title = "Health Dashboard API",
        version = "0.1.0",
        description = "Biometric readings in, status categories, suggestions and chart scores out",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        ),
    ),
    servers(
        (url = "/", description = "Local development server")
    )
)]
pub struct ApiDoc;
