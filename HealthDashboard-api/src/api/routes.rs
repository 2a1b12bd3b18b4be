use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::{header, HeaderName, HeaderValue, Method},
    middleware,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

use health_dashboard_data::remote::HttpSaveClient;
use health_dashboard_data::repository::ReadingRepository;
use health_dashboard_domain::auth::credentials::{CredentialVerifier, InMemoryCredentialStore};
use health_dashboard_domain::auth::token::{TokenConfig, TokenIssuer};
use health_dashboard_domain::auth::token_blacklist::TokenBlacklist;
use health_dashboard_domain::auth::AuthService;
use health_dashboard_domain::health::{DashboardHealthService, HealthServiceTrait};
use health_dashboard_domain::services::{create_default_report_service, ReportServiceTrait, SharedSaveEndpoint};

use crate::api::handlers::{auth, health, readings};
use crate::config::{AppConfig, ConfigError};
use crate::openapi::configure_swagger_routes;

/// Services shared by all handlers
#[derive(Clone)]
pub struct AppState {
    pub auth: AuthService,
    pub reports: Arc<dyn ReportServiceTrait>,
    pub health: Arc<dyn HealthServiceTrait>,
    pub environment: String,
}

impl AppState {
    pub fn new(
        auth: AuthService,
        reports: Arc<dyn ReportServiceTrait>,
        health: Arc<dyn HealthServiceTrait>,
        environment: impl Into<String>,
    ) -> Self {
        Self {
            auth,
            reports,
            health,
            environment: environment.into(),
        }
    }

    /// Wire the in-memory stores, the token issuer and the save client from configuration
    pub fn from_config(config: &AppConfig) -> Result<Self, ConfigError> {
        let save_endpoint = match &config.save_endpoint_url {
            Some(url) => {
                info!("Forwarding readings to {}", url);
                let client: SharedSaveEndpoint = Arc::new(HttpSaveClient::new(url.clone(), config.save_timeout)?);
                Some(client)
            }
            None => {
                info!("Remote saving disabled");
                None
            }
        };

        Self::with_save_endpoint(config, save_endpoint)
    }

    /// Like [`AppState::from_config`] but with a caller-supplied save endpoint
    pub fn with_save_endpoint(
        config: &AppConfig,
        save_endpoint: Option<SharedSaveEndpoint>,
    ) -> Result<Self, ConfigError> {
        let tokens = TokenIssuer::new(
            TokenConfig::new(
                config.jwt_secret.clone(),
                config.jwt_issuer.clone(),
                config.access_token_ttl_minutes,
            ),
            TokenBlacklist::new(),
        )?;

        let credentials: Arc<dyn CredentialVerifier> = Arc::new(InMemoryCredentialStore::seeded());
        let repository = ReadingRepository::new();

        let save_url = save_endpoint.as_ref().map(|e| e.endpoint().to_string());
        let health: Arc<dyn HealthServiceTrait> = Arc::new(DashboardHealthService::new(
            credentials.clone(),
            repository.clone(),
            save_url,
        ));
        let reports = create_default_report_service(repository, save_endpoint);

        Ok(Self::new(
            AuthService::new(credentials, tokens),
            reports,
            health,
            config.environment.clone(),
        ))
    }
}

/// Create the application router
pub fn create_app(state: AppState) -> Router {
    debug!("Creating application router");

    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/google", post(auth::google_sign_in));

    // route_layer so unknown paths still 404 instead of 401
    let protected_routes = Router::new()
        .route("/auth/logout", post(auth::logout))
        .route("/auth/me", get(auth::me))
        .route("/api/v1/readings", post(readings::submit_reading))
        .route("/api/v1/readings/history", get(readings::reading_history))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::require_session));

    debug!("Routes configured");

    let app = Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .with_state(state)
        .merge(configure_swagger_routes())
        .layer(TraceLayer::new_for_http());

    configure_security(app)
}

/// CORS and security headers for every response
pub fn configure_security(app: Router) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .max_age(Duration::from_secs(3600));

    let security_headers = ServiceBuilder::new()
        .layer(SetResponseHeaderLayer::if_not_present(
            header::STRICT_TRANSPORT_SECURITY,
            HeaderValue::from_static("max-age=63072000; includeSubDomains; preload"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            HeaderName::from_static("referrer-policy"),
            HeaderValue::from_static("strict-origin-when-cross-origin"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            HeaderName::from_static("permissions-policy"),
            HeaderValue::from_static("camera=(), microphone=(), geolocation=(), interest-cohort=()"),
        ));

    app.layer(cors).layer(security_headers)
}
