use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use health_dashboard_domain::auth::session::Session;
use health_dashboard_domain::auth::LoginOutcome;

/// Registration request payload
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PublicRegistrationRequest {
    /// At least 3 characters
    pub username: String,

    /// At least 6 characters
    pub password: String,
}

/// Login request payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct PublicLoginRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Login response payload
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PublicLoginResponse {
    /// JWT access token
    pub access_token: String,

    /// Token type (Bearer)
    pub token_type: String,

    /// Lifetime of the token in seconds
    pub expires_in: i64,

    pub username: String,

    /// Welcome line, e.g. `Hello, TEST!`
    pub greeting: String,
}

impl From<LoginOutcome> for PublicLoginResponse {
    fn from(outcome: LoginOutcome) -> Self {
        Self {
            access_token: outcome.token,
            token_type: "Bearer".to_string(),
            expires_in: outcome.expires_in,
            username: outcome.session.username,
            greeting: outcome.greeting,
        }
    }
}

/// The authenticated session behind a request
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PublicSessionInfo {
    pub username: String,
    pub greeting: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl From<&Session> for PublicSessionInfo {
    fn from(session: &Session) -> Self {
        Self {
            username: session.username.clone(),
            greeting: session.greeting(),
            issued_at: session.issued_at,
            expires_at: session.expires_at,
        }
    }
}
