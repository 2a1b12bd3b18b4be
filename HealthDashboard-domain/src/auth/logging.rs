use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Types of authentication events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthEventType {
    /// Successful password login
    Login,
    /// Rejected login attempt
    FailedLogin,
    /// New or replaced credentials
    Registration,
    /// User logout
    Logout,
    /// Bearer token check
    TokenValidation,
    /// Third-party sign-in attempt
    ExternalSignIn,
}

impl std::fmt::Display for AuthEventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthEventType::Login => write!(f, "LOGIN"),
            AuthEventType::FailedLogin => write!(f, "FAILED_LOGIN"),
            AuthEventType::Registration => write!(f, "REGISTRATION"),
            AuthEventType::Logout => write!(f, "LOGOUT"),
            AuthEventType::TokenValidation => write!(f, "TOKEN_VALIDATION"),
            AuthEventType::ExternalSignIn => write!(f, "EXTERNAL_SIGN_IN"),
        }
    }
}

/// Authentication event record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthEvent {
    pub event_type: AuthEventType,
    /// Username, when known
    pub username: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub success: bool,
    pub details: Option<String>,
    /// Authentication method used (password, token, google)
    pub auth_method: Option<String>,
}

impl AuthEvent {
    pub fn new(event_type: AuthEventType, username: Option<&str>, success: bool) -> Self {
        Self {
            event_type,
            username: username.map(String::from),
            timestamp: Utc::now(),
            success,
            details: None,
            auth_method: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_auth_method(mut self, auth_method: impl Into<String>) -> Self {
        self.auth_method = Some(auth_method.into());
        self
    }

    /// Single-line rendering used in the log output
    pub fn log_line(&self) -> String {
        let username = self.username.as_deref().unwrap_or("anonymous");
        let status = if self.success { "SUCCESS" } else { "FAILURE" };
        let details = self.details.as_deref().unwrap_or("");

        format!(
            "AUTH-LOG [{}] [{}] [{}] [{}] {}",
            self.event_type,
            username,
            status,
            self.timestamp.to_rfc3339(),
            details
        )
    }
}

/// Log an authentication event. Failures go out at warn level.
pub fn log_auth_event(event: AuthEvent) {
    let line = event.log_line();
    let method = event.auth_method.as_deref().unwrap_or("-");

    if event.success {
        info!(auth_method = method, "{}", line);
    } else {
        warn!(auth_method = method, "{}", line);
    }
}

pub fn log_successful_login(username: &str) {
    log_auth_event(AuthEvent::new(AuthEventType::Login, Some(username), true).with_auth_method("password"));
}

pub fn log_failed_login(username: &str, reason: &str) {
    let event = AuthEvent::new(AuthEventType::FailedLogin, Some(username), false)
        .with_details(reason)
        .with_auth_method("password");
    log_auth_event(event);
}

pub fn log_registration(username: &str, success: bool, details: Option<&str>) {
    let mut event = AuthEvent::new(AuthEventType::Registration, Some(username), success);
    if let Some(d) = details {
        event = event.with_details(d);
    }
    log_auth_event(event);
}

pub fn log_logout(username: &str) {
    log_auth_event(AuthEvent::new(AuthEventType::Logout, Some(username), true));
}

pub fn log_token_validation(username: Option<&str>, success: bool, details: Option<&str>) {
    let mut event =
        AuthEvent::new(AuthEventType::TokenValidation, username, success).with_auth_method("bearer");
    if let Some(d) = details {
        event = event.with_details(d);
    }
    log_auth_event(event);
}

pub fn log_external_sign_in(provider: &str) {
    let event = AuthEvent::new(AuthEventType::ExternalSignIn, None, false)
        .with_auth_method(provider)
        .with_details("provider not configured");
    log_auth_event(event);
}
