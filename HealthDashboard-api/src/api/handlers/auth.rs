use axum::{
    extract::{Json, Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Extension,
};
use tracing::{debug, error, info, instrument, warn};
use validator::Validate;

use health_dashboard_domain::auth::logging::log_token_validation;
use health_dashboard_domain::auth::session::Session;
use health_dashboard_domain::auth::token::SecurityError;
use health_dashboard_domain::auth::AuthError;

use crate::api::routes::AppState;
use crate::entities::auth::{
    PublicLoginRequest, PublicLoginResponse, PublicRegistrationRequest, PublicSessionInfo,
};
use crate::entities::common::{ErrorResponse, MessageResponse};

impl From<AuthError> for ErrorResponse {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials | AuthError::MissingToken => ErrorResponse::unauthorized(err.to_string()),
            AuthError::InvalidRegistration => ErrorResponse::validation_error(err.to_string(), None),
            AuthError::ProviderUnavailable(message) => ErrorResponse::not_implemented(message),
            AuthError::Token(SecurityError::ConfigError(msg)) => {
                error!("Token configuration error: {}", msg);
                ErrorResponse::internal_error()
            }
            AuthError::Token(e) => ErrorResponse::unauthorized(e.to_string()),
            AuthError::Store(msg) => {
                error!("Credential store error: {}", msg);
                ErrorResponse::internal_error()
            }
        }
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header
fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    (!token.is_empty()).then(|| token.to_string())
}

/// Authentication middleware.
/// Puts the [`Session`] into request extensions or answers 401.
pub async fn require_session(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    let Some(token) = bearer_token(req.headers()) else {
        debug!("Missing or malformed Authorization header on {}", req.uri().path());
        log_token_validation(None, false, Some("Missing or malformed Authorization header"));
        return ErrorResponse::from(AuthError::MissingToken).into_response();
    };

    match state.auth.authenticate(&token) {
        Ok(session) => {
            req.extensions_mut().insert(session);
            next.run(req).await
        }
        Err(e) => {
            warn!("Rejected token on {}: {}", req.uri().path(), e);
            ErrorResponse::from(e).into_response()
        }
    }
}

/// Register a username and password
#[utoipa::path(
    post,
    path = "/auth/register",
    request_body = PublicRegistrationRequest,
    responses(
        (status = 201, description = "Registration successful", body = MessageResponse),
        (status = 400, description = "Username or password too short", body = ErrorResponse),
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, request), fields(username = %request.username))]
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<PublicRegistrationRequest>,
) -> Result<impl IntoResponse, ErrorResponse> {
    state.auth.register(&request.username, &request.password)?;

    info!("Registered user {}", request.username);
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::success("Registration successful! Please login.")),
    ))
}

/// Log in with username and password
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = PublicLoginRequest,
    responses(
        (status = 200, description = "Login successful. Send the access_token as 'Bearer {token}' on authenticated requests.", body = PublicLoginResponse),
        (status = 400, description = "Username or password missing", body = ErrorResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, request), fields(username = %request.username))]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<PublicLoginRequest>,
) -> Result<Json<PublicLoginResponse>, ErrorResponse> {
    if let Err(errors) = request.validate() {
        let details = serde_json::to_value(&errors).ok();
        return Err(ErrorResponse::validation_error("Username and password are required", details));
    }

    let outcome = state.auth.login(&request.username, &request.password)?;
    Ok(Json(outcome.into()))
}

/// Google sign-in placeholder
#[utoipa::path(
    post,
    path = "/auth/google",
    responses(
        (status = 501, description = "Google sign-in needs a real identity backend", body = ErrorResponse),
    ),
    tag = "Authentication"
)]
#[instrument(skip(state))]
pub async fn google_sign_in(State(state): State<AppState>) -> Result<Json<PublicLoginResponse>, ErrorResponse> {
    let outcome = state.auth.google_sign_in()?;
    Ok(Json(outcome.into()))
}

/// Revoke the current token
#[utoipa::path(
    post,
    path = "/auth/logout",
    responses(
        (status = 200, description = "Logged out successfully", body = MessageResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
    ),
    security(
        ("bearer" = [])
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, session), fields(username = %session.username))]
pub async fn logout(State(state): State<AppState>, Extension(session): Extension<Session>) -> Json<MessageResponse> {
    state.auth.logout(&session);
    Json(MessageResponse::success("Logged out successfully"))
}

/// Describe the current session
#[utoipa::path(
    get,
    path = "/auth/me",
    responses(
        (status = 200, description = "Current session", body = PublicSessionInfo),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
    ),
    security(
        ("bearer" = [])
    ),
    tag = "Authentication"
)]
pub async fn me(Extension(session): Extension<Session>) -> Json<PublicSessionInfo> {
    Json(PublicSessionInfo::from(&session))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_bearer_token_extraction() {
        let mut headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        assert_eq!(bearer_token(&headers), None);

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer "));
        assert_eq!(bearer_token(&headers), None);

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc.def.ghi"));
        assert_eq!(bearer_token(&headers).as_deref(), Some("abc.def.ghi"));
    }

    #[test]
    fn test_auth_error_mapping() {
        assert_eq!(
            ErrorResponse::from(AuthError::InvalidCredentials).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ErrorResponse::from(AuthError::InvalidRegistration).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ErrorResponse::from(AuthError::Token(SecurityError::TokenRevoked)).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ErrorResponse::from(AuthError::ProviderUnavailable("no".to_string())).status_code(),
            StatusCode::NOT_IMPLEMENTED
        );
        assert_eq!(
            ErrorResponse::from(AuthError::Store("poisoned".to_string())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
