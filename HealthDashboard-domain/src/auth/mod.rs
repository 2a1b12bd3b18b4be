//! Authentication for the dashboard
//!
//! Password login against a credential store, HS256 bearer tokens with
//! revocation on logout, and structured auth event logging.

use std::sync::{Arc, PoisonError};

use thiserror::Error;
use tracing::{debug, instrument};

pub mod credentials;
pub mod logging;
pub mod session;
pub mod token;
pub mod token_blacklist;

use credentials::CredentialVerifier;
use logging::{
    log_external_sign_in, log_failed_login, log_logout, log_registration, log_successful_login,
    log_token_validation,
};
use session::Session;
use token::{SecurityError, TokenIssuer};

/// Shown when someone tries Google sign-in
pub const GOOGLE_SIGN_IN_MESSAGE: &str = "Google Sign-In requires a Backend Server for secure integration (OAuth 2.0). Please use the Username/Password fields for this demo.";

/// Authentication errors
#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown user or wrong password
    #[error("Invalid username or password.")]
    InvalidCredentials,

    /// Registration rules not met
    #[error("Username must be 3+ chars and Password 6+ chars.")]
    InvalidRegistration,

    /// No bearer token on the request
    #[error("Missing authorization token")]
    MissingToken,

    /// Token rejected
    #[error(transparent)]
    Token(#[from] SecurityError),

    /// Sign-in provider that this service does not support
    #[error("{0}")]
    ProviderUnavailable(String),

    /// Credential store failure
    #[error("Credential store error: {0}")]
    Store(String),
}

impl<T> From<PoisonError<T>> for AuthError {
    fn from(err: PoisonError<T>) -> Self {
        AuthError::Store(err.to_string())
    }
}

/// Token and greeting returned by a successful login
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub token: String,
    pub expires_in: i64,
    pub session: Session,
    pub greeting: String,
}

/// Login, registration, logout and bearer token checks
#[derive(Clone)]
pub struct AuthService {
    credentials: Arc<dyn CredentialVerifier>,
    tokens: TokenIssuer,
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService").field("tokens", &self.tokens).finish_non_exhaustive()
    }
}

impl AuthService {
    pub fn new(credentials: Arc<dyn CredentialVerifier>, tokens: TokenIssuer) -> Self {
        Self { credentials, tokens }
    }

    /// Credential store behind this service
    pub fn credentials(&self) -> &Arc<dyn CredentialVerifier> {
        &self.credentials
    }

    /// Token issuer behind this service
    pub fn tokens(&self) -> &TokenIssuer {
        &self.tokens
    }

    /// Check a username/password pair and issue a token
    #[instrument(skip(self, password))]
    pub fn login(&self, username: &str, password: &str) -> Result<LoginOutcome, AuthError> {
        if !self.credentials.verify(username, password)? {
            log_failed_login(username, "invalid username or password");
            return Err(AuthError::InvalidCredentials);
        }

        let issued = self.tokens.issue(username)?;
        let session = Session::from_claims(&issued.claims)?;
        log_successful_login(username);

        Ok(LoginOutcome {
            token: issued.token,
            expires_in: self.tokens.expires_in_secs(),
            greeting: session.greeting(),
            session,
        })
    }

    /// Register credentials. An existing username gets its password replaced.
    #[instrument(skip(self, password))]
    pub fn register(&self, username: &str, password: &str) -> Result<(), AuthError> {
        match self.credentials.register(username, password) {
            Ok(()) => {
                log_registration(username, true, None);
                Ok(())
            }
            Err(err) => {
                log_registration(username, false, Some(&err.to_string()));
                Err(err)
            }
        }
    }

    /// Turn a bearer token into a session
    pub fn authenticate(&self, token: &str) -> Result<Session, AuthError> {
        let claims = match self.tokens.validate(token) {
            Ok(claims) => claims,
            Err(err) => {
                log_token_validation(None, false, Some(&err.to_string()));
                return Err(err.into());
            }
        };

        debug!("Token {} accepted for {}", claims.jti, claims.sub);
        Ok(Session::from_claims(&claims)?)
    }

    /// Revoke the token behind a session
    #[instrument(skip(self), fields(username = %session.username))]
    pub fn logout(&self, session: &Session) {
        self.tokens.revoke(&session.token_id, session.expires_at);
        log_logout(&session.username);
    }

    /// Google sign-in is not available without a real identity backend
    pub fn google_sign_in(&self) -> Result<LoginOutcome, AuthError> {
        log_external_sign_in("google");
        Err(AuthError::ProviderUnavailable(GOOGLE_SIGN_IN_MESSAGE.to_string()))
    }
}
