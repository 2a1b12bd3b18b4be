use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::auth::token_blacklist::TokenBlacklist;

/// Longest accepted access token lifetime, in minutes (one year)
pub const MAX_ACCESS_TOKEN_TTL_MINUTES: i64 = 365 * 24 * 60;

/// Security errors for token operations
#[derive(Debug, Error)]
pub enum SecurityError {
    /// JWT validation error
    #[error("Token validation error: {0}")]
    TokenValidation(String),

    /// Expired token
    #[error("Token has expired")]
    TokenExpired,

    /// Invalid token structure
    #[error("Invalid token format")]
    InvalidToken,

    /// Token issued by someone else
    #[error("Invalid token issuer")]
    InvalidIssuer,

    /// Token has been revoked
    #[error("Token has been revoked")]
    TokenRevoked,

    /// Configuration error
    #[error("Security configuration error: {0}")]
    ConfigError(String),
}

/// Claims carried by access tokens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (username)
    pub sub: String,
    /// Issuer
    pub iss: String,
    /// Issued at (seconds since the epoch)
    pub iat: i64,
    /// Expiration (seconds since the epoch)
    pub exp: i64,
    /// Unique token id, used for revocation
    pub jti: String,
}

/// Signing settings for access tokens
#[derive(Clone)]
pub struct TokenConfig {
    pub secret: String,
    pub issuer: String,
    pub access_token_ttl: Duration,
}

impl std::fmt::Debug for TokenConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenConfig")
            .field("secret", &"<redacted>")
            .field("issuer", &self.issuer)
            .field("access_token_ttl", &self.access_token_ttl)
            .finish()
    }
}

impl TokenConfig {
    /// Out-of-range lifetimes become zero and are rejected by [`TokenIssuer::new`]
    pub fn new(secret: impl Into<String>, issuer: impl Into<String>, ttl_minutes: i64) -> Self {
        Self {
            secret: secret.into(),
            issuer: issuer.into(),
            access_token_ttl: Duration::try_minutes(ttl_minutes).unwrap_or_else(Duration::zero),
        }
    }
}

/// A freshly signed token with its claims
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub claims: Claims,
}

/// Issues, validates and revokes HS256 access tokens
#[derive(Debug, Clone)]
pub struct TokenIssuer {
    config: TokenConfig,
    blacklist: TokenBlacklist,
}

impl TokenIssuer {
    /// Create an issuer. Fails when the signing secret is empty.
    pub fn new(config: TokenConfig, blacklist: TokenBlacklist) -> Result<Self, SecurityError> {
        if config.secret.is_empty() {
            error!("Refusing to create token issuer with an empty secret");
            return Err(SecurityError::ConfigError("JWT secret must not be empty".to_string()));
        }
        if config.access_token_ttl <= Duration::zero()
            || config.access_token_ttl.num_minutes() > MAX_ACCESS_TOKEN_TTL_MINUTES
        {
            return Err(SecurityError::ConfigError(format!(
                "Token lifetime must be between 1 and {} minutes",
                MAX_ACCESS_TOKEN_TTL_MINUTES
            )));
        }

        Ok(Self { config, blacklist })
    }

    /// Revocation list shared with this issuer
    pub fn blacklist(&self) -> &TokenBlacklist {
        &self.blacklist
    }

    /// Lifetime of issued tokens, in seconds
    pub fn expires_in_secs(&self) -> i64 {
        self.config.access_token_ttl.num_seconds()
    }

    /// Sign a new access token for `username`
    pub fn issue(&self, username: &str) -> Result<IssuedToken, SecurityError> {
        let now = Utc::now();
        let expiration = now
            .checked_add_signed(self.config.access_token_ttl)
            .ok_or_else(|| SecurityError::ConfigError("Token expiry out of range".to_string()))?;

        let claims = Claims {
            sub: username.to_string(),
            iss: self.config.issuer.clone(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.config.secret.as_bytes()),
        )
        .map_err(|e| {
            error!("Failed to encode JWT token: {}", e);
            SecurityError::TokenValidation(e.to_string())
        })?;

        // Never log the token itself
        info!("Generated access token for user {}", username);
        debug!("Token {} expires at {}", claims.jti, expiration);

        Ok(IssuedToken { token, claims })
    }

    /// Check signature, expiry, issuer and revocation, and return the claims
    pub fn validate(&self, token: &str) -> Result<Claims, SecurityError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.set_issuer(&[self.config.issuer.as_str()]);

        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.secret.as_bytes()),
            &validation,
        )
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => SecurityError::TokenExpired,
            jsonwebtoken::errors::ErrorKind::InvalidToken => SecurityError::InvalidToken,
            jsonwebtoken::errors::ErrorKind::InvalidIssuer => SecurityError::InvalidIssuer,
            jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                SecurityError::TokenValidation("Invalid signature".to_string())
            }
            _ => SecurityError::TokenValidation(e.to_string()),
        })?;

        if self.blacklist.is_revoked(&token_data.claims.jti) {
            debug!("Token {} for user {} is revoked", token_data.claims.jti, token_data.claims.sub);
            return Err(SecurityError::TokenRevoked);
        }

        Ok(token_data.claims)
    }

    /// Revoke a token id until the token would have expired
    pub fn revoke(&self, token_id: &str, expires_at: DateTime<Utc>) {
        self.blacklist.revoke_token(token_id, expires_at);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issuer() -> TokenIssuer {
        TokenIssuer::new(
            TokenConfig::new("test_secret_key_for_testing_only", "test-issuer", 60),
            TokenBlacklist::new(),
        )
        .unwrap()
    }

    #[test]
    fn test_issue_and_validate_token() {
        let issuer = issuer();

        let issued = issuer.issue("test").unwrap();
        assert!(!issued.token.is_empty());

        let claims = issuer.validate(&issued.token).unwrap();
        assert_eq!(claims.sub, "test");
        assert_eq!(claims.iss, "test-issuer");
        assert_eq!(claims.jti, issued.claims.jti);
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_each_token_gets_its_own_id() {
        let issuer = issuer();
        let first = issuer.issue("test").unwrap();
        let second = issuer.issue("test").unwrap();

        assert_ne!(first.claims.jti, second.claims.jti);
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let issuer = issuer();
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: "test".to_string(),
            iss: "test-issuer".to_string(),
            iat: now - 7200,
            exp: now - 3600,
            jti: "expired".to_string(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"test_secret_key_for_testing_only"),
        )
        .unwrap();

        match issuer.validate(&token) {
            Err(SecurityError::TokenExpired) => {}
            other => panic!("Expected TokenExpired but got: {:?}", other),
        }
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let issued = issuer().issue("test").unwrap();
        let other = TokenIssuer::new(
            TokenConfig::new("another_secret", "test-issuer", 60),
            TokenBlacklist::new(),
        )
        .unwrap();

        assert!(other.validate(&issued.token).is_err());
    }

    #[test]
    fn test_wrong_issuer_is_rejected() {
        let issued = issuer().issue("test").unwrap();
        let other = TokenIssuer::new(
            TokenConfig::new("test_secret_key_for_testing_only", "someone-else", 60),
            TokenBlacklist::new(),
        )
        .unwrap();

        assert!(matches!(other.validate(&issued.token), Err(SecurityError::InvalidIssuer)));
    }

    #[test]
    fn test_garbage_token_is_rejected() {
        let result = issuer().validate("invalid.token.format");
        assert!(matches!(
            result,
            Err(SecurityError::InvalidToken) | Err(SecurityError::TokenValidation(_))
        ));
    }

    #[test]
    fn test_revoked_token_is_rejected() {
        let issuer = issuer();
        let issued = issuer.issue("test").unwrap();

        let expires_at = DateTime::from_timestamp(issued.claims.exp, 0).unwrap();
        issuer.revoke(&issued.claims.jti, expires_at);

        assert!(matches!(issuer.validate(&issued.token), Err(SecurityError::TokenRevoked)));
        // Other tokens of the same user stay valid
        let fresh = issuer.issue("test").unwrap();
        assert!(issuer.validate(&fresh.token).is_ok());
    }

    #[test]
    fn test_out_of_range_lifetime_is_a_config_error() {
        for ttl in [0, -5, MAX_ACCESS_TOKEN_TTL_MINUTES + 1, i64::MAX] {
            let result = TokenIssuer::new(TokenConfig::new("secret", "issuer", ttl), TokenBlacklist::new());
            assert!(matches!(result, Err(SecurityError::ConfigError(_))), "ttl {} accepted", ttl);
        }

        let longest = TokenIssuer::new(
            TokenConfig::new("secret", "issuer", MAX_ACCESS_TOKEN_TTL_MINUTES),
            TokenBlacklist::new(),
        )
        .unwrap();
        assert!(longest.issue("test").is_ok());
    }

    #[test]
    fn test_empty_secret_is_a_config_error() {
        let result = TokenIssuer::new(TokenConfig::new("", "issuer", 60), TokenBlacklist::new());
        assert!(matches!(result, Err(SecurityError::ConfigError(_))));
    }
}
