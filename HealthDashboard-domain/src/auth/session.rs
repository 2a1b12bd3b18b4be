use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[cfg(feature = "with-api")]
use utoipa::ToSchema;

use super::token::{Claims, SecurityError};

/// The authenticated user behind a request, decoded from a valid token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct Session {
    /// Authenticated username
    pub username: String,

    /// Id of the token backing this session
    pub token_id: String,

    /// When the token was issued
    pub issued_at: DateTime<Utc>,

    /// When the token expires
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Build a session from validated token claims
    pub fn from_claims(claims: &Claims) -> Result<Self, SecurityError> {
        let issued_at = DateTime::from_timestamp(claims.iat, 0).ok_or(SecurityError::InvalidToken)?;
        let expires_at = DateTime::from_timestamp(claims.exp, 0).ok_or(SecurityError::InvalidToken)?;

        Ok(Self {
            username: claims.sub.clone(),
            token_id: claims.jti.clone(),
            issued_at,
            expires_at,
        })
    }

    /// Dashboard welcome line
    pub fn greeting(&self) -> String {
        greeting(&self.username)
    }

    /// A one-hour session not backed by an issued token
    #[cfg(any(test, feature = "mock"))]
    pub fn for_user(username: &str) -> Self {
        let now = Utc::now();
        Self {
            username: username.to_string(),
            token_id: uuid::Uuid::new_v4().to_string(),
            issued_at: now,
            expires_at: now + chrono::Duration::hours(1),
        }
    }
}

/// `Hello, <USERNAME>!`
pub fn greeting(username: &str) -> String {
    format!("Hello, {}!", username.to_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_greeting_is_uppercased() {
        assert_eq!(greeting("test"), "Hello, TEST!");
        assert_eq!(Session::for_user("Alice").greeting(), "Hello, ALICE!");
    }

    #[test]
    fn test_session_from_claims() {
        let claims = Claims {
            sub: "test".to_string(),
            iss: "issuer".to_string(),
            iat: 1_700_000_000,
            exp: 1_700_003_600,
            jti: "token-1".to_string(),
        };

        let session = Session::from_claims(&claims).unwrap();
        assert_eq!(session.username, "test");
        assert_eq!(session.token_id, "token-1");
        assert_eq!((session.expires_at - session.issued_at).num_minutes(), 60);
    }
}
