use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use tracing::debug;

use super::AuthError;

/// Minimum username length accepted at registration
pub const MIN_USERNAME_LEN: usize = 3;
/// Minimum password length accepted at registration
pub const MIN_PASSWORD_LEN: usize = 6;

/// Username seeded into a fresh store
pub const SEED_USERNAME: &str = "test";
/// Password seeded into a fresh store
pub const SEED_PASSWORD: &str = "password123";

/// Checks and records username/password pairs
pub trait CredentialVerifier: Send + Sync {
    /// Whether `password` matches the stored password of `username`
    fn verify(&self, username: &str, password: &str) -> Result<bool, AuthError>;

    /// Store credentials, replacing the password of an existing user
    fn register(&self, username: &str, password: &str) -> Result<(), AuthError>;

    /// Number of known users
    fn user_count(&self) -> Result<usize, AuthError>;
}

/// Check the registration length rules
pub fn check_registration(username: &str, password: &str) -> Result<(), AuthError> {
    if username.chars().count() < MIN_USERNAME_LEN || password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AuthError::InvalidRegistration);
    }
    Ok(())
}

/// Plain in-memory credential store.
/// Mock-grade: passwords are held as given and vanish on restart.
#[derive(Debug, Clone)]
pub struct InMemoryCredentialStore {
    users: Arc<RwLock<HashMap<String, String>>>,
}

impl Default for InMemoryCredentialStore {
    fn default() -> Self {
        Self::seeded()
    }
}

impl InMemoryCredentialStore {
    /// Empty store
    pub fn empty() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Store holding the demo `test` / `password123` account
    pub fn seeded() -> Self {
        let mut users = HashMap::new();
        users.insert(SEED_USERNAME.to_string(), SEED_PASSWORD.to_string());
        Self {
            users: Arc::new(RwLock::new(users)),
        }
    }
}

impl CredentialVerifier for InMemoryCredentialStore {
    fn verify(&self, username: &str, password: &str) -> Result<bool, AuthError> {
        let users = self.users.read()?;
        Ok(users.get(username).is_some_and(|stored| stored == password))
    }

    fn register(&self, username: &str, password: &str) -> Result<(), AuthError> {
        check_registration(username, password)?;

        let mut users = self.users.write()?;
        let replaced = users
            .insert(username.to_string(), password.to_string())
            .is_some();
        debug!("Stored credentials for {} (replaced: {})", username, replaced);
        Ok(())
    }

    fn user_count(&self) -> Result<usize, AuthError> {
        Ok(self.users.read()?.len())
    }
}
