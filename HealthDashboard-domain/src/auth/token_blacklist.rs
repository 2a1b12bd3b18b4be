use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

/// Revocation entry: when the token would have expired, and when it was revoked
type RevokedEntry = (DateTime<Utc>, DateTime<Utc>);

/// In-memory list of revoked token ids (JWT `jti`).
///
/// Entries are kept until the token would have expired anyway. The list is
/// bounded: when it reaches `max_size`, expired entries are pruned first and,
/// if that is not enough, the oldest half of the revocations is dropped.
#[derive(Debug, Clone)]
pub struct TokenBlacklist {
    revoked_tokens: Arc<Mutex<HashMap<String, RevokedEntry>>>,
    max_size: usize,
}

impl Default for TokenBlacklist {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenBlacklist {
    /// Create a blacklist holding up to 10,000 revoked tokens
    pub fn new() -> Self {
        Self::with_max_size(10_000)
    }

    /// Create a blacklist with a custom size limit
    pub fn with_max_size(max_size: usize) -> Self {
        Self {
            revoked_tokens: Arc::new(Mutex::new(HashMap::new())),
            max_size: max_size.max(1),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, RevokedEntry>> {
        self.revoked_tokens
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Revoke a token id until `expires_at`
    pub fn revoke_token(&self, token_id: &str, expires_at: DateTime<Utc>) {
        let mut tokens = self.lock();

        if tokens.len() >= self.max_size {
            warn!("Token blacklist reached max size ({}), performing aggressive cleanup", self.max_size);
            Self::cleanup_expired_tokens_internal(&mut tokens);

            if tokens.len() >= self.max_size {
                Self::remove_oldest_entries(&mut tokens, self.max_size.div_ceil(2));
            }
        }

        tokens.insert(token_id.to_string(), (expires_at, Utc::now()));
        info!("Token revoked: {}", token_id);
    }

    /// Whether a token id has been revoked
    pub fn is_revoked(&self, token_id: &str) -> bool {
        self.lock().contains_key(token_id)
    }

    /// Number of revoked tokens currently tracked
    pub fn size(&self) -> usize {
        self.lock().len()
    }

    /// Remove entries whose token has expired. Returns how many were removed.
    pub fn cleanup_expired_tokens(&self) -> usize {
        let mut tokens = self.lock();
        Self::cleanup_expired_tokens_internal(&mut tokens)
    }

    fn cleanup_expired_tokens_internal(tokens: &mut HashMap<String, RevokedEntry>) -> usize {
        let now = Utc::now();
        let before_count = tokens.len();

        tokens.retain(|_, (expires_at, _)| *expires_at > now);

        let removed = before_count - tokens.len();
        if removed > 0 {
            debug!("Removed {} expired tokens from blacklist", removed);
        }
        removed
    }

    fn remove_oldest_entries(tokens: &mut HashMap<String, RevokedEntry>, count: usize) {
        let mut by_revocation: Vec<(String, DateTime<Utc>)> = tokens
            .iter()
            .map(|(id, (_, revoked_at))| (id.clone(), *revoked_at))
            .collect();
        by_revocation.sort_by_key(|(_, revoked_at)| *revoked_at);

        for (id, _) in by_revocation.into_iter().take(count) {
            tokens.remove(&id);
        }

        debug!("Removed {} oldest entries from token blacklist", count);
    }
}

/// Periodically prune expired entries from `blacklist`
pub fn spawn_cleanup_task(blacklist: TokenBlacklist, every: Duration) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);

        loop {
            interval.tick().await;
            let removed = blacklist.cleanup_expired_tokens();
            debug!("Blacklist cleanup removed {} tokens, {} remain", removed, blacklist.size());
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration as ChronoDuration;
    use std::thread::sleep;

    #[test]
    fn test_revoke_and_check_token() {
        let blacklist = TokenBlacklist::new();
        blacklist.revoke_token("test-token-1", Utc::now() + ChronoDuration::minutes(5));

        assert!(blacklist.is_revoked("test-token-1"));
        assert!(!blacklist.is_revoked("unknown-token"));
    }

    #[test]
    fn test_clones_share_revocations() {
        let blacklist = TokenBlacklist::new();
        let shared = blacklist.clone();

        shared.revoke_token("jti-1", Utc::now() + ChronoDuration::minutes(5));
        assert!(blacklist.is_revoked("jti-1"));
    }

    #[test]
    fn test_cleanup_expired_tokens() {
        let blacklist = TokenBlacklist::new();
        blacklist.revoke_token("expired-token", Utc::now() - ChronoDuration::seconds(1));
        blacklist.revoke_token("valid-token", Utc::now() + ChronoDuration::seconds(60));
        assert_eq!(blacklist.size(), 2);

        let removed = blacklist.cleanup_expired_tokens();

        assert_eq!(removed, 1);
        assert!(!blacklist.is_revoked("expired-token"));
        assert!(blacklist.is_revoked("valid-token"));
    }

    #[test]
    fn test_max_size_drops_oldest() {
        let blacklist = TokenBlacklist::with_max_size(4);
        for i in 0..4 {
            blacklist.revoke_token(&format!("token-{}", i), Utc::now() + ChronoDuration::minutes(5));
            sleep(Duration::from_millis(5));
        }
        assert_eq!(blacklist.size(), 4);

        blacklist.revoke_token("new-token", Utc::now() + ChronoDuration::minutes(5));

        // Half of the oldest entries are dropped to make room
        assert_eq!(blacklist.size(), 3);
        assert!(!blacklist.is_revoked("token-0"));
        assert!(!blacklist.is_revoked("token-1"));
        assert!(blacklist.is_revoked("token-3"));
        assert!(blacklist.is_revoked("new-token"));
    }

    #[tokio::test]
    async fn test_cleanup_task_prunes_expired_entries() {
        let blacklist = TokenBlacklist::new();
        blacklist.revoke_token("expired", Utc::now() - ChronoDuration::seconds(1));

        let handle = spawn_cleanup_task(blacklist.clone(), Duration::from_millis(10));
        tokio::time::sleep(Duration::from_millis(50)).await;
        handle.abort();

        assert_eq!(blacklist.size(), 0);
    }
}
