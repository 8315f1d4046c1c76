//! Session bookkeeping over a [`SessionStore`] and a [`TokenDecoder`].

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;

use crate::domain::{Session, UserSummary};
use crate::ports::{SessionStore, StoreError, TokenDecoder};

/// Storage key for the access token.
pub const TOKEN_KEY: &str = "certify_token";
/// Storage key for the refresh token.
pub const REFRESH_TOKEN_KEY: &str = "certify_refresh_token";
/// Storage key for the serialized user record.
pub const USER_KEY: &str = "certify_user";

/// A token expiring within this window counts as due for renewal.
pub const REFRESH_LOOKAHEAD: Duration = Duration::from_secs(5 * 60);

/// How long persisted session material is kept around.
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// Saves, restores and judges the stored session.
///
/// Writes are atomic from the caller's perspective: there is no partial-write
/// recovery, a half-written session simply reads back as "no session".
pub struct SessionManager {
    store: Arc<dyn SessionStore>,
    decoder: Arc<dyn TokenDecoder>,
    ttl: Option<Duration>,
}

impl SessionManager {
    pub fn new(store: Arc<dyn SessionStore>, decoder: Arc<dyn TokenDecoder>) -> Self {
        Self {
            store,
            decoder,
            ttl: Some(DEFAULT_SESSION_TTL),
        }
    }

    /// Override the persistence TTL (`None` keeps entries until cleared).
    pub fn with_ttl(mut self, ttl: Option<Duration>) -> Self {
        self.ttl = ttl;
        self
    }

    /// Persist token, refresh token and user record together.
    pub async fn save(
        &self,
        token: &str,
        refresh_token: &str,
        user: &UserSummary,
    ) -> Result<(), StoreError> {
        let user_json =
            serde_json::to_string(user).map_err(|e| StoreError::Serialization(e.to_string()))?;
        self.store.set(TOKEN_KEY, token, self.ttl).await?;
        self.store.set(REFRESH_TOKEN_KEY, refresh_token, self.ttl).await?;
        self.store.set(USER_KEY, &user_json, self.ttl).await?;
        Ok(())
    }

    /// Restore the stored session.
    ///
    /// `Some` only when both the token and a parseable user record are
    /// present; the absence of either means no session. The refresh token is
    /// carried along when it exists.
    pub async fn load(&self) -> Option<Session> {
        let access_token = self.store.get(TOKEN_KEY).await?;
        let user_json = self.store.get(USER_KEY).await?;
        let user = serde_json::from_str(&user_json).ok()?;
        let refresh_token = self.store.get(REFRESH_TOKEN_KEY).await;
        Some(Session {
            access_token,
            refresh_token,
            user,
        })
    }

    /// Remove every stored session value.
    pub async fn clear(&self) -> Result<(), StoreError> {
        self.store.remove(TOKEN_KEY).await?;
        self.store.remove(REFRESH_TOKEN_KEY).await?;
        self.store.remove(USER_KEY).await?;
        Ok(())
    }

    /// The raw access token, for Authorization headers.
    pub async fn access_token(&self) -> Option<String> {
        self.store.get(TOKEN_KEY).await
    }

    /// True iff a token is stored, decodes, and expires strictly after now.
    pub async fn is_valid(&self) -> bool {
        let Some(token) = self.store.get(TOKEN_KEY).await else {
            return false;
        };
        match self.decoder.decode(&token) {
            Some(claims) => claims.exp > Utc::now().timestamp(),
            None => false,
        }
    }

    /// True when the stored token should be proactively renewed: it expires
    /// within [`REFRESH_LOOKAHEAD`], or it no longer decodes (fail closed).
    /// With no token stored there is nothing to renew.
    pub async fn needs_refresh(&self) -> bool {
        let Some(token) = self.store.get(TOKEN_KEY).await else {
            return false;
        };
        match self.decoder.decode(&token) {
            Some(claims) => claims.exp - Utc::now().timestamp() < REFRESH_LOOKAHEAD.as_secs() as i64,
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{MapStore, StubDecoder, token_expiring_in};

    fn manager() -> SessionManager {
        SessionManager::new(Arc::new(MapStore::default()), Arc::new(StubDecoder))
    }

    fn user() -> UserSummary {
        UserSummary::new("u1", "a@b.co", "ada")
    }

    #[tokio::test]
    async fn save_then_load_round_trips_user_fields() {
        let mgr = manager();
        mgr.save(&token_expiring_in(3600), "refresh-1", &user())
            .await
            .unwrap();

        let session = mgr.load().await.unwrap();
        assert_eq!(session.user, user());
        assert_eq!(session.refresh_token.as_deref(), Some("refresh-1"));
    }

    #[tokio::test]
    async fn clear_leaves_nothing_behind() {
        let mgr = manager();
        mgr.save(&token_expiring_in(3600), "refresh-1", &user())
            .await
            .unwrap();
        mgr.clear().await.unwrap();

        assert!(mgr.load().await.is_none());
        assert!(mgr.access_token().await.is_none());
        assert!(!mgr.is_valid().await);
    }

    #[tokio::test]
    async fn token_without_user_is_no_session() {
        let store = MapStore::default();
        store
            .set(TOKEN_KEY, &token_expiring_in(3600), None)
            .await
            .unwrap();
        let mgr = SessionManager::new(Arc::new(store), Arc::new(StubDecoder));
        assert!(mgr.load().await.is_none());
    }

    #[tokio::test]
    async fn expired_token_is_invalid_and_due_for_refresh() {
        let mgr = manager();
        mgr.save(&token_expiring_in(-10), "r", &user()).await.unwrap();
        assert!(!mgr.is_valid().await);
        assert!(mgr.needs_refresh().await);
    }

    #[tokio::test]
    async fn fresh_token_is_valid_and_not_due_for_refresh() {
        let mgr = manager();
        mgr.save(&token_expiring_in(3600), "r", &user()).await.unwrap();
        assert!(mgr.is_valid().await);
        assert!(!mgr.needs_refresh().await);
    }

    #[tokio::test]
    async fn token_inside_lookahead_window_needs_refresh() {
        let mgr = manager();
        mgr.save(&token_expiring_in(60), "r", &user()).await.unwrap();
        assert!(mgr.is_valid().await);
        assert!(mgr.needs_refresh().await);
    }

    #[tokio::test]
    async fn undecodable_token_fails_closed() {
        let mgr = manager();
        mgr.save("garbage", "r", &user()).await.unwrap();
        assert!(!mgr.is_valid().await);
        assert!(mgr.needs_refresh().await);
    }

    #[tokio::test]
    async fn empty_store_needs_no_refresh() {
        let mgr = manager();
        assert!(!mgr.is_valid().await);
        assert!(!mgr.needs_refresh().await);
    }
}
