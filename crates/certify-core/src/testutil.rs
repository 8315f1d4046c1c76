//! Hand-rolled test doubles for the ports.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use certify_shared::dto::{
    AuthResponse, AuthUser, GoogleAuthRequest, SigninRequest, SignupRequest, UpdateProfileRequest,
};

use crate::domain::UserSummary;
use crate::error::ApiError;
use crate::ports::{AuthApi, SessionStore, StoreError, TokenClaims, TokenDecoder};

/// Plain map-backed store; TTLs are irrelevant for these tests.
#[derive(Default)]
pub struct MapStore {
    entries: RwLock<HashMap<String, String>>,
}

#[async_trait]
impl SessionStore for MapStore {
    async fn get(&self, key: &str) -> Option<String> {
        self.entries.read().await.get(key).cloned()
    }

    async fn set(&self, key: &str, value: &str, _ttl: Option<Duration>) -> Result<(), StoreError> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}

/// Decodes fixture tokens of the shape `exp:<unix-seconds>`; anything else
/// reads as malformed.
pub struct StubDecoder;

impl TokenDecoder for StubDecoder {
    fn decode(&self, token: &str) -> Option<TokenClaims> {
        let exp = token.strip_prefix("exp:")?.parse().ok()?;
        Some(TokenClaims {
            subject: Some("u1".to_string()),
            email: None,
            exp,
        })
    }
}

/// A fixture token expiring `secs` from now (negative for already expired).
pub fn token_expiring_in(secs: i64) -> String {
    format!("exp:{}", Utc::now().timestamp() + secs)
}

pub fn auth_response(token: &str) -> AuthResponse {
    AuthResponse {
        message: "Authenticated".to_string(),
        token: token.to_string(),
        refresh_token: "refresh-1".to_string(),
        user: AuthUser {
            id: "u1".to_string(),
            email: "a@b.co".to_string(),
            username: "ada".to_string(),
        },
    }
}

/// Auth API double answering every auth operation with one canned result.
pub struct StubApi {
    pub result: Result<AuthResponse, ApiError>,
}

impl StubApi {
    pub fn ok(token: &str) -> Self {
        Self {
            result: Ok(auth_response(token)),
        }
    }

    pub fn err(error: ApiError) -> Self {
        Self { result: Err(error) }
    }
}

#[async_trait]
impl AuthApi for StubApi {
    async fn signin(&self, _request: &SigninRequest) -> Result<AuthResponse, ApiError> {
        self.result.clone()
    }

    async fn signup(&self, _request: &SignupRequest) -> Result<AuthResponse, ApiError> {
        self.result.clone()
    }

    async fn google_auth(&self, _request: &GoogleAuthRequest) -> Result<AuthResponse, ApiError> {
        self.result.clone()
    }

    async fn get_profile(&self, _access_token: &str) -> Result<UserSummary, ApiError> {
        self.result
            .clone()
            .map(|response| UserSummary::from(response.user))
    }

    async fn update_profile(
        &self,
        access_token: &str,
        _request: &UpdateProfileRequest,
    ) -> Result<UserSummary, ApiError> {
        self.get_profile(access_token).await
    }

    async fn logout(&self, _access_token: &str) -> Result<(), ApiError> {
        self.result.clone().map(|_| ())
    }
}
