//! Auth state held for the lifetime of the process/page.

use std::sync::Arc;

use tokio::sync::RwLock;

use certify_shared::dto::{AuthResponse, GoogleAuthRequest, SigninRequest, SignupRequest};

use crate::domain::UserSummary;
use crate::error::ApiError;
use crate::ports::AuthApi;
use crate::session::SessionManager;

/// Snapshot of the current auth state.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthState {
    pub user: Option<UserSummary>,
    pub is_authenticated: bool,
    /// True while restoring the session or while a request is in flight.
    /// UIs withhold protected content until this settles.
    pub is_loading: bool,
    /// Last human-readable failure, for banner display. Field-level messages
    /// travel on the returned [`ApiError`] instead.
    pub error: Option<String>,
}

impl AuthState {
    fn signed_out() -> Self {
        Self {
            user: None,
            is_authenticated: false,
            is_loading: false,
            error: None,
        }
    }

    fn signed_in(user: UserSummary) -> Self {
        Self {
            user: Some(user),
            is_authenticated: true,
            is_loading: false,
            error: None,
        }
    }
}

/// The auth-state provider: one explicit object composing the API client and
/// the session manager, handed to whatever UI needs it. Deliberately not a
/// process-wide singleton.
pub struct AuthProvider {
    api: Arc<dyn AuthApi>,
    session: SessionManager,
    state: RwLock<AuthState>,
}

impl AuthProvider {
    /// Starts in the loading state; call [`initialize`](Self::initialize) to
    /// restore any persisted session.
    pub fn new(api: Arc<dyn AuthApi>, session: SessionManager) -> Self {
        Self {
            api,
            session,
            state: RwLock::new(AuthState {
                user: None,
                is_authenticated: false,
                is_loading: true,
                error: None,
            }),
        }
    }

    /// Restore state from the store - no network round-trip. A persisted
    /// session that is still valid becomes authenticated state; anything
    /// else (expired, partial, unparseable) is cleared.
    pub async fn initialize(&self) {
        let restored = if self.session.is_valid().await {
            self.session.load().await
        } else {
            None
        };

        match restored {
            Some(session) => {
                *self.state.write().await = AuthState::signed_in(session.user);
            }
            None => {
                if let Err(e) = self.session.clear().await {
                    tracing::warn!("failed to clear stale session: {e}");
                }
                *self.state.write().await = AuthState::signed_out();
            }
        }
    }

    pub async fn signin(&self, request: &SigninRequest) -> Result<AuthResponse, ApiError> {
        self.begin().await;
        let result = self.api.signin(request).await;
        self.settle(result).await
    }

    pub async fn signup(&self, request: &SignupRequest) -> Result<AuthResponse, ApiError> {
        self.begin().await;
        let result = self.api.signup(request).await;
        self.settle(result).await
    }

    pub async fn google_auth(&self, request: &GoogleAuthRequest) -> Result<AuthResponse, ApiError> {
        self.begin().await;
        let result = self.api.google_auth(request).await;
        self.settle(result).await
    }

    /// Drop the session locally. Never fails: a storage hiccup is logged and
    /// the in-memory state still ends up signed out.
    pub async fn signout(&self) {
        if let Err(e) = self.session.clear().await {
            tracing::warn!("failed to clear session on signout: {e}");
        }
        *self.state.write().await = AuthState::signed_out();
    }

    /// Re-check that the stored session is still usable; signs out and
    /// returns false when it is gone or expired.
    pub async fn refresh_session(&self) -> bool {
        if self.session.is_valid().await {
            true
        } else {
            self.signout().await;
            false
        }
    }

    pub async fn state(&self) -> AuthState {
        self.state.read().await.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.state.read().await.is_authenticated
    }

    pub async fn clear_error(&self) {
        self.state.write().await.error = None;
    }

    async fn begin(&self) {
        let mut state = self.state.write().await;
        state.error = None;
        state.is_loading = true;
    }

    /// Persist a successful response and flip state; on failure record the
    /// message and hand the typed error back for field-level handling.
    async fn settle(
        &self,
        result: Result<AuthResponse, ApiError>,
    ) -> Result<AuthResponse, ApiError> {
        match result {
            Ok(response) => {
                let user = UserSummary::from(response.user.clone());
                if let Err(e) = self
                    .session
                    .save(&response.token, &response.refresh_token, &user)
                    .await
                {
                    // The in-memory state is still authoritative for this
                    // page load; the session just won't survive a restart.
                    tracing::warn!("failed to persist session: {e}");
                }
                *self.state.write().await = AuthState::signed_in(user);
                Ok(response)
            }
            Err(error) => {
                let mut state = self.state.write().await;
                state.error = Some(error.to_string());
                state.is_loading = false;
                Err(error)
            }
        }
    }
}
