use async_trait::async_trait;

use certify_shared::dto::{
    AuthResponse, GoogleAuthRequest, SigninRequest, SignupRequest, UpdateProfileRequest,
};

use crate::domain::UserSummary;
use crate::error::ApiError;

/// Client of the external user service.
///
/// The first three operations are anonymous; the rest authenticate with an
/// explicit bearer token so callers decide where the token comes from.
#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn signin(&self, request: &SigninRequest) -> Result<AuthResponse, ApiError>;

    async fn signup(&self, request: &SignupRequest) -> Result<AuthResponse, ApiError>;

    async fn google_auth(&self, request: &GoogleAuthRequest) -> Result<AuthResponse, ApiError>;

    async fn get_profile(&self, access_token: &str) -> Result<UserSummary, ApiError>;

    async fn update_profile(
        &self,
        access_token: &str,
        request: &UpdateProfileRequest,
    ) -> Result<UserSummary, ApiError>;

    /// Invalidate the session server-side. Callers tolerate failure.
    async fn logout(&self, access_token: &str) -> Result<(), ApiError>;
}
