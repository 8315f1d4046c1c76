//! REST implementation of the [`AuthApi`] port.

use async_trait::async_trait;
use reqwest::RequestBuilder;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use certify_core::domain::UserSummary;
use certify_core::error::ApiError;
use certify_core::ports::AuthApi;
use certify_shared::dto::{
    ApiErrorBody, AuthResponse, GoogleAuthRequest, SigninRequest, SignupRequest,
    UpdateProfileRequest,
};

/// Base URL used when `AUTH_API_URL` is not configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api/users";

/// Profile endpoints wrap the record in a `user` object.
#[derive(Debug, Deserialize)]
struct ProfileBody {
    user: UserSummary,
}

/// Typed client for the external user service.
///
/// All failures are normalized onto [`ApiError`]: transport problems and
/// undecodable bodies become the network variant (status 0); non-success
/// statuses carry the service's message and any field-level entries.
#[derive(Debug, Clone)]
pub struct RestAuthApi {
    http: reqwest::Client,
    base_url: String,
}

impl RestAuthApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    /// Read the base URL from `AUTH_API_URL`, falling back to the local
    /// development default.
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("AUTH_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(base_url)
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !(200..300).contains(&status) {
            return Err(error_from_response(status, &body));
        }

        serde_json::from_slice(&body).map_err(|e| ApiError::Network(e.to_string()))
    }
}

/// Map a non-success response onto the error taxonomy.
fn error_from_response(status: u16, body: &[u8]) -> ApiError {
    let parsed: ApiErrorBody = serde_json::from_slice(body).unwrap_or_default();
    let message = parsed
        .message
        .clone()
        .unwrap_or_else(|| format!("HTTP error, status {status}"));
    let errors = parsed.field_errors();

    if errors.is_empty() {
        ApiError::Http { status, message }
    } else {
        ApiError::Validation {
            status,
            message,
            errors,
        }
    }
}

#[async_trait]
impl AuthApi for RestAuthApi {
    async fn signin(&self, request: &SigninRequest) -> Result<AuthResponse, ApiError> {
        self.execute(self.http.post(self.url("/signin")).json(request))
            .await
    }

    async fn signup(&self, request: &SignupRequest) -> Result<AuthResponse, ApiError> {
        self.execute(self.http.post(self.url("/signup")).json(request))
            .await
    }

    async fn google_auth(&self, request: &GoogleAuthRequest) -> Result<AuthResponse, ApiError> {
        self.execute(self.http.post(self.url("/googlesignin")).json(request))
            .await
    }

    async fn get_profile(&self, access_token: &str) -> Result<UserSummary, ApiError> {
        let body: ProfileBody = self
            .execute(self.http.get(self.url("/getprofile")).bearer_auth(access_token))
            .await?;
        Ok(body.user)
    }

    async fn update_profile(
        &self,
        access_token: &str,
        request: &UpdateProfileRequest,
    ) -> Result<UserSummary, ApiError> {
        let body: ProfileBody = self
            .execute(
                self.http
                    .put(self.url("/updateprofile"))
                    .bearer_auth(access_token)
                    .json(request),
            )
            .await?;
        Ok(body.user)
    }

    async fn logout(&self, access_token: &str) -> Result<(), ApiError> {
        let response = self
            .http
            .post(self.url("/logout"))
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let status = response.status().as_u16();

        if !(200..300).contains(&status) {
            let body = response.bytes().await.unwrap_or_default();
            return Err(error_from_response(status, &body));
        }
        Ok(())
    }
}
