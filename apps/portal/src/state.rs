//! Application state - shared across all handlers.

use std::sync::Arc;

use certify_core::ports::AuthApi;
use certify_infra::RestAuthApi;

use crate::config::{AppConfig, CookieConfig};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub auth_api: Arc<dyn AuthApi>,
    pub cookies: CookieConfig,
}

impl AppState {
    pub fn new(config: &AppConfig) -> Self {
        tracing::info!("Proxying auth calls to {}", config.auth_api_url);

        Self {
            auth_api: Arc::new(RestAuthApi::new(config.auth_api_url.clone())),
            cookies: config.cookies.clone(),
        }
    }

    #[cfg(test)]
    pub fn with_api(auth_api: Arc<dyn AuthApi>) -> Self {
        Self {
            auth_api,
            cookies: CookieConfig::default(),
        }
    }
}
