//! Application configuration loaded from environment variables.

use std::env;

use actix_web::cookie::SameSite;

use certify_infra::api::DEFAULT_BASE_URL;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Base URL of the external user service.
    pub auth_api_url: String,
    pub cookies: CookieConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            auth_api_url: env::var("AUTH_API_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            cookies: CookieConfig::from_env(),
        }
    }
}

/// Attributes applied to every session cookie.
#[derive(Debug, Clone)]
pub struct CookieConfig {
    pub max_age_secs: i64,
    pub secure: bool,
    pub same_site: SameSite,
    pub domain: Option<String>,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            max_age_secs: 7 * 24 * 60 * 60,
            secure: false,
            same_site: SameSite::Strict,
            domain: None,
        }
    }
}

impl CookieConfig {
    /// Load from `SESSION_COOKIE_*` variables. `Secure` defaults on in
    /// production (`RUST_ENV`), off elsewhere so local HTTP still works.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let secure = env::var("SESSION_COOKIE_SECURE")
            .map(|v| v != "false" && v != "0")
            .unwrap_or_else(|_| {
                env::var("RUST_ENV")
                    .map(|v| v == "production" || v == "prod")
                    .unwrap_or(false)
            });

        let same_site = match env::var("SESSION_COOKIE_SAME_SITE")
            .map(|v| v.to_lowercase())
            .as_deref()
        {
            Ok("lax") => SameSite::Lax,
            Ok("none") => SameSite::None,
            _ => SameSite::Strict,
        };

        Self {
            max_age_secs: env::var("SESSION_COOKIE_MAX_AGE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.max_age_secs),
            secure,
            same_site,
            domain: env::var("SESSION_COOKIE_DOMAIN").ok(),
        }
    }
}
