//! Session cookie layer - the browser-facing mirror of the session.
//!
//! Tokens travel in HttpOnly cookies the page can never read; the user
//! record gets a script-readable mirror for display only.

use actix_web::cookie::Cookie;
use actix_web::cookie::time::Duration as CookieDuration;

use certify_core::domain::UserSummary;
use certify_core::session::{REFRESH_TOKEN_KEY, TOKEN_KEY, USER_KEY};
use certify_shared::dto::AuthResponse;

use crate::config::CookieConfig;

/// Cookies establishing a session from a successful auth response.
pub fn session_cookies(config: &CookieConfig, response: &AuthResponse) -> Vec<Cookie<'static>> {
    let user = UserSummary::from(response.user.clone());
    let user_json = serde_json::to_string(&user).unwrap_or_else(|_| "{}".to_string());

    vec![
        build(config, TOKEN_KEY, response.token.clone(), true),
        build(config, REFRESH_TOKEN_KEY, response.refresh_token.clone(), true),
        build(config, USER_KEY, percent_encode(&user_json), false),
    ]
}

/// Removal cookies for every session key.
pub fn clear_cookies() -> Vec<Cookie<'static>> {
    [TOKEN_KEY, REFRESH_TOKEN_KEY, USER_KEY]
        .into_iter()
        .map(|name| {
            let mut cookie = Cookie::new(name, "");
            cookie.set_path("/");
            cookie.make_removal();
            cookie
        })
        .collect()
}

fn build(
    config: &CookieConfig,
    name: &'static str,
    value: String,
    http_only: bool,
) -> Cookie<'static> {
    let mut builder = Cookie::build(name, value)
        .path("/")
        .secure(config.secure)
        .http_only(http_only)
        .same_site(config.same_site)
        .max_age(CookieDuration::seconds(config.max_age_secs));
    if let Some(domain) = &config.domain {
        builder = builder.domain(domain.clone());
    }
    builder.finish()
}

/// Minimal `encodeURIComponent` analog for cookie values and query strings.
/// Leaves the unreserved set alone, percent-escapes everything else.
pub fn percent_encode(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-' | b'_' | b'.' | b'~'
            | b'!' | b'*' | b'\'' | b'(' | b')' => out.push(byte as char),
            _ => {
                out.push('%');
                out.push_str(&format!("{byte:02X}"));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::cookie::SameSite;
    use certify_shared::dto::AuthUser;

    fn response() -> AuthResponse {
        AuthResponse {
            message: "Authenticated".to_string(),
            token: "a.b.c".to_string(),
            refresh_token: "refresh-1".to_string(),
            user: AuthUser {
                id: "u1".to_string(),
                email: "a@b.co".to_string(),
                username: "ada".to_string(),
            },
        }
    }

    #[test]
    fn token_cookies_are_http_only_but_user_mirror_is_not() {
        let cookies = session_cookies(&CookieConfig::default(), &response());
        let by_name = |name: &str| cookies.iter().find(|c| c.name() == name).unwrap();

        assert_eq!(by_name(TOKEN_KEY).http_only(), Some(true));
        assert_eq!(by_name(REFRESH_TOKEN_KEY).http_only(), Some(true));
        assert_ne!(by_name(USER_KEY).http_only(), Some(true));
    }

    #[test]
    fn cookies_carry_configured_attributes() {
        let config = CookieConfig {
            max_age_secs: 3600,
            secure: true,
            same_site: SameSite::Lax,
            domain: Some("certify.example".to_string()),
        };
        let cookies = session_cookies(&config, &response());
        let token = cookies.iter().find(|c| c.name() == TOKEN_KEY).unwrap();

        assert_eq!(token.path(), Some("/"));
        assert_eq!(token.secure(), Some(true));
        assert_eq!(token.same_site(), Some(SameSite::Lax));
        assert_eq!(token.max_age(), Some(CookieDuration::seconds(3600)));
        assert_eq!(token.domain(), Some("certify.example"));
    }

    #[test]
    fn user_mirror_is_percent_encoded_json() {
        let cookies = session_cookies(&CookieConfig::default(), &response());
        let user = cookies.iter().find(|c| c.name() == USER_KEY).unwrap();

        assert!(!user.value().contains('"'));
        assert!(!user.value().contains(','));
        assert!(user.value().contains("%22id%22"));
    }

    #[test]
    fn clear_cookies_expire_every_session_key() {
        let cookies = clear_cookies();
        assert_eq!(cookies.len(), 3);
        for cookie in &cookies {
            assert_eq!(cookie.value(), "");
            assert!(cookie.expires().is_some());
        }
    }

    #[test]
    fn percent_encode_matches_encode_uri_component() {
        assert_eq!(percent_encode("abc-123_~.!*'()"), "abc-123_~.!*'()");
        assert_eq!(percent_encode("a b"), "a%20b");
        assert_eq!(percent_encode("/dashboard?tab=1"), "%2Fdashboard%3Ftab%3D1");
        assert_eq!(percent_encode(r#"{"id":"u1"}"#), "%7B%22id%22%3A%22u1%22%7D");
    }
}
