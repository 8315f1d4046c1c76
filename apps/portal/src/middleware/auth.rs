//! Session token extractors.
//!
//! The token travels in an HttpOnly cookie set by this portal; a bearer
//! header is accepted as well for non-browser clients. Extraction proves
//! presence, nothing more - the upstream service judges validity.

use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header};
use std::future::{Ready, ready};

use certify_core::session::TOKEN_KEY;

use crate::middleware::error::AppError;

/// The caller's raw access token.
///
/// Use this in handlers that must forward a token upstream:
/// ```ignore
/// async fn session(token: SessionToken) -> impl Responder {
///     probe_upstream(&token.0).await
/// }
/// ```
#[derive(Debug, Clone)]
pub struct SessionToken(pub String);

fn token_from_request(req: &HttpRequest) -> Option<String> {
    if let Some(cookie) = req.cookie(TOKEN_KEY) {
        let value = cookie.value().to_string();
        if !value.is_empty() {
            return Some(value);
        }
    }

    let auth_header = req.headers().get(header::AUTHORIZATION)?.to_str().ok()?;
    auth_header.strip_prefix("Bearer ").map(str::to_string)
}

impl FromRequest for SessionToken {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(
            token_from_request(req)
                .map(SessionToken)
                .ok_or(AppError::Unauthorized),
        )
    }
}

/// Token extractor that doesn't fail when the caller is signed out.
pub struct OptionalSessionToken(pub Option<SessionToken>);

impl FromRequest for OptionalSessionToken {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(OptionalSessionToken(
            token_from_request(req).map(SessionToken),
        )))
    }
}
