//! Authentication handlers - thin proxies over the external user service
//! that translate upstream success into session cookies.

use actix_web::{HttpResponse, web};

use certify_shared::ErrorResponse;
use certify_shared::dto::{
    AuthResponse, GoogleAuthRequest, SigninRequest, SignupRequest, UpdateProfileRequest,
};

use crate::cookies;
use crate::middleware::auth::{OptionalSessionToken, SessionToken};
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/auth/signup
pub async fn signup(
    state: web::Data<AppState>,
    body: web::Json<SignupRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    req.validate().map_err(AppError::Validation)?;

    let response = state.auth_api.signup(&req).await?;
    Ok(established(&state, response, HttpResponse::Created()))
}

/// POST /api/auth/signin
pub async fn signin(
    state: web::Data<AppState>,
    body: web::Json<SigninRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    req.validate().map_err(AppError::Validation)?;

    let response = state.auth_api.signin(&req).await?;
    Ok(established(&state, response, HttpResponse::Ok()))
}

/// POST /api/auth/google
pub async fn google(
    state: web::Data<AppState>,
    body: web::Json<GoogleAuthRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    req.validate().map_err(AppError::Validation)?;

    let response = state.auth_api.google_auth(&req).await?;
    Ok(established(&state, response, HttpResponse::Ok()))
}

/// POST /api/auth/signout
///
/// Upstream logout is best effort: its failure is logged and the cookies are
/// cleared regardless, so signing out always succeeds for the browser.
pub async fn signout(state: web::Data<AppState>, token: OptionalSessionToken) -> HttpResponse {
    if let Some(SessionToken(token)) = token.0 {
        if let Err(e) = state.auth_api.logout(&token).await {
            tracing::warn!("upstream logout failed: {e}");
        }
    }

    let mut builder = HttpResponse::Ok();
    for cookie in cookies::clear_cookies() {
        builder.cookie(cookie);
    }
    builder.json(serde_json::json!({ "message": "Signed out" }))
}

/// GET /api/auth/session
///
/// The HttpOnly token can't be judged locally, so validity is probed against
/// the upstream profile endpoint. A rejected token takes its cookies with it.
pub async fn session(state: web::Data<AppState>, token: SessionToken) -> AppResult<HttpResponse> {
    match state.auth_api.get_profile(&token.0).await {
        Ok(user) => Ok(HttpResponse::Ok().json(user)),
        Err(err) if err.is_auth_error() => {
            tracing::debug!("session probe rejected, clearing cookies");
            let mut builder = HttpResponse::Unauthorized();
            for cookie in cookies::clear_cookies() {
                builder.cookie(cookie);
            }
            Ok(builder.json(ErrorResponse::unauthorized()))
        }
        Err(err) => Err(err.into()),
    }
}

/// PUT /api/auth/profile
pub async fn update_profile(
    state: web::Data<AppState>,
    token: SessionToken,
    body: web::Json<UpdateProfileRequest>,
) -> AppResult<HttpResponse> {
    let user = state
        .auth_api
        .update_profile(&token.0, &body.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(user))
}

fn established(
    state: &AppState,
    response: AuthResponse,
    mut builder: actix_web::HttpResponseBuilder,
) -> HttpResponse {
    tracing::info!(user = %response.user.username, "session established");
    for cookie in cookies::session_cookies(&state.cookies, &response) {
        builder.cookie(cookie);
    }
    builder.json(response)
}
