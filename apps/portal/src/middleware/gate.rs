//! Route gate - the redirect rules that keep signed-out visitors off
//! protected pages and signed-in ones off the auth forms.
//!
//! "Authenticated" here means only "the session cookie exists". The cookie
//! value is never inspected; validity is the upstream service's call, made
//! when the page actually fetches data.

use actix_web::{
    Error, HttpResponse,
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
    http::header,
};
use std::future::{Future, Ready, ready};
use std::pin::Pin;

use certify_core::session::TOKEN_KEY;
use certify_shared::ErrorResponse;

use crate::cookies::percent_encode;

/// Path prefixes that require a session.
pub const PROTECTED_PREFIXES: &[&str] = &["/dashboard", "/profile", "/certificates", "/settings"];

/// Path prefixes that only make sense without a session.
pub const AUTH_PREFIXES: &[&str] = &["/signin", "/signup"];

/// Pages served to everyone, matched exactly.
pub const PUBLIC_ROUTES: &[&str] = &["/", "/about", "/contact", "/pricing", "/features"];

/// What the gate does with a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    Allow,
    /// Send to the sign-in form, remembering where the visitor was headed.
    RedirectToSignin,
    RedirectToDashboard,
    /// API request without a session: answer 401 instead of redirecting.
    RequireAuth,
}

/// The pure decision table, separated from the middleware plumbing.
pub fn gate_decision(path: &str, authenticated: bool) -> GateDecision {
    if PUBLIC_ROUTES.iter().any(|route| path == *route) {
        return GateDecision::Allow;
    }

    if PROTECTED_PREFIXES.iter().any(|route| path.starts_with(route)) && !authenticated {
        return GateDecision::RedirectToSignin;
    }

    if AUTH_PREFIXES.iter().any(|route| path.starts_with(route)) && authenticated {
        return GateDecision::RedirectToDashboard;
    }

    if path.starts_with("/api/")
        && !path.starts_with("/api/auth/")
        && path != "/api/health"
        && !authenticated
    {
        return GateDecision::RequireAuth;
    }

    GateDecision::Allow
}

/// Route gate middleware factory.
pub struct RouteGate;

impl<S, B> Transform<S, ServiceRequest> for RouteGate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = RouteGateService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RouteGateService { service }))
    }
}

pub struct RouteGateService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for RouteGateService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let authenticated = req.cookie(TOKEN_KEY).is_some();

        let response = match gate_decision(req.path(), authenticated) {
            GateDecision::Allow => {
                let fut = self.service.call(req);
                return Box::pin(async move {
                    let res = fut.await?;
                    Ok(res.map_into_left_body())
                });
            }
            GateDecision::RedirectToSignin => {
                tracing::debug!(path = req.path(), "unauthenticated, redirecting to signin");
                let location = format!("/signin?from={}", percent_encode(req.path()));
                HttpResponse::Found()
                    .insert_header((header::LOCATION, location))
                    .finish()
            }
            GateDecision::RedirectToDashboard => HttpResponse::Found()
                .insert_header((header::LOCATION, "/dashboard"))
                .finish(),
            GateDecision::RequireAuth => {
                HttpResponse::Unauthorized().json(ErrorResponse::unauthorized())
            }
        };

        let (http_req, _payload) = req.into_parts();
        let res = ServiceResponse::new(http_req, response);
        Box::pin(async move { Ok(res.map_into_right_body()) })
    }
}
