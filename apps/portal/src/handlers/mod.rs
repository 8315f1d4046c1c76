//! HTTP handlers and route configuration.

mod auth;
mod health;

use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            // Auth routes
            .service(
                web::scope("/auth")
                    .route("/signup", web::post().to(auth::signup))
                    .route("/signin", web::post().to(auth::signin))
                    .route("/google", web::post().to(auth::google))
                    .route("/signout", web::post().to(auth::signout))
                    .route("/session", web::get().to(auth::session))
                    .route("/profile", web::put().to(auth::update_profile)),
            ),
    );
}
