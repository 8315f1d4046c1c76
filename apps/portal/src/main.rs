//! # Certify Portal
//!
//! The browser-facing session gateway: gates page routes on the session
//! cookie, proxies auth calls to the external user service, and keeps the
//! HttpOnly session cookies in step with the upstream answers.

use actix_web::{App, HttpServer, web};
use tracing_actix_web::TracingLogger;

mod config;
mod cookies;
mod handlers;
mod middleware;
mod observability;
mod state;
mod telemetry;

use config::AppConfig;
use middleware::gate::RouteGate;
use observability::RequestIdMiddleware;
use state::AppState;
use telemetry::TelemetryConfig;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    telemetry::init_telemetry(&TelemetryConfig::from_env());

    let config = AppConfig::from_env();

    tracing::info!(
        "Starting Certify portal on {}:{}",
        config.host,
        config.port
    );

    let state = AppState::new(&config);

    HttpServer::new(move || {
        App::new()
            .wrap(RouteGate)
            .wrap(TracingLogger::default())
            .wrap(RequestIdMiddleware)
            .app_data(web::Data::new(state.clone()))
            .configure(handlers::configure_routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
