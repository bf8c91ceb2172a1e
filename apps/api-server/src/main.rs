//! # Kindred API Server
//!
//! The main entry point for the Actix-web HTTP server.

use actix_web::{App, HttpServer, web};
use tracing_actix_web::TracingLogger;

mod config;
mod handlers;
mod middleware;
mod state;
mod telemetry;

use config::AppConfig;
use state::AppState;
use telemetry::TelemetryConfig;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    telemetry::init_telemetry(&TelemetryConfig::from_env());

    let config = AppConfig::from_env();

    tracing::info!(
        "Starting Kindred API Server on {}:{}",
        config.host,
        config.port
    );

    let state = AppState::new(&config).await;
    let rate_limiter = state.rate_limiter.clone();

    HttpServer::new(move || {
        let rate_limiter = rate_limiter.clone();
        App::new()
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(state.clone()))
            .app_data(handlers::json_config())
            .app_data(handlers::query_config())
            .configure(move |cfg| handlers::configure_routes(cfg, rate_limiter))
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
