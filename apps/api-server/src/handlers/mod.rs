//! HTTP handlers and route configuration.

mod charities;
mod convert;
mod donations;
mod feed;
mod health;
mod payments;
mod posts;
mod profile;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use actix_web::web;

use kindred_core::ports::RateLimiter;

use crate::middleware::error::AppError;
use crate::middleware::rate_limit::RateLimitMiddleware;

/// Malformed JSON bodies become RFC 7807 bad requests.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into())
}

/// Malformed query strings become RFC 7807 bad requests.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default()
        .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into())
}

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig, rate_limiter: Option<Arc<dyn RateLimiter>>) {
    cfg.service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            .service(
                web::scope("/feed")
                    .route("", web::get().to(feed::recent))
                    .route("/local", web::get().to(feed::local))
                    .route("/following", web::get().to(feed::following)),
            )
            .service(
                web::scope("/charities")
                    .route("", web::get().to(charities::list))
                    .route("/{id}", web::get().to(charities::get))
                    .route("/{id}/posts", web::get().to(posts::by_charity))
                    .route("/{id}/follow", web::post().to(charities::follow))
                    .route("/{id}/follow", web::delete().to(charities::unfollow)),
            )
            // Authenticated user routes
            .service(
                web::scope("/me")
                    .route("", web::get().to(profile::me))
                    .route("/location", web::put().to(profile::update_location))
                    .route("/radius", web::put().to(profile::update_radius))
                    .route("/follows", web::get().to(profile::follows))
                    .route("/donations", web::get().to(profile::donations)),
            )
            .route("/posts", web::post().to(posts::create))
            .route("/donations", web::post().to(donations::record))
            // Payment relay
            .service(
                web::scope("/payments")
                    .app_data(payments::json_config())
                    .wrap(RateLimitMiddleware::new(rate_limiter))
                    .route(
                        "/create-payment-intent",
                        web::post().to(payments::create_payment_intent),
                    ),
            ),
    );
}
