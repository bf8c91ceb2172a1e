//! Application configuration loaded from environment variables.

use std::env;

use kindred_infra::JwtConfig;
use kindred_infra::StripeConfig;
use kindred_infra::database::DatabaseConfig;

#[cfg(feature = "rate-limit")]
use kindred_infra::RateLimitConfig;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseConfig>,
    /// Without a key the payment relay runs against the mock gateway.
    pub stripe: Option<StripeConfig>,
    pub jwt: JwtConfig,
    /// Fee applied when a relay request does not name one.
    pub platform_fee_percent: Option<f64>,
    /// How many recent posts feeds are built from.
    pub feed_post_limit: u64,
    #[cfg(feature = "rate-limit")]
    pub rate_limit: RateLimitConfig,
}

fn parsed<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|s| s.parse().ok())
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let database = env::var("DATABASE_URL").ok().map(|url| DatabaseConfig {
            url,
            max_connections: parsed("DB_MAX_CONNECTIONS").unwrap_or(100),
            min_connections: parsed("DB_MIN_CONNECTIONS").unwrap_or(10),
        });

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: parsed("PORT").unwrap_or(8080),
            database,
            stripe: StripeConfig::from_env(),
            jwt: JwtConfig::from_env(),
            platform_fee_percent: parsed("PLATFORM_FEE_PERCENT"),
            feed_post_limit: parsed("FEED_POST_LIMIT").unwrap_or(200),
            #[cfg(feature = "rate-limit")]
            rate_limit: RateLimitConfig::from_env(),
        }
    }
}
