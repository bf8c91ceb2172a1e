//! Application state - shared across all handlers.

use std::sync::Arc;

use kindred_core::ports::{
    CharityRepository, DonationRepository, FollowRepository, PaymentGateway, PostRepository,
    ProfileRepository, RateLimiter, TokenService,
};
use kindred_infra::{
    InMemoryCharityRepository, InMemoryDonationRepository, InMemoryFollowRepository,
    InMemoryPostRepository, InMemoryProfileRepository, JwtTokenService, MockPaymentGateway,
    StripePaymentGateway,
};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub charities: Arc<dyn CharityRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub profiles: Arc<dyn ProfileRepository>,
    pub follows: Arc<dyn FollowRepository>,
    pub donations: Arc<dyn DonationRepository>,
    pub payments: Arc<dyn PaymentGateway>,
    pub tokens: Arc<dyn TokenService>,
    pub rate_limiter: Option<Arc<dyn RateLimiter>>,
    pub settings: Settings,
}

/// Request-independent knobs handlers read.
#[derive(Debug, Clone)]
pub struct Settings {
    pub platform_fee_percent: Option<f64>,
    pub feed_post_limit: u64,
}

/// The five record stores, built together from one backend.
struct Stores {
    charities: Arc<dyn CharityRepository>,
    posts: Arc<dyn PostRepository>,
    profiles: Arc<dyn ProfileRepository>,
    follows: Arc<dyn FollowRepository>,
    donations: Arc<dyn DonationRepository>,
}

impl Stores {
    fn in_memory() -> Self {
        Self {
            charities: Arc::new(InMemoryCharityRepository::new()),
            posts: Arc::new(InMemoryPostRepository::new()),
            profiles: Arc::new(InMemoryProfileRepository::new()),
            follows: Arc::new(InMemoryFollowRepository::new()),
            donations: Arc::new(InMemoryDonationRepository::new()),
        }
    }

    #[cfg(feature = "postgres")]
    async fn connect(config: &AppConfig) -> Self {
        use kindred_infra::database::{
            PostgresCharityRepository, PostgresDonationRepository, PostgresFollowRepository,
            PostgresPostRepository, PostgresProfileRepository, connect,
        };

        let Some(db_config) = config.database.as_ref() else {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            return Self::in_memory();
        };

        match connect(db_config).await {
            Ok(db) => Self {
                charities: Arc::new(PostgresCharityRepository::new(db.clone())),
                posts: Arc::new(PostgresPostRepository::new(db.clone())),
                profiles: Arc::new(PostgresProfileRepository::new(db.clone())),
                follows: Arc::new(PostgresFollowRepository::new(db.clone())),
                donations: Arc::new(PostgresDonationRepository::new(db)),
            },
            Err(e) => {
                tracing::error!(
                    "Failed to connect to database: {}. Using in-memory fallback.",
                    e
                );
                Self::in_memory()
            }
        }
    }

    #[cfg(not(feature = "postgres"))]
    async fn connect(_config: &AppConfig) -> Self {
        tracing::info!("Running without postgres feature - using in-memory repositories");
        Self::in_memory()
    }
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Self {
        let stores = Stores::connect(config).await;

        let payments: Arc<dyn PaymentGateway> = match &config.stripe {
            Some(stripe) => Arc::new(StripePaymentGateway::new(stripe.clone())),
            None => {
                tracing::warn!("STRIPE_SECRET_KEY not set. Payment relay uses the mock gateway.");
                Arc::new(MockPaymentGateway::new())
            }
        };

        #[cfg(feature = "rate-limit")]
        let rate_limiter: Option<Arc<dyn RateLimiter>> = Some(Arc::new(
            kindred_infra::InMemoryRateLimiter::new(config.rate_limit.clone()),
        ));
        #[cfg(not(feature = "rate-limit"))]
        let rate_limiter: Option<Arc<dyn RateLimiter>> = None;

        tracing::info!("Application state initialized");

        Self {
            charities: stores.charities,
            posts: stores.posts,
            profiles: stores.profiles,
            follows: stores.follows,
            donations: stores.donations,
            payments,
            tokens: Arc::new(JwtTokenService::new(config.jwt.clone())),
            rate_limiter,
            settings: Settings {
                platform_fee_percent: config.platform_fee_percent,
                feed_post_limit: config.feed_post_limit,
            },
        }
    }

    /// Fully in-memory state around the given gateway and token service.
    #[cfg(test)]
    pub fn in_memory(payments: Arc<dyn PaymentGateway>, tokens: Arc<dyn TokenService>) -> Self {
        let stores = Stores::in_memory();
        Self {
            charities: stores.charities,
            posts: stores.posts,
            profiles: stores.profiles,
            follows: stores.follows,
            donations: stores.donations,
            payments,
            tokens,
            rate_limiter: None,
            settings: Settings {
                platform_fee_percent: None,
                feed_post_limit: 200,
            },
        }
    }
}
