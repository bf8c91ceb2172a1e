//! # Kindred Infrastructure
//!
//! Concrete implementations of the ports defined in `kindred-core`:
//! record stores, the payment processor relay, token verification and
//! rate limiting.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external services, in-memory only
//! - `postgres` - PostgreSQL storage via SeaORM
//! - `auth` - JWT bearer tokens
//! - `rate-limit` - Rate limiting via governor

pub mod database;
pub mod memory;
pub mod payment;

#[cfg(feature = "auth")]
pub mod auth;

#[cfg(feature = "rate-limit")]
pub mod rate_limit;

// Re-exports - In-Memory
pub use memory::{
    InMemoryCharityRepository, InMemoryDonationRepository, InMemoryFollowRepository,
    InMemoryPostRepository, InMemoryProfileRepository,
};
pub use payment::{MockPaymentGateway, StripeConfig, StripePaymentGateway};

#[cfg(feature = "auth")]
pub use auth::{JwtConfig, JwtTokenService};

#[cfg(feature = "rate-limit")]
pub use rate_limit::{InMemoryRateLimiter, RateLimitConfig};
