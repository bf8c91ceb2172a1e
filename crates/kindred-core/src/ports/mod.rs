//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod payment;
mod rate_limit;
mod repository;

pub use auth::{AuthError, TokenClaims, TokenService, charity_role};
pub use payment::{PaymentError, PaymentGateway};
pub use rate_limit::{RateLimitError, RateLimitResult, RateLimiter};
pub use repository::{
    BaseRepository, CharityRepository, DonationRepository, FollowRepository, PostRepository,
    ProfileRepository,
};
