//! Payment processor gateways.

mod mock;
mod stripe;

pub use mock::MockPaymentGateway;
pub use stripe::{StripeConfig, StripePaymentGateway};
