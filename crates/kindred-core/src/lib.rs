//! # Kindred Core
//!
//! The domain layer of the Kindred backend.
//! Pure business logic: domain entities, great-circle distance, feed ranking
//! and the ports that infrastructure implements. No infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod feed;
pub mod geo;
pub mod payment;
pub mod ports;

pub use error::DomainError;
