//! In-memory repositories - used when no database is configured and in tests.
//! Data is lost on process restart.

mod base;
mod follow;
mod repos;

pub use base::{InMemoryRepository, Keyed};
pub use follow::InMemoryFollowRepository;
pub use repos::{
    InMemoryCharityRepository, InMemoryDonationRepository, InMemoryPostRepository,
    InMemoryProfileRepository,
};
