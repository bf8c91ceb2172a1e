//! SeaORM entities backing the PostgreSQL repositories.

pub mod charity;
pub mod donation;
pub mod follow;
pub mod post;
pub mod profile;
