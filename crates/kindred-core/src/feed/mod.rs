//! Feed assembly: the proximity-ranked local feed plus the recency-ordered
//! social feeds.

mod local;
pub mod radius;
mod social;

pub use local::{CharityIndex, DistanceAnnotatedPost, LocalFeed, filter_local_feed};
pub use radius::RadiusStep;
pub use social::{following_feed, recent_feed, resolve_user_location};
