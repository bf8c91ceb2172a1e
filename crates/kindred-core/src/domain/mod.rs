//! Domain entities - the core business objects.

mod charity;
mod donation;
mod follow;
mod geo_point;
mod post;
mod profile;

pub use charity::{Charity, CharityLocation};
pub use donation::Donation;
pub use follow::Follow;
pub use geo_point::GeoPoint;
pub use post::Post;
pub use profile::UserProfile;
