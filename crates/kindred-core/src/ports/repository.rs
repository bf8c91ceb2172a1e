use async_trait::async_trait;

use crate::domain::{Charity, Donation, Follow, Post, UserProfile};
use crate::error::RepoError;

/// Generic repository trait: lookup and upsert by id.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Save an entity (create or update).
    async fn save(&self, entity: T) -> Result<T, RepoError>;
}

/// Charity repository.
#[async_trait]
pub trait CharityRepository: BaseRepository<Charity, String> {
    /// All charities, optionally restricted to one category, ordered by name.
    async fn list(&self, category: Option<&str>) -> Result<Vec<Charity>, RepoError>;
}

/// Post repository.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, String> {
    /// Most recent posts first.
    async fn list_recent(&self, limit: u64) -> Result<Vec<Post>, RepoError>;

    /// One charity's posts, newest first.
    async fn find_by_charity_id(&self, charity_id: &str) -> Result<Vec<Post>, RepoError>;
}

/// User profile repository.
#[async_trait]
pub trait ProfileRepository: BaseRepository<UserProfile, String> {}

/// Follow edges between users and charities.
#[async_trait]
pub trait FollowRepository: Send + Sync {
    /// Record a follow. Returns `false` if it already existed.
    async fn follow(&self, follow: Follow) -> Result<bool, RepoError>;

    /// Remove a follow. Returns `false` if there was nothing to remove.
    async fn unfollow(&self, user_id: &str, charity_id: &str) -> Result<bool, RepoError>;

    async fn followed_charity_ids(&self, user_id: &str) -> Result<Vec<String>, RepoError>;

    async fn follower_count(&self, charity_id: &str) -> Result<u64, RepoError>;
}

/// Donation history.
#[async_trait]
pub trait DonationRepository: BaseRepository<Donation, String> {
    /// Insert a new donation. Fails with [`RepoError::Constraint`] when its
    /// payment intent has already been recorded.
    async fn record(&self, donation: Donation) -> Result<Donation, RepoError>;

    /// A user's donations, newest first.
    async fn find_by_user_id(&self, user_id: &str) -> Result<Vec<Donation>, RepoError>;

    /// Sum of all recorded donations to a charity, in cents. Fails with
    /// [`RepoError::Query`] if the sum does not fit in an `i64`.
    async fn total_for_charity(&self, charity_id: &str) -> Result<i64, RepoError>;
}
