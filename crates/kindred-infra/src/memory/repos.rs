use async_trait::async_trait;

use kindred_core::domain::{Charity, Donation, Post, UserProfile};
use kindred_core::error::RepoError;
use kindred_core::ports::{CharityRepository, DonationRepository, PostRepository, ProfileRepository};

use super::base::InMemoryRepository;

pub type InMemoryCharityRepository = InMemoryRepository<Charity>;
pub type InMemoryPostRepository = InMemoryRepository<Post>;
pub type InMemoryProfileRepository = InMemoryRepository<UserProfile>;
pub type InMemoryDonationRepository = InMemoryRepository<Donation>;

#[async_trait]
impl CharityRepository for InMemoryCharityRepository {
    async fn list(&self, category: Option<&str>) -> Result<Vec<Charity>, RepoError> {
        let mut charities: Vec<Charity> = self
            .values()
            .await
            .into_iter()
            .filter(|c| category.is_none_or(|wanted| c.category.as_deref() == Some(wanted)))
            .collect();
        charities.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        Ok(charities)
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn list_recent(&self, limit: u64) -> Result<Vec<Post>, RepoError> {
        let mut posts = self.values().await;
        posts.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then_with(|| a.id.cmp(&b.id)));
        posts.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
        Ok(posts)
    }

    async fn find_by_charity_id(&self, charity_id: &str) -> Result<Vec<Post>, RepoError> {
        let mut posts: Vec<Post> = self
            .values()
            .await
            .into_iter()
            .filter(|p| p.charity_id.as_deref() == Some(charity_id))
            .collect();
        posts.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(posts)
    }
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepository {}

#[async_trait]
impl DonationRepository for InMemoryDonationRepository {
    async fn record(&self, donation: Donation) -> Result<Donation, RepoError> {
        let mut store = self.store.write().await;
        if store
            .values()
            .any(|d| d.payment_intent_id == donation.payment_intent_id)
        {
            return Err(RepoError::Constraint(format!(
                "payment intent {} already recorded",
                donation.payment_intent_id
            )));
        }

        store.insert(donation.id.clone(), donation.clone());
        Ok(donation)
    }

    async fn find_by_user_id(&self, user_id: &str) -> Result<Vec<Donation>, RepoError> {
        let mut donations: Vec<Donation> = self
            .values()
            .await
            .into_iter()
            .filter(|d| d.user_id == user_id)
            .collect();
        donations.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(donations)
    }

    async fn total_for_charity(&self, charity_id: &str) -> Result<i64, RepoError> {
        let store = self.store.read().await;
        store
            .values()
            .filter(|d| d.charity_id == charity_id)
            .try_fold(0i64, |total, d| total.checked_add(d.amount_cents))
            .ok_or_else(|| RepoError::Query(format!("donation total overflow for {charity_id}")))
    }
}
