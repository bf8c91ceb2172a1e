//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbConn, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};

use kindred_core::domain::{Charity, Donation, Follow, Post};
use kindred_core::error::RepoError;
use kindred_core::ports::{
    CharityRepository, DonationRepository, FollowRepository, PostRepository, ProfileRepository,
};

use super::entity::charity::{self, Entity as CharityEntity};
use super::entity::donation::{self, Entity as DonationEntity};
use super::entity::follow::{self, Entity as FollowEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::entity::profile::Entity as ProfileEntity;
use super::postgres_base::{PostgresBaseRepository, query_error};

/// PostgreSQL charity repository.
pub type PostgresCharityRepository = PostgresBaseRepository<CharityEntity>;

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

/// PostgreSQL profile repository.
pub type PostgresProfileRepository = PostgresBaseRepository<ProfileEntity>;

/// PostgreSQL donation repository.
pub type PostgresDonationRepository = PostgresBaseRepository<DonationEntity>;

#[async_trait]
impl CharityRepository for PostgresCharityRepository {
    async fn list(&self, category: Option<&str>) -> Result<Vec<Charity>, RepoError> {
        let mut query = CharityEntity::find();
        if let Some(category) = category {
            tracing::debug!(category, "Listing charities by category");
            query = query.filter(charity::Column::Category.eq(category));
        }

        let result = query
            .order_by_asc(charity::Column::Name)
            .order_by_asc(charity::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn list_recent(&self, limit: u64) -> Result<Vec<Post>, RepoError> {
        let result = PostEntity::find()
            .order_by_desc(post::Column::CreatedAt)
            .order_by_asc(post::Column::Id)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn find_by_charity_id(&self, charity_id: &str) -> Result<Vec<Post>, RepoError> {
        let result = PostEntity::find()
            .filter(post::Column::CharityId.eq(charity_id))
            .order_by_desc(post::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl ProfileRepository for PostgresProfileRepository {}

#[async_trait]
impl DonationRepository for PostgresDonationRepository {
    async fn record(&self, donation: Donation) -> Result<Donation, RepoError> {
        // Unique index on payment_intent_id turns repeats into a constraint error
        let active_model: donation::ActiveModel = donation.into();
        let model = active_model.insert(&self.db).await.map_err(query_error)?;
        Ok(model.into())
    }

    async fn find_by_user_id(&self, user_id: &str) -> Result<Vec<Donation>, RepoError> {
        let result = DonationEntity::find()
            .filter(donation::Column::UserId.eq(user_id))
            .order_by_desc(donation::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn total_for_charity(&self, charity_id: &str) -> Result<i64, RepoError> {
        // SUM(bigint) comes back as NUMERIC in Postgres, so add up in Rust.
        let amounts: Vec<i64> = DonationEntity::find()
            .select_only()
            .column(donation::Column::AmountCents)
            .filter(donation::Column::CharityId.eq(charity_id))
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        amounts
            .into_iter()
            .try_fold(0i64, i64::checked_add)
            .ok_or_else(|| RepoError::Query(format!("donation total overflow for {charity_id}")))
    }
}

/// PostgreSQL follow repository.
pub struct PostgresFollowRepository {
    db: DbConn,
}

impl PostgresFollowRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl FollowRepository for PostgresFollowRepository {
    async fn follow(&self, follow: Follow) -> Result<bool, RepoError> {
        let active_model: follow::ActiveModel = follow.into();
        let inserted = FollowEntity::insert(active_model)
            .on_conflict(
                OnConflict::columns([follow::Column::UserId, follow::Column::CharityId])
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(query_error)?;

        Ok(inserted > 0)
    }

    async fn unfollow(&self, user_id: &str, charity_id: &str) -> Result<bool, RepoError> {
        let result = FollowEntity::delete_by_id((user_id.to_string(), charity_id.to_string()))
            .exec(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.rows_affected > 0)
    }

    async fn followed_charity_ids(&self, user_id: &str) -> Result<Vec<String>, RepoError> {
        FollowEntity::find()
            .select_only()
            .column(follow::Column::CharityId)
            .filter(follow::Column::UserId.eq(user_id))
            .order_by_asc(follow::Column::CharityId)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))
    }

    async fn follower_count(&self, charity_id: &str) -> Result<u64, RepoError> {
        FollowEntity::find()
            .filter(follow::Column::CharityId.eq(charity_id))
            .count(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))
    }
}
