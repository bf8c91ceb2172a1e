#[cfg(test)]
mod tests {
    use crate::database::entity::{charity, donation, post};
    use crate::database::postgres_repo::{
        PostgresCharityRepository, PostgresDonationRepository, PostgresFollowRepository,
        PostgresPostRepository,
    };
    use kindred_core::domain::{Charity, Donation, Follow, GeoPoint, Post};
    use kindred_core::error::RepoError;
    use kindred_core::ports::{
        BaseRepository, CharityRepository, DonationRepository, FollowRepository, PostRepository,
    };
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase, MockExecResult, RuntimeErr};

    fn charity_model(id: &str, latitude: Option<f64>, longitude: Option<f64>) -> charity::Model {
        charity::Model {
            id: id.to_owned(),
            name: "Food Bank".to_owned(),
            description: "Feeds people".to_owned(),
            category: Some("food".to_owned()),
            image_url: None,
            latitude,
            longitude,
            stripe_account_id: Some("acct_1".to_owned()),
        }
    }

    #[tokio::test]
    async fn test_find_charity_by_id() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![charity_model("c1", Some(40.0), Some(-75.0))]])
            .into_connection();

        let repo = PostgresCharityRepository::new(db);

        let result: Option<Charity> = repo.find_by_id("c1".to_owned()).await.unwrap();

        let charity = result.unwrap();
        assert_eq!(charity.id, "c1");
        assert_eq!(charity.coordinates(), Some(GeoPoint::new(40.0, -75.0)));
        assert_eq!(charity.stripe_account_id.as_deref(), Some("acct_1"));
    }

    #[tokio::test]
    async fn test_partial_coordinates_survive_loading() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![
                charity_model("c1", Some(40.0), None),
                charity_model("c2", None, None),
            ]])
            .into_connection();

        let repo = PostgresCharityRepository::new(db);
        let charities = repo.list(Some("food")).await.unwrap();

        assert_eq!(charities.len(), 2);
        assert!(charities[0].location.is_some());
        assert_eq!(charities[0].coordinates(), None);
        assert!(charities[1].location.is_none());
    }

    #[tokio::test]
    async fn test_save_new_post_inserts() {
        let new_post = Post::by_charity("c1", "We hit our goal!");
        let now = new_post.timestamp;

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<post::Model>::new()])
            .append_query_results(vec![vec![post::Model {
                id: new_post.id.clone(),
                charity_id: Some("c1".to_owned()),
                user_id: None,
                content: "We hit our goal!".to_owned(),
                image_url: None,
                created_at: now.into(),
            }]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);
        let saved: Post = repo.save(new_post.clone()).await.unwrap();

        assert_eq!(saved.id, new_post.id);
        assert_eq!(saved.charity_id.as_deref(), Some("c1"));
    }

    #[tokio::test]
    async fn test_list_recent_posts() {
        let now = chrono::Utc::now();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![post::Model {
                id: "p1".to_owned(),
                charity_id: None,
                user_id: Some("u1".to_owned()),
                content: "Just donated".to_owned(),
                image_url: None,
                created_at: now.into(),
            }]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);
        let posts = repo.list_recent(20).await.unwrap();

        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].user_id.as_deref(), Some("u1"));
    }

    #[tokio::test]
    async fn test_follow_reports_whether_inserted() {
        // Second insert hits ON CONFLICT DO NOTHING and affects no rows
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(vec![
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                },
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 0,
                },
            ])
            .into_connection();

        let repo = PostgresFollowRepository::new(db);

        assert!(repo.follow(Follow::new("u1", "c1")).await.unwrap());
        assert!(!repo.follow(Follow::new("u1", "c1")).await.unwrap());
    }

    #[tokio::test]
    async fn test_record_donation_inserts() {
        let donation = Donation::new("u1", "c1", 2500, "pi_1");
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![donation::Model {
                id: donation.id.clone(),
                user_id: "u1".to_owned(),
                charity_id: "c1".to_owned(),
                amount_cents: 2500,
                payment_intent_id: "pi_1".to_owned(),
                created_at: donation.created_at.into(),
            }]])
            .into_connection();

        let repo = PostgresDonationRepository::new(db);
        let saved = repo.record(donation.clone()).await.unwrap();

        assert_eq!(saved.id, donation.id);
        assert_eq!(saved.payment_intent_id, "pi_1");
    }

    #[tokio::test]
    async fn test_record_repeated_payment_intent_is_constraint() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors(vec![DbErr::Query(RuntimeErr::Internal(
                "duplicate key value violates unique constraint \"idx_donations_payment_intent_id\""
                    .to_owned(),
            ))])
            .into_connection();

        let repo = PostgresDonationRepository::new(db);
        let result = repo.record(Donation::new("u1", "c1", 1000, "pi_same")).await;

        assert!(matches!(result, Err(RepoError::Constraint(_))));
    }

    #[tokio::test]
    async fn test_unfollow_reports_removal() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(vec![
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                },
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 0,
                },
            ])
            .into_connection();

        let repo = PostgresFollowRepository::new(db);

        assert!(repo.unfollow("u1", "c1").await.unwrap());
        assert!(!repo.unfollow("u1", "c1").await.unwrap());
    }
}
