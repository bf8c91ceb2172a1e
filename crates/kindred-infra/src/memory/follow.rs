use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use kindred_core::domain::Follow;
use kindred_core::error::RepoError;
use kindred_core::ports::FollowRepository;

/// In-memory follow edges keyed by `(user_id, charity_id)`.
#[derive(Default)]
pub struct InMemoryFollowRepository {
    edges: RwLock<HashMap<(String, String), Follow>>,
}

impl InMemoryFollowRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FollowRepository for InMemoryFollowRepository {
    async fn follow(&self, follow: Follow) -> Result<bool, RepoError> {
        let key = (follow.user_id.clone(), follow.charity_id.clone());
        let mut edges = self.edges.write().await;
        if edges.contains_key(&key) {
            return Ok(false);
        }
        edges.insert(key, follow);
        Ok(true)
    }

    async fn unfollow(&self, user_id: &str, charity_id: &str) -> Result<bool, RepoError> {
        let key = (user_id.to_string(), charity_id.to_string());
        Ok(self.edges.write().await.remove(&key).is_some())
    }

    async fn followed_charity_ids(&self, user_id: &str) -> Result<Vec<String>, RepoError> {
        let edges = self.edges.read().await;
        let mut ids: Vec<String> = edges
            .keys()
            .filter(|(user, _)| user == user_id)
            .map(|(_, charity)| charity.clone())
            .collect();
        ids.sort();
        Ok(ids)
    }

    async fn follower_count(&self, charity_id: &str) -> Result<u64, RepoError> {
        let edges = self.edges.read().await;
        Ok(edges.keys().filter(|(_, charity)| charity == charity_id).count() as u64)
    }
}
