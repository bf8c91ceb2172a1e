use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use kindred_core::domain::{Charity, Donation, Post, UserProfile};
use kindred_core::error::RepoError;
use kindred_core::ports::BaseRepository;

/// Entities stored by string id.
pub trait Keyed {
    fn key(&self) -> &str;
}

impl Keyed for Charity {
    fn key(&self) -> &str {
        &self.id
    }
}

impl Keyed for Post {
    fn key(&self) -> &str {
        &self.id
    }
}

impl Keyed for UserProfile {
    fn key(&self) -> &str {
        &self.id
    }
}

impl Keyed for Donation {
    fn key(&self) -> &str {
        &self.id
    }
}

/// Generic in-memory repository keyed by entity id.
pub struct InMemoryRepository<T> {
    pub(crate) store: RwLock<HashMap<String, T>>,
}

impl<T: Keyed> InMemoryRepository<T> {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(HashMap::new()),
        }
    }

    /// Build a repository pre-populated with `items`.
    pub fn with_items(items: impl IntoIterator<Item = T>) -> Self {
        let store = items
            .into_iter()
            .map(|item| (item.key().to_string(), item))
            .collect();
        Self {
            store: RwLock::new(store),
        }
    }

    pub(crate) async fn values(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.store.read().await.values().cloned().collect()
    }
}

impl<T: Keyed> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T> BaseRepository<T, String> for InMemoryRepository<T>
where
    T: Keyed + Clone + Send + Sync + 'static,
{
    async fn find_by_id(&self, id: String) -> Result<Option<T>, RepoError> {
        Ok(self.store.read().await.get(&id).cloned())
    }

    async fn save(&self, entity: T) -> Result<T, RepoError> {
        let mut store = self.store.write().await;
        store.insert(entity.key().to_string(), entity.clone());
        Ok(entity)
    }
}
