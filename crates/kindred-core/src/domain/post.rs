use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Post entity - an update in the social feed.
///
/// A post with no `charity_id` was written by an individual user; otherwise it
/// belongs to the charity with that id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub charity_id: Option<String>,
    pub user_id: Option<String>,
    pub content: String,
    pub image_url: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl Post {
    /// Create a post authored by a charity.
    pub fn by_charity(charity_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            charity_id: Some(charity_id.into()),
            user_id: None,
            content: content.into(),
            image_url: None,
            timestamp: Utc::now(),
        }
    }

    /// Create a post authored by an individual user.
    pub fn by_user(user_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            charity_id: None,
            user_id: Some(user_id.into()),
            content: content.into(),
            image_url: None,
            timestamp: Utc::now(),
        }
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }
}
