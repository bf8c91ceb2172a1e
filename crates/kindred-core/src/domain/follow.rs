use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user following a charity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Follow {
    pub user_id: String,
    pub charity_id: String,
    pub created_at: DateTime<Utc>,
}

impl Follow {
    pub fn new(user_id: impl Into<String>, charity_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            charity_id: charity_id.into(),
            created_at: Utc::now(),
        }
    }
}
