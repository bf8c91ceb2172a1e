use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A completed donation, recorded after the payment sheet reports success.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Donation {
    pub id: String,
    pub user_id: String,
    pub charity_id: String,
    /// Amount in the smallest currency unit (cents).
    pub amount_cents: i64,
    pub payment_intent_id: String,
    pub created_at: DateTime<Utc>,
}

impl Donation {
    pub fn new(
        user_id: impl Into<String>,
        charity_id: impl Into<String>,
        amount_cents: i64,
        payment_intent_id: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.into(),
            charity_id: charity_id.into(),
            amount_cents,
            payment_intent_id: payment_intent_id.into(),
            created_at: Utc::now(),
        }
    }
}
