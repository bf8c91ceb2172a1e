use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::GeoPoint;
use crate::feed::radius::DEFAULT_RADIUS_MILES;

/// Per-user profile: display data plus local feed preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub display_name: String,
    /// Fallback used by the local feed when the device location is unknown.
    pub location: Option<GeoPoint>,
    pub feed_radius_miles: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserProfile {
    /// Create a profile with no stored location and the default radius.
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            display_name: display_name.into(),
            location: None,
            feed_radius_miles: DEFAULT_RADIUS_MILES,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
