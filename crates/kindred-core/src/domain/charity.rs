use serde::{Deserialize, Serialize};

use super::GeoPoint;

/// Where a charity says it is. Either coordinate may be missing in stored data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CharityLocation {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl CharityLocation {
    /// The location as a point, only when both coordinates are present.
    pub fn point(&self) -> Option<GeoPoint> {
        Some(GeoPoint::new(self.latitude?, self.longitude?))
    }
}

impl From<GeoPoint> for CharityLocation {
    fn from(point: GeoPoint) -> Self {
        Self {
            latitude: Some(point.latitude),
            longitude: Some(point.longitude),
        }
    }
}

/// Charity entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Charity {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: Option<String>,
    pub image_url: Option<String>,
    pub location: Option<CharityLocation>,
    /// Connected payout account; donations are routed here when set.
    pub stripe_account_id: Option<String>,
}

impl Charity {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            category: None,
            image_url: None,
            location: None,
            stripe_account_id: None,
        }
    }

    pub fn located_at(mut self, point: GeoPoint) -> Self {
        self.location = Some(point.into());
        self
    }

    /// Fully specified coordinates, if any.
    pub fn coordinates(&self) -> Option<GeoPoint> {
        self.location.as_ref().and_then(CharityLocation::point)
    }
}
