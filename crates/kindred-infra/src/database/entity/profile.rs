//! User profile entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use kindred_core::domain::GeoPoint;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "profiles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub display_name: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub feed_radius_miles: f64,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for kindred_core::domain::UserProfile {
    fn from(model: Model) -> Self {
        let location = match (model.latitude, model.longitude) {
            (Some(lat), Some(lon)) => Some(GeoPoint::new(lat, lon)),
            _ => None,
        };

        Self {
            id: model.id,
            display_name: model.display_name,
            location,
            feed_radius_miles: model.feed_radius_miles,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

impl From<kindred_core::domain::UserProfile> for ActiveModel {
    fn from(profile: kindred_core::domain::UserProfile) -> Self {
        Self {
            id: Set(profile.id),
            display_name: Set(profile.display_name),
            latitude: Set(profile.location.map(|p| p.latitude)),
            longitude: Set(profile.location.map(|p| p.longitude)),
            feed_radius_miles: Set(profile.feed_radius_miles),
            created_at: Set(profile.created_at.into()),
            updated_at: Set(profile.updated_at.into()),
        }
    }
}
