//! Charity entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use kindred_core::domain::CharityLocation;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "charities")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub category: Option<String>,
    pub image_url: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub stripe_account_id: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::post::Entity")]
    Post,
}

impl Related<super::post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Post.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for kindred_core::domain::Charity {
    fn from(model: Model) -> Self {
        // A row with neither coordinate has no location at all.
        let location = (model.latitude.is_some() || model.longitude.is_some()).then_some(
            CharityLocation {
                latitude: model.latitude,
                longitude: model.longitude,
            },
        );

        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            category: model.category,
            image_url: model.image_url,
            location,
            stripe_account_id: model.stripe_account_id,
        }
    }
}

impl From<kindred_core::domain::Charity> for ActiveModel {
    fn from(charity: kindred_core::domain::Charity) -> Self {
        let location = charity.location.unwrap_or_default();
        Self {
            id: Set(charity.id),
            name: Set(charity.name),
            description: Set(charity.description),
            category: Set(charity.category),
            image_url: Set(charity.image_url),
            latitude: Set(location.latitude),
            longitude: Set(location.longitude),
            stripe_account_id: Set(charity.stripe_account_id),
        }
    }
}
