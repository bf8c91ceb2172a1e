//! Follow entity for SeaORM. One row per (user, charity) pair.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "follows")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub charity_id: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::charity::Entity",
        from = "Column::CharityId",
        to = "super::charity::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Charity,
}

impl Related<super::charity::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Charity.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for kindred_core::domain::Follow {
    fn from(model: Model) -> Self {
        Self {
            user_id: model.user_id,
            charity_id: model.charity_id,
            created_at: model.created_at.into(),
        }
    }
}

impl From<kindred_core::domain::Follow> for ActiveModel {
    fn from(follow: kindred_core::domain::Follow) -> Self {
        Self {
            user_id: Set(follow.user_id),
            charity_id: Set(follow.charity_id),
            created_at: Set(follow.created_at.into()),
        }
    }
}
