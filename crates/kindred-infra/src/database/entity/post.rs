//! Post entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub charity_id: Option<String>,
    pub user_id: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub image_url: Option<String>,
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

impl From<Model> for kindred_core::domain::Post {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            charity_id: model.charity_id,
            user_id: model.user_id,
            content: model.content,
            image_url: model.image_url,
            timestamp: model.created_at.into(),
        }
    }
}

impl From<kindred_core::domain::Post> for ActiveModel {
    fn from(post: kindred_core::domain::Post) -> Self {
        Self {
            id: Set(post.id),
            charity_id: Set(post.charity_id),
            user_id: Set(post.user_id),
            content: Set(post.content),
            image_url: Set(post.image_url),
            created_at: Set(post.timestamp.into()),
        }
    }
}
