//! Donation entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "donations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub user_id: String,
    pub charity_id: String,
    pub amount_cents: i64,
    #[sea_orm(unique)]
    pub payment_intent_id: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::charity::Entity",
        from = "Column::CharityId",
        to = "super::charity::Column::Id",
        on_update = "Cascade",
        on_delete = "Restrict"
    )]
    Charity,
}

impl Related<super::charity::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Charity.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for kindred_core::domain::Donation {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            charity_id: model.charity_id,
            amount_cents: model.amount_cents,
            payment_intent_id: model.payment_intent_id,
            created_at: model.created_at.into(),
        }
    }
}

impl From<kindred_core::domain::Donation> for ActiveModel {
    fn from(donation: kindred_core::domain::Donation) -> Self {
        Self {
            id: Set(donation.id),
            user_id: Set(donation.user_id),
            charity_id: Set(donation.charity_id),
            amount_cents: Set(donation.amount_cents),
            payment_intent_id: Set(donation.payment_intent_id),
            created_at: Set(donation.created_at.into()),
        }
    }
}
