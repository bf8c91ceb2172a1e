use sea_orm_migration::prelude::*;

use crate::m20240101_000001_create_charities::Charities;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Donations::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Donations::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Donations::UserId).string().not_null())
                    .col(ColumnDef::new(Donations::CharityId).string().not_null())
                    .col(ColumnDef::new(Donations::AmountCents).big_integer().not_null())
                    .col(ColumnDef::new(Donations::PaymentIntentId).string().not_null())
                    .col(
                        ColumnDef::new(Donations::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_donations_charity")
                            .from(Donations::Table, Donations::CharityId)
                            .to(Charities::Table, Charities::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_donations_user_id")
                    .table(Donations::Table)
                    .col(Donations::UserId)
                    .to_owned(),
            )
            .await?;

        // One donation per completed payment
        manager
            .create_index(
                Index::create()
                    .name("idx_donations_payment_intent_id")
                    .table(Donations::Table)
                    .col(Donations::PaymentIntentId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Donations::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Donations {
    Table,
    Id,
    UserId,
    CharityId,
    AmountCents,
    PaymentIntentId,
    CreatedAt,
}
