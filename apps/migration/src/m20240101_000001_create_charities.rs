use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Charities::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Charities::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Charities::Name).string().not_null())
                    .col(ColumnDef::new(Charities::Description).text().not_null())
                    .col(ColumnDef::new(Charities::Category).string())
                    .col(ColumnDef::new(Charities::ImageUrl).string())
                    // Either coordinate may be missing; such charities never show in local feeds
                    .col(ColumnDef::new(Charities::Latitude).double())
                    .col(ColumnDef::new(Charities::Longitude).double())
                    .col(ColumnDef::new(Charities::StripeAccountId).string())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_charities_category")
                    .table(Charities::Table)
                    .col(Charities::Category)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Charities::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub(crate) enum Charities {
    Table,
    Id,
    Name,
    Description,
    Category,
    ImageUrl,
    Latitude,
    Longitude,
    StripeAccountId,
}
