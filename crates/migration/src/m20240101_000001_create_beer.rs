//! Create `beer` table.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Beer::Table)
                    .if_not_exists()
                    .col(uuid(Beer::Id).primary_key())
                    .col(string_len(Beer::BeerName, 255))
                    .col(string_len(Beer::BeerStyle, 255))
                    .col(string_len(Beer::Upc, 25))
                    .col(decimal_len(Beer::Price, 19, 2))
                    .col(integer(Beer::QuantityOnHand))
                    .col(timestamp_with_time_zone_null(Beer::CreatedDate))
                    .col(timestamp_with_time_zone_null(Beer::LastModifiedDate))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Beer::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
pub(crate) enum Beer {
    Table,
    Id,
    BeerName,
    BeerStyle,
    Upc,
    Price,
    QuantityOnHand,
    CreatedDate,
    LastModifiedDate,
}
