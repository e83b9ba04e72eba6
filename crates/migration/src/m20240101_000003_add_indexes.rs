//! Name and style lookups used by `find_first_by_name` / `find_by_style`.
use sea_orm_migration::prelude::*;

use crate::m20240101_000001_create_beer::Beer;
use crate::m20240101_000002_create_customer::Customer;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .name("idx_beer_name")
                    .table(Beer::Table)
                    .col(Beer::BeerName)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_beer_style")
                    .table(Beer::Table)
                    .col(Beer::BeerStyle)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_customer_name")
                    .table(Customer::Table)
                    .col(Customer::CustomerName)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_customer_name").table(Customer::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_beer_style").table(Beer::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_beer_name").table(Beer::Table).to_owned())
            .await
    }
}
