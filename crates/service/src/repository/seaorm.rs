//! SeaORM-backed repositories (Postgres).

use async_trait::async_trait;
use futures_util::stream::{self, BoxStream, StreamExt, TryStreamExt};
use models::{beer, customer};
use sea_orm::{
    sea_query::OnConflict, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, Set,
};
use tracing::debug;
use uuid::Uuid;

use crate::{
    errors::ServiceError,
    repository::{BeerRepository, DocumentRepository},
};

fn ensure_id(id: Uuid) -> Uuid {
    if id.is_nil() { Uuid::new_v4() } else { id }
}

pub struct SeaOrmBeerRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmBeerRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

fn beer_active_model(doc: &beer::Model) -> beer::ActiveModel {
    beer::ActiveModel {
        id: Set(doc.id),
        beer_name: Set(doc.beer_name.clone()),
        beer_style: Set(doc.beer_style.clone()),
        upc: Set(doc.upc.clone()),
        price: Set(doc.price),
        quantity_on_hand: Set(doc.quantity_on_hand),
        created_date: Set(doc.created_date),
        last_modified_date: Set(doc.last_modified_date),
    }
}

#[async_trait]
impl DocumentRepository<beer::Model> for SeaOrmBeerRepository {
    async fn save(&self, mut doc: beer::Model) -> Result<beer::Model, ServiceError> {
        doc.id = ensure_id(doc.id);
        beer::Entity::insert(beer_active_model(&doc))
            .on_conflict(
                OnConflict::column(beer::Column::Id)
                    .update_columns([
                        beer::Column::BeerName,
                        beer::Column::BeerStyle,
                        beer::Column::Upc,
                        beer::Column::Price,
                        beer::Column::QuantityOnHand,
                        beer::Column::CreatedDate,
                        beer::Column::LastModifiedDate,
                    ])
                    .to_owned(),
            )
            .exec(&self.db)
            .await?;
        debug!(id = %doc.id, "beer row upserted");
        Ok(doc)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<beer::Model>, ServiceError> {
        Ok(beer::Entity::find_by_id(id).one(&self.db).await?)
    }

    fn stream_all(&self) -> BoxStream<'_, Result<beer::Model, ServiceError>> {
        stream::once(beer::Entity::find().stream(&self.db))
            .map_err(ServiceError::from)
            .map_ok(|rows| rows.map_err(ServiceError::from))
            .try_flatten()
            .boxed()
    }

    async fn find_first_by_name(&self, name: &str) -> Result<Option<beer::Model>, ServiceError> {
        Ok(beer::Entity::find()
            .filter(beer::Column::BeerName.eq(name))
            .one(&self.db)
            .await?)
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool, ServiceError> {
        let res = beer::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(res.rows_affected > 0)
    }

    async fn delete_all(&self) -> Result<u64, ServiceError> {
        let res = beer::Entity::delete_many().exec(&self.db).await?;
        Ok(res.rows_affected)
    }

    async fn count(&self) -> Result<u64, ServiceError> {
        Ok(beer::Entity::find().count(&self.db).await?)
    }
}

impl BeerRepository for SeaOrmBeerRepository {
    fn stream_by_style(&self, style: String) -> BoxStream<'_, Result<beer::Model, ServiceError>> {
        let query = beer::Entity::find().filter(beer::Column::BeerStyle.eq(style));
        stream::once(query.stream(&self.db))
            .map_err(ServiceError::from)
            .map_ok(|rows| rows.map_err(ServiceError::from))
            .try_flatten()
            .boxed()
    }
}

pub struct SeaOrmCustomerRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmCustomerRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait]
impl DocumentRepository<customer::Model> for SeaOrmCustomerRepository {
    async fn save(&self, mut doc: customer::Model) -> Result<customer::Model, ServiceError> {
        doc.id = ensure_id(doc.id);
        let am = customer::ActiveModel {
            id: Set(doc.id),
            customer_name: Set(doc.customer_name.clone()),
            created_date: Set(doc.created_date),
            last_modified_date: Set(doc.last_modified_date),
        };
        customer::Entity::insert(am)
            .on_conflict(
                OnConflict::column(customer::Column::Id)
                    .update_columns([
                        customer::Column::CustomerName,
                        customer::Column::CreatedDate,
                        customer::Column::LastModifiedDate,
                    ])
                    .to_owned(),
            )
            .exec(&self.db)
            .await?;
        debug!(id = %doc.id, "customer row upserted");
        Ok(doc)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<customer::Model>, ServiceError> {
        Ok(customer::Entity::find_by_id(id).one(&self.db).await?)
    }

    fn stream_all(&self) -> BoxStream<'_, Result<customer::Model, ServiceError>> {
        stream::once(customer::Entity::find().stream(&self.db))
            .map_err(ServiceError::from)
            .map_ok(|rows| rows.map_err(ServiceError::from))
            .try_flatten()
            .boxed()
    }

    async fn find_first_by_name(&self, name: &str) -> Result<Option<customer::Model>, ServiceError> {
        Ok(customer::Entity::find()
            .filter(customer::Column::CustomerName.eq(name))
            .one(&self.db)
            .await?)
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool, ServiceError> {
        let res = customer::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(res.rows_affected > 0)
    }

    async fn delete_all(&self) -> Result<u64, ServiceError> {
        let res = customer::Entity::delete_many().exec(&self.db).await?;
        Ok(res.rows_affected)
    }

    async fn count(&self) -> Result<u64, ServiceError> {
        Ok(customer::Entity::find().count(&self.db).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::try_get_db;
    use futures_util::TryStreamExt;
    use models::clock;
    use rust_decimal::Decimal;

    #[tokio::test]
    async fn beer_repository_round_trip() -> Result<(), anyhow::Error> {
        let Some(db) = try_get_db().await else { return Ok(()) };
        let repo = SeaOrmBeerRepository::new(db);

        let style = format!("style_{}", Uuid::new_v4().simple());
        let now = clock::now();
        let mut beer = beer::Model::new("Galaxy Cat", style.clone(), "12356", Decimal::new(1299, 2), 122);
        beer.created_date = Some(now);
        beer.last_modified_date = Some(now);

        let saved = repo.save(beer).await?;
        assert!(!saved.id.is_nil());
        assert_eq!(repo.find_by_id(saved.id).await?, Some(saved.clone()));

        let by_style: Vec<beer::Model> = repo.stream_by_style(style).try_collect().await?;
        assert_eq!(by_style.len(), 1);

        let mut renamed = saved.clone();
        renamed.beer_name = "Renamed".into();
        repo.save(renamed).await?;
        let fetched = repo.find_by_id(saved.id).await?.expect("row");
        assert_eq!(fetched.beer_name, "Renamed");

        assert!(repo.delete_by_id(saved.id).await?);
        assert!(!repo.delete_by_id(saved.id).await?);
        assert!(repo.find_by_id(saved.id).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn customer_repository_find_by_name() -> Result<(), anyhow::Error> {
        let Some(db) = try_get_db().await else { return Ok(()) };
        let repo = SeaOrmCustomerRepository::new(db);

        let name = format!("customer_{}", Uuid::new_v4());
        let saved = repo.save(customer::Model::new(name.clone())).await?;
        let found = repo.find_first_by_name(&name).await?.expect("match");
        assert_eq!(found.id, saved.id);
        assert!(repo.find_first_by_name(&name.to_uppercase()).await?.is_none());

        repo.delete_by_id(saved.id).await?;
        Ok(())
    }
}
