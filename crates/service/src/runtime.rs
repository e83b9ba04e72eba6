//! Runtime wiring of the configured store backend.

use std::{path::Path, sync::Arc};

use configs::{AppConfig, StoreBackend};
use migration::MigratorTrait;
use models::{beer, customer};
use tracing::info;

use crate::{
    repository::{
        seaorm::{SeaOrmBeerRepository, SeaOrmCustomerRepository},
        BeerRepository, CustomerRepository,
    },
    storage::JsonDocumentStore,
};

/// Store handles for both entity kinds, shared by services and the seeder.
#[derive(Clone)]
pub struct Stores {
    pub beers: Arc<dyn BeerRepository>,
    pub customers: Arc<dyn CustomerRepository>,
}

impl Stores {
    /// Both collections in memory; nothing touches disk.
    pub fn in_memory() -> Self {
        Self {
            beers: JsonDocumentStore::<beer::Model>::in_memory(),
            customers: JsonDocumentStore::<customer::Model>::in_memory(),
        }
    }
}

/// Open the backend selected by `[store]`. Postgres schemas are migrated first.
pub async fn open_stores(cfg: &AppConfig) -> anyhow::Result<Stores> {
    match cfg.store.backend {
        StoreBackend::Json => {
            let dir = cfg.store.data_dir.trim();
            common::env::ensure_data_dir(dir).await?;
            if dir.is_empty() {
                return Ok(Stores::in_memory());
            }
            let beers = JsonDocumentStore::<beer::Model>::open(Path::new(dir).join("beers.json")).await?;
            let customers = JsonDocumentStore::<customer::Model>::open(Path::new(dir).join("customers.json")).await?;
            info!(backend = "json", %dir, "stores opened");
            Ok(Stores { beers, customers })
        }
        StoreBackend::Postgres => {
            let db = models::db::connect_with_config(&cfg.database).await?;
            migration::Migrator::up(&db, None).await?;
            info!(backend = "postgres", "stores opened");
            Ok(Stores {
                beers: Arc::new(SeaOrmBeerRepository::new(db.clone())),
                customers: Arc::new(SeaOrmCustomerRepository::new(db)),
            })
        }
    }
}
