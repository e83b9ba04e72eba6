//! Start-up sample data.
//!
//! Runs in the background after the server starts; requests may be served before it
//! finishes. Each collection is seeded independently and only when it is empty.

use std::sync::Arc;

use models::{beer, clock, customer};
use rust_decimal::Decimal;
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::{
    document::Document,
    errors::ServiceError,
    repository::{BeerRepository, CustomerRepository, DocumentRepository},
};

pub fn sample_beers() -> Vec<beer::Model> {
    vec![
        beer::Model::new("Galaxy Cat", "Pale Ale", "12356", Decimal::new(1299, 2), 122),
        beer::Model::new("Crank", "Pale Ale", "12356222", Decimal::new(1199, 2), 392),
        beer::Model::new("Sunshine City", "IPA", "12356", Decimal::new(1399, 2), 144),
    ]
}

pub fn sample_customers() -> Vec<customer::Model> {
    ["Miguel", "Pepe", "Maria"].into_iter().map(customer::Model::new).collect()
}

/// Optionally clear the collection, then load `samples` if it is empty.
/// Returns the collection size afterwards.
pub async fn load_if_empty<D, R>(repo: &R, samples: Vec<D>, reset: bool) -> Result<u64, ServiceError>
where
    D: Document,
    R: DocumentRepository<D> + ?Sized,
{
    if reset {
        let removed = repo.delete_all().await?;
        info!(kind = D::KIND, removed, "collection cleared");
    }
    if repo.count().await? == 0 {
        for mut doc in samples {
            let now = clock::now();
            doc.set_created_date(Some(now));
            doc.set_last_modified_date(Some(now));
            let saved = repo.save(doc).await?;
            info!(kind = D::KIND, id = %saved.id(), name = saved.name(), "sample loaded");
        }
    }
    let count = repo.count().await?;
    info!(kind = D::KIND, count, "loaded sample documents");
    Ok(count)
}

/// Fire-and-forget seeding of both collections.
pub fn spawn(
    beers: Arc<dyn BeerRepository>,
    customers: Arc<dyn CustomerRepository>,
    reset: bool,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let (b, c) = tokio::join!(
            load_if_empty(beers.as_ref(), sample_beers(), reset),
            load_if_empty(customers.as_ref(), sample_customers(), reset),
        );
        for (kind, res) in [("beer", b), ("customer", c)] {
            if let Err(e) = res {
                error!(kind, error = %e, "bootstrap failed");
            }
        }
    })
}
