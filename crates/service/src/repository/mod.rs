//! Store collaborator seen by the CRUD service.
//!
//! Every call is a single store operation assumed atomic at the store. Reads that find
//! nothing return `Ok(None)`; only I/O and connectivity problems are errors.

use async_trait::async_trait;
use futures_util::stream::BoxStream;
use models::{beer, customer};
use uuid::Uuid;

use crate::{document::Document, errors::ServiceError};

pub mod seaorm;

#[async_trait]
pub trait DocumentRepository<D: Document>: Send + Sync {
    /// Insert-or-replace by id. A nil id is replaced by a fresh store-assigned one.
    async fn save(&self, doc: D) -> Result<D, ServiceError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<D>, ServiceError>;
    /// Lazy scan in store order; nothing is read until the stream is polled.
    fn stream_all(&self) -> BoxStream<'_, Result<D, ServiceError>>;
    /// Exact, case-sensitive match on [`Document::name`].
    async fn find_first_by_name(&self, name: &str) -> Result<Option<D>, ServiceError>;
    /// Returns whether a document was removed.
    async fn delete_by_id(&self, id: Uuid) -> Result<bool, ServiceError>;
    async fn delete_all(&self) -> Result<u64, ServiceError>;
    async fn count(&self) -> Result<u64, ServiceError>;
}

/// Beer stores also answer style queries.
pub trait BeerRepository: DocumentRepository<beer::Model> {
    fn stream_by_style(&self, style: String) -> BoxStream<'_, Result<beer::Model, ServiceError>>;
}

pub trait CustomerRepository: DocumentRepository<customer::Model> {}

impl<T: DocumentRepository<customer::Model> + ?Sized> CustomerRepository for T {}
