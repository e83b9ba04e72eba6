//! Service layer providing the asynchronous CRUD contract on top of models.
//! - `repository` is the store collaborator, with sea-orm and JSON document backends.
//! - `crud` orchestrates mapper and store calls; it holds no state of its own.
//! - `bootstrap` seeds sample data at start-up.

pub mod errors;
pub mod document;
pub mod repository;
pub mod storage;
pub mod crud;
pub mod bootstrap;
pub mod runtime;
#[cfg(test)]
pub mod test_support;

pub use crud::{BeerService, CrudService, CustomerService, DynBeerService, DynCustomerService};
pub use errors::ServiceError;
pub use repository::{BeerRepository, CustomerRepository, DocumentRepository};
pub use runtime::Stores;
