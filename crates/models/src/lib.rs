//! Persisted records, their externally visible DTOs and the mapping between them.
//!
//! Records are sea-orm entities so the relational backend can use them directly;
//! the JSON document backend serialises the same structs.

pub mod errors;
pub mod db;
pub mod clock;
pub mod beer;
pub mod customer;
pub mod dto;
pub mod mapper;

pub use dto::{BeerDto, CustomerDto};
