//! Storage backends for the service layer
//!
//! Contains the JSON document collection used when no database is configured,
//! and by the test suites as an in-memory store.

pub mod document_store;

pub use document_store::JsonDocumentStore;
