//! HTTP surface of the brewery service: beer and customer resources over axum.

pub mod errors;
pub mod openapi;
pub mod routes;
pub mod startup;
pub mod state;

pub use startup::{app, run, run_with_config, serve};
