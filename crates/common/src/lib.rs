//! Shared plumbing for the brewery workspace: logging setup, runtime
//! environment checks and small wire types reused by the binaries.

pub mod types;
pub mod utils;
pub mod env;
