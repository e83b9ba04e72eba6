use serde::Serialize;

/// Liveness payload returned by `GET /health`.
#[derive(Serialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// Counts reported alongside the health status.
#[derive(Serialize, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StoreCounts {
    pub beers: u64,
    pub customers: u64,
}
