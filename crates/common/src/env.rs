//! Environment/runtime helpers
//!
//! Sanity checks run once at startup, before any store is opened.

use tracing::{info, warn};

/// Ensure the data directory used by file-backed stores exists.
///
/// An empty `data_dir` means the stores stay purely in memory; nothing is created.
pub async fn ensure_data_dir(data_dir: &str) -> anyhow::Result<()> {
    if data_dir.trim().is_empty() {
        warn!("no data directory configured; documents are kept in memory only");
        return Ok(());
    }
    tokio::fs::create_dir_all(data_dir)
        .await
        .map_err(|e| anyhow::anyhow!("cannot create {data_dir}: {e}"))?;
    info!(%data_dir, "data directory ready");
    Ok(())
}
