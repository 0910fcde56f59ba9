//! Async file loading.
//!
//! Bytes are read with `tokio::fs`; decoding runs on the blocking pool since
//! spreadsheet parsing is CPU-bound.

use std::path::Path;

use sales_core::error::{DashboardError, Result};
use sales_core::models::SaleRecord;
use sales_data::ingest::{file_name_of, ingest_bytes};

/// Read and ingest the file at `path`.
pub async fn load_file(path: &Path) -> Result<Vec<SaleRecord>> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| DashboardError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;

    let file_name = file_name_of(path);
    tracing::debug!(file = %file_name, bytes = bytes.len(), "file read");

    tokio::task::spawn_blocking(move || ingest_bytes(&file_name, bytes))
        .await
        .map_err(|e| DashboardError::Other(anyhow::Error::new(e)))?
}
