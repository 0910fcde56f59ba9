//! Ingestion facade: route a file to the right adapter by its name.

use std::path::Path;

use sales_core::error::{DashboardError, Result};
use sales_core::models::SaleRecord;
use tracing::{debug, warn};

use crate::delimited::parse_delimited;
use crate::spreadsheet::parse_spreadsheet;

/// Source format chosen from a file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// `.xlsx` / `.xls` workbooks.
    Spreadsheet,
    /// Everything else, read as comma-delimited text.
    Delimited,
}

impl SourceFormat {
    /// Dispatch purely on the (case-sensitive) file-name suffix.
    pub fn from_file_name(file_name: &str) -> Self {
        if file_name.ends_with(".xlsx") || file_name.ends_with(".xls") {
            SourceFormat::Spreadsheet
        } else {
            SourceFormat::Delimited
        }
    }
}

/// Ingest the raw contents of a file named `file_name`.
///
/// Only an unreadable spreadsheet fails; delimited text is decoded lossily
/// and absorbs per-line problems. An empty list means the file held no
/// usable rows.
pub fn ingest_bytes(file_name: &str, bytes: Vec<u8>) -> Result<Vec<SaleRecord>> {
    let format = SourceFormat::from_file_name(file_name);
    debug!("Ingesting {} as {:?} ({} bytes)", file_name, format, bytes.len());

    let records = match format {
        SourceFormat::Spreadsheet => parse_spreadsheet(bytes).map_err(|e| {
            warn!("Error parsing spreadsheet {}: {}", file_name, e);
            e
        })?,
        SourceFormat::Delimited => parse_delimited(&String::from_utf8_lossy(&bytes)),
    };

    if records.is_empty() {
        warn!("No usable rows found in {}", file_name);
    }
    Ok(records)
}

/// Read `path` from disk and ingest it.
pub fn ingest_path(path: &Path) -> Result<Vec<SaleRecord>> {
    let bytes = std::fs::read(path).map_err(|source| DashboardError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    ingest_bytes(&file_name_of(path), bytes)
}

/// File name used for format dispatch; falls back to the full path.
pub fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}
