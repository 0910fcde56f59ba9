use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the sales dashboard crates.
///
/// Field-level problems never show up here: parsers fall back to defaults and
/// malformed delimited-text lines are dropped with a warning. Only a total
/// inability to read a file surfaces as an error.
#[derive(Error, Debug)]
pub enum DashboardError {
    /// A file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The spreadsheet binary could not be decoded at all.
    #[error("Failed to process spreadsheet: {0}")]
    Format(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DashboardError {
    /// `true` for the spreadsheet decoding failure the caller may retry with
    /// a different file.
    pub fn is_format_error(&self) -> bool {
        matches!(self, DashboardError::Format(_))
    }
}

/// Convenience alias used throughout the dashboard crates.
pub type Result<T> = std::result::Result<T, DashboardError>;
