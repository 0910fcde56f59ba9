//! Delimited-text (CSV) adapter.
//!
//! Line 0 is always the header. Every following line is split on commas with
//! no quote handling, so a pt-BR amount such as `R$ 1000,00` spills its
//! cents into a tenth column that is ignored.

use sales_core::models::{CellValue, SaleRecord};
use thiserror::Error;
use tracing::{debug, warn};

use crate::columns::{record_from_cells, CONTRACT_TYPE};

/// A single line that could not be turned into a record.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RowError {
    /// The line ends before the contract-type column.
    #[error("line {line}: missing contract type column ({found} columns)")]
    MissingContractType { line: usize, found: usize },
}

/// Parse delimited text into canonical records.
///
/// Lines are numbered physically (split on `\n`, header at 0) so ids stay
/// tied to the source line whatever the line endings. Blank lines are
/// skipped silently; malformed lines are skipped with a warning. Never fails.
pub fn parse_delimited(text: &str) -> Vec<SaleRecord> {
    let splitter = field_splitter();

    let mut records: Vec<SaleRecord> = Vec::new();
    let mut lines_read = 0usize;
    let mut lines_skipped = 0usize;

    for (line, raw) in text.split('\n').enumerate().skip(1) {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            continue;
        }
        lines_read += 1;

        let row = match split_fields(&splitter, trimmed) {
            Ok(row) => row,
            Err(e) => {
                warn!("Failed to read delimited line {}: {}", line, e);
                lines_skipped += 1;
                continue;
            }
        };

        let fields: Vec<&str> = row.iter().collect();
        match parse_line(line, &fields) {
            Ok(record) => records.push(record),
            Err(e) => {
                warn!("Skipping line: {}", e);
                lines_skipped += 1;
            }
        }
    }

    debug!(
        "Delimited text: {} lines read, {} skipped, {} records",
        lines_read,
        lines_skipped,
        records.len()
    );

    records
}

/// Comma splitter with quotes treated as ordinary characters.
fn field_splitter() -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder.has_headers(false).flexible(true).quoting(false);
    builder
}

/// Split a single already-trimmed line into its fields.
fn split_fields(splitter: &csv::ReaderBuilder, line: &str) -> csv::Result<csv::StringRecord> {
    let mut reader = splitter.from_reader(line.as_bytes());
    let mut row = csv::StringRecord::new();
    reader.read_record(&mut row)?;
    Ok(row)
}

/// Parse the already-split fields of line `line` into a record.
pub fn parse_line(line: usize, fields: &[&str]) -> Result<SaleRecord, RowError> {
    if fields.len() <= CONTRACT_TYPE {
        return Err(RowError::MissingContractType {
            line,
            found: fields.len(),
        });
    }

    // The whole line is trimmed, which only affects the outermost fields.
    let last = fields.len() - 1;
    let cells: Vec<CellValue> = fields
        .iter()
        .enumerate()
        .map(|(idx, field)| {
            let mut value = *field;
            if idx == 0 {
                value = value.trim_start();
            }
            if idx == last {
                value = value.trim_end();
            }
            CellValue::Text(value.to_string())
        })
        .collect();

    Ok(record_from_cells(format!("row-{}", line), &cells))
}
