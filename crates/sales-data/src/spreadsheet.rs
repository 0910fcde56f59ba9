//! Spreadsheet (XLSX/XLS) adapter using calamine.

use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Range, Reader};
use chrono::{TimeZone, Utc};
use sales_core::error::{DashboardError, Result};
use sales_core::models::{CellValue, SaleRecord};
use tracing::debug;

use crate::columns::record_from_cells;

/// Build records from a grid whose row 0 is the header.
///
/// Missing cells are empty. A grid without data rows yields an empty list.
pub fn records_from_grid(rows: &[Vec<CellValue>]) -> Vec<SaleRecord> {
    if rows.len() < 2 {
        return Vec::new();
    }

    rows.iter()
        .enumerate()
        .skip(1)
        .map(|(idx, row)| record_from_cells(format!("row-xlsx-{}", idx), row))
        .collect()
}

/// Decode the first worksheet of an XLSX/XLS workbook held in memory.
///
/// Fails with [`DashboardError::Format`] when the bytes are not a readable
/// workbook.
pub fn read_grid(bytes: Vec<u8>) -> Result<Vec<Vec<CellValue>>> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))
        .map_err(|e| DashboardError::Format(e.to_string()))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| DashboardError::Format("workbook has no worksheets".to_string()))?
        .map_err(|e| DashboardError::Format(e.to_string()))?;

    Ok(grid_from_range(&range))
}

/// Decode `bytes` and build records from the first worksheet.
pub fn parse_spreadsheet(bytes: Vec<u8>) -> Result<Vec<SaleRecord>> {
    let grid = read_grid(bytes)?;
    let records = records_from_grid(&grid);
    debug!(
        "Spreadsheet: {} rows, {} records",
        grid.len(),
        records.len()
    );
    Ok(records)
}

/// Convert a calamine range into rows of cells, keeping absolute column
/// positions when the used range does not start in column A.
fn grid_from_range(range: &Range<Data>) -> Vec<Vec<CellValue>> {
    let leading_cols = range.start().map(|(_, col)| col as usize).unwrap_or(0);

    range
        .rows()
        .map(|row| {
            let mut cells = vec![CellValue::Empty; leading_cols];
            cells.extend(row.iter().map(cell_value));
            cells
        })
        .collect()
}

/// Convert one calamine cell into a [`CellValue`].
fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::Error(_) => CellValue::Empty,
        // Workbook dates carry no zone; they are read as UTC wall-clock.
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(naive) => CellValue::DateTime(Utc.from_utc_datetime(&naive).fixed_offset()),
            None => CellValue::Number(dt.as_f64()),
        },
        Data::DateTimeIso(s) => CellValue::Text(s.clone()),
        Data::DurationIso(s) => CellValue::Text(s.clone()),
    }
}
