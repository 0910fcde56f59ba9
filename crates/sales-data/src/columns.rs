//! Fixed positional column layout shared by both source formats.
//!
//! Columns are looked up by index, never by header name.

use sales_core::models::{CellValue, SaleRecord};
use sales_core::parsers::{parse_contract_type, parse_currency, parse_date, parse_lives};

pub const DATE: usize = 0;
pub const CLIENT_NAME: usize = 1;
pub const SOURCE: usize = 2;
pub const CONSULTANT: usize = 3;
pub const CARRIER: usize = 4;
pub const GENDER: usize = 5;
pub const CONTRACT_TYPE: usize = 6;
pub const LIVES_COVERED: usize = 7;
pub const AMOUNT: usize = 8;

/// Number of data columns in the layout.
pub const COLUMN_COUNT: usize = 9;

static EMPTY_CELL: CellValue = CellValue::Empty;

/// Build a canonical record from one row of cells.
///
/// Cells past the end of `cells` are treated as empty.
pub fn record_from_cells(id: String, cells: &[CellValue]) -> SaleRecord {
    let cell = |idx: usize| cells.get(idx).unwrap_or(&EMPTY_CELL);

    SaleRecord {
        id,
        date: parse_date(cell(DATE)),
        client_name: cell(CLIENT_NAME).to_text(),
        source: cell(SOURCE).to_text(),
        consultant: cell(CONSULTANT).to_text(),
        carrier: cell(CARRIER).to_text(),
        gender: cell(GENDER).to_text(),
        contract_type: parse_contract_type(&cell(CONTRACT_TYPE).to_text()),
        lives_covered: parse_lives(cell(LIVES_COVERED)),
        amount: parse_currency(cell(AMOUNT)),
    }
}
