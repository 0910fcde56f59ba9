//! Core types for the sales dashboard.
//!
//! Holds the canonical record model, the field parsers shared by every source
//! format, the monthly lead reference table, error types, display formatting
//! and CLI settings.

pub mod error;
pub mod formatting;
pub mod leads;
pub mod models;
pub mod parsers;
pub mod settings;

pub use error::{DashboardError, Result};
pub use leads::{MonthlyLeadReference, MONTHLY_LEADS};
pub use models::{CellValue, ContractType, Dimension, FilterSpec, KpiSummary, SaleRecord};
