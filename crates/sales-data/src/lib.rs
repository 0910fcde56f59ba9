//! Data layer for the sales dashboard.
//!
//! Reads delimited text and spreadsheet exports into canonical sale records,
//! filters them, and computes the KPI summary and per-dimension breakdowns.
//! Also provides a random sample generator for demos.

pub mod aggregator;
pub mod breakdowns;
pub mod columns;
pub mod delimited;
pub mod filter;
pub mod ingest;
pub mod sample;
pub mod spreadsheet;

pub use sales_core as core;
