//! Runtime layer for the sales dashboard.
//!
//! Loads files asynchronously and keeps the dashboard state: the current
//! record list, the active filter and the memoized views derived from them.

pub mod dashboard;
pub mod loader;

pub use sales_core as core;
pub use sales_data as data;
