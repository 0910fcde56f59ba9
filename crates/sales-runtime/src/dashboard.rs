//! Dashboard state: the loaded record list, the active filter, and memoized
//! derived views.
//!
//! Derived views (filtered records and KPIs) are recomputed only when the
//! record list or the filter spec changes. Every record-list replacement bumps
//! a generation counter; the cache is keyed on `(generation, spec)`.

use std::path::Path;

use sales_core::error::Result;
use sales_core::leads::{MonthlyLeadReference, MONTHLY_LEADS};
use sales_core::models::{Dimension, FilterSpec, KpiSummary, SaleRecord};
use sales_data::aggregator::KpiAggregator;
use sales_data::breakdowns::Breakdowns;
use sales_data::filter::filter_records;

use crate::loader::load_file;

// ── LoadOutcome ───────────────────────────────────────────────────────────────

/// Result of handing a freshly ingested list to the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The list replaced the previous one.
    Loaded { count: usize },
    /// The file held no usable rows; the previous list was kept.
    NoUsableRows,
}

// ── Dashboard ─────────────────────────────────────────────────────────────────

struct DerivedView {
    generation: u64,
    spec: FilterSpec,
    filtered: Vec<SaleRecord>,
    kpis: KpiSummary,
}

/// Record list plus filter state with cached derived views.
///
/// # Example
/// ```
/// use sales_core::models::FilterSpec;
/// use sales_data::sample::sample_records;
/// use sales_runtime::dashboard::Dashboard;
///
/// let mut dashboard = Dashboard::new();
/// dashboard.ingest(sample_records(Some(1)));
/// dashboard.set_filter_spec(FilterSpec::default().with_months([0]));
/// println!("contracts in January: {}", dashboard.kpis().contract_count);
/// ```
pub struct Dashboard {
    records: Vec<SaleRecord>,
    /// Incremented on every record-list replacement.
    generation: u64,
    spec: FilterSpec,
    leads: MonthlyLeadReference,
    cache: Option<DerivedView>,
    last_error: Option<String>,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Dashboard {
    pub fn new() -> Self {
        Self::with_leads(MONTHLY_LEADS)
    }

    /// Use a custom month → leads table for conversion-rate math.
    pub fn with_leads(leads: MonthlyLeadReference) -> Self {
        Self {
            records: Vec::new(),
            generation: 0,
            spec: FilterSpec::default(),
            leads,
            cache: None,
            last_error: None,
        }
    }

    // ── Record list ───────────────────────────────────────────────────────

    /// The full, unfiltered record list.
    pub fn records(&self) -> &[SaleRecord] {
        &self.records
    }

    /// Generation of the current record list.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Replace the record list and reset the filter.
    pub fn set_records(&mut self, records: Vec<SaleRecord>) {
        self.records = records;
        self.generation += 1;
        self.spec.clear();
        self.cache = None;
        tracing::debug!(
            generation = self.generation,
            records = self.records.len(),
            "record list replaced"
        );
    }

    /// Adopt an ingestion result. An empty list is reported as
    /// [`LoadOutcome::NoUsableRows`] and leaves the current state untouched.
    pub fn ingest(&mut self, records: Vec<SaleRecord>) -> LoadOutcome {
        if records.is_empty() {
            tracing::warn!("ingestion produced no usable rows; keeping current records");
            return LoadOutcome::NoUsableRows;
        }
        let count = records.len();
        self.set_records(records);
        self.last_error = None;
        LoadOutcome::Loaded { count }
    }

    /// Load `path` and adopt its records.
    ///
    /// On failure the current state is kept and the error is remembered in
    /// [`Dashboard::last_error`].
    pub async fn load_path(&mut self, path: &Path) -> Result<LoadOutcome> {
        match load_file(path).await {
            Ok(records) => Ok(self.ingest(records)),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "load failed");
                self.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Human-readable description of the last load error, or `None`.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    // ── Filter ────────────────────────────────────────────────────────────

    pub fn filter_spec(&self) -> &FilterSpec {
        &self.spec
    }

    pub fn set_filter_spec(&mut self, spec: FilterSpec) {
        self.spec = spec;
    }

    /// Reset every dimension to "match all".
    pub fn clear_filters(&mut self) {
        self.spec.clear();
    }

    // ── Derived views ─────────────────────────────────────────────────────

    /// Records passing the current filter, in input order.
    pub fn filtered_records(&mut self) -> &[SaleRecord] {
        &self.view().filtered
    }

    /// KPI summary of the filtered records.
    pub fn kpis(&mut self) -> &KpiSummary {
        &self.view().kpis
    }

    /// Breakdowns of the filtered records; consultants limited to `top`.
    pub fn breakdowns(&mut self, top: usize) -> Breakdowns {
        let leads = self.leads;
        Breakdowns::compute(&self.view().filtered, &leads, top)
    }

    /// Sorted, deduplicated values of `dimension` across the full record
    /// list.
    pub fn distinct_values(&self, dimension: Dimension) -> Vec<String> {
        let mut values: Vec<String> = self
            .records
            .iter()
            .map(|r| dimension.value_of(r).to_string())
            .collect();
        values.sort();
        values.dedup();
        values
    }

    /// `true` when the cached view matches the current generation and spec.
    fn is_cache_valid(&self) -> bool {
        self.cache
            .as_ref()
            .is_some_and(|view| view.generation == self.generation && view.spec == self.spec)
    }

    fn view(&mut self) -> &DerivedView {
        if !self.is_cache_valid() {
            self.cache = None;
        }

        let records = &self.records;
        let spec = &self.spec;
        let leads = &self.leads;
        let generation = self.generation;
        self.cache.get_or_insert_with(|| {
            let filtered = filter_records(records, spec);
            let kpis = KpiAggregator::aggregate(&filtered, spec, leads);
            tracing::debug!(generation, filtered = filtered.len(), "derived view recomputed");
            DerivedView {
                generation,
                spec: spec.clone(),
                filtered,
                kpis,
            }
        })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
