//! KPI aggregation over a (filtered) record list.

use std::collections::BTreeSet;

use sales_core::leads::MonthlyLeadReference;
use sales_core::models::{ContractType, FilterSpec, KpiSummary, SaleRecord};

// ── SegmentTotals ─────────────────────────────────────────────────────────────

/// Amount and lives accumulated across a group of records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SegmentTotals {
    pub amount: f64,
    pub lives: u64,
    pub count: usize,
}

impl SegmentTotals {
    /// Add a single record to the running totals.
    pub fn add_record(&mut self, record: &SaleRecord) {
        self.amount += record.amount;
        self.lives += u64::from(record.lives_covered);
        self.count += 1;
    }

    /// Average amount per life, 0 when no lives were counted.
    pub fn per_life(&self) -> f64 {
        if self.lives > 0 {
            self.amount / self.lives as f64
        } else {
            0.0
        }
    }

    /// Average amount per record, 0 when empty.
    pub fn per_contract(&self) -> f64 {
        if self.count > 0 {
            self.amount / self.count as f64
        } else {
            0.0
        }
    }
}

// ── KpiAggregator ─────────────────────────────────────────────────────────────

/// Stateless helper computing [`KpiSummary`] values.
pub struct KpiAggregator;

impl KpiAggregator {
    /// Compute the KPI summary for `records`.
    ///
    /// `records` is expected to be the output of the filter engine for
    /// `spec`. An empty list yields an all-zero summary.
    pub fn aggregate(
        records: &[SaleRecord],
        spec: &FilterSpec,
        leads: &MonthlyLeadReference,
    ) -> KpiSummary {
        if records.is_empty() {
            return KpiSummary::default();
        }

        let mut all = SegmentTotals::default();
        let mut pf = SegmentTotals::default();
        let mut pj = SegmentTotals::default();

        for record in records {
            all.add_record(record);
            match record.contract_type {
                ContractType::PF => pf.add_record(record),
                ContractType::PJ => pj.add_record(record),
            }
        }

        let months = Self::relevant_months(records, spec);
        let total_leads = leads.total_for(months.iter().copied());
        let conversion_rate = if total_leads > 0 {
            (all.count as f64 / total_leads as f64) * 100.0
        } else {
            0.0
        };

        KpiSummary {
            total_amount: all.amount,
            total_lives: all.lives,
            contract_count: all.count,
            avg_ticket_contract: all.per_contract(),
            avg_ticket_life: all.per_life(),
            conversion_rate,
            pf_ticket_life: pf.per_life(),
            pj_ticket_life: pj.per_life(),
        }
    }

    /// Months whose leads form the conversion-rate denominator.
    ///
    /// An explicit month filter is used verbatim; otherwise the distinct
    /// months present in `records`.
    pub fn relevant_months(records: &[SaleRecord], spec: &FilterSpec) -> BTreeSet<u32> {
        if !spec.months.is_empty() {
            return spec.months.clone();
        }
        records.iter().filter_map(SaleRecord::month).collect()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
