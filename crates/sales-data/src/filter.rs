//! Multi-dimensional record filter.

use std::collections::BTreeSet;

use sales_core::models::{FilterSpec, SaleRecord};

/// Keep the records matching `spec`, preserving input order.
///
/// Records without a valid date never pass.
pub fn filter_records(records: &[SaleRecord], spec: &FilterSpec) -> Vec<SaleRecord> {
    records
        .iter()
        .filter(|r| matches_spec(r, spec))
        .cloned()
        .collect()
}

/// `true` when `record` has a valid date and every dimension of `spec` is
/// either empty or contains the record's value.
pub fn matches_spec(record: &SaleRecord, spec: &FilterSpec) -> bool {
    let Some(month) = record.month() else {
        return false;
    };

    (spec.months.is_empty() || spec.months.contains(&month))
        && allows(&spec.consultants, &record.consultant)
        && allows(&spec.contract_types, record.contract_type.as_str())
        && allows(&spec.carriers, &record.carrier)
        && allows(&spec.genders, &record.gender)
}

fn allows(set: &BTreeSet<String>, value: &str) -> bool {
    set.is_empty() || set.contains(value)
}
