//! Per-dimension breakdowns behind the dashboard views.

use std::collections::BTreeMap;

use chrono::Datelike;
use sales_core::leads::{MonthlyLeadReference, MONTH_NAMES};
use sales_core::models::{Dimension, SaleRecord};
use sales_core::parsers::gender_key;
use serde::Serialize;

use crate::aggregator::SegmentTotals;

/// Weekday labels, Sunday first.
pub const WEEKDAY_NAMES: [&str; 7] = ["Dom", "Seg", "Ter", "Qua", "Qui", "Sex", "Sáb"];

/// Months charted by the evolution series: January through November.
pub const EVOLUTION_MONTHS: usize = 11;

// ── Row types ─────────────────────────────────────────────────────────────────

/// Leads vs closed sales for one month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyPoint {
    pub month: u32,
    pub name: String,
    pub leads: u32,
    pub sales: usize,
    pub amount: f64,
}

/// Totals for one value of a categorical dimension.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotals {
    pub name: String,
    pub amount: f64,
    pub lives: u64,
    pub count: usize,
}

/// Totals for one gender bucket (`F` or `M`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenderBucket {
    pub key: char,
    pub count: usize,
    pub amount: f64,
}

/// Amount closed on one weekday.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekdayTotals {
    pub weekday: u32,
    pub name: String,
    pub amount: f64,
    pub count: usize,
}

/// All breakdowns for one record list.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Breakdowns {
    pub monthly: Vec<MonthlyPoint>,
    pub carriers: Vec<CategoryTotals>,
    pub consultants: Vec<CategoryTotals>,
    pub sources: Vec<CategoryTotals>,
    pub genders: Vec<GenderBucket>,
    pub weekdays: Vec<WeekdayTotals>,
}

// ── Computation ───────────────────────────────────────────────────────────────

impl Breakdowns {
    /// Compute every breakdown; the consultant ranking keeps the `top` best.
    pub fn compute(records: &[SaleRecord], leads: &MonthlyLeadReference, top: usize) -> Self {
        let mut consultants = category_totals(records, Dimension::Consultant);
        consultants.truncate(top);

        Self {
            monthly: monthly_evolution(records, leads),
            carriers: category_totals(records, Dimension::Carrier),
            consultants,
            sources: category_totals(records, Dimension::Source),
            genders: gender_split(records),
            weekdays: weekday_totals(records),
        }
    }
}

/// One entry per month from January to November, pairing table leads with
/// closed sales. December sales still count toward every other view.
pub fn monthly_evolution(records: &[SaleRecord], leads: &MonthlyLeadReference) -> Vec<MonthlyPoint> {
    let mut per_month: BTreeMap<u32, SegmentTotals> = BTreeMap::new();
    for record in records {
        if let Some(month) = record.month() {
            per_month.entry(month).or_default().add_record(record);
        }
    }

    leads
        .iter()
        .take(EVOLUTION_MONTHS)
        .map(|(month, month_leads)| {
            let totals = per_month.remove(&month).unwrap_or_default();
            MonthlyPoint {
                month,
                name: MONTH_NAMES[month as usize].to_string(),
                leads: month_leads,
                sales: totals.count,
                amount: totals.amount,
            }
        })
        .collect()
}

/// Totals grouped by `dimension`, sorted by amount descending.
///
/// Ties keep the alphabetical order of the grouping key.
pub fn category_totals(records: &[SaleRecord], dimension: Dimension) -> Vec<CategoryTotals> {
    let mut groups: BTreeMap<&str, SegmentTotals> = BTreeMap::new();
    for record in records {
        groups
            .entry(dimension.value_of(record))
            .or_default()
            .add_record(record);
    }

    let mut rows: Vec<CategoryTotals> = groups
        .into_iter()
        .map(|(name, totals)| CategoryTotals {
            name: name.to_string(),
            amount: totals.amount,
            lives: totals.lives,
            count: totals.count,
        })
        .collect();

    rows.sort_by(|a, b| b.amount.total_cmp(&a.amount));
    rows
}

/// Split into `F` and `M`; anything whose key is not `F` counts as `M`.
/// Buckets without records are omitted.
pub fn gender_split(records: &[SaleRecord]) -> Vec<GenderBucket> {
    let mut female = SegmentTotals::default();
    let mut male = SegmentTotals::default();

    for record in records {
        if gender_key(&record.gender) == Some('F') {
            female.add_record(record);
        } else {
            male.add_record(record);
        }
    }

    [('F', female), ('M', male)]
        .into_iter()
        .filter(|(_, totals)| totals.count > 0)
        .map(|(key, totals)| GenderBucket {
            key,
            count: totals.count,
            amount: totals.amount,
        })
        .collect()
}

/// Seven entries, Sunday first. Records without a date are ignored.
pub fn weekday_totals(records: &[SaleRecord]) -> Vec<WeekdayTotals> {
    let mut per_day = [(); 7].map(|_| SegmentTotals::default());
    for record in records {
        if let Some(date) = record.date {
            let idx = date.weekday().num_days_from_sunday() as usize;
            per_day[idx].add_record(record);
        }
    }

    per_day
        .into_iter()
        .enumerate()
        .map(|(idx, totals)| WeekdayTotals {
            weekday: idx as u32,
            name: WEEKDAY_NAMES[idx].to_string(),
            amount: totals.amount,
            count: totals.count,
        })
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use sales_core::leads::MONTHLY_LEADS;
    use sales_core::models::ContractType;

    fn make_record(
        date: (i32, u32, u32),
        consultant: &str,
        carrier: &str,
        gender: &str,
        lives: u32,
        amount: f64,
    ) -> SaleRecord {
        SaleRecord {
            id: format!("{}-{}", consultant, amount),
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2),
            client_name: "Cliente".to_string(),
            source: "Google".to_string(),
            consultant: consultant.to_string(),
            carrier: carrier.to_string(),
            gender: gender.to_string(),
            contract_type: ContractType::PF,
            lives_covered: lives,
            amount,
        }
    }

    fn sample() -> Vec<SaleRecord> {
        vec![
            // 2025-01-05 is a Sunday.
            make_record((2025, 1, 5), "Ana", "Unimed", "F", 1, 100.0),
            make_record((2025, 1, 6), "Carlos", "Amil", "m", 2, 500.0),
            make_record((2025, 3, 7), "Ana", "Amil", " f", 3, 250.0),
            make_record((2025, 3, 8), "Beatriz", "Unimed", "", 1, 50.0),
        ]
    }

    // ── monthly_evolution ─────────────────────────────────────────────────────

    #[test]
    fn test_monthly_evolution_january_to_november() {
        let monthly = monthly_evolution(&sample(), &MONTHLY_LEADS);
        assert_eq!(monthly.len(), EVOLUTION_MONTHS);
        assert_eq!(monthly[0].name, "Janeiro");
        assert_eq!(monthly[0].leads, 363);
        assert_eq!(monthly[0].sales, 2);
        assert!((monthly[0].amount - 600.0).abs() < 1e-9);
        assert_eq!(monthly[1].sales, 0);
        assert_eq!(monthly[2].sales, 2);
        assert_eq!(monthly[10].name, "Novembro");
        assert_eq!(monthly[10].leads, 0);
    }

    #[test]
    fn test_december_sales_left_out_of_evolution_only() {
        let records = vec![
            make_record((2025, 11, 3), "Ana", "Unimed", "F", 1, 100.0),
            make_record((2025, 12, 1), "Ana", "Unimed", "F", 2, 900.0),
        ];
        let breakdowns = Breakdowns::compute(&records, &MONTHLY_LEADS, 7);

        assert!(breakdowns.monthly.iter().all(|p| p.month < 11));
        assert_eq!(breakdowns.monthly[10].sales, 1);
        assert!((breakdowns.carriers[0].amount - 1000.0).abs() < 1e-9);
    }

    // ── category_totals ───────────────────────────────────────────────────────

    #[test]
    fn test_carrier_totals_sorted_desc() {
        let carriers = category_totals(&sample(), Dimension::Carrier);
        assert_eq!(carriers.len(), 2);
        assert_eq!(carriers[0].name, "Amil");
        assert!((carriers[0].amount - 750.0).abs() < 1e-9);
        assert_eq!(carriers[0].lives, 5);
        assert_eq!(carriers[1].name, "Unimed");
        assert_eq!(carriers[1].count, 2);
    }

    #[test]
    fn test_consultant_ranking_top_n() {
        let breakdowns = Breakdowns::compute(&sample(), &MONTHLY_LEADS, 2);
        let names: Vec<&str> = breakdowns
            .consultants
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, vec!["Carlos", "Ana"]);
    }

    #[test]
    fn test_source_totals() {
        let sources = category_totals(&sample(), Dimension::Source);
        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].name, "Google");
        assert_eq!(sources[0].lives, 7);
    }

    // ── gender_split ──────────────────────────────────────────────────────────

    #[test]
    fn test_gender_split_normalizes_keys() {
        let genders = gender_split(&sample());
        assert_eq!(genders.len(), 2);
        assert_eq!(genders[0].key, 'F');
        assert_eq!(genders[0].count, 2);
        assert!((genders[0].amount - 350.0).abs() < 1e-9);
        // "m" and "" both land in M.
        assert_eq!(genders[1].key, 'M');
        assert_eq!(genders[1].count, 2);
    }

    #[test]
    fn test_gender_split_omits_empty_bucket() {
        let records = vec![make_record((2025, 1, 5), "Ana", "Unimed", "F", 1, 100.0)];
        let genders = gender_split(&records);
        assert_eq!(genders.len(), 1);
        assert_eq!(genders[0].key, 'F');
    }

    // ── weekday_totals ────────────────────────────────────────────────────────

    #[test]
    fn test_weekday_totals_sunday_first() {
        let weekdays = weekday_totals(&sample());
        assert_eq!(weekdays.len(), 7);
        assert_eq!(weekdays[0].name, "Dom");
        assert!((weekdays[0].amount - 100.0).abs() < 1e-9);
        assert!((weekdays[1].amount - 500.0).abs() < 1e-9);
        // 2025-03-07 is a Friday, 2025-03-08 a Saturday.
        assert!((weekdays[5].amount - 250.0).abs() < 1e-9);
        assert!((weekdays[6].amount - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_input() {
        let breakdowns = Breakdowns::compute(&[], &MONTHLY_LEADS, 7);
        assert_eq!(breakdowns.monthly.len(), EVOLUTION_MONTHS);
        assert!(breakdowns.carriers.is_empty());
        assert!(breakdowns.genders.is_empty());
        assert!(breakdowns.weekdays.iter().all(|w| w.count == 0));
    }
}
