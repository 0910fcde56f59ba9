use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Individual-person (PF) vs business-entity (PJ) contract.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum ContractType {
    #[default]
    PF,
    PJ,
}

impl ContractType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContractType::PF => "PF",
            ContractType::PJ => "PJ",
        }
    }
}

impl fmt::Display for ContractType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A raw cell value as delivered by a source format, before normalisation.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Missing or blank cell.
    Empty,
    /// Any textual cell, including every field of a delimited-text line.
    Text(String),
    /// A numeric cell.
    Number(f64),
    /// A boolean cell.
    Bool(bool),
    /// A native date value. The wall-clock reading may be shifted away from
    /// UTC midnight by the reader; only the UTC calendar components are used.
    DateTime(DateTime<FixedOffset>),
}

impl CellValue {
    /// Textual form used for the free-form string fields.
    ///
    /// Numbers print without a trailing `.0`, dates print as the ISO calendar
    /// date of their UTC reading.
    pub fn to_text(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) => n.to_string(),
            CellValue::Bool(b) => b.to_string(),
            CellValue::DateTime(dt) => dt
                .with_timezone(&Utc)
                .date_naive()
                .format("%Y-%m-%d")
                .to_string(),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

/// One normalised sales transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleRecord {
    /// Row-position id, unique within one ingestion run only.
    pub id: String,
    /// Calendar date of the sale; `None` when the source value was unreadable.
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub client_name: String,
    /// Lead source (e.g. "Google").
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub consultant: String,
    /// Insurance carrier.
    #[serde(default)]
    pub carrier: String,
    /// Raw gender value as found in the source.
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub contract_type: ContractType,
    /// Number of beneficiaries, always at least 1.
    pub lives_covered: u32,
    /// Monetary value in BRL, never negative.
    pub amount: f64,
}

impl SaleRecord {
    /// Zero-based month index (0 = January) of the sale date.
    pub fn month(&self) -> Option<u32> {
        self.date.map(|d| d.month0())
    }

    /// `true` when the record carries a valid calendar date.
    pub fn has_valid_date(&self) -> bool {
        self.date.is_some()
    }
}

/// Inclusion sets for the five filterable dimensions.
///
/// An empty set matches everything; a non-empty set is an OR list within the
/// dimension. Dimensions combine with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSpec {
    /// Zero-based month indices.
    #[serde(default)]
    pub months: BTreeSet<u32>,
    #[serde(default)]
    pub consultants: BTreeSet<String>,
    /// Contract type labels ("PF" / "PJ").
    #[serde(default)]
    pub contract_types: BTreeSet<String>,
    #[serde(default)]
    pub carriers: BTreeSet<String>,
    #[serde(default)]
    pub genders: BTreeSet<String>,
}

impl FilterSpec {
    /// `true` when no dimension restricts anything.
    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
            && self.consultants.is_empty()
            && self.contract_types.is_empty()
            && self.carriers.is_empty()
            && self.genders.is_empty()
    }

    /// Reset every dimension to "match all".
    pub fn clear(&mut self) {
        *self = FilterSpec::default();
    }

    pub fn with_months(mut self, months: impl IntoIterator<Item = u32>) -> Self {
        self.months.extend(months);
        self
    }

    pub fn with_consultants<S: Into<String>>(mut self, values: impl IntoIterator<Item = S>) -> Self {
        self.consultants.extend(values.into_iter().map(Into::into));
        self
    }

    pub fn with_contract_types<S: Into<String>>(
        mut self,
        values: impl IntoIterator<Item = S>,
    ) -> Self {
        self.contract_types
            .extend(values.into_iter().map(Into::into));
        self
    }

    pub fn with_carriers<S: Into<String>>(mut self, values: impl IntoIterator<Item = S>) -> Self {
        self.carriers.extend(values.into_iter().map(Into::into));
        self
    }

    pub fn with_genders<S: Into<String>>(mut self, values: impl IntoIterator<Item = S>) -> Self {
        self.genders.extend(values.into_iter().map(Into::into));
        self
    }
}

/// Headline metrics derived from a (filtered) record list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KpiSummary {
    /// Sum of all amounts.
    pub total_amount: f64,
    /// Sum of all lives covered.
    pub total_lives: u64,
    /// Number of records aggregated.
    pub contract_count: usize,
    /// `total_amount / contract_count`.
    pub avg_ticket_contract: f64,
    /// `total_amount / total_lives`.
    pub avg_ticket_life: f64,
    /// Closed contracts over leads for the relevant months, in percent.
    pub conversion_rate: f64,
    /// Per-life average for the PF subset.
    pub pf_ticket_life: f64,
    /// Per-life average for the PJ subset.
    pub pj_ticket_life: f64,
}

/// Record field a distinct-value list can be built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    Consultant,
    ContractType,
    Carrier,
    Gender,
    Source,
}

impl Dimension {
    /// Borrow the string value of this dimension from `record`.
    pub fn value_of<'a>(&self, record: &'a SaleRecord) -> &'a str {
        match self {
            Dimension::Consultant => &record.consultant,
            Dimension::ContractType => record.contract_type.as_str(),
            Dimension::Carrier => &record.carrier,
            Dimension::Gender => &record.gender,
            Dimension::Source => &record.source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn make_record(date: Option<NaiveDate>) -> SaleRecord {
        SaleRecord {
            id: "row-1".to_string(),
            date,
            client_name: "Cliente".to_string(),
            source: "Google".to_string(),
            consultant: "Ana".to_string(),
            carrier: "Unimed".to_string(),
            gender: "F".to_string(),
            contract_type: ContractType::PJ,
            lives_covered: 2,
            amount: 800.0,
        }
    }

    // ── SaleRecord ─────────────────────────────────────────────────────────

    #[test]
    fn test_month_is_zero_based() {
        let record = make_record(NaiveDate::from_ymd_opt(2025, 3, 15));
        assert_eq!(record.month(), Some(2));
        assert!(record.has_valid_date());
    }

    #[test]
    fn test_month_none_without_date() {
        let record = make_record(None);
        assert_eq!(record.month(), None);
        assert!(!record.has_valid_date());
    }

    #[test]
    fn test_record_serializes_iso_date() {
        let record = make_record(NaiveDate::from_ymd_opt(2025, 3, 15));
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["date"], "2025-03-15");
        assert_eq!(json["contract_type"], "PJ");
    }

    // ── CellValue ──────────────────────────────────────────────────────────

    #[test]
    fn test_cell_to_text() {
        assert_eq!(CellValue::Empty.to_text(), "");
        assert_eq!(CellValue::from("Ana").to_text(), "Ana");
        assert_eq!(CellValue::Number(5.0).to_text(), "5");
        assert_eq!(CellValue::Number(2.5).to_text(), "2.5");
        assert_eq!(CellValue::Bool(true).to_text(), "true");
    }

    #[test]
    fn test_cell_date_to_text_uses_utc_reading() {
        let utc = Utc.with_ymd_and_hms(2025, 3, 10, 0, 0, 0).unwrap();
        let shifted = utc.with_timezone(&FixedOffset::west_opt(3 * 3600).unwrap());
        assert_eq!(CellValue::DateTime(shifted).to_text(), "2025-03-10");
    }

    // ── FilterSpec ─────────────────────────────────────────────────────────

    #[test]
    fn test_filter_spec_default_is_empty() {
        assert!(FilterSpec::default().is_empty());
    }

    #[test]
    fn test_filter_spec_builders_and_clear() {
        let mut spec = FilterSpec::default()
            .with_months([0, 1])
            .with_consultants(["Ana"])
            .with_contract_types(["PJ"])
            .with_carriers(["Unimed"])
            .with_genders(["F"]);
        assert!(!spec.is_empty());
        assert_eq!(spec.months.len(), 2);
        spec.clear();
        assert!(spec.is_empty());
    }

    // ── Dimension ──────────────────────────────────────────────────────────

    #[test]
    fn test_dimension_value_of() {
        let record = make_record(None);
        assert_eq!(Dimension::Consultant.value_of(&record), "Ana");
        assert_eq!(Dimension::ContractType.value_of(&record), "PJ");
        assert_eq!(Dimension::Carrier.value_of(&record), "Unimed");
        assert_eq!(Dimension::Gender.value_of(&record), "F");
        assert_eq!(Dimension::Source.value_of(&record), "Google");
    }

    #[test]
    fn test_contract_type_default_and_display() {
        assert_eq!(ContractType::default(), ContractType::PF);
        assert_eq!(ContractType::PJ.to_string(), "PJ");
    }
}
