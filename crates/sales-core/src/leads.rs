//! Fixed month → lead count reference table used for conversion-rate math.

use serde::Serialize;

/// Month names used by the breakdown views (index 0 = January).
pub const MONTH_NAMES: [&str; 12] = [
    "Janeiro",
    "Fevereiro",
    "Março",
    "Abril",
    "Maio",
    "Junho",
    "Julho",
    "Agosto",
    "Setembro",
    "Outubro",
    "Novembro",
    "Dezembro",
];

/// Immutable lead counts for each month of the reporting year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthlyLeadReference {
    leads: [u32; 12],
}

/// Lead counts for 2025. December has no data yet.
pub const MONTHLY_LEADS: MonthlyLeadReference = MonthlyLeadReference::new([
    363, 411, 197, 382, 459, 320, 272, 330, 288, 221, 184, 0,
]);

impl MonthlyLeadReference {
    pub const fn new(leads: [u32; 12]) -> Self {
        Self { leads }
    }

    /// Lead count for a zero-based month; months outside 0–11 contribute 0.
    pub fn leads_for(&self, month: u32) -> u32 {
        self.leads.get(month as usize).copied().unwrap_or(0)
    }

    /// Sum of lead counts over `months`, each month counted once per
    /// occurrence in the iterator.
    pub fn total_for(&self, months: impl IntoIterator<Item = u32>) -> u64 {
        months
            .into_iter()
            .map(|m| u64::from(self.leads_for(m)))
            .sum()
    }

    /// `(month, leads)` pairs in month order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.leads.iter().enumerate().map(|(m, &l)| (m as u32, l))
    }
}

impl Default for MonthlyLeadReference {
    fn default() -> Self {
        MONTHLY_LEADS
    }
}
