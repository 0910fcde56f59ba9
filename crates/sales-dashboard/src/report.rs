//! Text and JSON rendering of the dashboard.

use std::fmt::Write as _;

use sales_core::formatting::{format_brl, format_number, format_percent};
use sales_core::models::{FilterSpec, KpiSummary};
use sales_data::breakdowns::{Breakdowns, CategoryTotals};
use serde::Serialize;

/// Everything printed for one run.
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub source: &'a str,
    pub records_loaded: usize,
    pub records_shown: usize,
    pub filter: &'a FilterSpec,
    pub kpis: &'a KpiSummary,
    pub breakdowns: &'a Breakdowns,
}

/// Message printed when ingestion yields nothing.
pub fn no_usable_rows(source: &str) -> String {
    format!(
        "No usable rows found in {}. Check that the file follows the expected \
         column layout (date, client, source, consultant, carrier, gender, \
         type, lives, amount).",
        source
    )
}

pub fn render_json(report: &Report<'_>) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

pub fn render_summary(report: &Report<'_>) -> String {
    let mut out = String::new();
    let kpis = report.kpis;

    let _ = writeln!(
        out,
        "Sales dashboard: {} ({} records, {} after filters)",
        report.source, report.records_loaded, report.records_shown
    );
    out.push('\n');

    // ── KPIs ──────────────────────────────────────────────────────────────────
    let rows = [
        ("Total revenue", format_brl(kpis.total_amount)),
        ("Lives covered", format_number(kpis.total_lives as f64, 0)),
        ("Contracts", format_number(kpis.contract_count as f64, 0)),
        ("Avg ticket / contract", format_brl(kpis.avg_ticket_contract)),
        ("Avg ticket / life", format_brl(kpis.avg_ticket_life)),
        ("Conversion rate", format_percent(kpis.conversion_rate)),
        ("PF ticket / life", format_brl(kpis.pf_ticket_life)),
        ("PJ ticket / life", format_brl(kpis.pj_ticket_life)),
    ];
    for (label, value) in rows {
        let _ = writeln!(out, "  {:<24}{:>18}", label, value);
    }

    let breakdowns = report.breakdowns;

    section(&mut out, "Monthly evolution");
    for point in &breakdowns.monthly {
        let _ = writeln!(
            out,
            "  {:<12}{:>8} leads{:>6} sales{:>18}",
            point.name,
            point.leads,
            point.sales,
            format_brl(point.amount)
        );
    }

    section(&mut out, "Carriers");
    category_rows(&mut out, &breakdowns.carriers, false);

    section(&mut out, "Consultant ranking");
    category_rows(&mut out, &breakdowns.consultants, true);

    section(&mut out, "Lead sources");
    category_rows(&mut out, &breakdowns.sources, true);

    section(&mut out, "Gender");
    for bucket in &breakdowns.genders {
        let _ = writeln!(
            out,
            "  {:<12}{:>6} contracts{:>18}",
            bucket.key,
            bucket.count,
            format_brl(bucket.amount)
        );
    }

    section(&mut out, "Weekdays");
    for day in &breakdowns.weekdays {
        let _ = writeln!(out, "  {:<12}{:>18}", day.name, format_brl(day.amount));
    }

    out
}

fn section(out: &mut String, title: &str) {
    let _ = writeln!(out, "\n{}", title);
}

fn category_rows(out: &mut String, rows: &[CategoryTotals], with_lives: bool) {
    if rows.is_empty() {
        out.push_str("  (none)\n");
        return;
    }
    for row in rows {
        let name = if row.name.is_empty() { "(blank)" } else { row.name.as_str() };
        if with_lives {
            let _ = writeln!(
                out,
                "  {:<28}{:>18}{:>6} lives",
                name,
                format_brl(row.amount),
                row.lives
            );
        } else {
            let _ = writeln!(out, "  {:<28}{:>18}", name, format_brl(row.amount));
        }
    }
}
