//! End-to-end: file on disk → records → filter → KPIs and breakdowns.

use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use sales_core::leads::MONTHLY_LEADS;
use sales_core::models::{ContractType, FilterSpec};
use sales_data::aggregator::KpiAggregator;
use sales_data::breakdowns::Breakdowns;
use sales_data::filter::filter_records;
use sales_data::ingest::ingest_path;
use tempfile::TempDir;

// ── Helpers ───────────────────────────────────────────────────────────────────

fn write_csv(dir: &Path, name: &str, lines: &[&str]) -> PathBuf {
    let path = dir.join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    for line in lines {
        writeln!(file, "{}", line).unwrap();
    }
    path
}

const HEADER: &str = "Data,Nome,Fonte,Consultor,Operadora,Genero,Tipo,Vidas,Valor";

fn sales_lines() -> Vec<&'static str> {
    vec![
        HEADER,
        "15/03/2025,Cliente A,Google,Ana,Unimed,F,PJ,5,R$ 1000,00",
        "20/03/2025,Cliente B,Site,Carlos,Amil,M,pf,2,R$ 600",
        "02/01/2025,Cliente C,Google,Ana,Unimed,F,PF,1,300",
        "linha quebrada,sem,colunas",
        "99/99/2025,Cliente D,Site,Beatriz,Amil,F,PJ,3,900",
        "",
    ]
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[test]
fn test_csv_file_end_to_end() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(
        dir.path(),
        "vendas.csv",
        &[HEADER, "15/03/2025,Client,Google,Ana,Unimed,F,PJ,5,R$ 1000,00"],
    );

    let records = ingest_path(&path).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].date, NaiveDate::from_ymd_opt(2025, 3, 15));
    assert_eq!(records[0].contract_type, ContractType::PJ);
    assert_eq!(records[0].lives_covered, 5);
    assert!((records[0].amount - 1000.0).abs() < 1e-9);
}

#[test]
fn test_pipeline_filter_and_kpis() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(dir.path(), "vendas.csv", &sales_lines());

    let records = ingest_path(&path).unwrap();
    // The broken line is dropped; the bad date is kept but never filtered in.
    assert_eq!(records.len(), 4);

    let all = filter_records(&records, &FilterSpec::default());
    assert_eq!(all.len(), 3);

    let spec = FilterSpec::default().with_months([2]);
    let march = filter_records(&records, &spec);
    let kpi = KpiAggregator::aggregate(&march, &spec, &MONTHLY_LEADS);

    assert_eq!(kpi.contract_count, 2);
    assert!((kpi.total_amount - 1600.0).abs() < 1e-9);
    assert_eq!(kpi.total_lives, 7);
    assert!((kpi.pj_ticket_life - 200.0).abs() < 1e-9);
    assert!((kpi.pf_ticket_life - 300.0).abs() < 1e-9);
    assert!((kpi.conversion_rate - 2.0 / 197.0 * 100.0).abs() < 1e-9);
}

#[test]
fn test_pipeline_breakdowns() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(dir.path(), "vendas.csv", &sales_lines());

    let records = ingest_path(&path).unwrap();
    let filtered = filter_records(&records, &FilterSpec::default());
    let breakdowns = Breakdowns::compute(&filtered, &MONTHLY_LEADS, 7);

    assert_eq!(breakdowns.carriers[0].name, "Unimed");
    assert!((breakdowns.carriers[0].amount - 1300.0).abs() < 1e-9);
    assert_eq!(breakdowns.consultants[0].name, "Ana");
    assert_eq!(breakdowns.monthly[2].sales, 2);
    assert_eq!(breakdowns.monthly[0].sales, 1);
}

#[test]
fn test_missing_file_is_read_error() {
    let dir = TempDir::new().unwrap();
    let err = ingest_path(&dir.path().join("nada.csv")).unwrap_err();
    assert!(err.to_string().contains("nada.csv"));
}

#[test]
fn test_corrupt_xlsx_is_format_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("vendas.xlsx");
    std::fs::write(&path, b"PK\x03\x04 truncated").unwrap();

    let err = ingest_path(&path).unwrap_err();
    assert!(err.is_format_error());
}
