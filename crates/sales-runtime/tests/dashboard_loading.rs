//! Loading files into a [`Dashboard`] through the async loader.

use std::path::{Path, PathBuf};

use sales_core::models::{Dimension, FilterSpec};
use sales_runtime::dashboard::{Dashboard, LoadOutcome};
use tempfile::TempDir;

// ── Helpers ───────────────────────────────────────────────────────────────────

const HEADER: &str = "Data,Nome,Fonte,Consultor,Operadora,Genero,Tipo,Vidas,Valor";

fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

fn valid_csv() -> String {
    format!(
        "{}\n\
         10/01/2025,Cliente A,Google,Ana Silva,Unimed,F,PF,1,R$ 700\n\
         12/01/2025,Cliente B,Site,Carlos Souza,Amil,M,PJ,4,R$ 1.600\n\
         05/02/2025,Cliente C,Google,Ana Silva,Amil,F,PJ,2,R$ 800\n",
        HEADER
    )
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_load_valid_csv() {
    let dir = TempDir::new().unwrap();
    let path = write_file(dir.path(), "vendas.csv", &valid_csv());

    let mut dashboard = Dashboard::new();
    let outcome = dashboard.load_path(&path).await.unwrap();

    assert_eq!(outcome, LoadOutcome::Loaded { count: 3 });
    assert_eq!(dashboard.kpis().contract_count, 3);
    assert!((dashboard.kpis().total_amount - 3100.0).abs() < 1e-9);
    assert_eq!(
        dashboard.distinct_values(Dimension::Carrier),
        vec!["Amil".to_string(), "Unimed".to_string()]
    );
}

#[tokio::test]
async fn test_header_only_file_keeps_previous_records() {
    let dir = TempDir::new().unwrap();
    let good = write_file(dir.path(), "vendas.csv", &valid_csv());
    let empty = write_file(dir.path(), "vazio.csv", HEADER);

    let mut dashboard = Dashboard::new();
    dashboard.load_path(&good).await.unwrap();
    dashboard.set_filter_spec(FilterSpec::default().with_months([0]));

    let outcome = dashboard.load_path(&empty).await.unwrap();
    assert_eq!(outcome, LoadOutcome::NoUsableRows);
    assert_eq!(dashboard.records().len(), 3);
    assert_eq!(dashboard.filtered_records().len(), 2);
}

#[tokio::test]
async fn test_corrupt_spreadsheet_keeps_previous_records() {
    let dir = TempDir::new().unwrap();
    let good = write_file(dir.path(), "vendas.csv", &valid_csv());
    let bad = write_file(dir.path(), "vendas.xlsx", "not a workbook");

    let mut dashboard = Dashboard::new();
    dashboard.load_path(&good).await.unwrap();

    let err = dashboard.load_path(&bad).await.unwrap_err();
    assert!(err.is_format_error());
    assert!(dashboard.last_error().is_some());
    assert_eq!(dashboard.records().len(), 3);
}

#[tokio::test]
async fn test_successful_load_resets_filter() {
    let dir = TempDir::new().unwrap();
    let path = write_file(dir.path(), "vendas.csv", &valid_csv());

    let mut dashboard = Dashboard::new();
    dashboard.set_filter_spec(FilterSpec::default().with_carriers(["Amil"]));
    dashboard.load_path(&path).await.unwrap();

    assert!(dashboard.filter_spec().is_empty());
    assert_eq!(dashboard.filtered_records().len(), 3);
}
