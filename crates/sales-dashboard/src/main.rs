mod bootstrap;
mod report;

use anyhow::Result;
use sales_core::settings::Settings;
use sales_data::ingest::file_name_of;
use sales_data::sample::sample_records;
use sales_runtime::dashboard::{Dashboard, LoadOutcome};

use crate::report::{no_usable_rows, render_json, render_summary, Report};

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::load();

    bootstrap::setup_logging(&settings.log_level)?;

    tracing::info!("Sales Dashboard v{} starting", env!("CARGO_PKG_VERSION"));

    let mut dashboard = Dashboard::new();

    let source = match (&settings.file, settings.sample) {
        (Some(path), false) => {
            let source = file_name_of(path);
            tracing::info!("Loading {}", path.display());

            match dashboard.load_path(path).await {
                Ok(LoadOutcome::Loaded { count }) => {
                    tracing::info!("Loaded {} records from {}", count, source);
                }
                Ok(LoadOutcome::NoUsableRows) => {
                    println!("{}", no_usable_rows(&source));
                    return Ok(());
                }
                Err(e) => {
                    eprintln!("Error processing {}: {}", source, e);
                    std::process::exit(1);
                }
            }
            source
        }
        _ => {
            tracing::info!("Generating sample data");
            dashboard.ingest(sample_records(settings.seed));
            "sample data".to_string()
        }
    };

    let spec = settings.filter_spec();
    if !spec.is_empty() {
        tracing::info!("Applying filter: {:?}", spec);
    }
    dashboard.set_filter_spec(spec);

    let records_loaded = dashboard.records().len();
    let records_shown = dashboard.filtered_records().len();
    let kpis = dashboard.kpis().clone();
    let breakdowns = dashboard.breakdowns(settings.top);

    let report = Report {
        source: &source,
        records_loaded,
        records_shown,
        filter: dashboard.filter_spec(),
        kpis: &kpis,
        breakdowns: &breakdowns,
    };

    match settings.format.as_str() {
        "json" => println!("{}", render_json(&report)?),
        _ => print!("{}", render_summary(&report)),
    }

    Ok(())
}
