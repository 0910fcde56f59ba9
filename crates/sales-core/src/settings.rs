use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;

use crate::models::FilterSpec;

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Sales KPI dashboard for spreadsheet and CSV exports
#[derive(Parser, Debug, Clone)]
#[command(
    name = "sales-dashboard",
    about = "Sales KPI dashboard for spreadsheet and CSV exports",
    version
)]
pub struct Settings {
    /// Sales file to ingest (.csv, .xlsx or .xls)
    #[arg(required_unless_present = "sample")]
    pub file: Option<PathBuf>,

    /// Use generated sample data instead of a file
    #[arg(long)]
    pub sample: bool,

    /// Seed for the sample data generator
    #[arg(long)]
    pub seed: Option<u64>,

    /// Only include sales from this month (1-12); repeatable
    #[arg(long = "month", value_parser = clap::value_parser!(u32).range(1..=12))]
    pub months: Vec<u32>,

    /// Only include sales by this consultant; repeatable
    #[arg(long = "consultant")]
    pub consultants: Vec<String>,

    /// Only include this contract type; repeatable
    #[arg(long = "contract-type", value_parser = ["PF", "PJ"])]
    pub contract_types: Vec<String>,

    /// Only include this carrier; repeatable
    #[arg(long = "carrier")]
    pub carriers: Vec<String>,

    /// Only include this gender value; repeatable
    #[arg(long = "gender")]
    pub genders: Vec<String>,

    /// Report format
    #[arg(long, default_value = "summary", value_parser = ["summary", "json"])]
    pub format: String,

    /// Number of consultants shown in the ranking
    #[arg(long, default_value = "7")]
    pub top: usize,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

// ── Settings impl ──────────────────────────────────────────────────────────────

impl Settings {
    /// Parse the process arguments. Exits with a usage message on bad input.
    pub fn load() -> Self {
        Self::apply_debug_flag(Settings::parse())
    }

    /// Parse an explicit argument list, first element being the program name.
    pub fn try_load_from<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Settings::try_parse_from(args).map(Self::apply_debug_flag)
    }

    /// Filter described by the filter flags.
    ///
    /// CLI months are 1-based; the spec stores zero-based month indices.
    pub fn filter_spec(&self) -> FilterSpec {
        FilterSpec::default()
            .with_months(self.months.iter().map(|m| m.saturating_sub(1)))
            .with_consultants(self.consultants.iter().cloned())
            .with_contract_types(self.contract_types.iter().cloned())
            .with_carriers(self.carriers.iter().cloned())
            .with_genders(self.genders.iter().cloned())
    }

    /// `--debug` overrides the log level.
    fn apply_debug_flag(mut settings: Settings) -> Settings {
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
