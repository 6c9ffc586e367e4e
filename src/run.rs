//! One complete cleaning run: config, load, clean, write, report.

use std::path::PathBuf;

use tracing::{debug, info};

use crate::config::Config;
use crate::error::{CleanerError, CleanerResult};
use crate::ingestion::load_table;
use crate::output::write_table;
use crate::processing::{ChangeReport, apply_cleaning};
use crate::report::write_report;

/// Paths for a cleaning run.
///
/// ```no_run
/// use csv_cleaner::run::CleanRequest;
///
/// # fn main() -> Result<(), csv_cleaner::CleanerError> {
/// let report = CleanRequest::new("raw.csv", "clean.csv", "rules.yaml")
///     .with_report("report.json")
///     .run()?;
/// println!("Done. {}", report.summary_line());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanRequest {
    /// Table to clean (CSV or spreadsheet).
    pub input: PathBuf,
    /// Where the cleaned table is written.
    pub output: PathBuf,
    /// YAML rule document.
    pub config: PathBuf,
    /// Optional JSON report destination.
    pub report: Option<PathBuf>,
}

impl CleanRequest {
    /// Request with no report path.
    pub fn new(
        input: impl Into<PathBuf>,
        output: impl Into<PathBuf>,
        config: impl Into<PathBuf>,
    ) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            config: config.into(),
            report: None,
        }
    }

    /// Also write the JSON change report to `report`.
    pub fn with_report(mut self, report: impl Into<PathBuf>) -> Self {
        self.report = Some(report.into());
        self
    }

    /// Run the request. Nothing is written unless both the input and config files exist and
    /// the config is valid.
    pub fn run(&self) -> CleanerResult<ChangeReport> {
        ensure_exists("input", &self.input)?;
        ensure_exists("config", &self.config)?;

        let config = Config::load(&self.config)?;
        debug!(?config, "loaded config");

        let dataset = load_table(&self.input, &config.read)?;
        let (cleaned, report) = apply_cleaning(dataset, &config.cleaning);
        write_table(&cleaned, &self.output, &config.output)?;

        if let Some(path) = &self.report {
            write_report(path, &report)?;
        }
        info!(summary = %report.summary_line(), "run complete");
        Ok(report)
    }
}

fn ensure_exists(kind: &'static str, path: &std::path::Path) -> CleanerResult<()> {
    if path.exists() {
        Ok(())
    } else {
        Err(CleanerError::MissingInput {
            kind,
            path: path.to_path_buf(),
        })
    }
}
