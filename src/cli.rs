//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};

#[derive(Debug, Parser)]
#[command(
    name = "csv-cleaner",
    version,
    about = "Clean a CSV or Excel table with a YAML rule set",
    long_about = "Clean a CSV or Excel table with a YAML rule set.\n\n\
                  Strips whitespace, parses dates, coerces column types, fills missing values,\n\
                  drops empty and duplicate rows, and reorders columns."
)]
pub struct Cli {
    /// Table to clean (.csv, .xlsx, .xls, ...).
    #[arg(long, value_name = "PATH", value_parser = existing_file)]
    pub input: PathBuf,

    /// Where to write the cleaned table.
    #[arg(long, value_name = "PATH")]
    pub output: PathBuf,

    /// YAML rule document.
    #[arg(long, value_name = "PATH", value_parser = existing_file)]
    pub config: PathBuf,

    /// Also write a JSON change report.
    #[arg(long, value_name = "PATH")]
    pub report: Option<PathBuf>,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(long = "log-format", value_enum, default_value = "pretty")]
    pub log_format: LogFormatArg,
}

/// CLI log format choices.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

fn existing_file(raw: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(raw);
    if path.exists() {
        Ok(path)
    } else {
        Err(format!("file does not exist: {raw}"))
    }
}
