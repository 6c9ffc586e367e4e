//! `csv-cleaner` cleans a tabular file (CSV or spreadsheet) according to a YAML rule set and
//! writes the cleaned table plus an optional JSON change report.
//!
//! The primary entrypoint is [`run::CleanRequest::run`], which loads the config, reads the
//! input with [`ingestion::load_table`], applies [`processing::apply_cleaning`] and writes the
//! result with [`output::write_table`].
//!
//! ## What a rule set can do
//!
//! Steps run in a fixed order (see [`processing`]):
//!
//! - strip whitespace from text columns
//! - parse date columns (unparseable values become nulls)
//! - coerce column types (`int64`, `float`, `str`, `bool`, `datetime64[ns]`, ...)
//! - fill nulls per column
//! - drop rows that are entirely null, then duplicate rows
//! - re-render date columns with a strftime format
//! - move listed columns to the front
//!
//! ## Quick example
//!
//! ```no_run
//! use csv_cleaner::config::Config;
//! use csv_cleaner::ingestion::load_table;
//! use csv_cleaner::output::write_table;
//! use csv_cleaner::processing::apply_cleaning;
//!
//! # fn main() -> Result<(), csv_cleaner::CleanerError> {
//! let config = Config::load("rules.yaml")?;
//! let ds = load_table("raw.csv", &config.read)?;
//! let (cleaned, report) = apply_cleaning(ds, &config.cleaning);
//! write_table(&cleaned, "clean.csv", &config.output)?;
//! println!("{}", report.summary_line());
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`config`]: YAML rule documents
//! - [`ingestion`]: CSV/spreadsheet readers and type inference
//! - [`processing`]: the cleaning pipeline
//! - [`output`]: CSV/spreadsheet writers
//! - [`report`]: JSON change reports
//! - [`run`]: one complete cleaning run
//! - [`logging`]: `tracing-subscriber` setup for the binary
//! - [`types`]: schema + in-memory dataset types
//! - [`error`]: error types used across the crate

pub mod config;
pub mod error;
pub mod ingestion;
pub mod logging;
pub mod output;
pub mod processing;
pub mod report;
pub mod run;
pub mod types;

pub use error::{CleanerError, CleanerResult};
