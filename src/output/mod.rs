//! Writing cleaned tables.
//!
//! [`write_table`] chooses CSV or spreadsheet output from [`OutputOptions::to_excel`] and the
//! output file extension.

pub mod csv;
#[cfg(feature = "excel")]
pub mod excel;

use std::path::Path;

use tracing::info;

use crate::config::OutputOptions;
use crate::error::CleanerResult;
use crate::ingestion::TableFormat;
use crate::types::DataSet;

/// Format [`write_table`] uses for `path`.
pub fn output_format(path: &Path, options: &OutputOptions) -> TableFormat {
    let spreadsheet_ext = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("xlsx") || e.eq_ignore_ascii_case("xls"));
    if options.to_excel || spreadsheet_ext {
        TableFormat::Excel
    } else {
        TableFormat::Csv
    }
}

/// Write `dataset` to `path`, returning the format that was written.
pub fn write_table(
    dataset: &DataSet,
    path: impl AsRef<Path>,
    options: &OutputOptions,
) -> CleanerResult<TableFormat> {
    let path = path.as_ref();
    let format = output_format(path, options);
    match format {
        TableFormat::Csv => csv::write_csv_to_path(dataset, path)?,
        TableFormat::Excel => write_excel(dataset, path, options)?,
    }
    info!(
        path = %path.display(),
        ?format,
        rows = dataset.row_count(),
        "wrote table"
    );
    Ok(format)
}

#[cfg(feature = "excel")]
fn write_excel(dataset: &DataSet, path: &Path, options: &OutputOptions) -> CleanerResult<()> {
    excel::write_excel_to_path(dataset, path, &options.sheet_name)
}

#[cfg(not(feature = "excel"))]
fn write_excel(_dataset: &DataSet, path: &Path, _options: &OutputOptions) -> CleanerResult<()> {
    Err(crate::error::CleanerError::Config {
        message: format!(
            "cannot write '{}': spreadsheet support is disabled (enable Cargo feature 'excel')",
            path.display()
        ),
    })
}
