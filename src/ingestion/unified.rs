//! Unified table loading entrypoint.
//!
//! Most callers should use [`load_table`], which picks a reader from the file extension and
//! applies the [`ReadOptions`] of the run config.

use std::path::Path;

use tracing::info;

use crate::config::ReadOptions;
use crate::error::CleanerResult;
use crate::types::DataSet;

use super::csv;

/// Supported table file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    /// Delimited text.
    Csv,
    /// Spreadsheet/workbook formats (reading and writing are feature-gated behind `excel`).
    Excel,
}

impl TableFormat {
    /// Parse a table format from a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "csv" | "txt" => Some(Self::Csv),
            "xlsx" | "xls" | "xlsm" | "xlsb" | "ods" => Some(Self::Excel),
            _ => None,
        }
    }
}

/// Format used to read `path`. Unknown or missing extensions are read as CSV.
pub fn format_for_path(path: &Path) -> TableFormat {
    path.extension()
        .and_then(|e| e.to_str())
        .and_then(TableFormat::from_extension)
        .unwrap_or(TableFormat::Csv)
}

/// Load the table at `path` with the given read options.
///
/// ```no_run
/// use csv_cleaner::config::ReadOptions;
/// use csv_cleaner::ingestion::load_table;
///
/// # fn main() -> Result<(), csv_cleaner::CleanerError> {
/// let ds = load_table("people.csv", &ReadOptions::default())?;
/// println!("rows={}", ds.row_count());
/// # Ok(())
/// # }
/// ```
pub fn load_table(path: impl AsRef<Path>, options: &ReadOptions) -> CleanerResult<DataSet> {
    let path = path.as_ref();
    let format = format_for_path(path);
    let ds = match format {
        TableFormat::Csv => csv::read_csv_from_path(path, &options.encoding, options.header)?,
        TableFormat::Excel => load_excel(path, options)?,
    };
    info!(
        path = %path.display(),
        ?format,
        rows = ds.row_count(),
        columns = ds.column_count(),
        "loaded table"
    );
    Ok(ds)
}

#[cfg(feature = "excel")]
fn load_excel(path: &Path, options: &ReadOptions) -> CleanerResult<DataSet> {
    super::excel::read_excel_from_path(path, options.sheet_name.as_deref(), options.header)
}

#[cfg(not(feature = "excel"))]
fn load_excel(path: &Path, _options: &ReadOptions) -> CleanerResult<DataSet> {
    Err(crate::error::CleanerError::Config {
        message: format!(
            "cannot read '{}': spreadsheet support is disabled (enable Cargo feature 'excel')",
            path.display()
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spreadsheet_extensions_are_detected() {
        assert_eq!(TableFormat::from_extension("XLSX"), Some(TableFormat::Excel));
        assert_eq!(TableFormat::from_extension("ods"), Some(TableFormat::Excel));
        assert_eq!(TableFormat::from_extension("csv"), Some(TableFormat::Csv));
        assert_eq!(TableFormat::from_extension("parquet"), None);
    }

    #[test]
    fn unknown_extensions_fall_back_to_csv() {
        assert_eq!(format_for_path(Path::new("data.dat")), TableFormat::Csv);
        assert_eq!(format_for_path(Path::new("data")), TableFormat::Csv);
        assert_eq!(format_for_path(Path::new("book.xlsm")), TableFormat::Excel);
    }
}
