//! CSV ingestion implementation.

use std::path::Path;

use super::encoding::decode_input;
use super::infer::{dataset_from_text, is_na_token, normalize_headers};
use crate::error::{CleanerError, CleanerResult};
use crate::types::DataSet;

/// Read a CSV file into an in-memory [`DataSet`].
///
/// Rules:
///
/// - The file is decoded with `encoding` before parsing.
/// - Row `header` is the header row and earlier rows are skipped; `None` means there is no
///   header and columns are named `0..n`.
/// - Empty fields and NA tokens become nulls; column types are inferred from the rest.
pub fn read_csv_from_path(
    path: impl AsRef<Path>,
    encoding: &str,
    header: Option<usize>,
) -> CleanerResult<DataSet> {
    let bytes = std::fs::read(path)?;
    let text = decode_input(&bytes, encoding)?;
    read_csv_from_str(&text, header)
}

/// Read CSV data from already decoded text.
pub fn read_csv_from_str(text: &str, header: Option<usize>) -> CleanerResult<DataSet> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());
    read_csv_from_reader(&mut rdr, header)
}

/// Read CSV data from an existing CSV reader.
///
/// The reader must be built with `has_headers(false)` and `flexible(true)`; the header row
/// is located here so that `header` can point past leading junk rows.
pub fn read_csv_from_reader<R: std::io::Read>(
    rdr: &mut csv::Reader<R>,
    header: Option<usize>,
) -> CleanerResult<DataSet> {
    let mut records: Vec<csv::StringRecord> = Vec::new();
    for result in rdr.records() {
        let record = result?;
        if is_blank(&record) {
            continue;
        }
        records.push(record);
    }
    if records.is_empty() {
        return Err(CleanerError::Table {
            message: "no columns to parse from input".to_string(),
        });
    }

    let (headers, data_start): (Vec<String>, usize) = match header {
        Some(idx) => {
            let header_record = records.get(idx).ok_or_else(|| CleanerError::Table {
                message: format!(
                    "header row {idx} is past the end of the input ({} rows)",
                    records.len()
                ),
            })?;
            let names = header_record.iter().map(str::to_string).collect();
            (normalize_headers(names), idx + 1)
        }
        None => {
            let width = records.iter().map(csv::StringRecord::len).max().unwrap_or(0);
            ((0..width).map(|i| i.to_string()).collect(), 0)
        }
    };

    let mut rows: Vec<Vec<Option<String>>> = Vec::with_capacity(records.len() - data_start);
    for (offset, record) in records.iter().enumerate().skip(data_start) {
        if record.len() > headers.len() {
            // Report 1-based record numbers for users.
            return Err(CleanerError::Table {
                message: format!(
                    "expected {} fields in record {}, saw {}",
                    headers.len(),
                    offset + 1,
                    record.len()
                ),
            });
        }
        let mut row: Vec<Option<String>> = record
            .iter()
            .map(|field| (!is_na_token(field)).then(|| field.to_string()))
            .collect();
        row.resize(headers.len(), None);
        rows.push(row);
    }

    Ok(dataset_from_text(headers, rows))
}

fn is_blank(record: &csv::StringRecord) -> bool {
    record.len() == 1 && record.get(0).is_some_and(str::is_empty)
}
