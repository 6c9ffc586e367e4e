#![cfg(feature = "excel")]

use std::path::Path;

use calamine::{Data, Range, Reader, open_workbook_auto};
use chrono::{NaiveDate, NaiveDateTime, TimeDelta};

use super::infer::{dataset_from_cells, is_na_token, normalize_headers};
use crate::error::{CleanerError, CleanerResult};
use crate::processing::dates::parse_datetime_text;
use crate::types::{DataSet, Value};

/// Read one sheet of an Excel document (`.xlsx`, `.xls`, `.ods`, etc.) into a `DataSet`.
///
/// Behavior:
/// - Picks `sheet_name` if provided; otherwise uses the first sheet in the workbook
/// - Row `header` (0-based, counted from the top of the sheet) is the header row; `None`
///   means every row is data and columns are numbered
/// - Blank rows are skipped; error cells and NA strings become nulls
/// - Integral numbers become `Int64`, serial dates become `DateTime`
pub fn read_excel_from_path(
    path: impl AsRef<Path>,
    sheet_name: Option<&str>,
    header: Option<usize>,
) -> CleanerResult<DataSet> {
    let mut workbook = open_workbook_auto(path)?;

    let sheet = match sheet_name {
        Some(name) => name.to_string(),
        None => workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| CleanerError::Table {
                message: "workbook has no sheets".to_string(),
            })?,
    };

    let range = workbook.worksheet_range(&sheet)?;
    dataset_from_range(&sheet, &range, header)
}

fn dataset_from_range(
    sheet: &str,
    range: &Range<Data>,
    header: Option<usize>,
) -> CleanerResult<DataSet> {
    if range.is_empty() {
        return Ok(DataSet::default());
    }
    // The range starts at the first non-empty cell, not necessarily at A1.
    let start_row = range.start().map_or(0, |(row, _)| row as usize);
    let sheet_rows: Vec<&[Data]> = range.rows().collect();
    let width = range.width();

    let (headers, data_rows): (Vec<String>, &[&[Data]]) = match header {
        Some(h) => match h.checked_sub(start_row) {
            Some(local) => {
                let header_row = sheet_rows.get(local).ok_or_else(|| CleanerError::Table {
                    message: format!(
                        "sheet '{sheet}': header row {h} is past the end of the data"
                    ),
                })?;
                let names = header_row.iter().map(cell_to_header_string).collect();
                (normalize_headers(names), &sheet_rows[local + 1..])
            }
            // The header row lies in the blank rows above the data.
            None => (normalize_headers(vec![String::new(); width]), &sheet_rows[..]),
        },
        None => ((0..width).map(|i| i.to_string()).collect(), &sheet_rows[..]),
    };

    let rows: Vec<Vec<Value>> = data_rows
        .iter()
        .filter(|row| row.iter().any(|c| !matches!(c, Data::Empty)))
        .map(|row| {
            let mut cells: Vec<Value> = row.iter().map(convert_cell).collect();
            cells.resize(headers.len(), Value::Null);
            cells
        })
        .collect();

    Ok(dataset_from_cells(headers, rows))
}

fn cell_to_header_string(c: &Data) -> String {
    match c {
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => {
            if f.fract() == 0.0 {
                (*f as i64).to_string()
            } else {
                f.to_string()
            }
        }
        Data::Bool(b) => b.to_string(),
        Data::DateTime(f) => f.to_string(),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
        Data::Error(e) => format!("{e:?}"),
        Data::Empty => String::new(),
    }
}

fn convert_cell(c: &Data) -> Value {
    match c {
        Data::Empty | Data::Error(_) => Value::Null,
        Data::String(s) if is_na_token(s) => Value::Null,
        Data::String(s) => Value::Utf8(s.clone()),
        Data::Int(i) => Value::Int64(*i),
        Data::Float(f) => {
            if f.is_finite() && f.fract() == 0.0 && f.abs() < 9.0e15 {
                Value::Int64(*f as i64)
            } else {
                Value::Float64(*f)
            }
        }
        Data::Bool(b) => Value::Bool(*b),
        Data::DateTime(dt) => serial_to_datetime(dt.as_f64())
            .map_or_else(|| Value::Utf8(dt.to_string()), Value::DateTime),
        Data::DateTimeIso(s) => {
            parse_datetime_text(s).map_or_else(|| Value::Utf8(s.clone()), Value::DateTime)
        }
        Data::DurationIso(s) => Value::Utf8(s.clone()),
    }
}

/// Convert an Excel serial date (days since 1899-12-30, fractional part = time of day).
fn serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;
    let millis = (serial * 86_400_000.0).round();
    if millis.abs() > 1.0e15 {
        return None;
    }
    epoch.checked_add_signed(TimeDelta::try_milliseconds(millis as i64)?)
}
