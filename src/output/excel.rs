#![cfg(feature = "excel")]

use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_xlsxwriter::{Format, Workbook};
use tracing::warn;

use crate::error::{CleanerError, CleanerResult};
use crate::types::{DataSet, DataType, Value, format_float};

const DATE_FORMAT: &str = "yyyy-mm-dd";
const DATETIME_FORMAT: &str = "yyyy-mm-dd hh:mm:ss";

/// Write `dataset` to an `.xlsx` workbook with a single sheet named `sheet_name`.
///
/// Row 0 holds the column names. Nulls are left blank; non-finite floats are written as text
/// since a worksheet cannot store them as numbers.
pub fn write_excel_to_path(
    dataset: &DataSet,
    path: impl AsRef<Path>,
    sheet_name: &str,
) -> CleanerResult<()> {
    let path = path.as_ref();
    if path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("xls"))
    {
        warn!(path = %path.display(), "legacy .xls output is not supported; writing XLSX content");
    }

    let date_format = Format::new().set_num_format(DATE_FORMAT);
    let datetime_format = Format::new().set_num_format(DATETIME_FORMAT);

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_name)?;

    for (col, name) in dataset.schema.field_names().enumerate() {
        worksheet.write_string(0, column_index(col)?, name)?;
    }

    for (idx, field) in dataset.schema.fields.iter().enumerate() {
        let col = column_index(idx)?;
        let dates_only = field.data_type == DataType::DateTime
            && dataset.column(idx).all(|v| match v {
                Value::DateTime(dt) => dt.time() == NaiveTime::MIN,
                _ => true,
            });
        let dt_format = if dates_only {
            &date_format
        } else {
            &datetime_format
        };

        for (row_idx, value) in dataset.column(idx).enumerate() {
            let row = row_index(row_idx + 1)?;
            match value {
                Value::Null => {}
                #[allow(clippy::cast_precision_loss)]
                Value::Int64(v) => {
                    worksheet.write_number(row, col, *v as f64)?;
                }
                Value::Float64(v) if v.is_finite() => {
                    worksheet.write_number(row, col, *v)?;
                }
                Value::Float64(v) => {
                    worksheet.write_string(row, col, format_float(*v))?;
                }
                Value::Bool(b) => {
                    worksheet.write_boolean(row, col, *b)?;
                }
                Value::Utf8(s) => {
                    worksheet.write_string(row, col, s)?;
                }
                Value::DateTime(dt) => {
                    worksheet.write_number_with_format(row, col, excel_serial(dt), dt_format)?;
                }
            }
        }
    }

    workbook.save(path)?;
    Ok(())
}

/// Days since 1899-12-30, with the time of day as the fractional part.
#[allow(clippy::cast_precision_loss)]
fn excel_serial(dt: &NaiveDateTime) -> f64 {
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)
        .unwrap_or_default()
        .and_time(NaiveTime::MIN);
    let millis = dt.signed_duration_since(epoch).num_milliseconds();
    millis as f64 / 86_400_000.0
}

fn row_index(idx: usize) -> CleanerResult<u32> {
    u32::try_from(idx).map_err(|_| CleanerError::Table {
        message: format!("row {idx} exceeds the worksheet row limit"),
    })
}

fn column_index(idx: usize) -> CleanerResult<u16> {
    u16::try_from(idx).map_err(|_| CleanerError::Table {
        message: format!("column {idx} exceeds the worksheet column limit"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serial_numbers_match_excel_epoch() {
        let dt = NaiveDate::from_ymd_opt(2024, 1, 5)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        assert!((excel_serial(&dt) - 45_296.5).abs() < 1e-9);
    }
}
