//! CSV output.

use std::io::Write;
use std::path::Path;

use crate::error::CleanerResult;
use crate::types::{DataSet, DataType, Value, format_float, format_float32};

/// Write `dataset` to a CSV file: UTF-8, header row, no index column.
pub fn write_csv_to_path(dataset: &DataSet, path: impl AsRef<Path>) -> CleanerResult<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    write_csv_to_writer(dataset, &mut wtr)?;
    wtr.flush()?;
    Ok(())
}

/// Write `dataset` (header first) to an existing CSV writer.
pub fn write_csv_to_writer<W: Write>(
    dataset: &DataSet,
    wtr: &mut csv::Writer<W>,
) -> CleanerResult<()> {
    wtr.write_record(dataset.schema.field_names())?;

    let renderers: Vec<CellRenderer> = dataset
        .schema
        .fields
        .iter()
        .enumerate()
        .map(|(idx, field)| CellRenderer::for_column(field.data_type, dataset.column(idx)))
        .collect();

    for row in &dataset.rows {
        wtr.write_record(
            row.iter()
                .zip(&renderers)
                .map(|(value, renderer)| renderer.render(value)),
        )?;
    }
    Ok(())
}

/// How the cells of one column are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CellRenderer {
    Plain,
    Float32,
    DateOnly,
}

impl CellRenderer {
    fn for_column<'a>(data_type: DataType, mut cells: impl Iterator<Item = &'a Value>) -> Self {
        match data_type {
            DataType::Float32 => Self::Float32,
            DataType::DateTime
                if cells.all(|v| match v {
                    Value::DateTime(dt) => dt.time() == chrono::NaiveTime::MIN,
                    _ => true,
                }) =>
            {
                Self::DateOnly
            }
            _ => Self::Plain,
        }
    }

    fn render(self, value: &Value) -> String {
        match (self, value) {
            (_, Value::Null) => String::new(),
            (Self::Float32, Value::Float64(v)) => format_float32(*v),
            (Self::DateOnly, Value::DateTime(dt)) => dt.format("%Y-%m-%d").to_string(),
            (_, Value::Float64(v)) => format_float(*v),
            (_, other) => other.to_text().unwrap_or_default(),
        }
    }
}
