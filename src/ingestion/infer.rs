//! Header normalization, null tokens, and column type inference shared by the readers.

use std::collections::HashSet;

use crate::types::{DataSet, DataType, Field, Schema, Value};

/// Raw cell text recognized as missing.
pub const NA_TOKENS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Whether `raw` is one of the [`NA_TOKENS`].
pub fn is_na_token(raw: &str) -> bool {
    NA_TOKENS.contains(&raw)
}

/// Fill blank header cells with `Unnamed: {i}` and suffix duplicates with `.1`, `.2`, ...
pub fn normalize_headers(raw: Vec<String>) -> Vec<String> {
    let mut used: HashSet<String> = HashSet::with_capacity(raw.len());
    raw.into_iter()
        .enumerate()
        .map(|(i, name)| {
            let base = if name.trim().is_empty() {
                format!("Unnamed: {i}")
            } else {
                name
            };
            let mut candidate = base.clone();
            let mut suffix = 1;
            while used.contains(&candidate) {
                candidate = format!("{base}.{suffix}");
                suffix += 1;
            }
            used.insert(candidate.clone());
            candidate
        })
        .collect()
}

/// Build a dataset from raw text cells (`None` = null), inferring one type per column.
///
/// Inference only looks at non-null cells and picks the first of `Int64`, `Float64`, `Bool`
/// that every cell parses as, otherwise `Utf8`. Cells are not trimmed first.
pub fn dataset_from_text(headers: Vec<String>, rows: Vec<Vec<Option<String>>>) -> DataSet {
    let width = headers.len();
    let mut fields = Vec::with_capacity(width);
    let mut columns: Vec<Vec<Value>> = Vec::with_capacity(width);

    for (idx, name) in headers.into_iter().enumerate() {
        let raw: Vec<Option<&str>> = rows
            .iter()
            .map(|row| row.get(idx).and_then(|c| c.as_deref()))
            .collect();
        let data_type = infer_text_type(raw.iter().flatten().copied());
        columns.push(raw.into_iter().map(|c| typed_from_text(c, data_type)).collect());
        fields.push(Field::new(name, data_type));
    }

    DataSet::new(Schema::new(fields), transpose(columns, rows.len()))
}

/// Build a dataset from already-typed cells (e.g. spreadsheet cells), settling one declared
/// type per column.
///
/// Integer and float cells together widen to `Float64`; any other combination of kinds is
/// `Mixed`.
pub fn dataset_from_cells(headers: Vec<String>, rows: Vec<Vec<Value>>) -> DataSet {
    let width = headers.len();
    let mut fields = Vec::with_capacity(width);
    let mut columns: Vec<Vec<Value>> = Vec::with_capacity(width);

    for (idx, name) in headers.into_iter().enumerate() {
        let cells: Vec<Value> = rows
            .iter()
            .map(|row| row.get(idx).cloned().unwrap_or(Value::Null))
            .collect();
        let data_type = infer_cell_type(&cells);
        let cells = if data_type == DataType::Float64 {
            cells.into_iter().map(widen_to_float).collect()
        } else {
            cells
        };
        columns.push(cells);
        fields.push(Field::new(name, data_type));
    }

    DataSet::new(Schema::new(fields), transpose(columns, rows.len()))
}

fn infer_text_type<'a>(mut cells: impl Iterator<Item = &'a str> + Clone) -> DataType {
    if cells.clone().next().is_none() {
        return DataType::Utf8;
    }
    if cells.clone().all(|c| c.parse::<i64>().is_ok()) {
        DataType::Int64
    } else if cells.clone().all(|c| c.parse::<f64>().is_ok()) {
        DataType::Float64
    } else if cells.all(|c| parse_bool_literal(c).is_some()) {
        DataType::Bool
    } else {
        DataType::Utf8
    }
}

fn typed_from_text(raw: Option<&str>, data_type: DataType) -> Value {
    let Some(raw) = raw else {
        return Value::Null;
    };
    let typed = match data_type {
        DataType::Int64 => raw.parse().ok().map(Value::Int64),
        DataType::Float64 => raw.parse().ok().map(Value::Float64),
        DataType::Bool => parse_bool_literal(raw).map(Value::Bool),
        _ => None,
    };
    typed.unwrap_or_else(|| Value::Utf8(raw.to_string()))
}

fn parse_bool_literal(raw: &str) -> Option<bool> {
    match raw {
        "True" | "true" | "TRUE" => Some(true),
        "False" | "false" | "FALSE" => Some(false),
        _ => None,
    }
}

fn infer_cell_type(cells: &[Value]) -> DataType {
    let mut kinds = cells.iter().filter(|c| !c.is_null()).map(kind_of);
    let Some(first) = kinds.next() else {
        return DataType::Utf8;
    };
    kinds.fold(first, |acc, kind| match (acc, kind) {
        (a, b) if a == b => a,
        (DataType::Int64 | DataType::Float64, DataType::Int64 | DataType::Float64) => {
            DataType::Float64
        }
        _ => DataType::Mixed,
    })
}

fn kind_of(value: &Value) -> DataType {
    match value {
        Value::Int64(_) => DataType::Int64,
        Value::Float64(_) => DataType::Float64,
        Value::Bool(_) => DataType::Bool,
        Value::DateTime(_) => DataType::DateTime,
        Value::Utf8(_) | Value::Null => DataType::Utf8,
    }
}

fn widen_to_float(value: Value) -> Value {
    match value {
        #[allow(clippy::cast_precision_loss)]
        Value::Int64(v) => Value::Float64(v as f64),
        other => other,
    }
}

fn transpose(columns: Vec<Vec<Value>>, row_count: usize) -> Vec<Vec<Value>> {
    let mut rows: Vec<Vec<Value>> = (0..row_count)
        .map(|_| Vec::with_capacity(columns.len()))
        .collect();
    for column in columns {
        for (row, value) in rows.iter_mut().zip(column) {
            row.push(value);
        }
    }
    rows
}
