//! Null filling.

use std::collections::BTreeMap;

use tracing::debug;

use super::coerce::narrow_float;
use super::dates::parse_datetime_text;
use crate::types::{DataSet, DataType, Value};

/// Replace nulls in each named column with its configured value.
///
/// For every column that exists, `filled[column]` is set to the number of nulls before the
/// fill minus the number after (0 if nothing was filled).
pub fn fill_nulls(
    dataset: &mut DataSet,
    fillna: &BTreeMap<String, Value>,
    filled: &mut BTreeMap<String, usize>,
) {
    for (name, fill) in fillna {
        let Some(idx) = dataset.schema.index_of(name) else {
            debug!(column = %name, "fillna: column not found, skipping");
            continue;
        };
        let before = dataset.null_count(idx);
        let column_type = dataset.schema.fields[idx].data_type;
        let (replacement, new_type) = fit_fill_value(column_type, fill);
        let upcast_to_float = column_type.is_integer() && new_type.is_float();

        let values: Vec<Value> = dataset
            .column(idx)
            .map(|cell| match cell {
                Value::Null => replacement.clone(),
                #[allow(clippy::cast_precision_loss)]
                Value::Int64(v) if upcast_to_float => Value::Float64(*v as f64),
                other => other.clone(),
            })
            .collect();
        let after = values.iter().filter(|v| v.is_null()).count();
        dataset.replace_column(idx, new_type, values);

        debug!(column = %name, filled = before - after, "filled nulls");
        filled.insert(name.clone(), before - after);
    }
}

/// Convert a fill value to the column's type where that is lossless.
///
/// Returns the cell to store and the column's resulting declared type. A value that does not
/// fit is stored as-is and the column becomes [`DataType::Mixed`].
fn fit_fill_value(column_type: DataType, fill: &Value) -> (Value, DataType) {
    match (column_type, fill) {
        (_, Value::Null) => (Value::Null, column_type),
        (t, Value::Int64(v)) if t.is_integer() => match t.integer_bounds() {
            Some((min, max)) if (min..=max).contains(v) => (Value::Int64(*v), t),
            _ => (Value::Int64(*v), DataType::Mixed),
        },
        #[allow(clippy::cast_precision_loss)]
        (t, Value::Int64(v)) if t.is_float() => (Value::Float64(narrow_float(*v as f64, t)), t),
        (t, Value::Float64(f)) if t.is_float() => (Value::Float64(narrow_float(*f, t)), t),
        (t, Value::Float64(f)) if t.is_integer() => {
            let integral = f.is_finite() && f.fract() == 0.0;
            match t.integer_bounds() {
                #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
                Some((min, max)) if integral && *f >= min as f64 && *f <= max as f64 => {
                    (Value::Int64(*f as i64), t)
                }
                _ => (Value::Float64(*f), DataType::Float64),
            }
        }
        (DataType::Bool, Value::Bool(b)) => (Value::Bool(*b), DataType::Bool),
        (DataType::Utf8, v) => (v.to_text().map_or(Value::Null, Value::Utf8), DataType::Utf8),
        (DataType::DateTime, Value::Utf8(s)) => match parse_datetime_text(s) {
            Some(dt) => (Value::DateTime(dt), DataType::DateTime),
            None => (fill.clone(), DataType::Mixed),
        },
        (_, v) => (v.clone(), DataType::Mixed),
    }
}
