//! Best-effort type coercion.
//!
//! Target names follow the usual dataframe vocabulary. Names starting with `int` take the
//! lenient numeric path (invalid values become null before the integer cast); every other name
//! is a strict direct cast. Either way a failure leaves the column exactly as it was.

use std::collections::BTreeMap;

use thiserror::Error;
use tracing::debug;

use super::dates::{to_datetime, to_epoch_nanos};
use crate::types::{DataSet, DataType, Value};

/// Why a column could not be coerced. Logged and discarded by [`coerce_types`].
#[derive(Debug, Error, PartialEq)]
pub enum CoercionError {
    #[error("unknown target type '{0}'")]
    UnknownType(String),

    #[error("cannot cast {raw:?} to {target:?}")]
    Incompatible { raw: String, target: DataType },

    #[error("value {value} is out of range for {target:?}")]
    OutOfRange { value: i64, target: DataType },

    #[error("cannot safely cast non-integral value {value} to an integer")]
    NonIntegral { value: f64 },
}

/// Coerce each `(column, type name)` pair; columns that do not exist are skipped.
pub fn coerce_types(dataset: &mut DataSet, dtype: &BTreeMap<String, String>) {
    for (name, type_name) in dtype {
        let Some(idx) = dataset.schema.index_of(name) else {
            debug!(column = %name, "dtype: column not found, skipping");
            continue;
        };
        let result = coerce_column(dataset.column(idx), type_name);
        match result {
            Ok((data_type, values)) => {
                debug!(column = %name, dtype = %type_name, "coerced column");
                dataset.replace_column(idx, data_type, values);
            }
            Err(err) => {
                debug!(
                    column = %name,
                    dtype = %type_name,
                    error = %err,
                    "type coercion failed; column left unchanged"
                );
            }
        }
    }
}

/// Coerce a column's cells to the named type, returning the new declared type and cells.
pub fn coerce_column<'a, I>(
    cells: I,
    type_name: &str,
) -> Result<(DataType, Vec<Value>), CoercionError>
where
    I: Iterator<Item = &'a Value>,
{
    if type_name.starts_with("int") {
        let numeric: Vec<Value> = cells.map(to_numeric).collect();
        let integers = numeric
            .into_iter()
            .map(to_nullable_integer)
            .collect::<Result<Vec<_>, _>>()?;
        let target = integer_width(type_name)?;
        check_bounds(&integers, target)?;
        return Ok((target, integers));
    }

    let target = direct_target(type_name)?;
    let values = cells
        .map(|cell| cast_cell(cell, target))
        .collect::<Result<Vec<_>, _>>()?;
    Ok((target, values))
}

fn integer_width(type_name: &str) -> Result<DataType, CoercionError> {
    match type_name {
        "int" | "int64" => Ok(DataType::Int64),
        "int32" => Ok(DataType::Int32),
        "int16" => Ok(DataType::Int16),
        "int8" => Ok(DataType::Int8),
        other => Err(CoercionError::UnknownType(other.to_string())),
    }
}

fn direct_target(type_name: &str) -> Result<DataType, CoercionError> {
    let target = match type_name {
        "Int8" => DataType::Int8,
        "Int16" => DataType::Int16,
        "Int32" => DataType::Int32,
        "Int64" => DataType::Int64,
        "uint8" | "UInt8" => DataType::UInt8,
        "uint16" | "UInt16" => DataType::UInt16,
        "uint32" | "UInt32" => DataType::UInt32,
        "uint64" | "UInt64" => DataType::UInt64,
        "float32" | "Float32" => DataType::Float32,
        "float" | "float64" | "Float64" => DataType::Float64,
        "bool" | "boolean" => DataType::Bool,
        "str" | "string" => DataType::Utf8,
        "object" => DataType::Mixed,
        "datetime" | "datetime64" | "datetime64[ns]" | "datetime64[us]" | "datetime64[ms]"
        | "datetime64[s]" => DataType::DateTime,
        other => return Err(CoercionError::UnknownType(other.to_string())),
    };
    Ok(target)
}

/// Lenient numeric conversion: anything that is not a number becomes null.
fn to_numeric(cell: &Value) -> Value {
    match cell {
        Value::Int64(v) => Value::Int64(*v),
        Value::Float64(f) if f.is_nan() => Value::Null,
        Value::Float64(f) => Value::Float64(*f),
        Value::Bool(b) => Value::Int64(i64::from(*b)),
        Value::Utf8(s) => parse_number(s).unwrap_or(Value::Null),
        Value::DateTime(dt) => to_epoch_nanos(dt).map_or(Value::Null, Value::Int64),
        Value::Null => Value::Null,
    }
}

fn parse_number(raw: &str) -> Option<Value> {
    let s = raw.trim();
    if let Ok(i) = s.parse::<i64>() {
        return Some(Value::Int64(i));
    }
    match s.parse::<f64>() {
        Ok(f) if !f.is_nan() => Some(Value::Float64(f)),
        _ => None,
    }
}

fn to_nullable_integer(cell: Value) -> Result<Value, CoercionError> {
    match cell {
        Value::Float64(f) => float_to_integer(f).map(Value::Int64),
        other => Ok(other),
    }
}

fn float_to_integer(f: f64) -> Result<i64, CoercionError> {
    // i64::MAX is not representable as f64; 2^63 is the first value out of range.
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    if f.is_finite() && f.fract() == 0.0 && f >= -LIMIT && f < LIMIT {
        #[allow(clippy::cast_possible_truncation)]
        let i = f as i64;
        Ok(i)
    } else {
        Err(CoercionError::NonIntegral { value: f })
    }
}

fn check_bounds(values: &[Value], target: DataType) -> Result<(), CoercionError> {
    let Some((min, max)) = target.integer_bounds() else {
        return Ok(());
    };
    for value in values {
        if let Value::Int64(v) = value {
            if *v < min || *v > max {
                return Err(CoercionError::OutOfRange { value: *v, target });
            }
        }
    }
    Ok(())
}

fn incompatible(cell: &Value, target: DataType) -> CoercionError {
    CoercionError::Incompatible {
        raw: cell.to_text().unwrap_or_default(),
        target,
    }
}

fn cast_cell(cell: &Value, target: DataType) -> Result<Value, CoercionError> {
    if cell.is_null() {
        return Ok(Value::Null);
    }
    match target {
        t if t.is_integer() => {
            let v = match cell {
                Value::Int64(v) => *v,
                Value::Float64(f) => float_to_integer(*f)?,
                Value::Bool(b) => i64::from(*b),
                Value::Utf8(s) => s.trim().parse::<i64>().map_err(|_| incompatible(cell, t))?,
                Value::DateTime(dt) => to_epoch_nanos(dt).ok_or_else(|| incompatible(cell, t))?,
                Value::Null => return Ok(Value::Null),
            };
            check_bounds(std::slice::from_ref(&Value::Int64(v)), t)?;
            Ok(Value::Int64(v))
        }
        t if t.is_float() => {
            #[allow(clippy::cast_precision_loss)]
            let f = match cell {
                Value::Int64(v) => *v as f64,
                Value::Float64(f) => *f,
                Value::Bool(b) => f64::from(u8::from(*b)),
                Value::Utf8(s) => s.trim().parse::<f64>().map_err(|_| incompatible(cell, t))?,
                Value::DateTime(_) | Value::Null => return Err(incompatible(cell, t)),
            };
            Ok(Value::Float64(narrow_float(f, t)))
        }
        DataType::Bool => match cell {
            Value::Bool(b) => Ok(Value::Bool(*b)),
            Value::Int64(v) => Ok(Value::Bool(*v != 0)),
            Value::Float64(f) => Ok(Value::Bool(*f != 0.0)),
            Value::Utf8(s) => parse_bool(s)
                .map(Value::Bool)
                .ok_or_else(|| incompatible(cell, DataType::Bool)),
            Value::DateTime(_) | Value::Null => Err(incompatible(cell, DataType::Bool)),
        },
        DataType::Utf8 => Ok(cell.to_text().map_or(Value::Null, Value::Utf8)),
        DataType::DateTime => to_datetime(cell)
            .map(Value::DateTime)
            .ok_or_else(|| incompatible(cell, DataType::DateTime)),
        _ => Ok(cell.clone()),
    }
}

/// Round a float through `f32` when the target is single precision.
pub(crate) fn narrow_float(f: f64, target: DataType) -> f64 {
    if target == DataType::Float32 {
        #[allow(clippy::cast_possible_truncation)]
        let narrow = f as f32;
        f64::from(narrow)
    } else {
        f
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "true" | "t" | "1" | "yes" | "y" => Some(true),
        "false" | "f" | "0" | "no" | "n" => Some(false),
        _ => None,
    }
}
