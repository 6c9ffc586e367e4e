//! Row removal: all-null rows and exact duplicates.

use std::collections::HashSet;

use chrono::NaiveDateTime;

use crate::types::{DataSet, Value};

/// Remove every row whose cells are all null; returns the number removed.
pub fn drop_all_null_rows(dataset: &mut DataSet) -> usize {
    dataset.retain_rows(|row| !row.iter().all(Value::is_null))
}

/// Remove rows that exactly repeat an earlier row, keeping the first occurrence.
///
/// Returns the number of rows removed.
pub fn drop_duplicate_rows(dataset: &mut DataSet) -> usize {
    let mut seen: HashSet<Vec<CellKey>> = HashSet::with_capacity(dataset.row_count());
    dataset.retain_rows(|row| seen.insert(row.iter().map(CellKey::from).collect()))
}

/// Hashable stand-in for a [`Value`].
///
/// Integral floats share the key of the equal integer; other floats compare by normalized bit
/// pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum CellKey {
    Null,
    Int(i64),
    Float(u64),
    Bool(bool),
    Text(String),
    DateTime(NaiveDateTime),
}

impl From<&Value> for CellKey {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Int64(v) => Self::Int(*v),
            Value::Float64(f) => match integral_value(*f) {
                Some(i) => Self::Int(i),
                None => Self::Float(normalized_bits(*f)),
            },
            Value::Bool(b) => Self::Bool(*b),
            Value::Utf8(s) => Self::Text(s.clone()),
            Value::DateTime(dt) => Self::DateTime(*dt),
        }
    }
}

fn integral_value(f: f64) -> Option<i64> {
    // 2^63 is the first magnitude an i64 cannot hold.
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    if f.is_finite() && f.fract() == 0.0 && (-LIMIT..LIMIT).contains(&f) {
        #[allow(clippy::cast_possible_truncation)]
        let i = f as i64;
        Some(i)
    } else {
        None
    }
}

fn normalized_bits(f: f64) -> u64 {
    if f.is_nan() {
        f64::NAN.to_bits()
    } else {
        f.to_bits()
    }
}
