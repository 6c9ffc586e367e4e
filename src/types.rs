//! Core data model types.
//!
//! Every stage of a cleaning run works on an in-memory [`DataSet`]: a [`Schema`] of named,
//! typed [`Field`]s plus row-major [`Value`] storage.

use chrono::NaiveDateTime;

/// Declared type of a column.
///
/// Integer widths are tracked on the column; cells always hold [`Value::Int64`]. Likewise
/// [`DataType::Float32`] columns hold [`Value::Float64`] cells that have been rounded through
/// `f32`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    /// 8-bit signed integer.
    Int8,
    /// 16-bit signed integer.
    Int16,
    /// 32-bit signed integer.
    Int32,
    /// 64-bit signed integer.
    Int64,
    /// 8-bit unsigned integer.
    UInt8,
    /// 16-bit unsigned integer.
    UInt16,
    /// 32-bit unsigned integer.
    UInt32,
    /// 64-bit unsigned integer (limited to `0..=i64::MAX`).
    UInt64,
    /// 32-bit floating point number.
    Float32,
    /// 64-bit floating point number.
    Float64,
    /// Boolean.
    Bool,
    /// UTF-8 string.
    Utf8,
    /// Date and time without a timezone.
    DateTime,
    /// Heterogeneous cells (e.g. a spreadsheet column mixing numbers and text).
    Mixed,
}

impl DataType {
    /// Whether whitespace stripping applies to this column type.
    pub fn is_text_like(self) -> bool {
        matches!(self, Self::Utf8 | Self::Mixed)
    }

    /// Whether this is one of the integer types.
    pub fn is_integer(self) -> bool {
        self.integer_bounds().is_some()
    }

    /// Inclusive value range representable by an integer type.
    pub fn integer_bounds(self) -> Option<(i64, i64)> {
        match self {
            Self::Int8 => Some((i8::MIN.into(), i8::MAX.into())),
            Self::Int16 => Some((i16::MIN.into(), i16::MAX.into())),
            Self::Int32 => Some((i32::MIN.into(), i32::MAX.into())),
            Self::Int64 => Some((i64::MIN, i64::MAX)),
            Self::UInt8 => Some((0, u8::MAX.into())),
            Self::UInt16 => Some((0, u16::MAX.into())),
            Self::UInt32 => Some((0, u32::MAX.into())),
            Self::UInt64 => Some((0, i64::MAX)),
            _ => None,
        }
    }

    /// Whether this is one of the floating point types.
    pub fn is_float(self) -> bool {
        matches!(self, Self::Float32 | Self::Float64)
    }
}

/// A single named, typed field in a [`Schema`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Field/column name.
    pub name: String,
    /// Field data type.
    pub data_type: DataType,
}

impl Field {
    /// Create a new field.
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }
}

/// Ordered list of fields describing the columns of a [`DataSet`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Schema {
    /// Ordered list of fields.
    pub fields: Vec<Field>,
}

impl Schema {
    /// Create a new schema from fields.
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    /// Iterate field names in order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Returns the index of a field by name, if present.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }
}

/// A single typed cell in a [`DataSet`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Missing/empty value.
    Null,
    /// 64-bit signed integer.
    Int64(i64),
    /// 64-bit float.
    Float64(f64),
    /// Boolean.
    Bool(bool),
    /// UTF-8 string.
    Utf8(String),
    /// Date and time without a timezone.
    DateTime(NaiveDateTime),
}

impl Value {
    /// Whether this cell is [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// String form of a non-null cell, as it reads when a column is cast to text.
    ///
    /// Returns `None` for [`Value::Null`].
    pub fn to_text(&self) -> Option<String> {
        match self {
            Self::Null => None,
            Self::Int64(v) => Some(v.to_string()),
            Self::Float64(v) => Some(format_float(*v)),
            Self::Bool(true) => Some("True".to_string()),
            Self::Bool(false) => Some("False".to_string()),
            Self::Utf8(s) => Some(s.clone()),
            Self::DateTime(dt) => Some(dt.format("%Y-%m-%d %H:%M:%S%.f").to_string()),
        }
    }
}

/// Render a float the way a Python `repr` would: integral values keep a trailing `.0` and very
/// large or very small magnitudes switch to exponent notation (`1e+20`, `1e-05`).
pub fn format_float(v: f64) -> String {
    if v.is_nan() {
        return "nan".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    let magnitude = v.abs();
    if v != 0.0 && !(1e-4..1e16).contains(&magnitude) {
        return python_exponent(&format!("{v:e}"));
    }
    if v.fract() == 0.0 {
        format!("{v:.1}")
    } else {
        v.to_string()
    }
}

/// Same as [`format_float`] but using the shortest representation of an `f32`.
pub fn format_float32(v: f64) -> String {
    #[allow(clippy::cast_possible_truncation)]
    let narrow = v as f32;
    if !narrow.is_finite() || narrow == 0.0 {
        return format_float(f64::from(narrow));
    }
    let magnitude = narrow.abs();
    if !(1e-4..1e16).contains(&magnitude) {
        return python_exponent(&format!("{narrow:e}"));
    }
    if narrow.fract() == 0.0 {
        format!("{narrow:.1}")
    } else {
        narrow.to_string()
    }
}

// Rust prints `1e20` / `1.5e-5`; Python prints `1e+20` / `1.5e-05`.
fn python_exponent(rust_exp: &str) -> String {
    match rust_exp.split_once('e') {
        Some((mantissa, exp)) => {
            let (sign, digits) = match exp.strip_prefix('-') {
                Some(rest) => ('-', rest),
                None => ('+', exp),
            };
            format!("{mantissa}e{sign}{digits:0>2}")
        }
        None => rust_exp.to_string(),
    }
}

/// In-memory tabular dataset.
///
/// Rows are stored as `Vec<Vec<Value>>` in the same order as the [`Schema`] fields.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DataSet {
    /// Schema describing row shape.
    pub schema: Schema,
    /// Row-major value storage.
    pub rows: Vec<Vec<Value>>,
}

impl DataSet {
    /// Create a dataset from schema and rows.
    pub fn new(schema: Schema, rows: Vec<Vec<Value>>) -> Self {
        Self { schema, rows }
    }

    /// Build a dataset from `(name, type, values)` columns.
    ///
    /// # Panics
    ///
    /// Panics if the columns have different lengths.
    pub fn from_columns<N: Into<String>>(columns: Vec<(N, DataType, Vec<Value>)>) -> Self {
        let row_count = columns.first().map_or(0, |(_, _, values)| values.len());
        let mut fields = Vec::with_capacity(columns.len());
        let mut rows: Vec<Vec<Value>> = (0..row_count)
            .map(|_| Vec::with_capacity(columns.len()))
            .collect();
        for (name, data_type, values) in columns {
            assert!(
                values.len() == row_count,
                "column length {} does not match row count {}",
                values.len(),
                row_count
            );
            fields.push(Field::new(name, data_type));
            for (row, value) in rows.iter_mut().zip(values) {
                row.push(value);
            }
        }
        Self::new(Schema::new(fields), rows)
    }

    /// Number of rows in the dataset.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns in the dataset.
    pub fn column_count(&self) -> usize {
        self.schema.fields.len()
    }

    /// Iterate the cells of the column at `idx`.
    pub fn column(&self, idx: usize) -> impl Iterator<Item = &Value> + '_ {
        self.rows.iter().map(move |row| row.get(idx).unwrap_or(&Value::Null))
    }

    /// Owned copy of a column's cells, looked up by name.
    pub fn column_values(&self, name: &str) -> Option<Vec<Value>> {
        let idx = self.schema.index_of(name)?;
        Some(self.column(idx).cloned().collect())
    }

    /// Number of null cells in the column at `idx`.
    pub fn null_count(&self, idx: usize) -> usize {
        self.column(idx).filter(|v| v.is_null()).count()
    }

    /// Replace every cell of the column at `idx` and its declared type.
    ///
    /// # Panics
    ///
    /// Panics if `values` does not hold exactly one value per row.
    pub fn replace_column(&mut self, idx: usize, data_type: DataType, values: Vec<Value>) {
        assert!(
            values.len() == self.rows.len(),
            "replacement column length {} does not match row count {}",
            values.len(),
            self.rows.len()
        );
        for (row, value) in self.rows.iter_mut().zip(values) {
            if let Some(cell) = row.get_mut(idx) {
                *cell = value;
            }
        }
        if let Some(field) = self.schema.fields.get_mut(idx) {
            field.data_type = data_type;
        }
    }

    /// Keep only rows for which `predicate` returns `true`; returns the number removed.
    pub fn retain_rows<F>(&mut self, mut predicate: F) -> usize
    where
        F: FnMut(&[Value]) -> bool,
    {
        let before = self.rows.len();
        self.rows.retain(|row| predicate(row.as_slice()));
        before - self.rows.len()
    }

    /// Rearrange columns so that the column at `order[i]` becomes column `i`.
    ///
    /// # Panics
    ///
    /// Panics if `order` is not a permutation of the column indexes.
    pub fn reorder_columns(&mut self, order: &[usize]) {
        let mut seen = vec![false; self.column_count()];
        for &idx in order {
            assert!(
                seen.get(idx).is_some_and(|s| !s),
                "column order {order:?} is not a permutation of {} columns",
                self.column_count()
            );
            seen[idx] = true;
        }
        assert!(
            order.len() == self.column_count(),
            "column order {order:?} is not a permutation of {} columns",
            self.column_count()
        );

        self.schema.fields = order.iter().map(|&i| self.schema.fields[i].clone()).collect();
        for row in &mut self.rows {
            let mut taken: Vec<Option<Value>> = row.drain(..).map(Some).collect();
            *row = order
                .iter()
                .map(|&i| taken[i].take().unwrap_or(Value::Null))
                .collect();
        }
    }
}
