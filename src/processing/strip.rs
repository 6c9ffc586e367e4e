//! Whitespace stripping for text-like columns.

use crate::types::{DataSet, DataType, Value};

/// Replace every non-null cell of each text-like column with its trimmed string form.
///
/// Non-text columns are untouched; stripped columns become [`DataType::Utf8`].
pub fn strip_whitespace(dataset: &mut DataSet) {
    for idx in 0..dataset.column_count() {
        if !dataset.schema.fields[idx].data_type.is_text_like() {
            continue;
        }
        let values = dataset
            .column(idx)
            .map(|cell| match cell.to_text() {
                Some(s) => Value::Utf8(s.trim().to_string()),
                None => Value::Null,
            })
            .collect();
        dataset.replace_column(idx, DataType::Utf8, values);
    }
}
