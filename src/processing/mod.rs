//! The cleaning pipeline.
//!
//! [`apply_cleaning`] runs the rule set against a [`DataSet`] in a fixed order; each step sees
//! the output of the previous one:
//!
//! 1. [`strip::strip_whitespace`] on text-like columns
//! 2. [`dates::parse_dates`] on `parse_dates` columns
//! 3. [`coerce::coerce_types`] for each `dtype` entry
//! 4. [`fill::fill_nulls`] for each `fillna` entry
//! 5. [`drop::drop_all_null_rows`]
//! 6. [`drop::drop_duplicate_rows`]
//! 7. [`dates::format_dates`] when `date_format` is set
//! 8. [`reorder::reorder_columns`] when `columns_order` is set
//!
//! The pipeline never fails on cell data: bad dates and invalid numeric text become nulls, and
//! a column whose type coercion fails is left as it was.
//!
//! ## Example
//!
//! ```rust
//! use csv_cleaner::config::CleaningRules;
//! use csv_cleaner::processing::apply_cleaning;
//! use csv_cleaner::types::{DataSet, DataType, Value};
//!
//! let ds = DataSet::from_columns(vec![(
//!     "age",
//!     DataType::Utf8,
//!     vec![Value::Utf8(" 5 ".to_string()), Value::Utf8("3".to_string()), Value::Null],
//! )]);
//!
//! let mut rules = CleaningRules::default();
//! rules.strip_whitespace = true;
//! rules.dtype.insert("age".to_string(), "int64".to_string());
//! rules.fillna.insert("age".to_string(), Value::Int64(0));
//!
//! let (cleaned, report) = apply_cleaning(ds, &rules);
//! assert_eq!(
//!     cleaned.column_values("age").unwrap(),
//!     vec![Value::Int64(5), Value::Int64(3), Value::Int64(0)]
//! );
//! assert_eq!(report.filled.get("age"), Some(&1));
//! ```

pub mod coerce;
pub mod dates;
pub mod drop;
pub mod fill;
pub mod reorder;
pub mod strip;

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug, info};

use crate::config::CleaningRules;
use crate::types::DataSet;

/// Summary counters describing what [`apply_cleaning`] changed.
///
/// `filled` counts nulls replaced at the fill step, before any rows are dropped, so it can
/// exceed the filled cells that survive into the output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangeReport {
    /// Rows in the input table.
    pub rows_in: usize,
    /// Rows in the output table; `None` until every step has run.
    pub rows_out: Option<usize>,
    /// Nulls replaced per `fillna` column.
    pub filled: BTreeMap<String, usize>,
    /// Rows removed as duplicates.
    pub dropped_duplicates: usize,
}

impl ChangeReport {
    /// Fresh report for an input of `rows_in` rows.
    pub fn new(rows_in: usize) -> Self {
        Self {
            rows_in,
            rows_out: None,
            filled: BTreeMap::new(),
            dropped_duplicates: 0,
        }
    }

    /// One-line human-readable summary: `rows: <in> -> <out> | dup_dropped=<n>`.
    pub fn summary_line(&self) -> String {
        let rows_out = self
            .rows_out
            .map_or_else(|| "None".to_string(), |n| n.to_string());
        format!(
            "rows: {} -> {} | dup_dropped={}",
            self.rows_in, rows_out, self.dropped_duplicates
        )
    }
}

/// Apply `rules` to `dataset`, returning the cleaned table and a [`ChangeReport`].
pub fn apply_cleaning(mut dataset: DataSet, rules: &CleaningRules) -> (DataSet, ChangeReport) {
    let mut report = ChangeReport::new(dataset.row_count());

    if rules.strip_whitespace {
        strip::strip_whitespace(&mut dataset);
    }

    dates::parse_dates(&mut dataset, &rules.parse_dates);
    coerce::coerce_types(&mut dataset, &rules.dtype);
    fill::fill_nulls(&mut dataset, &rules.fillna, &mut report.filled);

    if rules.drop_na_rows_if_all_na {
        let removed = drop::drop_all_null_rows(&mut dataset);
        debug!(removed, "dropped all-null rows");
    }

    if rules.drop_duplicates {
        report.dropped_duplicates = drop::drop_duplicate_rows(&mut dataset);
        debug!(removed = report.dropped_duplicates, "dropped duplicate rows");
    }

    if let Some(format) = rules.date_format.as_deref().filter(|f| !f.is_empty()) {
        dates::format_dates(&mut dataset, &rules.parse_dates, format);
    }

    if let Some(order) = rules.columns_order.as_deref() {
        reorder::reorder_columns(&mut dataset, order);
    }

    report.rows_out = Some(dataset.row_count());
    info!(
        rows_in = report.rows_in,
        rows_out = dataset.row_count(),
        dropped_duplicates = report.dropped_duplicates,
        "cleaning finished"
    );
    (dataset, report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_line_format() {
        let mut report = ChangeReport::new(3);
        report.rows_out = Some(2);
        report.dropped_duplicates = 1;
        assert_eq!(report.summary_line(), "rows: 3 -> 2 | dup_dropped=1");
    }

    #[test]
    fn report_serializes_in_declared_field_order() {
        let mut report = ChangeReport::new(2);
        report.filled.insert("age".to_string(), 1);
        let json = serde_json::to_string(&report).unwrap();
        assert_eq!(
            json,
            r#"{"rows_in":2,"rows_out":null,"filled":{"age":1},"dropped_duplicates":0}"#
        );
    }
}
