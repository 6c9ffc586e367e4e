//! Date parsing and date re-formatting steps.

use std::fmt::Write as _;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use tracing::{debug, warn};

use crate::types::{DataSet, DataType, Value};

const NANOS_PER_SECOND: i64 = 1_000_000_000;

const DATETIME_LAYOUTS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S%.f",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S%.f",
    "%m/%d/%Y %H:%M",
    "%d.%m.%Y %H:%M:%S%.f",
    "%d.%m.%Y %H:%M",
];

const OFFSET_LAYOUTS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f%:z", "%Y-%m-%d %H:%M:%S%.f%z"];

const DATE_LAYOUTS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d.%m.%Y", "%Y%m%d"];

/// Parse every cell of each named column as a date/time; cells that fail become null.
///
/// Columns that do not exist are skipped.
pub fn parse_dates(dataset: &mut DataSet, columns: &[String]) {
    for name in columns {
        let Some(idx) = dataset.schema.index_of(name) else {
            debug!(column = %name, "parse_dates: column not found, skipping");
            continue;
        };
        let (values, nulled) = reparse_column(dataset, idx);
        debug!(column = %name, nulled, "parsed column as datetime");
        dataset.replace_column(idx, DataType::DateTime, values);
    }
}

/// Re-parse each named column as date/time and render it as text with `format`.
///
/// Nulls (including cells that fail to parse) stay null. Specifiers chrono does not know are
/// copied to the output as literal text, so `%Y-%Q` renders as `2024-%Q`.
pub fn format_dates(dataset: &mut DataSet, columns: &[String], format: &str) {
    let format = escape_unknown_specifiers(format);
    let items: Vec<Item<'_>> = StrftimeItems::new(&format).collect();

    for name in columns {
        let Some(idx) = dataset.schema.index_of(name) else {
            debug!(column = %name, "date_format: column not found, skipping");
            continue;
        };
        let values = dataset
            .column(idx)
            .map(|cell| match to_datetime(cell) {
                Some(dt) => render(&dt, &items),
                None => Value::Null,
            })
            .collect();
        dataset.replace_column(idx, DataType::Utf8, values);
    }
}

/// Rewrite `format` so that every `%` sequence chrono rejects becomes literal text.
fn escape_unknown_specifiers(format: &str) -> String {
    let mut out = String::with_capacity(format.len() + 2);
    let mut rest = format;
    while let Some(pos) = rest.find('%') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        match known_specifier_len(tail) {
            Some(len) => {
                out.push_str(&tail[..len]);
                rest = &tail[len..];
            }
            None => {
                warn!(format, "date_format contains an unknown specifier; copying it as text");
                out.push_str("%%");
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Byte length of the shortest specifier chrono accepts at the start of `tail` (which begins
/// with `%`). Specifiers are at most five characters long (`%::z`, `%.3f`, `%-d`, ...).
fn known_specifier_len(tail: &str) -> Option<usize> {
    tail.char_indices()
        .skip(1)
        .take(4)
        .map(|(i, c)| i + c.len_utf8())
        .find(|&end| {
            StrftimeItems::new(&tail[..end]).all(|item| !matches!(item, Item::Error))
        })
}

/// Best-effort conversion of a single cell to a datetime.
///
/// - text is tried against the common ISO / slash / dotted layouts
/// - integers and floats are nanoseconds since the Unix epoch
/// - booleans and unparseable text yield `None`
pub fn to_datetime(value: &Value) -> Option<NaiveDateTime> {
    match value {
        Value::DateTime(dt) => Some(*dt),
        Value::Utf8(s) => parse_datetime_text(s),
        Value::Int64(n) => from_epoch_nanos(*n),
        Value::Float64(f) => {
            if f.is_finite() && f.abs() < i64::MAX as f64 {
                from_epoch_nanos(*f as i64)
            } else {
                None
            }
        }
        Value::Null | Value::Bool(_) => None,
    }
}

/// Parse text into a datetime, normalizing explicit offsets to UTC.
pub fn parse_datetime_text(raw: &str) -> Option<NaiveDateTime> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }
    for layout in OFFSET_LAYOUTS {
        if let Ok(dt) = DateTime::parse_from_str(s, layout) {
            return Some(dt.naive_utc());
        }
    }
    for layout in DATETIME_LAYOUTS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, layout) {
            return Some(dt);
        }
    }
    DATE_LAYOUTS
        .iter()
        .find_map(|layout| NaiveDate::parse_from_str(s, layout).ok())
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Datetime at `nanos` nanoseconds after the Unix epoch.
pub fn from_epoch_nanos(nanos: i64) -> Option<NaiveDateTime> {
    let secs = nanos.div_euclid(NANOS_PER_SECOND);
    let subsec = u32::try_from(nanos.rem_euclid(NANOS_PER_SECOND)).ok()?;
    DateTime::from_timestamp(secs, subsec).map(|dt| dt.naive_utc())
}

/// Nanoseconds since the Unix epoch, if representable.
pub fn to_epoch_nanos(dt: &NaiveDateTime) -> Option<i64> {
    dt.and_utc().timestamp_nanos_opt()
}

fn reparse_column(dataset: &DataSet, idx: usize) -> (Vec<Value>, usize) {
    let mut nulled = 0;
    let values = dataset
        .column(idx)
        .map(|cell| match to_datetime(cell) {
            Some(dt) => Value::DateTime(dt),
            None => {
                if !cell.is_null() {
                    nulled += 1;
                }
                Value::Null
            }
        })
        .collect();
    (values, nulled)
}

fn render(dt: &NaiveDateTime, items: &[Item<'_>]) -> Value {
    let mut out = String::new();
    // Some valid specifiers (e.g. `%z`) cannot be rendered for a naive datetime.
    match write!(out, "{}", dt.format_with_items(items.iter())) {
        Ok(()) => Value::Utf8(out),
        Err(_) => Value::Null,
    }
}
