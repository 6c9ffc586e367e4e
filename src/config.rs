//! YAML rule documents.
//!
//! A config document has three optional top-level sections:
//!
//! ```yaml
//! read:
//!   encoding: utf-8      # any encoding_rs label, plus Python aliases like cp932 / utf-8-sig
//!   header: 0            # header row index; `null` means the input has no header row
//!   sheet_name: Sheet1   # spreadsheet inputs only; defaults to the first sheet
//! cleaning:
//!   strip_whitespace: true
//!   parse_dates: [signup]
//!   dtype: {age: int64}
//!   fillna: {age: 0}
//!   drop_na_rows_if_all_na: true
//!   drop_duplicates: true
//!   date_format: "%Y/%m/%d"
//!   columns_order: [id, name]
//! output:
//!   to_excel: false
//!   sheet_name: Sheet1
//! ```
//!
//! Unknown keys are ignored. A missing or `null` section (or key) takes its default.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Deserializer};

use crate::error::{CleanerError, CleanerResult};
use crate::types::Value;

/// Complete run configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    #[serde(deserialize_with = "null_as_default")]
    pub read: ReadOptions,
    #[serde(deserialize_with = "null_as_default")]
    pub cleaning: CleaningRules,
    #[serde(deserialize_with = "null_as_default")]
    pub output: OutputOptions,
}

/// How the input file is read.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ReadOptions {
    /// Text encoding of CSV inputs.
    pub encoding: String,
    /// Index of the header row. `None` means every row is data and columns are numbered.
    pub header: Option<usize>,
    /// Worksheet to read from spreadsheet inputs (first sheet when unset).
    pub sheet_name: Option<String>,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            encoding: "utf-8".to_string(),
            header: Some(0),
            sheet_name: None,
        }
    }
}

/// The cleaning rule set applied by [`crate::processing::apply_cleaning`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CleaningRules {
    #[serde(deserialize_with = "null_as_default")]
    pub strip_whitespace: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub parse_dates: Vec<String>,
    /// Column -> target type name (`int64`, `float`, `str`, `datetime64[ns]`, ...).
    #[serde(deserialize_with = "null_as_default")]
    pub dtype: BTreeMap<String, String>,
    /// Column -> scalar used to replace nulls.
    #[serde(deserialize_with = "fill_values")]
    pub fillna: BTreeMap<String, Value>,
    #[serde(deserialize_with = "null_as_default")]
    pub drop_na_rows_if_all_na: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub drop_duplicates: bool,
    /// strftime-style format applied to `parse_dates` columns at the end of the run.
    pub date_format: Option<String>,
    pub columns_order: Option<Vec<String>>,
}

/// How the cleaned table is written.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct OutputOptions {
    /// Force spreadsheet output regardless of the output extension.
    pub to_excel: bool,
    /// Worksheet name used for spreadsheet output.
    pub sheet_name: String,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            to_excel: false,
            sheet_name: "Sheet1".to_string(),
        }
    }
}

impl Config {
    /// Load and validate a config file.
    pub fn load(path: impl AsRef<Path>) -> CleanerResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml_str(&content)
    }

    /// Parse and validate a config document.
    ///
    /// An empty document yields [`Config::default`].
    pub fn from_yaml_str(content: &str) -> CleanerResult<Self> {
        let raw: serde_yaml::Value = if content.trim().is_empty() {
            serde_yaml::Value::Null
        } else {
            serde_yaml::from_str(content)?
        };
        let config: Self = if raw.is_null() {
            Self::default()
        } else {
            serde_yaml::from_value(raw)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject values that parse but cannot be used.
    pub fn validate(&self) -> CleanerResult<()> {
        if self.read.encoding.trim().is_empty() {
            return Err(CleanerError::Config {
                message: "read.encoding must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FillScalar {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl From<FillScalar> for Value {
    fn from(scalar: FillScalar) -> Self {
        match scalar {
            FillScalar::Bool(b) => Value::Bool(b),
            FillScalar::Int(i) => Value::Int64(i),
            FillScalar::Float(f) => Value::Float64(f),
            FillScalar::Text(s) => Value::Utf8(s),
        }
    }
}

fn fill_values<'de, D>(deserializer: D) -> Result<BTreeMap<String, Value>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<BTreeMap<String, Option<FillScalar>>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(|(column, scalar)| (column, scalar.map_or(Value::Null, Value::from)))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let cfg = Config::from_yaml_str("").unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.read.encoding, "utf-8");
        assert_eq!(cfg.read.header, Some(0));
        assert_eq!(cfg.output.sheet_name, "Sheet1");
    }

    #[test]
    fn null_sections_yield_defaults() {
        let cfg = Config::from_yaml_str("read:\ncleaning:\noutput:\n").unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn parses_full_cleaning_section() {
        let yaml = r#"
cleaning:
  strip_whitespace: true
  parse_dates: [signup]
  dtype:
    age: int64
    score: float
  fillna:
    age: 0
    score: 1.5
    name: unknown
    active: false
  drop_na_rows_if_all_na: true
  drop_duplicates: true
  date_format: "%Y/%m/%d"
  columns_order: [id, name]
"#;
        let rules = Config::from_yaml_str(yaml).unwrap().cleaning;
        assert!(rules.strip_whitespace);
        assert_eq!(rules.parse_dates, vec!["signup".to_string()]);
        assert_eq!(rules.dtype.get("age").map(String::as_str), Some("int64"));
        assert_eq!(rules.fillna.get("age"), Some(&Value::Int64(0)));
        assert_eq!(rules.fillna.get("score"), Some(&Value::Float64(1.5)));
        assert_eq!(rules.fillna.get("name"), Some(&Value::Utf8("unknown".to_string())));
        assert_eq!(rules.fillna.get("active"), Some(&Value::Bool(false)));
        assert!(rules.drop_na_rows_if_all_na);
        assert!(rules.drop_duplicates);
        assert_eq!(rules.date_format.as_deref(), Some("%Y/%m/%d"));
        assert_eq!(
            rules.columns_order,
            Some(vec!["id".to_string(), "name".to_string()])
        );
    }

    #[test]
    fn explicit_null_header_means_no_header_row() {
        let cfg = Config::from_yaml_str("read:\n  header: null\n  encoding: cp932\n").unwrap();
        assert_eq!(cfg.read.header, None);
        assert_eq!(cfg.read.encoding, "cp932");
    }

    #[test]
    fn null_fill_value_is_kept_as_null() {
        let cfg = Config::from_yaml_str("cleaning:\n  fillna:\n    age: ~\n").unwrap();
        assert_eq!(cfg.cleaning.fillna.get("age"), Some(&Value::Null));
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let cfg = Config::from_yaml_str("extra: 1\ncleaning:\n  bogus: true\n").unwrap();
        assert_eq!(cfg.cleaning, CleaningRules::default());
    }

    #[test]
    fn malformed_yaml_is_an_error() {
        let err = Config::from_yaml_str("cleaning: [unclosed").unwrap_err();
        assert!(matches!(err, CleanerError::Yaml(_)));
    }

    #[test]
    fn unknown_date_format_specifiers_are_accepted() {
        let cfg = Config::from_yaml_str("cleaning:\n  date_format: \"%Y-%Q\"\n").unwrap();
        assert_eq!(cfg.cleaning.date_format.as_deref(), Some("%Y-%Q"));
    }

    #[test]
    fn empty_encoding_is_rejected() {
        let err = Config::from_yaml_str("read:\n  encoding: \"\"\n").unwrap_err();
        assert!(matches!(err, CleanerError::Config { .. }));
    }
}
