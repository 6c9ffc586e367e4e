use std::io::Write;

use csv_cleaner::CleanerError;
use csv_cleaner::config::Config;
use csv_cleaner::types::Value;

#[test]
fn loads_fixture_rules() {
    let config = Config::load("tests/fixtures/rules.yaml").unwrap();

    assert_eq!(config.read.header, Some(0));
    assert!(config.cleaning.strip_whitespace);
    assert_eq!(config.cleaning.fillna.get("age"), Some(&Value::Int64(0)));
    assert_eq!(
        config.cleaning.fillna.get("city"),
        Some(&Value::Utf8("unknown".to_string()))
    );
    assert!(!config.output.to_excel);
    assert_eq!(config.output.sheet_name, "Sheet1");
}

#[test]
fn comment_only_file_yields_defaults() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "# nothing configured yet").unwrap();

    assert_eq!(Config::load(file.path()).unwrap(), Config::default());
}

#[test]
fn wrongly_shaped_section_is_a_yaml_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "cleaning:\n  parse_dates: 12").unwrap();

    let err = Config::load(file.path()).unwrap_err();
    assert!(matches!(err, CleanerError::Yaml(_)));
}

#[test]
fn missing_config_file_is_an_io_error() {
    let err = Config::load("tests/fixtures/absent.yaml").unwrap_err();
    assert!(matches!(err, CleanerError::Io(_)));
}
