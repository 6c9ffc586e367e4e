use std::io::Write;

use csv_cleaner::config::ReadOptions;
use csv_cleaner::ingestion::csv::read_csv_from_path;
use csv_cleaner::ingestion::load_table;
use csv_cleaner::types::{DataType, Value};

fn text(s: &str) -> Value {
    Value::Utf8(s.to_string())
}

#[test]
fn load_table_infers_column_types() {
    let ds = load_table("tests/fixtures/people.csv", &ReadOptions::default()).unwrap();

    assert_eq!(
        ds.schema.field_names().collect::<Vec<_>>(),
        vec!["id", "name", "age", "city", "signup"]
    );
    let types: Vec<DataType> = ds.schema.fields.iter().map(|f| f.data_type).collect();
    assert_eq!(
        types,
        vec![
            DataType::Int64,
            DataType::Utf8,
            DataType::Int64,
            DataType::Utf8,
            DataType::Utf8
        ]
    );
    assert_eq!(ds.row_count(), 5);
    assert_eq!(
        ds.rows[0],
        vec![
            Value::Int64(1),
            text(" Ada "),
            Value::Int64(36),
            text("London"),
            text("2024-01-05"),
        ]
    );
    assert!(ds.rows[3].iter().all(Value::is_null));
}

#[test]
fn header_index_skips_preamble_rows() {
    let options = ReadOptions {
        header: Some(1),
        ..ReadOptions::default()
    };
    let ds = load_table("tests/fixtures/preamble.csv", &options).unwrap();

    assert_eq!(ds.schema.field_names().collect::<Vec<_>>(), vec!["sku", "qty", "price"]);
    assert_eq!(ds.column_values("qty").unwrap(), vec![Value::Int64(3), Value::Null]);
    assert_eq!(
        ds.column_values("price").unwrap(),
        vec![Value::Float64(9.5), Value::Float64(12.0)]
    );
}

#[test]
fn header_none_treats_every_row_as_data() {
    let options = ReadOptions {
        header: None,
        ..ReadOptions::default()
    };
    let ds = load_table("tests/fixtures/people.csv", &options).unwrap();

    assert_eq!(
        ds.schema.field_names().collect::<Vec<_>>(),
        vec!["0", "1", "2", "3", "4"]
    );
    assert_eq!(ds.row_count(), 6);
    assert_eq!(ds.rows[0][0], text("id"));
}

#[test]
fn reads_shift_jis_input() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    // "都市\n東京\n" in Shift_JIS.
    file.write_all(&[0x93, 0x73, 0x8E, 0x73, b'\n', 0x93, 0x8C, 0x8B, 0x9E, b'\n'])
        .unwrap();

    let ds = read_csv_from_path(file.path(), "cp932", Some(0)).unwrap();
    assert_eq!(ds.schema.field_names().collect::<Vec<_>>(), vec!["都市"]);
    assert_eq!(ds.rows[0], vec![text("東京")]);
}

#[test]
fn wrong_encoding_is_an_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(&[b'a', b'\n', 0x93, 0x8C, b'\n']).unwrap();

    let err = read_csv_from_path(file.path(), "utf-8", Some(0)).unwrap_err();
    assert!(err.to_string().contains("cannot decode input as 'utf-8'"));
}

#[test]
fn duplicate_and_blank_headers_are_renamed() {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    file.write_all(b"a,,a\n1,2,3\n").unwrap();

    let ds = load_table(file.path(), &ReadOptions::default()).unwrap();
    assert_eq!(
        ds.schema.field_names().collect::<Vec<_>>(),
        vec!["a", "Unnamed: 1", "a.1"]
    );
}

#[test]
fn missing_file_is_an_io_error() {
    let err = load_table("tests/fixtures/nope.csv", &ReadOptions::default()).unwrap_err();
    assert!(matches!(err, csv_cleaner::CleanerError::Io(_)));
}
