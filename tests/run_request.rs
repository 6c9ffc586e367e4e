use csv_cleaner::CleanerError;
use csv_cleaner::run::CleanRequest;

#[test]
fn run_writes_cleaned_csv_and_report() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("clean.csv");
    let report_path = dir.path().join("report.json");

    let report = CleanRequest::new(
        "tests/fixtures/people.csv",
        &output,
        "tests/fixtures/rules.yaml",
    )
    .with_report(&report_path)
    .run()
    .unwrap();

    assert_eq!(report.summary_line(), "rows: 5 -> 4 | dup_dropped=1");
    assert_eq!(
        std::fs::read_to_string(&output).unwrap(),
        "name,id,age,city,signup\n\
         Ada,1,36,London,2024/01/05\n\
         Grace,2,0,New York,2024/02/10\n\
         ,,0,unknown,\n\
         Linus,3,54,Helsinki,\n"
    );

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&report_path).unwrap()).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "rows_in": 5,
            "rows_out": 4,
            "filled": {"age": 3, "city": 1},
            "dropped_duplicates": 1
        })
    );
}

#[test]
fn run_without_report_writes_only_the_table() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("out.csv");

    CleanRequest::new(
        "tests/fixtures/preamble.csv",
        &output,
        "tests/fixtures/empty_rules.yaml",
    )
    .run()
    .unwrap();

    // header: 0 makes the preamble line the header row.
    assert_eq!(
        std::fs::read_to_string(&output).unwrap(),
        "generated by export job,Unnamed: 1,Unnamed: 2\nsku,qty,price\nA-1,3,9.5\nB-2,,12\n"
    );
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn missing_input_fails_before_writing() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("out.csv");

    let err = CleanRequest::new("tests/fixtures/nope.csv", &output, "tests/fixtures/rules.yaml")
        .run()
        .unwrap_err();

    assert!(matches!(err, CleanerError::MissingInput { kind: "input", .. }));
    assert!(err.to_string().starts_with("input file does not exist"));
    assert!(!output.exists());
}

#[test]
fn missing_config_fails_before_writing() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("out.csv");

    let err = CleanRequest::new("tests/fixtures/people.csv", &output, dir.path().join("r.yaml"))
        .run()
        .unwrap_err();

    assert!(matches!(err, CleanerError::MissingInput { kind: "config", .. }));
    assert!(!output.exists());
}

#[test]
fn invalid_config_fails_before_writing() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("out.csv");
    let config = dir.path().join("rules.yaml");
    std::fs::write(&config, "read:\n  encoding: \"\"\n").unwrap();

    let err = CleanRequest::new("tests/fixtures/people.csv", &output, &config)
        .run()
        .unwrap_err();

    assert!(matches!(err, CleanerError::Config { .. }));
    assert!(!output.exists());
}
