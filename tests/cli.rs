use std::process::Command;

fn cleaner() -> Command {
    Command::new(env!("CARGO_BIN_EXE_csv-cleaner"))
}

#[test]
fn prints_summary_on_success() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("clean.csv");
    let report = dir.path().join("report.json");

    let out = cleaner()
        .args(["--input", "tests/fixtures/people.csv", "--config", "tests/fixtures/rules.yaml"])
        .arg("--output")
        .arg(&output)
        .arg("--report")
        .arg(&report)
        .env_remove("RUST_LOG")
        .output()
        .unwrap();

    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(
        String::from_utf8_lossy(&out.stdout),
        "Done. rows: 5 -> 4 | dup_dropped=1\n"
    );
    assert!(output.exists());
    assert!(report.exists());
}

#[test]
fn missing_input_exits_nonzero_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("clean.csv");

    let out = cleaner()
        .args(["--input", "tests/fixtures/nope.csv", "--config", "tests/fixtures/rules.yaml"])
        .arg("--output")
        .arg(&output)
        .output()
        .unwrap();

    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("file does not exist"));
    assert!(out.stdout.is_empty());
    assert!(!output.exists());
}

#[test]
fn runtime_errors_exit_with_code_one() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("rules.yaml");
    std::fs::write(&config, "read:\n  encoding: klingon\n").unwrap();

    let out = cleaner()
        .args(["--input", "tests/fixtures/people.csv", "--output"])
        .arg(dir.path().join("clean.csv"))
        .arg("--config")
        .arg(&config)
        .output()
        .unwrap();

    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("error: failed to clean"), "stderr: {stderr}");
    assert!(stderr.contains("unknown encoding 'klingon'"), "stderr: {stderr}");
}

#[test]
fn json_logs_go_to_stderr() {
    let dir = tempfile::tempdir().unwrap();

    let out = cleaner()
        .args([
            "--input",
            "tests/fixtures/people.csv",
            "--config",
            "tests/fixtures/rules.yaml",
            "--log-format",
            "json",
            "-v",
        ])
        .arg("--output")
        .arg(dir.path().join("clean.csv"))
        .output()
        .unwrap();

    assert!(out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.lines().any(|l| l.contains("\"loaded table\"")), "stderr: {stderr}");
    assert!(String::from_utf8_lossy(&out.stdout).starts_with("Done. "));
}
