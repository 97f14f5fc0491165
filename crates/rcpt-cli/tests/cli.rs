use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const SUPERMARKET: &str =
    "SUPERMARKET XYZ\nCalle Mayor 5, 28001\n01/03/2024\nBread 2x1,50 3,00€\nTOTAL: 3,00€\n";

/// Command with its config directory pointed into `home`.
fn rcpt(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("rcpt").unwrap();
    cmd.env("XDG_CONFIG_HOME", home).env_remove("RUST_LOG");
    cmd
}

#[test]
fn process_writes_json_record() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("receipt.txt");
    fs::write(&input, SUPERMARKET).unwrap();

    rcpt(dir.path())
        .arg("process")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"merchant_name\": \"SUPERMARKET XYZ\""))
        .stdout(predicate::str::contains("\"date\": \"01/03/2024\""))
        .stdout(predicate::str::contains("\"total_amount\": \"3.00\""));
}

#[test]
fn process_reads_stdin_and_uses_reference_date() {
    let dir = TempDir::new().unwrap();

    rcpt(dir.path())
        .args(["process", "-", "--reference-date", "15/01/2024"])
        .write_stdin("BAR TOMAS\nCafe solo 2x1,10 2,20€\nTOTAL 2,20€\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"date\": \"15/01/2024\""))
        .stdout(predicate::str::contains("Cafe solo"));
}

#[test]
fn process_rejects_bad_reference_date() {
    let dir = TempDir::new().unwrap();

    rcpt(dir.path())
        .args(["process", "-", "--reference-date", "2024-01-15"])
        .write_stdin(SUPERMARKET)
        .assert()
        .failure()
        .stderr(predicate::str::contains("2024-01-15"));
}

#[test]
fn process_accepts_non_utf8_input() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("latin1.txt");
    fs::write(&input, b"PANADERIA PE\xD1A\n02/02/2024\nTOTAL 3,00\n").unwrap();

    rcpt(dir.path())
        .arg("process")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"date\": \"02/02/2024\""))
        .stdout(predicate::str::contains("\"total_amount\": \"3.00\""));
}

#[test]
fn batch_accepts_non_utf8_input() {
    let dir = TempDir::new().unwrap();
    let outputs = dir.path().join("out");
    fs::write(dir.path().join("a.txt"), b"CAFE MU\xD1OZ\nTOTAL 2,50\n").unwrap();

    let pattern = format!("{}/*.txt", dir.path().display());

    rcpt(dir.path())
        .args(["batch", &pattern, "--summary"])
        .arg("--output-dir")
        .arg(&outputs)
        .assert()
        .success();

    let summary = fs::read_to_string(outputs.join("summary.csv")).unwrap();
    assert!(summary.lines().nth(1).unwrap().contains(",success,"));
}

#[test]
fn config_set_rejects_time_fallback_format() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("rcpt.json");
    let config = config.to_str().unwrap();

    rcpt(dir.path())
        .args(["--config", config, "config", "set", "parser.date_fallback_format"])
        .arg("%d/%m/%Y %H:%M")
        .assert()
        .failure()
        .stderr(predicate::str::contains("date_fallback_format"));
}

#[test]
fn process_missing_file_fails() {
    let dir = TempDir::new().unwrap();

    rcpt(dir.path())
        .args(["process", "does-not-exist.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn process_expense_format_has_one_row_per_item() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("receipt.txt");
    fs::write(
        &input,
        "BAR TOMAS\n02/02/2024\nCafe solo 2x1,10 2,20€\nTostada 1x2,50 2,50€\nTOTAL 4,70€\n",
    )
    .unwrap();

    let output = rcpt(dir.path())
        .arg("process")
        .arg(&input)
        .args(["--format", "expense"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().filter(|l| !l.is_empty()).collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("date,merchant,address,description,amount"));
    assert!(lines[1].contains("Cafe solo"));
    assert!(lines[1].contains("8464 - Meals & Entertainment"));
    assert!(lines[2].contains("Tostada"));
}

#[test]
fn process_writes_output_file() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("receipt.txt");
    let output = dir.path().join("receipt.csv");
    fs::write(&input, SUPERMARKET).unwrap();

    rcpt(dir.path())
        .arg("process")
        .arg(&input)
        .args(["--format", "csv", "--output"])
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Output written to"));

    let written = fs::read_to_string(&output).unwrap();
    assert!(written.starts_with("merchant_name,address,date"));
    assert!(written.contains("SUPERMARKET XYZ"));
}

#[test]
fn batch_writes_outputs_and_summary() {
    let dir = TempDir::new().unwrap();
    let inputs = dir.path().join("in");
    let outputs = dir.path().join("out");
    fs::create_dir_all(&inputs).unwrap();
    fs::write(inputs.join("a.txt"), SUPERMARKET).unwrap();
    fs::write(inputs.join("b.txt"), "FERRETERIA LUIS\nTornillos 3,20€\nTOTAL 3,20€\n").unwrap();
    fs::write(inputs.join("notes.md"), "ignored").unwrap();

    let pattern = format!("{}/*", inputs.display());

    rcpt(dir.path())
        .args(["batch", &pattern, "--summary", "--reference-date", "15/01/2024"])
        .arg("--output-dir")
        .arg(&outputs)
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 2 files"));

    assert!(outputs.join("a.json").exists());
    assert!(outputs.join("b.json").exists());

    let summary = fs::read_to_string(outputs.join("summary.csv")).unwrap();
    let rows: Vec<&str> = summary.lines().collect();
    assert_eq!(rows.len(), 3);
    assert!(rows[1].starts_with("a.txt,success,SUPERMARKET XYZ,01/03/2024,3.00"));
    assert!(rows[2].starts_with("b.txt,success,FERRETERIA LUIS,15/01/2024,3.20"));
}

#[test]
fn batch_without_matches_fails() {
    let dir = TempDir::new().unwrap();
    let pattern = format!("{}/*.txt", dir.path().display());

    rcpt(dir.path())
        .args(["batch", &pattern])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No matching files"));
}

#[test]
fn config_init_set_get() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("rcpt.json");
    let config = config.to_str().unwrap();

    rcpt(dir.path())
        .args(["--config", config, "config", "init"])
        .assert()
        .success();

    rcpt(dir.path())
        .args(["--config", config, "config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    rcpt(dir.path())
        .args(["--config", config, "config", "set", "parser.default_currency", "USD"])
        .assert()
        .success();

    rcpt(dir.path())
        .args(["--config", config, "config", "get", "parser.default_currency"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"USD\""));

    rcpt(dir.path())
        .args(["--config", config, "config", "set", "parser.no_such_key", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn config_rejects_mistyped_value() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("rcpt.json");
    let config = config.to_str().unwrap();

    rcpt(dir.path())
        .args(["--config", config, "config", "set", "export.max_rows", "many"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid value"));
}

#[test]
fn configured_currency_reaches_output() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("rcpt.json");
    let input = dir.path().join("receipt.txt");
    fs::write(&input, SUPERMARKET).unwrap();

    rcpt(dir.path())
        .arg("--config")
        .arg(&config)
        .args(["config", "set", "parser.default_currency", "GBP"])
        .assert()
        .success();

    rcpt(dir.path())
        .arg("--config")
        .arg(&config)
        .arg("process")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"currency\": \"GBP\""));
}
