use assert_cmd::Command;
use predicates::prelude::*;

const NOW: &str = "2026-02-18T14:30:00Z";

fn timespan() -> Command {
    Command::cargo_bin("timespan").unwrap()
}

fn run_json(args: &[&str]) -> serde_json::Value {
    let output = timespan().args(args).output().unwrap();
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_interval_year() {
    let json = run_json(&["--interval", "2014"]);
    assert_eq!(json["start"], "2014-01-01T00:00:00Z");
    assert_eq!(json["end"], "2014-12-31T23:59:59Z");
}

#[test]
fn test_start_end_flags() {
    let json = run_json(&["--start", "201405", "--end", "20140526"]);
    assert_eq!(json["start"], "2014-05-01T00:00:00Z");
    assert_eq!(json["end"], "2014-05-26T23:59:59Z");
}

#[test]
fn test_negative_offset_with_now() {
    let json = run_json(&["--interval", "-1w", "--now", NOW]);
    assert_eq!(json["start"], "2026-02-11T14:30:00Z");
    assert_eq!(json["end"], "2026-02-18T14:30:00Z");
}

#[test]
fn test_query_string() {
    let json = run_json(&["--query", "start=2013&end=2014"]);
    assert_eq!(json["start"], "2013-01-01T00:00:00Z");
    assert_eq!(json["end"], "2014-12-31T23:59:59Z");
}

#[test]
fn test_flag_overrides_query() {
    let json = run_json(&["--query", "interval=2013", "--interval", "2014"]);
    assert_eq!(json["start"], "2014-01-01T00:00:00Z");
}

#[test]
fn test_pretty_output() {
    timespan()
        .args(["--interval", "20140526", "--pretty"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\n  \"start\": \"2014-05-26T00:00:00Z\""));
}

#[test]
fn test_invalid_interval_fails() {
    timespan()
        .args(["--interval", "20145"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid format"));
}

#[test]
fn test_missing_parameters_fails() {
    timespan()
        .args(["--start", "2013"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing parameters"));
}

#[test]
fn test_invalid_now_rejected() {
    timespan()
        .args(["--interval", "-1h", "--now", "yesterday"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("RFC 3339"));
}

#[test]
fn test_empty_flag_does_not_hide_query() {
    let json = run_json(&["--interval", "", "--query", "interval=2014"]);
    assert_eq!(json["start"], "2014-01-01T00:00:00Z");
    assert_eq!(json["end"], "2014-12-31T23:59:59Z");
}

#[test]
fn test_contains_reports_membership() {
    let json = run_json(&["--interval", "201405", "--contains", "2014-05-31T23:59:59Z"]);
    assert_eq!(json["contains"], true);

    let json = run_json(&["--interval", "201405", "--contains", "2014-06-01T00:00:00Z"]);
    assert_eq!(json["contains"], false);
}

#[test]
fn test_contains_absent_by_default() {
    let json = run_json(&["--interval", "2014"]);
    assert!(json.get("contains").is_none());
}
