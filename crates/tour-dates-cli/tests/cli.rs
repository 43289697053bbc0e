use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const DATASET: &str = r#"[
    {"country": "US", "city": "Chicago", "venue": "Metro", "date": "01-01-2023"},
    {"country": "US", "city": "Austin", "venue": "Mohawk", "date": "01-01-2099"},
    {"country": "FR", "city": "Paris", "venue": "Olympia", "date": "15-06-2024"},
    {"country": "DE", "city": "Berlin", "venue": "SO36", "date": "??-??-2030"}
]"#;

const NOW: &str = "2024-01-01T00:00:00Z";

fn write_dataset(dir: &TempDir, json: &str) -> PathBuf {
    let path = dir.path().join("tour.json");
    fs::write(&path, json).unwrap();
    path
}

fn tour() -> Command {
    let mut cmd = Command::cargo_bin("tour").unwrap();
    cmd.env_remove("TOUR_DATES_CONFIG").env_remove("RUST_LOG");
    cmd
}

fn list_json(dir: &TempDir, extra: &[&str]) -> serde_json::Value {
    let dataset = write_dataset(dir, DATASET);
    let output = tour()
        .args(["list", "--timezone", "UTC", "--now", NOW, "--format", "json", "--dataset"])
        .arg(&dataset)
        .args(extra)
        .output()
        .unwrap();
    assert!(output.status.success());
    serde_json::from_slice(&output.stdout).unwrap()
}

fn cities(rows: &serde_json::Value) -> Vec<String> {
    rows.as_array()
        .unwrap()
        .iter()
        .map(|r| r["city"].as_str().unwrap().to_string())
        .collect()
}

// ── list ────────────────────────────────────────────────────────────────────

#[test]
fn test_list_defaults_latest_first_without_history() {
    let dir = TempDir::new().unwrap();
    let view = list_json(&dir, &[]);
    assert_eq!(view["selected_country"], "ALL");
    assert_eq!(view["order"], "desc");
    assert_eq!(cities(&view["upcoming"]), vec!["Austin", "Berlin", "Paris"]);
    assert!(view["history"].is_null());
    assert_eq!(view["history_toggle"], "SHOW HISTORY");
}

#[test]
fn test_list_country_filter_with_history() {
    let dir = TempDir::new().unwrap();
    let view = list_json(&dir, &["--country", "US", "--history", "--order", "asc"]);
    assert_eq!(view["selected_country"], "US");
    assert_eq!(cities(&view["upcoming"]), vec!["Austin"]);
    assert_eq!(cities(&view["history"]), vec!["Chicago"]);
    assert_eq!(view["countries"], serde_json::json!(["ALL", "US", "FR", "DE"]));
}

#[test]
fn test_list_text_output() {
    let dir = TempDir::new().unwrap();
    let dataset = write_dataset(&dir, DATASET);
    tour()
        .args(["list", "--timezone", "UTC", "--now", NOW, "--dataset"])
        .arg(&dataset)
        .assert()
        .success()
        .stdout(predicate::str::contains("Current country selected: ALL"))
        .stdout(predicate::str::contains("Upcoming (3)"))
        .stdout(predicate::str::contains("Paris - Olympia"))
        .stdout(predicate::str::contains("??-??-2030"))
        .stdout(predicate::str::contains("[SHOW HISTORY]"))
        .stdout(predicate::str::contains("Chicago").not());
}

#[test]
fn test_list_invalid_date_is_listed_as_oldest_history() {
    let dir = TempDir::new().unwrap();
    let dataset = write_dataset(
        &dir,
        r#"[
            {"country": "US", "city": "Chicago", "venue": "Metro", "date": "01-01-2023"},
            {"country": "US", "city": "Nowhere", "venue": "Barn", "date": "TBA"}
        ]"#,
    );
    let output = tour()
        .args(["list", "--timezone", "UTC", "--now", NOW, "--history", "--format", "json"])
        .arg("--dataset")
        .arg(&dataset)
        .output()
        .unwrap();
    assert!(output.status.success());
    let view: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(cities(&view["history"]), vec!["Chicago", "Nowhere"]);
    assert!(String::from_utf8_lossy(&output.stderr).contains("unparseable date"));
}

#[test]
fn test_list_warns_only_about_selected_country() {
    let dir = TempDir::new().unwrap();
    let dataset = write_dataset(
        &dir,
        r#"[
            {"country": "FR", "city": "Paris", "venue": "Olympia", "date": "15-06-2024"},
            {"country": "US", "city": "Nowhere", "venue": "Barn", "date": "TBA"}
        ]"#,
    );
    tour()
        .args(["list", "--timezone", "UTC", "--now", NOW, "--country", "FR", "--dataset"])
        .arg(&dataset)
        .assert()
        .success()
        .stderr(predicate::str::contains("unparseable date").not());
}

#[test]
fn test_list_rejects_bad_order() {
    let dir = TempDir::new().unwrap();
    let dataset = write_dataset(&dir, DATASET);
    tour()
        .args(["list", "--order", "sideways", "--dataset"])
        .arg(&dataset)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid sort order"));
}

#[test]
fn test_list_rejects_bad_now() {
    let dir = TempDir::new().unwrap();
    let dataset = write_dataset(&dir, DATASET);
    tour()
        .args(["list", "--now", "yesterday", "--dataset"])
        .arg(&dataset)
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected RFC 3339"));
}

#[test]
fn test_list_without_dataset_fails() {
    tour()
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no dataset given"));
}

#[test]
fn test_list_uses_config_defaults() {
    let dir = TempDir::new().unwrap();
    write_dataset(&dir, DATASET);
    let config = dir.path().join("tour.toml");
    fs::write(
        &config,
        "[defaults]\ndataset = \"tour.json\"\ncountry = \"FR\"\nshow_history = true\ntimezone = \"UTC\"\n",
    )
    .unwrap();

    let output = tour()
        .args(["list", "--now", "2025-01-01T00:00:00Z", "--format", "json", "--config"])
        .arg(&config)
        .output()
        .unwrap();
    assert!(output.status.success());
    let view: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(view["selected_country"], "FR");
    assert!(view["upcoming"].as_array().unwrap().is_empty());
    assert_eq!(cities(&view["history"]), vec!["Paris"]);
}

#[test]
fn test_flags_override_config() {
    let dir = TempDir::new().unwrap();
    write_dataset(&dir, DATASET);
    let config = dir.path().join("tour.toml");
    fs::write(&config, "[defaults]\ndataset = \"tour.json\"\ncountry = \"FR\"\n").unwrap();

    let output = tour()
        .args(["list", "--timezone", "UTC", "--now", NOW, "--format", "json"])
        .args(["--country", "ALL"])
        .env("TOUR_DATES_CONFIG", &config)
        .output()
        .unwrap();
    assert!(output.status.success());
    let view: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(view["selected_country"], "ALL");
}

#[test]
fn test_no_history_flag_overrides_config() {
    let dir = TempDir::new().unwrap();
    write_dataset(&dir, DATASET);
    let config = dir.path().join("tour.toml");
    fs::write(&config, "[defaults]\ndataset = \"tour.json\"\nshow_history = true\n").unwrap();

    let run = |extra: &[&str]| -> serde_json::Value {
        let output = tour()
            .args(["list", "--timezone", "UTC", "--now", NOW, "--format", "json"])
            .args(extra)
            .env("TOUR_DATES_CONFIG", &config)
            .output()
            .unwrap();
        assert!(output.status.success());
        serde_json::from_slice(&output.stdout).unwrap()
    };

    assert_eq!(cities(&run(&[])["history"]), vec!["Chicago"]);

    let hidden = run(&["--no-history"]);
    assert!(hidden["history"].is_null());
    assert_eq!(hidden["history_toggle"], "SHOW HISTORY");

    // The last of the two flags wins.
    assert!(run(&["--history", "--no-history"])["history"].is_null());
    assert_eq!(cities(&run(&["--no-history", "--history"])["history"]), vec!["Chicago"]);
}

// ── countries ───────────────────────────────────────────────────────────────

#[test]
fn test_countries_text() {
    let dir = TempDir::new().unwrap();
    let dataset = write_dataset(&dir, DATASET);
    tour()
        .arg("countries")
        .arg("--dataset")
        .arg(&dataset)
        .assert()
        .success()
        .stdout("ALL (4)\nUS (2)\nFR (1)\nDE (1)\n");
}

#[test]
fn test_countries_json() {
    let dir = TempDir::new().unwrap();
    let dataset = write_dataset(&dir, DATASET);
    let output = tour()
        .args(["countries", "--format", "json", "--dataset"])
        .arg(&dataset)
        .output()
        .unwrap();
    let rows: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(rows[0]["country"], "US");
    assert_eq!(rows[0]["concerts"], 2);
}

// ── check ───────────────────────────────────────────────────────────────────

#[test]
fn test_check_clean_dataset() {
    let dir = TempDir::new().unwrap();
    let dataset = write_dataset(&dir, DATASET);
    tour()
        .args(["check", "--timezone", "UTC", "--dataset"])
        .arg(&dataset)
        .assert()
        .success()
        .stdout(predicate::str::contains("0 of 4 records have invalid dates"));
}

#[test]
fn test_check_reports_invalid_dates() {
    let dir = TempDir::new().unwrap();
    let dataset = write_dataset(
        &dir,
        r#"[
            {"country": "US", "city": "Chicago", "venue": "Metro", "date": "01-01-2023"},
            {"country": "DE", "city": "Berlin", "venue": "SO36", "date": "31-02-2025"}
        ]"#,
    );
    tour()
        .args(["check", "--timezone", "UTC", "--dataset"])
        .arg(&dataset)
        .assert()
        .failure()
        .stdout(predicate::str::contains("#1 Berlin - SO36 [31-02-2025]"))
        .stdout(predicate::str::contains("1 of 2 records have invalid dates"));
}

#[test]
fn test_malformed_dataset_fails() {
    let dir = TempDir::new().unwrap();
    let dataset = write_dataset(&dir, r#"{"not": "an array"}"#);
    tour()
        .args(["check", "--dataset"])
        .arg(&dataset)
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid dataset JSON"));
}

// ── parse-date ──────────────────────────────────────────────────────────────

#[test]
fn test_parse_date_local_midnight() {
    tour()
        .args(["parse-date", "??-??-2024", "--timezone", "Asia/Tokyo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("date:      2024-01-01"))
        .stdout(predicate::str::contains("precision: year"))
        .stdout(predicate::str::contains("utc:       2023-12-31T15:00:00+00:00"));
}

#[test]
fn test_parse_date_json() {
    let output = tour()
        .args(["parse-date", "15-06-2024", "--timezone", "UTC", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed["date"], "2024-06-15");
    assert_eq!(parsed["precision"], "day");
    assert_eq!(parsed["utc"], "2024-06-15T00:00:00+00:00");
}

#[test]
fn test_parse_date_invalid() {
    tour()
        .args(["parse-date", "32-01-2024", "--timezone", "UTC"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a valid calendar date"));
}

#[test]
fn test_invalid_timezone() {
    tour()
        .args(["parse-date", "01-01-2024", "--timezone", "Mars/Base"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid timezone"));
}
