//! Integration tests for bftable CLI

use std::io::Write;
use std::process::Command;

use tempfile::NamedTempFile;

const SAMPLE_RECORDS: &str = r#"[
    {"row": "Intercept only", "bf": 0.0, "error": 0.0},
    {"row": "Slope", "bf": 2.0, "error": 0.01},
    {"row": "Intercept + Slope", "bf": 4.5, "error": 0.02}
]"#;

fn sample_file() -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(SAMPLE_RECORDS.as_bytes())
        .expect("Failed to write records");
    file
}

fn run_bftable(args: &[&str]) -> (String, String, bool) {
    let mut cmd_args = vec!["run", "-p", "bftable", "--"];
    cmd_args.extend(args);

    let output = Command::new("cargo")
        .args(&cmd_args)
        .current_dir(env!("CARGO_MANIFEST_DIR").to_string() + "/..")
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let success = output.status.success();

    (stdout, stderr, success)
}

#[test]
fn test_cli_help() {
    let (stdout, _, success) = run_bftable(&["--help"]);

    assert!(success);
    assert!(stdout.contains("bftable"));
    assert!(stdout.contains("--denominator"));
    assert!(stdout.contains("--sort"));
    assert!(stdout.contains("--filter"));
}

#[test]
fn test_cli_version() {
    let (stdout, _, success) = run_bftable(&["--version"]);

    assert!(success);
    assert!(stdout.contains("bftable"));
}

#[test]
fn test_table_output() {
    let file = sample_file();
    let (stdout, _, success) = run_bftable(&[file.path().to_str().unwrap()]);

    assert!(success);
    assert!(stdout.contains("Currently dividing by: Intercept only"));
    assert!(stdout.contains("Slope"));
    assert!(stdout.contains("Bayes factor"));
    assert!(stdout.contains("2 of 2 rows shown"));
}

#[test]
fn test_denominator_selection() {
    let file = sample_file();
    let (stdout, _, success) = run_bftable(&[
        file.path().to_str().unwrap(),
        "--denominator",
        "2",
    ]);

    assert!(success);
    assert!(stdout.contains("Currently dividing by: Intercept + Slope"));
    // the others now sit below the denominator
    assert!(stdout.contains("1 / "));
}

#[test]
fn test_json_output() {
    let file = sample_file();
    let (stdout, _, success) =
        run_bftable(&[file.path().to_str().unwrap(), "--output", "json"]);

    assert!(success);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("Invalid JSON output");
    assert_eq!(parsed["denominator_label"], "Intercept only");
    assert_eq!(parsed["rows"].as_array().unwrap().len(), 2);
    assert!(parsed["rows"][0].get("relative_log_bf").is_some());
}

#[test]
fn test_filter_hides_rows() {
    let file = sample_file();
    let (stdout, _, success) = run_bftable(&[
        file.path().to_str().unwrap(),
        "--filter",
        "+Intercept -Slope",
        "--denominator",
        "1",
    ]);

    assert!(success);
    assert!(stdout.contains("1 of 2 rows shown"));
    assert!(stdout.contains("Intercept only"));
}

#[test]
fn test_hash_filter_rejected_for_other_model_types() {
    let file = sample_file();
    let (_, stderr, success) = run_bftable(&[
        file.path().to_str().unwrap(),
        "--model-type",
        "BFproportion",
        "--filter",
        "#2",
    ]);

    assert!(!success);
    assert!(stderr.contains("Error:"));
}

#[test]
fn test_html_output() {
    let file = sample_file();
    let (stdout, _, success) = run_bftable(&["html", file.path().to_str().unwrap()]);

    assert!(success);
    assert!(stdout.contains("<!DOCTYPE html>"));
    assert!(stdout.contains("bfrow"));
    assert!(stdout.contains("Currently dividing by"));
}

#[test]
fn test_invalid_path() {
    let (_, stderr, success) = run_bftable(&["/nonexistent/records.json"]);

    assert!(!success);
    assert!(stderr.contains("Error:"));
}

#[test]
fn test_out_of_range_denominator() {
    let file = sample_file();
    let (_, stderr, success) =
        run_bftable(&[file.path().to_str().unwrap(), "--denominator", "9"]);

    assert!(!success);
    assert!(stderr.contains("Error:"));
}
