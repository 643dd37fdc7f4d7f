//! End-to-end CLI integration tests
//!
//! These tests invoke the compiled binary as a subprocess to verify
//! that the CLI behaves correctly from a user's perspective.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Returns a Command configured to run our binary.
///
/// Note: `cargo_bin` is marked deprecated for edge cases involving custom
/// cargo build directories, but works correctly for standard project layouts.
#[allow(deprecated)]
fn cmd() -> Command {
    Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap()
}

/// Weight table covering the baseline composite formula.
const WEIGHTS_TOML: &str = r#"weight_table = "standard"

[weights]
lix = 1.0
proportion-of-complex-syllable-words = 5.0
proportion-of-multi-membered-grapheme-words = 5.0
proportion-of-rare-grapheme-words = 5.0
proportion-of-consonant-cluster-words = 5.0
"#;

const SAMPLE_TEXT: &str = "Der Hund bellt laut. Die Katze schläft.";

/// Create a temp dir containing a sample text file and a weights config.
fn fixture() -> (TempDir, std::path::PathBuf) {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("lesbar.toml"), WEIGHTS_TOML).unwrap();
    let text_path = tmp.path().join("sample.txt");
    fs::write(&text_path, SAMPLE_TEXT).unwrap();
    (tmp, text_path)
}

// =============================================================================
// Help & Version
// =============================================================================

#[test]
fn help_flag_shows_usage() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("Commands:"))
        .stdout(predicate::str::contains("Options:"));
}

#[test]
fn version_flag_shows_version() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn version_only_prints_bare_version() {
    cmd()
        .arg("--version-only")
        .assert()
        .success()
        .stdout(predicate::str::diff(format!(
            "{}\n",
            env!("CARGO_PKG_VERSION")
        )));
}

#[test]
fn no_arguments_shows_help() {
    cmd().assert().failure();
}

// =============================================================================
// Info Command
// =============================================================================

#[test]
fn info_shows_package_name_and_version() {
    cmd()
        .arg("info")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_NAME")))
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn info_json_outputs_valid_json() {
    let output = cmd().arg("info").arg("--json").assert().success();

    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    let json: serde_json::Value =
        serde_json::from_str(&stdout).expect("info --json should output valid JSON");

    assert_eq!(json["name"], env!("CARGO_PKG_NAME"));
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
}

// =============================================================================
// Tokenize Command
// =============================================================================

#[test]
fn tokenize_reports_counts() {
    let (tmp, text_path) = fixture();
    cmd()
        .args(["-C", tmp.path().to_str().unwrap()])
        .args(["tokenize", text_path.to_str().unwrap(), "--counts"])
        .assert()
        .success()
        .stdout(predicate::str::contains("7 words, 2 phrases"));
}

#[test]
fn tokenize_json_includes_token_lists() {
    let (tmp, text_path) = fixture();
    let output = cmd()
        .args(["-C", tmp.path().to_str().unwrap()])
        .args(["tokenize", text_path.to_str().unwrap(), "--json"])
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    let json: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");
    assert_eq!(json["word_count"], 7);
    assert_eq!(json["phrase_count"], 2);
    assert_eq!(json["words"][0], "Der");
    assert_eq!(json["phrases"][1], "Die Katze schläft");
}

#[test]
fn tokenize_missing_file_fails() {
    cmd()
        .args(["tokenize", "does-not-exist.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does-not-exist.txt"));
}

// =============================================================================
// Metrics Command
// =============================================================================

#[test]
fn metrics_json_reports_counts_and_formulas() {
    let (tmp, text_path) = fixture();
    let output = cmd()
        .args(["-C", tmp.path().to_str().unwrap()])
        .args(["metrics", text_path.to_str().unwrap(), "--json"])
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    let json: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");
    assert_eq!(json["count_words"], 7);
    assert_eq!(json["count_phrases"], 2);
    assert_eq!(json["lix"], 17.79);
}

#[test]
fn metrics_only_prints_single_value() {
    let (tmp, text_path) = fixture();
    cmd()
        .args(["-C", tmp.path().to_str().unwrap()])
        .args([
            "metrics",
            text_path.to_str().unwrap(),
            "--only",
            "count-words",
        ])
        .assert()
        .success()
        .stdout(predicate::str::diff("7\n"));
}

// =============================================================================
// Analyze Command
// =============================================================================

#[test]
fn analyze_produces_record_json() {
    let (tmp, text_path) = fixture();
    let output = cmd()
        .args(["-C", tmp.path().to_str().unwrap()])
        .args(["analyze", text_path.to_str().unwrap(), "--json"])
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    let json: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");
    assert_eq!(json["metrics"]["count_words"], 7);
    assert_eq!(json["weight_table"], "standard");
    assert_eq!(json["text"], SAMPLE_TEXT);
    assert_eq!(json["text_hash"].as_str().unwrap().len(), 64);
    assert!(json["score"].is_number());
}

#[test]
fn analyze_without_weights_fails_with_hint() {
    let tmp = TempDir::new().unwrap();
    let text_path = tmp.path().join("sample.txt");
    fs::write(&text_path, SAMPLE_TEXT).unwrap();

    cmd()
        .args(["-C", tmp.path().to_str().unwrap()])
        .args(["analyze", text_path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("weight"));
}

#[test]
fn analyze_incomplete_weights_fails() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("lesbar.toml"),
        "[weights]\nlix = 1.0\n",
    )
    .unwrap();
    let text_path = tmp.path().join("sample.txt");
    fs::write(&text_path, SAMPLE_TEXT).unwrap();

    cmd()
        .args(["-C", tmp.path().to_str().unwrap()])
        .args(["analyze", text_path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing a weight"));
}

#[test]
fn analyze_max_score_gate_passes_and_fails() {
    let (tmp, text_path) = fixture();

    cmd()
        .args(["-C", tmp.path().to_str().unwrap()])
        .args([
            "analyze",
            text_path.to_str().unwrap(),
            "--max-score",
            "100",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("PASS"));

    cmd()
        .args(["-C", tmp.path().to_str().unwrap()])
        .args(["analyze", text_path.to_str().unwrap(), "--max-score", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("scores"));
}

#[test]
fn analyze_empty_file_scores_zero() {
    let (tmp, _) = fixture();
    let empty_path = tmp.path().join("empty.txt");
    fs::write(&empty_path, "").unwrap();

    let output = cmd()
        .args(["-C", tmp.path().to_str().unwrap()])
        .args(["analyze", empty_path.to_str().unwrap(), "--json"])
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    let json: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");
    assert_eq!(json["score"], 0.0);
    assert_eq!(json["metrics"]["count_words"], 0);
}

// =============================================================================
// Input Size Limit
// =============================================================================

#[test]
fn oversized_input_is_rejected() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("lesbar.toml"),
        format!("max_input_bytes = 16\n\n{WEIGHTS_TOML}"),
    )
    .unwrap();
    let text_path = tmp.path().join("big.txt");
    fs::write(&text_path, "Dieser Text ist deutlich länger als sechzehn Bytes.").unwrap();

    cmd()
        .args(["-C", tmp.path().to_str().unwrap()])
        .args(["metrics", text_path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("input too large"));
}
