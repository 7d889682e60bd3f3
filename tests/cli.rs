//! End-to-end tests driving the `arcrows` binary.
//!
//! Each test points `ARCROWS_CONFIG` at a throwaway config so the log file
//! lands in a temp directory instead of the user's state dir.

use serde_json::Value;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

const RECORDS: &str = r#"{"src_ip":"A","dst_ip":"B"}
{"src_ip":"A","dst_ip":"C"}
{"src_ip":"B","dst_ip":"A"}
"#;

/// Fresh per-test directory holding a config that redirects logging.
fn workspace(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("arcrows_cli_{}_{}", name, std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).expect("create workspace");
    std::fs::write(
        dir.join("config.toml"),
        format!("log_file_path = {:?}\n", dir.join("arcrows.log")),
    )
    .expect("write config");
    dir
}

fn arcrows(dir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_arcrows"));
    cmd.env("ARCROWS_CONFIG", dir.join("config.toml"))
        .env_remove("ARCROWS_ROW_GAP")
        .env_remove("ARCROWS_TOP_PADDING")
        .env_remove("ARCROWS_MARKER_RADIUS");
    cmd
}

fn json_stdout(output: &Output) -> Value {
    assert!(
        output.status.success(),
        "arcrows failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

fn order_of(value: &Value) -> Vec<String> {
    value["order"]
        .as_array()
        .expect("order array")
        .iter()
        .map(|v| v.as_str().expect("address string").to_string())
        .collect()
}

#[test]
fn file_input_prints_sorted_layout() {
    let dir = workspace("file");
    let records = dir.join("records.jsonl");
    std::fs::write(&records, RECORDS).unwrap();

    let output = arcrows(&dir).arg(&records).output().unwrap();
    let value = json_stdout(&output);

    assert_eq!(order_of(&value), vec!["A", "B", "C"]);
    assert_eq!(value["positions"]["A"], 30.0);
    assert_eq!(value["positions"]["C"], 90.0);
    assert_eq!(value["canvas_height"], 500.0);
    assert_eq!(value["source"], "sorted");
    assert_eq!(value["counts"]["A"], 3);
    assert_eq!(value["extent"]["max"], 90.0);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn stdin_input_with_cli_overrides() {
    let dir = workspace("stdin");

    let mut child = arcrows(&dir)
        .args(["--row-gap", "10", "--top-padding", "5", "--compact"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(RECORDS.as_bytes())
        .unwrap();
    let output = child.wait_with_output().unwrap();
    let value = json_stdout(&output);

    assert_eq!(value["positions"]["A"], 5.0);
    assert_eq!(value["positions"]["B"], 15.0);
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim().lines().count(), 1);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn write_state_then_rerun_reuses_layout() {
    let dir = workspace("state");
    let records = dir.join("records.jsonl");
    let state = dir.join("state.json");
    let order = dir.join("order.txt");
    std::fs::write(&records, RECORDS).unwrap();
    std::fs::write(&order, "C\n").unwrap();

    // First run pins C on top and saves the layout
    let first = arcrows(&dir)
        .arg(&records)
        .arg("--order")
        .arg(&order)
        .arg("--state")
        .arg(&state)
        .arg("--write-state")
        .output()
        .unwrap();
    assert_eq!(order_of(&json_stdout(&first)), vec!["C", "A", "B"]);
    assert!(state.exists());

    // Second run without the order file reuses the saved layout
    let second = arcrows(&dir)
        .arg(&records)
        .arg("--state")
        .arg(&state)
        .output()
        .unwrap();
    let value = json_stdout(&second);
    assert_eq!(value["source"], "reused");
    assert_eq!(order_of(&value), vec!["C", "A", "B"]);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn missing_input_file_fails() {
    let dir = workspace("missing");

    let output = arcrows(&dir)
        .arg(dir.join("nope.jsonl"))
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("nope.jsonl"));

    let _ = std::fs::remove_dir_all(&dir);
}
