//! End-to-end tests for the archviz binary
//!
//! Graphviz is never required: generation is only exercised with the
//! backend pointed at a path that does not exist.

use std::path::Path;
use std::process::{Command, Output};

use tempfile::tempdir;

fn archviz(args: &[&str], cwd: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_archviz"))
        .args(args)
        .current_dir(cwd)
        .env_remove("RUST_LOG")
        .env_remove("ARCHVIZ_LOG_LEVEL")
        .env_remove("ARCHVIZ_LOG_FORMAT")
        .env("ARCHVIZ_DOT", "/nonexistent/archviz-cli-test/dot")
        .output()
        .expect("failed to run archviz")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_list_json() {
    let dir = tempdir().unwrap();
    let output = archviz(&["list", "--json"], dir.path());
    assert!(output.status.success());

    let listing: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(listing["total"], 4);
    let files: Vec<&str> = listing["artifacts"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["file"].as_str().unwrap())
        .collect();
    assert_eq!(
        files,
        vec![
            "doc_plus_architecture.png",
            "doc_plus_components.png",
            "doc_plus_dataflow.png",
            "architecture_overview.txt"
        ]
    );
}

#[test]
fn test_report_output() {
    let dir = tempdir().unwrap();
    let output = archviz(&["report", "--output", "overview.txt"], dir.path());
    assert!(output.status.success());

    let saved = std::fs::read_to_string(dir.path().join("overview.txt")).unwrap();
    assert!(saved.starts_with('╔'));
    assert!(saved.contains("Technology Stack"));
    assert!(stdout(&output).starts_with(&saved));
}

#[test]
fn test_dot_to_stdout() {
    let dir = tempdir().unwrap();
    let output = archviz(&["dot", "dataflow"], dir.path());
    assert!(output.status.success());

    let dot = stdout(&output);
    assert!(dot.starts_with("digraph \"DOC+ Data Flow\" {"));
    assert!(dot.contains("Push Updates"));
    assert!(std::fs::read_dir(dir.path()).unwrap().next().is_none());
}

#[test]
fn test_generate_without_graphviz() {
    let dir = tempdir().unwrap();
    let output = archviz(&[], dir.path());

    assert_eq!(output.status.code(), Some(1));
    let console = stdout(&output);
    assert!(console.contains("Graphviz is required"));
    assert!(console.contains("brew install graphviz"));
    assert!(std::fs::read_dir(dir.path()).unwrap().next().is_none());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error:"));
}

#[test]
fn test_unknown_subcommand_fails() {
    let dir = tempdir().unwrap();
    let output = archviz(&["render"], dir.path());
    assert!(!output.status.success());
}
