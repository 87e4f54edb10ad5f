//! Integration tests for the `convert` subcommand.

use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;

fn cmd() -> Command {
    Command::cargo_bin("layerize").unwrap()
}

const SNAPSHOT: &str = r#"{
    "viewportWidth": 800,
    "scrollHeight": 600,
    "root": {
        "tag": "body",
        "rect": {"left": 0, "top": 0, "width": 800, "height": 600},
        "children": [
            {
                "tag": "div",
                "rect": {"left": 10, "top": 10, "width": 200, "height": 100},
                "attributes": {"id": "hero"},
                "styles": {"backgroundColor": "rgb(255, 0, 0)"}
            }
        ]
    }
}"#;

fn snapshot_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn converts_flat_to_stdout() {
    let file = snapshot_file(SNAPSHOT);
    cmd()
        .arg("convert")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"type\":\"FRAME\""))
        .stdout(predicate::str::contains("\"type\":\"RECTANGLE\""));
}

#[test]
fn nested_flag_emits_single_root() {
    let file = snapshot_file(SNAPSHOT);
    let output = cmd()
        .arg("convert")
        .arg(file.path())
        .arg("--nested")
        .output()
        .unwrap();
    assert!(output.status.success());

    let nodes: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let nodes = nodes.as_array().unwrap();
    assert_eq!(nodes.len(), 1);
    assert_eq!(nodes[0]["type"], "FRAME");
    assert_eq!(nodes[0]["children"][0]["type"], "RECTANGLE");
}

#[test]
fn writes_output_file() {
    let file = snapshot_file(SNAPSHOT);
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("layers.json");

    cmd()
        .arg("convert")
        .arg(file.path())
        .arg("-o")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let written: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(written.as_array().unwrap().len(), 2);
}

#[test]
fn pretty_output_is_indented() {
    let file = snapshot_file(SNAPSHOT);
    cmd()
        .arg("convert")
        .arg(file.path())
        .arg("--pretty")
        .assert()
        .success()
        .stdout(predicate::str::contains("  \"type\""));
}

#[test]
fn missing_file_exits_2() {
    cmd()
        .arg("convert")
        .arg("does-not-exist.json")
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Error reading"));
}

#[test]
fn malformed_snapshot_exits_2() {
    let file = snapshot_file("{not json");
    cmd()
        .arg("convert")
        .arg(file.path())
        .assert()
        .failure()
        .code(2);
}

#[test]
fn unmatched_selector_exits_1() {
    let file = snapshot_file(SNAPSHOT);
    cmd()
        .arg("convert")
        .arg(file.path())
        .arg("--selector")
        .arg("#nope")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("matched no element"));
}

#[test]
fn selector_scopes_conversion() {
    let file = snapshot_file(SNAPSHOT);
    let output = cmd()
        .arg("convert")
        .arg(file.path())
        .arg("--selector")
        .arg("#hero")
        .output()
        .unwrap();
    assert!(output.status.success());

    // The selected element itself does not emit and has no descendants:
    // only the synthetic root frame remains.
    let nodes: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(nodes.as_array().unwrap().len(), 1);
}

#[test]
fn quiet_suppresses_warnings() {
    let degenerate = r#"{
        "viewportWidth": 800,
        "scrollHeight": 600,
        "root": {
            "tag": "body",
            "rect": {"left": 0, "top": 0, "width": 800, "height": 600},
            "children": [
                {"tag": "div",
                 "rect": {"left": 0, "top": 0, "width": 100, "height": 0.2},
                 "styles": {"backgroundColor": "rgb(255, 0, 0)"}}
            ]
        }
    }"#;

    let file = snapshot_file(degenerate);
    cmd()
        .arg("convert")
        .arg(file.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("DEGENERATE_BOX"));

    let file = snapshot_file(degenerate);
    cmd()
        .arg("convert")
        .arg(file.path())
        .arg("--quiet")
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}
