//! Integration tests for Rosette
//!
//! These tests verify the CLI and the library crates working together.

use std::fs;
use std::process::Command;
use tempfile::TempDir;

fn cargo_run(args: &[&str]) -> std::process::Output {
    let mut full = vec!["run", "--quiet", "--"];
    full.extend_from_slice(args);
    Command::new("cargo")
        .args(&full)
        .output()
        .expect("failed to invoke cargo")
}

/// Test that the CLI can be invoked
#[test]
fn test_cli_invocation() {
    let output = cargo_run(&["--help"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("rosette"));
    assert!(stdout.contains("Radial track-map layout engine"));
}

/// Test a full script replay through the binary, parsing the JSON snapshot
#[test]
fn test_script_replay() {
    let dir = TempDir::new().unwrap();
    let script = dir.path().join("script.json");
    fs::write(
        &script,
        r#"{
  "anchor": { "center": { "x": 400.0, "y": 300.0 }, "margin": 50.0 },
  "ops": [
    { "add": { "track": { "title": "Paranoid Android", "artist": "Radiohead" }, "tag": "root" } },
    { "add": { "track": { "title": "Karma Police", "artist": "Radiohead" }, "parent": 0, "tag": "same artist" } },
    { "add": { "track": { "title": "Teardrop", "artist": "Massive Attack" }, "parent": 0, "tag": "same playlist" } },
    { "add": { "track": { "title": "Angel", "artist": "Massive Attack" }, "parent": 2, "tag": "same artist" } }
  ]
}"#,
    )
    .unwrap();

    let output = cargo_run(&["run", script.to_str().unwrap()]);
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let snapshot: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be one JSON snapshot");
    let positions = snapshot["positions"].as_object().unwrap();
    assert_eq!(positions.len(), 4);
    assert_eq!(positions["0"]["x"].as_f64().unwrap(), 400.0);
    assert_eq!(positions["0"]["y"].as_f64().unwrap(), 300.0);

    let connections = snapshot["connections"].as_array().unwrap();
    assert_eq!(connections.len(), 3);
    assert!(
        connections
            .iter()
            .any(|c| c["tag"] == "same playlist" && c["from"] == 0 && c["to"] == 2)
    );
    assert_eq!(snapshot["anchor"]["margin"].as_f64().unwrap(), 50.0);
}

/// Test that a TOML config file overrides layout defaults
#[test]
fn test_config_override() {
    let dir = TempDir::new().unwrap();
    let script = dir.path().join("script.json");
    let config = dir.path().join("layout.toml");
    fs::write(
        &script,
        r#"{
  "anchor": { "center": { "x": 400.0, "y": 300.0 }, "margin": 0.0 },
  "ops": [
    { "add": { "track": { "title": "Root", "artist": "X" }, "tag": "root" } },
    { "add": { "track": { "title": "Child", "artist": "X" }, "parent": 0, "tag": "same artist" } }
  ]
}"#,
    )
    .unwrap();
    fs::write(&config, "ring_distance = 90.0\n").unwrap();

    let output = cargo_run(&[
        "run",
        script.to_str().unwrap(),
        "--config",
        config.to_str().unwrap(),
    ]);
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let snapshot: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    // Single ring child points to 12 o'clock at the overridden distance.
    let child = &snapshot["positions"]["1"];
    assert!((child["x"].as_f64().unwrap() - 400.0).abs() < 1e-6);
    assert!((child["y"].as_f64().unwrap() - 210.0).abs() < 1e-6);
}

/// Test that a script op violating the tree contracts fails the run
#[test]
fn test_invalid_script_op_fails() {
    let dir = TempDir::new().unwrap();
    let script = dir.path().join("script.json");
    fs::write(
        &script,
        r#"{
  "ops": [
    { "add": { "track": { "title": "Root", "artist": "X" }, "tag": "root" } },
    { "add": { "track": { "title": "Orphan", "artist": "X" }, "parent": 42, "tag": "broken" } }
  ]
}"#,
    )
    .unwrap();

    let output = cargo_run(&["run", script.to_str().unwrap()]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("script op #1"));
}

/// Test the library surface end to end, without going through the binary
#[test]
fn test_library_end_to_end() {
    use rosette_core::Point;
    use rosette_layout::{LayoutConfig, RootAnchor, TreeMutator};

    let anchor = RootAnchor::new(Point::new(0.0, 0.0), 32.0);
    let mut mutator: TreeMutator<String> = TreeMutator::new(LayoutConfig::default(), anchor);

    let root = mutator.add_node("root".to_string(), None, "root").unwrap();
    assert_eq!(root.position, anchor.center);

    let mut ring = Vec::new();
    for i in 0..5 {
        let added = mutator
            .add_node(format!("track-{i}"), Some(root.id), "related")
            .unwrap();
        ring.push(added.id);
    }
    let snapshot = mutator.relayout();
    assert_eq!(snapshot.positions.len(), 6);
    assert_eq!(snapshot.connections.len(), 5);
    for &id in &ring {
        let position = snapshot.positions[&id];
        assert!((position.distance_to(anchor.center) - 180.0).abs() < 1e-9);
    }

    let removed = mutator.remove_node(ring[0]).unwrap();
    assert_eq!(removed.removed, vec![ring[0]]);
    assert_eq!(removed.snapshot.positions.len(), 5);

    let recentered = mutator.recenter("fresh".to_string()).unwrap();
    assert_eq!(mutator.graph().node_count(), 1);
    assert!(!mutator.graph().contains(root.id));
    assert_eq!(recentered.position, anchor.center);
}
