use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::tempdir;

const RECORDS: &str = r#"[
    {"name": "left-pad", "keywords": ["padding"], "maintainers": ["stevemao"]},
    {"name": "webapp", "dependencies": {"left-pad": "*"}, "keywords": ["web"]}
]"#;

// Bottom-up: simple CLI smoke test for build and a query
#[test]
fn cli_build_and_deps_smoke() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    let data = root.join("packages.json");
    fs::write(&data, RECORDS).unwrap();

    // Act: build and save the graph
    let mut cmd = Command::cargo_bin("package-relations-explorer").unwrap();
    cmd.arg("build").arg("--data").arg(&data).arg("--save").arg(root.join("graph.json"));
    cmd.assert().success().stdout(predicate::str::contains("Graph built: 2 packages"));

    // Assert: graph file exists and contains both packages
    let json_path = root.join("graph.json");
    assert!(json_path.exists());
    let content = fs::read_to_string(&json_path).unwrap();
    assert!(content.contains("left-pad"));

    // Act: query deps against the prebuilt graph
    let mut cmd2 = Command::cargo_bin("package-relations-explorer").unwrap();
    cmd2.arg("query")
        .arg("deps")
        .arg("--graph")
        .arg(&json_path)
        .arg("--package")
        .arg("webapp")
        .arg("--format")
        .arg("json");
    cmd2.assert().success().stdout(predicate::str::contains("left-pad"));
}

#[test]
fn cli_missing_input_is_a_usage_error() {
    let mut cmd = Command::cargo_bin("package-relations-explorer").unwrap();
    cmd.arg("query").arg("deps").arg("--package").arg("webapp");
    cmd.assert().code(2).stderr(predicate::str::contains("Provide --data"));
}

#[test]
fn cli_unknown_package_fails() {
    let dir = tempdir().unwrap();
    let data = dir.path().join("packages.json");
    fs::write(&data, RECORDS).unwrap();

    let mut cmd = Command::cargo_bin("package-relations-explorer").unwrap();
    cmd.arg("query").arg("deps").arg("--data").arg(&data).arg("--package").arg("ghost");
    cmd.assert().code(1).stderr(predicate::str::contains("Package not found: ghost"));
}
