use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::tempdir;

const RECORDS: &str = r#"[{"name": "solo"}]"#;

#[test]
fn build_quiet_suppresses_non_essential_output() {
    let dir = tempdir().unwrap();
    let data = dir.path().join("packages.json");
    fs::write(&data, RECORDS).unwrap();

    // Without quiet: expect the completion message
    let mut cmd_no_quiet = Command::cargo_bin("package-relations-explorer").unwrap();
    cmd_no_quiet.arg("build").arg("--data").arg(&data);
    cmd_no_quiet.assert().success().stdout(predicate::str::contains("Graph built"));

    // With quiet: ensure the completion message is suppressed
    let mut cmd_quiet = Command::cargo_bin("package-relations-explorer").unwrap();
    cmd_quiet.arg("-q").arg("build").arg("--data").arg(&data);
    cmd_quiet.assert().success().stdout(predicate::str::is_empty());
}

#[test]
fn verbose_deps_table_adds_version_and_description() {
    let dir = tempdir().unwrap();
    let data = dir.path().join("packages.json");
    fs::write(
        &data,
        r#"[
            {"name": "app", "dependencies": {"left-pad": "*"}},
            {"name": "left-pad", "version": "1.3.0", "description": "String left pad"}
        ]"#,
    )
    .unwrap();

    // Default table: names only
    let mut plain = Command::cargo_bin("package-relations-explorer").unwrap();
    plain.arg("query").arg("deps").arg("--data").arg(&data).arg("--package").arg("app");
    plain
        .assert()
        .success()
        .stdout(predicate::str::contains("left-pad"))
        .stdout(predicate::str::contains("Version").not());

    // -v adds version and description columns
    let mut verbose = Command::cargo_bin("package-relations-explorer").unwrap();
    verbose.arg("-v").arg("query").arg("deps").arg("--data").arg(&data).arg("--package").arg("app");
    verbose
        .assert()
        .success()
        .stdout(predicate::str::contains("Version"))
        .stdout(predicate::str::contains("1.3.0"))
        .stdout(predicate::str::contains("String left pad"));
}
