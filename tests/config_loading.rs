use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::tempdir;

const RECORDS: &str = r#"[
    {"name": "left-pad"},
    {"name": "webapp", "dependencies": {"left-pad": "*"}}
]"#;

#[test]
fn config_default_format_overrides_flag_default() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    let data = root.join("packages.json");
    fs::write(&data, RECORDS).unwrap();
    let config = root.join("package-relations-explorer.toml");
    fs::write(&config, "[query]\ndefault_format = \"json\"\n").unwrap();

    let mut cmd = Command::cargo_bin("package-relations-explorer").unwrap();
    cmd.arg("query")
        .arg("deps")
        .arg("--data")
        .arg(&data)
        .arg("--config")
        .arg(&config)
        .arg("--package")
        .arg("webapp");
    // JSON list output, not the ASCII table
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"left-pad\""))
        .stdout(predicate::str::contains("+---").not());
}

#[test]
fn config_supplies_the_records_path() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    let data = root.join("packages.json");
    fs::write(&data, RECORDS).unwrap();
    let config = root.join("explorer.toml");
    fs::write(&config, format!("data = {:?}\n", data.display().to_string())).unwrap();

    let mut cmd = Command::cargo_bin("package-relations-explorer").unwrap();
    cmd.arg("query")
        .arg("dep-count")
        .arg("--config")
        .arg(&config)
        .arg("--package")
        .arg("webapp");
    cmd.assert().success().stdout(predicate::str::contains("1"));
}

#[test]
fn config_figure_section_overrides_edge_kind() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    let data = root.join("packages.json");
    fs::write(
        &data,
        r#"[
            {"name": "a", "keywords": ["web"]},
            {"name": "b", "keywords": ["web"]}
        ]"#,
    )
    .unwrap();
    let config = root.join("explorer.toml");
    fs::write(&config, "[figure]\nedges = \"keywords\"\n").unwrap();

    let mut cmd = Command::cargo_bin("package-relations-explorer").unwrap();
    cmd.arg("query")
        .arg("figure")
        .arg("--data")
        .arg(&data)
        .arg("--config")
        .arg(&config)
        .arg("--package")
        .arg("a");
    // Keyword edges carry the shared keyword tag
    cmd.assert().success().stdout(predicate::str::contains("\"keyword\": \"web\""));
}
