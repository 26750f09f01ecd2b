//! CLI tests
//!
//! Run the c2p binary against temporary archives. Every test passes
//! `--config` with a path inside its own temp dir so the user's
//! configuration is never read.

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

use super::helpers::{project_zip, write_corrupt_zip};

/// c2p with colors disabled and an isolated config path.
fn c2p(temp: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("c2p").unwrap();
    cmd.env("NO_COLOR", "1")
        .arg("--config")
        .arg(config_path(temp));
    cmd
}

fn config_path(temp: &TempDir) -> PathBuf {
    temp.path().join("config.toml")
}

#[test]
fn generate_prints_plaintext_prompt() {
    let temp = TempDir::new().unwrap();
    let archive = project_zip(temp.path(), "project.zip");

    c2p(&temp)
        .arg("generate")
        .arg(&archive)
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "Below is the structured project codebase extracted from the provided ZIP file:\n",
        ))
        .stdout(predicate::str::contains(
            "=== File: src/app.py ===\nprint(1)\n=== End of File: src/app.py ===",
        ))
        .stdout(predicate::str::contains("x.js").not());
}

#[test]
fn generate_accepts_format_names_in_any_case() {
    let temp = TempDir::new().unwrap();
    let archive = project_zip(temp.path(), "project.zip");

    c2p(&temp)
        .args(["generate", "--format", "xml"])
        .arg(&archive)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "<file path=\"src/app.py\" language=\"python\">",
        ));
}

#[test]
fn generate_fails_when_nothing_was_produced() {
    let temp = TempDir::new().unwrap();
    let bad = write_corrupt_zip(temp.path(), "bad.zip");

    c2p(&temp)
        .arg("generate")
        .arg(&bad)
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Failed to process"))
        .stderr(predicate::str::contains("bad.zip"))
        .stderr(predicate::str::contains("No archive produced any output"));
}

#[test]
fn generate_reports_failed_archive_but_succeeds() {
    let temp = TempDir::new().unwrap();
    let good = project_zip(temp.path(), "good.zip");
    let bad = write_corrupt_zip(temp.path(), "bad.zip");

    c2p(&temp)
        .arg("generate")
        .arg(&good)
        .arg(&bad)
        .assert()
        .success()
        .stdout(predicate::str::contains("src/app.py"))
        .stderr(predicate::str::contains("bad.zip"));
}

#[test]
fn generate_writes_output_file() {
    let temp = TempDir::new().unwrap();
    let archive = project_zip(temp.path(), "project.zip");
    let output = temp.path().join("prompt.md");

    c2p(&temp)
        .args(["generate", "--format", "Markdown", "--output"])
        .arg(&output)
        .arg(&archive)
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Wrote"));

    let written = fs::read_to_string(&output).unwrap();
    assert!(written.contains("## File: src/app.py\n```python\nprint(1)\n```\n"));
}

#[test]
fn generate_tree_lists_included_files_on_stderr() {
    let temp = TempDir::new().unwrap();
    let archive = project_zip(temp.path(), "project.zip");

    c2p(&temp)
        .args(["generate", "--tree"])
        .arg(&archive)
        .assert()
        .success()
        .stderr(predicate::str::contains("Included files (1):\n  src/app.py\n"));
}

#[test]
fn generate_flags_override_ignore_list() {
    let temp = TempDir::new().unwrap();
    let archive = project_zip(temp.path(), "project.zip");

    c2p(&temp)
        .args(["generate", "--no-default-ignores", "--ignore", "src", "--no-boundaries"])
        .arg(&archive)
        .assert()
        .success()
        .stdout(predicate::str::contains("module.exports = 1;"))
        .stdout(predicate::str::contains("print(1)").not());
}

#[test]
fn generate_uses_config_file() {
    let temp = TempDir::new().unwrap();
    let archive = project_zip(temp.path(), "project.zip");
    fs::write(config_path(&temp), "[output]\nformat = \"JSON\"\n").unwrap();

    c2p(&temp)
        .arg("generate")
        .arg(&archive)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"language\": \"python\""));
}

#[test]
fn invalid_config_is_rejected() {
    let temp = TempDir::new().unwrap();
    let archive = project_zip(temp.path(), "project.zip");
    fs::write(config_path(&temp), "[cache]\ncapacity = 0\n").unwrap();

    c2p(&temp)
        .arg("generate")
        .arg(&archive)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid config"));
}

#[test]
fn generate_requires_an_archive() {
    let temp = TempDir::new().unwrap();

    c2p(&temp).arg("generate").assert().code(2);
}

#[test]
fn tree_prints_relative_paths() {
    let temp = TempDir::new().unwrap();
    let archive = project_zip(temp.path(), "project.zip");

    c2p(&temp)
        .arg("tree")
        .arg(&archive)
        .assert()
        .success()
        .stdout("src/app.py\n");
}

#[test]
fn tree_fails_on_corrupt_archive() {
    let temp = TempDir::new().unwrap();
    let bad = write_corrupt_zip(temp.path(), "bad.zip");

    c2p(&temp)
        .arg("tree")
        .arg(&bad)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid or corrupted ZIP file"));
}

#[test]
fn config_path_prints_override() {
    let temp = TempDir::new().unwrap();

    c2p(&temp)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn config_init_then_show() {
    let temp = TempDir::new().unwrap();

    c2p(&temp).args(["config", "init"]).assert().success();
    assert!(config_path(&temp).is_file());

    c2p(&temp)
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    c2p(&temp)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[cache]"))
        .stdout(predicate::str::contains("capacity = 32"));
}

#[test]
fn completions_are_generated() {
    let temp = TempDir::new().unwrap();

    c2p(&temp)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("c2p"));
}

#[test]
fn version_flag_prints_package_version() {
    let temp = TempDir::new().unwrap();

    c2p(&temp)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}
