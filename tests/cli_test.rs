//! Integration tests for CLI argument parsing and the non-run commands.
// The cargo_bin function is marked deprecated in favor of cargo_bin! macro,
// but both work correctly. Suppressing until assert_cmd stabilizes the new API.
#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn setup_project() -> TempDir {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("py_micro_plumberd")).unwrap();
    fs::write(temp.path().join("py_micro_plumberd/__init__.py"), "").unwrap();
    fs::write(
        temp.path().join("pyproject.toml"),
        "[project]\nname = \"py-micro-plumberd\"\n",
    )
    .unwrap();
    temp
}

fn qgate() -> Command {
    let mut cmd = Command::new(cargo_bin("qgate"));
    cmd.env("NO_COLOR", "1").env_remove("QGATE_CONFIG");
    cmd
}

#[test]
fn cli_shows_help() -> Result<(), Box<dyn std::error::Error>> {
    qgate()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Quality gate"));
    Ok(())
}

#[test]
fn cli_shows_version() -> Result<(), Box<dyn std::error::Error>> {
    qgate()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    Ok(())
}

#[test]
fn cli_rejects_unknown_subcommand() -> Result<(), Box<dyn std::error::Error>> {
    qgate().arg("deploy").assert().failure();
    Ok(())
}

#[test]
fn plan_detects_library_directory() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project();
    qgate()
        .current_dir(temp.path())
        .arg("plan")
        .assert()
        .success()
        .stdout(predicate::str::contains("[5/8] Running type checker (types, fatal)"))
        .stdout(predicate::str::contains("mypy py_micro_plumberd --strict"))
        .stdout(predicate::str::contains("require py_micro_plumberd/py.typed"));
    Ok(())
}

#[test]
fn plan_finds_project_root_from_subdirectory() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project();
    qgate()
        .current_dir(temp.path().join("py_micro_plumberd"))
        .arg("plan")
        .assert()
        .success()
        .stdout(predicate::str::contains("ruff check py_micro_plumberd tests"));
    Ok(())
}

#[test]
fn plan_respects_project_flag() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project();
    qgate()
        .args(["plan", "--json", "--project"])
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"id\": \"scans\""));
    Ok(())
}

#[test]
fn config_prints_resolved_yaml() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project();
    qgate()
        .current_dir(temp.path())
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("library: py_micro_plumberd"))
        .stdout(predicate::str::contains("work_marker: TODO"));
    Ok(())
}

#[test]
fn config_schema_is_json() -> Result<(), Box<dyn std::error::Error>> {
    let output = qgate().args(["config", "--schema"]).output()?;
    assert!(output.status.success());
    let schema: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert!(schema["properties"]["tools"].is_object());
    Ok(())
}

#[test]
fn explicit_config_replaces_project_file() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project();
    fs::write(
        temp.path().join(".qgate.yml"),
        "tools:\n  lint: [flake8, \"${library}\"]\n",
    )?;
    let alt = temp.path().join("ci.yml");
    fs::write(&alt, "tools:\n  lint: [pylint, \"${library}\"]\n")?;

    qgate()
        .current_dir(temp.path())
        .arg("plan")
        .arg("--config")
        .arg(&alt)
        .assert()
        .success()
        .stdout(predicate::str::contains("pylint py_micro_plumberd"))
        .stdout(predicate::str::contains("flake8").not());
    Ok(())
}

#[test]
fn config_path_from_environment() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project();
    let alt = temp.path().join("ci.yml");
    fs::write(&alt, "tools:\n  tests: [nox, -s, tests]\n")?;

    qgate()
        .current_dir(temp.path())
        .env("QGATE_CONFIG", &alt)
        .arg("plan")
        .assert()
        .success()
        .stdout(predicate::str::contains("nox -s tests"));
    Ok(())
}

#[test]
fn missing_config_file_exits_two() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project();
    qgate()
        .current_dir(temp.path())
        .args(["run", "--config", "nope.yml"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Configuration not found"));
    Ok(())
}

#[test]
fn invalid_config_exits_two_before_running() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project();
    fs::write(
        temp.path().join(".qgate.yml"),
        "environment:\n  dir: /abs/venv\n",
    )?;

    qgate()
        .current_dir(temp.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("environment.dir"))
        .stdout(predicate::str::contains("[1/8]").not());
    Ok(())
}

#[test]
fn completions_for_bash() -> Result<(), Box<dyn std::error::Error>> {
    qgate()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("qgate"));
    Ok(())
}
