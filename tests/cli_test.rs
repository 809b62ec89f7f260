use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn workbench(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("workbench").unwrap();
    cmd.env("WORKBENCH_HOME", home.path()).env("NO_COLOR", "1");
    cmd
}

fn write_doc(home: &TempDir) -> std::path::PathBuf {
    let path = home.path().join("doc.md");
    fs::write(
        &path,
        "# Guide\n\nintro\n\n## Install\n\nsteps\n\n## Usage\n\n### Flags\n\n# FAQ\n# FAQ\n",
    )
    .unwrap();
    path
}

#[test]
fn test_outline_tree() {
    let home = TempDir::new().unwrap();
    let doc = write_doc(&home);

    workbench(&home)
        .arg("outline")
        .arg(&doc)
        .assert()
        .success()
        .stdout(predicate::str::contains("# Guide"))
        .stdout(predicate::str::contains("### Flags"))
        .stdout(predicate::str::contains("L1-12"));
}

#[test]
fn test_outline_json_nests_children() {
    let home = TempDir::new().unwrap();
    let doc = write_doc(&home);

    let output = workbench(&home)
        .args(["outline", "--json"])
        .arg(&doc)
        .output()
        .unwrap();
    assert!(output.status.success());

    let symbols: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let roots = symbols.as_array().unwrap();
    assert_eq!(roots.len(), 3);
    assert_eq!(roots[0]["name"], "# Guide");
    assert_eq!(roots[0]["children"][1]["children"][0]["name"], "### Flags");
}

#[test]
fn test_toc_and_lookup() {
    let home = TempDir::new().unwrap();
    let doc = write_doc(&home);

    workbench(&home)
        .args(["toc", "--depth", "2"])
        .arg(&doc)
        .assert()
        .success()
        .stdout(predicate::str::contains("  - [Install](#install)"))
        .stdout(predicate::str::contains("- [FAQ](#faq-1)"))
        .stdout(predicate::str::contains("Flags").not());

    workbench(&home)
        .arg("lookup")
        .arg(&doc)
        .arg("#faq-1")
        .assert()
        .success()
        .stdout(predicate::str::contains("#faq-1"))
        .stdout(predicate::str::contains("L14-15"));
}

#[test]
fn test_profile_commands() {
    let home = TempDir::new().unwrap();

    workbench(&home)
        .args(["profile", "create", "Work", "--use-default", "settings", "-w", "ws1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Profile created: Work"));

    workbench(&home)
        .args(["profile", "create", "Work"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    workbench(&home)
        .args(["profile", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Default"))
        .stdout(predicate::str::contains("shares: settings"))
        .stdout(predicate::str::contains("workspace: ws1"));

    workbench(&home)
        .args(["profile", "remove", "Default"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot remove default profile"));

    workbench(&home)
        .args(["profile", "remove", "Work"])
        .assert()
        .success();

    assert!(!home.path().join("profiles").exists());

    workbench(&home)
        .args(["profile", "show", "ws1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Default"));
}

#[test]
fn test_config_round_trip() {
    let home = TempDir::new().unwrap();

    workbench(&home)
        .args(["config", "toc-depth", "2"])
        .assert()
        .success();

    workbench(&home)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("toc-depth = 2"));

    workbench(&home)
        .args(["config", "toc-depth", "12"])
        .assert()
        .failure();
}
