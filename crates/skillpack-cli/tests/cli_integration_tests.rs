//! Integration tests for the `skill-validate` and `skill-package` binaries.

#![cfg(test)]
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::str::contains;
use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};
use tempfile::{TempDir, tempdir};
use zip::ZipArchive;

const VALID_SKILL_MD: &str = r#"---
name: my-skill
description: "Does a thing"
---

# My Skill

Run `scripts/run.sh`.
"#;

const CONFIG_SCRIPT: &str = r#"#!/usr/bin/env bash
set -euo pipefail

# ─── Configuration ─────────────────────────
API_KEY="${API_KEY}"
# ──────────────────────────────────────────

curl -H "Authorization: Bearer $API_KEY" https://example.com
"#;

fn make_skill(skill_md: &str) -> (TempDir, PathBuf) {
    let root = tempdir().expect("tempdir");
    let skill = root.path().join("my-skill");
    fs::create_dir_all(skill.join("scripts")).expect("create skill dir");
    fs::write(skill.join("SKILL.md"), skill_md).expect("write SKILL.md");
    (root, skill)
}

fn validate_cmd() -> Command {
    let mut cmd = Command::cargo_bin("skill-validate").expect("skill-validate bin");
    cmd.env_remove("RUST_LOG");
    cmd
}

fn package_cmd() -> Command {
    let mut cmd = Command::cargo_bin("skill-package").expect("skill-package bin");
    cmd.env_remove("RUST_LOG")
        .env_remove("SKILLPACK_ARCHIVER")
        .env_remove("SKILLPACK_NO_INPUT")
        .env_remove("SKILLPACK_ZIP")
        .arg("--archiver")
        .arg("native")
        .arg("--no-input");
    cmd
}

fn read_entry(archive: &Path, name: &str) -> String {
    let mut zip = ZipArchive::new(File::open(archive).expect("open archive")).expect("zip");
    let mut content = String::new();
    zip.by_name(name)
        .expect("entry present")
        .read_to_string(&mut content)
        .expect("read entry");
    content
}

#[test]
fn validate_accepts_minimal_skill() {
    let (_root, skill) = make_skill(VALID_SKILL_MD);

    validate_cmd()
        .arg(&skill)
        .assert()
        .success()
        .stdout(contains("Skill is valid!"));
}

#[test]
fn validate_rejects_non_kebab_case_name() {
    let (_root, skill) = make_skill("---\nname: My_Skill\ndescription: ok\n---\n");

    validate_cmd()
        .arg(&skill)
        .assert()
        .code(1)
        .stdout(contains("Name 'My_Skill' should be kebab-case"));
}

#[test]
fn validate_lists_unexpected_keys() {
    let (_root, skill) =
        make_skill("---\nname: my-skill\ndescription: ok\nextra: true\n---\n");

    validate_cmd()
        .arg(&skill)
        .assert()
        .code(1)
        .stdout(contains("Unexpected key(s) in SKILL.md frontmatter: extra."));
}

#[test]
fn validate_reports_missing_skill_md() {
    let root = tempdir().expect("tempdir");

    validate_cmd()
        .arg(root.path())
        .assert()
        .code(1)
        .stdout(contains("SKILL.md not found"));
}

#[test]
fn validate_wrong_argument_count_exits_one() {
    validate_cmd().assert().code(1);
    validate_cmd().arg("a").arg("b").assert().code(1);
}

#[test]
fn package_bundles_env_file_with_blank_value() {
    let (root, skill) = make_skill(VALID_SKILL_MD);
    fs::write(skill.join("scripts").join("run.sh"), CONFIG_SCRIPT).expect("write script");
    let dist = root.path().join("dist");

    package_cmd()
        .arg(&skill)
        .arg(&dist)
        .env_remove("API_KEY")
        .assert()
        .success()
        .stdout(contains("Added: my-skill/.env"))
        .stdout(contains("Successfully packaged skill to:"))
        .stderr(contains("No value provided for: API_KEY"));

    let archive = dist.join("my-skill.skill");
    assert!(archive.is_file());
    assert_eq!(read_entry(&archive, "my-skill/.env"), "API_KEY=\n");
    assert_eq!(read_entry(&archive, "my-skill/SKILL.md"), VALID_SKILL_MD);
    assert!(!skill.join(".env").exists(), ".env must be removed after packaging");
}

#[test]
fn package_uses_current_environment_value() {
    let (root, skill) = make_skill(VALID_SKILL_MD);
    fs::write(skill.join("scripts").join("run.sh"), CONFIG_SCRIPT).expect("write script");
    let dist = root.path().join("dist");

    package_cmd()
        .arg(&skill)
        .arg(&dist)
        .env("API_KEY", "sk-test-123")
        .assert()
        .success();

    assert_eq!(
        read_entry(&dist.join("my-skill.skill"), "my-skill/.env"),
        "API_KEY=sk-test-123\n"
    );
}

#[test]
fn package_without_env_vars_skips_env_file() {
    let (root, skill) = make_skill(VALID_SKILL_MD);
    let dist = root.path().join("dist");

    package_cmd()
        .arg(&skill)
        .arg(&dist)
        .assert()
        .success()
        .stdout(contains("No environment variables detected"));

    let zip = ZipArchive::new(File::open(dist.join("my-skill.skill")).expect("open")).expect("zip");
    assert!(zip.file_names().all(|n| !n.ends_with(".env")));
}

#[test]
fn package_defaults_to_current_directory() {
    let (root, skill) = make_skill(VALID_SKILL_MD);
    let cwd = root.path().join("work");
    fs::create_dir_all(&cwd).expect("create cwd");

    package_cmd()
        .current_dir(&cwd)
        .arg(&skill)
        .assert()
        .success();

    assert!(cwd.join("my-skill.skill").is_file());
}

#[test]
fn package_invalid_skill_never_archives() {
    let (root, skill) = make_skill("---\nname: My_Skill\ndescription: ok\n---\n");
    fs::write(skill.join("scripts").join("run.sh"), CONFIG_SCRIPT).expect("write script");
    let dist = root.path().join("dist");

    package_cmd()
        .arg(&skill)
        .arg(&dist)
        .assert()
        .code(1)
        .stderr(contains("Validation failed: Name 'My_Skill'"));

    assert!(!dist.exists());
    assert!(!skill.join(".env").exists());
}

#[test]
fn package_reports_missing_folder() {
    let root = tempdir().expect("tempdir");

    package_cmd()
        .arg(root.path().join("missing"))
        .assert()
        .code(1)
        .stderr(contains("Skill folder not found"));
}

#[test]
fn package_reports_missing_skill_md() {
    let root = tempdir().expect("tempdir");

    package_cmd()
        .arg(root.path())
        .assert()
        .code(1)
        .stderr(contains("SKILL.md not found in"));
}

#[test]
fn package_surfaces_zip_tool_failure() {
    let (root, skill) = make_skill(VALID_SKILL_MD);
    fs::write(skill.join("scripts").join("run.sh"), CONFIG_SCRIPT).expect("write script");

    Command::cargo_bin("skill-package")
        .expect("skill-package bin")
        .env_remove("RUST_LOG")
        .env_remove("SKILLPACK_ARCHIVER")
        .arg(&skill)
        .arg(root.path().join("dist"))
        .arg("--no-input")
        .arg("--zip-program")
        .arg("definitely-not-a-zip-binary-7f3a")
        .assert()
        .code(1)
        .stderr(contains("Error creating .skill file"));

    assert!(!skill.join(".env").exists());
}

#[test]
fn package_accepts_boolish_no_input_env() {
    for value in ["1", "yes", "on", "0", "false"] {
        let (root, skill) = make_skill(VALID_SKILL_MD);
        fs::write(skill.join("scripts").join("run.sh"), CONFIG_SCRIPT).expect("write script");
        let dist = root.path().join("dist");

        Command::cargo_bin("skill-package")
            .expect("skill-package bin")
            .env_remove("RUST_LOG")
            .env_remove("SKILLPACK_ZIP")
            .env("SKILLPACK_ARCHIVER", "native")
            .env("SKILLPACK_NO_INPUT", value)
            .env("API_KEY", "sk-env")
            .arg(&skill)
            .arg(&dist)
            .assert()
            .success();

        assert_eq!(
            read_entry(&dist.join("my-skill.skill"), "my-skill/.env"),
            "API_KEY=sk-env\n",
            "SKILLPACK_NO_INPUT={value}"
        );
    }
}

#[test]
fn package_too_many_arguments_exits_one() {
    Command::cargo_bin("skill-package")
        .expect("skill-package bin")
        .args(["a", "b", "c"])
        .assert()
        .code(1);
}
