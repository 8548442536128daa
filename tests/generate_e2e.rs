//! End-to-end runs of the `ifacegen` binary against Go fixtures.
//!
//! Every test copies its fixture into a temp dir so `--write` never
//! touches the checked-in files.

use assert_cmd::prelude::*;
use assert_fs::prelude::*;
use predicates::prelude::*;
use std::process::Command;

mod util;
use util::{fixture, ifacegen};

/// Generate a new interface and print the whole file
#[test]
fn prints_document_with_new_interface() {
    let tmp = assert_fs::TempDir::new().expect("tempdir");
    let file = fixture(&tmp, "example.go");

    ifacegen()
        .current_dir(tmp.path())
        .args(["example", "ExampleInterface", "example.go"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "package main\n\nimport \"fmt\"\n\ntype ExampleInterface interface {\n",
        ))
        .stdout(predicate::str::contains(
            "}\n\n// example is a concrete type.\ntype example struct{}\n",
        ));

    // Without -w the file stays as it was
    file.assert(predicate::path::eq_file(util::fixture_path("example.go")));
}

/// -i prints only the interface declaration
#[test]
fn interface_only_output() {
    let tmp = assert_fs::TempDir::new().expect("tempdir");
    fixture(&tmp, "example.go");

    let assert = ifacegen()
        .current_dir(tmp.path())
        .args(["-i", "example", "ExampleInterface", "example.go"])
        .assert()
        .success();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).into_owned();

    insta::assert_snapshot!(stdout, @r"
    type ExampleInterface interface {
    	First()
    	Second(one, two string) (example, example)
    }
    ");
}

/// Updating an existing interface keeps its doc, embeds and extra methods
#[test]
fn updates_existing_interface_in_place() {
    let tmp = assert_fs::TempDir::new().expect("tempdir");
    fixture(&tmp, "existing.go");

    let assert = ifacegen()
        .current_dir(tmp.path())
        .args(["--interface-only", "--receivers", "any", "memStore", "Store", "existing.go"])
        .assert()
        .success();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).into_owned();

    insta::assert_snapshot!(stdout, @r"
    // Store persists records.
    type Store interface {
    	io.Closer
    	Get(key string) ([]byte, bool)
    	Put(key string, value []byte) error
    	Close() error
    	Legacy()
    }
    ");
}

/// Pointer-receiver methods are left out unless --receivers any
#[test]
fn value_receivers_by_default() {
    let tmp = assert_fs::TempDir::new().expect("tempdir");
    fixture(&tmp, "existing.go");

    ifacegen()
        .current_dir(tmp.path())
        .args(["-i", "memStore", "Reader", "existing.go"])
        .assert()
        .success()
        .stdout(predicate::eq("type Reader interface {\n\tClose() error\n}\n"));
}

/// -w rewrites the file and a second run changes nothing
#[test]
fn write_back_is_idempotent() {
    let tmp = assert_fs::TempDir::new().expect("tempdir");
    let file = fixture(&tmp, "example.go");

    for _ in 0..2 {
        ifacegen()
            .current_dir(tmp.path())
            .args(["-w", "example", "ExampleInterface", "example.go"])
            .assert()
            .success()
            .stdout(predicate::str::is_empty())
            .stderr(predicate::str::contains("updated example.go"));
    }

    let text = std::fs::read_to_string(file.path()).expect("read back");
    assert_eq!(text.matches("type ExampleInterface interface {").count(), 1);
    assert_eq!(text.matches("First()").count(), 2); // interface + method
}

/// -d shows the inserted lines as a unified diff
#[test]
fn diff_output() {
    let tmp = assert_fs::TempDir::new().expect("tempdir");
    fixture(&tmp, "example.go");

    ifacegen()
        .current_dir(tmp.path())
        .args(["-d", "example", "ExampleInterface", "example.go"])
        .assert()
        .success()
        .stdout(predicate::str::contains("+++ example.go"))
        .stdout(predicate::str::contains("+type ExampleInterface interface {"))
        .stdout(predicate::str::contains("package main").not());
}

/// Config file in the working directory is picked up
#[test]
fn config_file_sets_receivers() {
    let tmp = assert_fs::TempDir::new().expect("tempdir");
    fixture(&tmp, "existing.go");
    tmp.child("ifacegen.toml")
        .write_str("[generate]\nreceivers = \"any\"\n")
        .expect("write config");

    ifacegen()
        .current_dir(tmp.path())
        .args(["-i", "memStore", "Reader", "existing.go"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Put(key string, value []byte) error"));

    // The flag still wins over the file
    ifacegen()
        .current_dir(tmp.path())
        .args(["-i", "--receivers", "value", "memStore", "Reader", "existing.go"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Put(").not());
}

#[test]
fn syntax_error_reports_position() {
    let tmp = assert_fs::TempDir::new().expect("tempdir");
    fixture(&tmp, "broken.go");

    ifacegen()
        .current_dir(tmp.path())
        .args(["T", "I", "broken.go"])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("syntax error at"));
}

#[test]
fn missing_file_fails() {
    ifacegen()
        .args(["T", "I", "does/not/exist.go"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("does/not/exist.go"));
}

#[test]
fn unknown_type_fails() {
    let tmp = assert_fs::TempDir::new().expect("tempdir");
    fixture(&tmp, "example.go");

    ifacegen()
        .current_dir(tmp.path())
        .args(["nope", "I", "example.go"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("nope"));
}

#[test]
fn name_taken_by_struct_fails_without_writing() {
    let tmp = assert_fs::TempDir::new().expect("tempdir");
    let file = fixture(&tmp, "existing.go");

    ifacegen()
        .current_dir(tmp.path())
        .args(["-w", "memStore", "memStore", "existing.go"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("memStore"));

    file.assert(predicate::path::eq_file(util::fixture_path("existing.go")));
}

#[test]
fn missing_positionals_is_a_usage_error() {
    Command::cargo_bin("ifacegen")
        .expect("bin")
        .args(["OnlyType"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn completions_need_no_positionals() {
    ifacegen()
        .args(["--completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ifacegen"));
}

#[test]
fn init_config_writes_default_file() {
    let tmp = assert_fs::TempDir::new().expect("tempdir");

    ifacegen()
        .current_dir(tmp.path())
        .arg("--init-config")
        .assert()
        .success();
    tmp.child("ifacegen.toml")
        .assert(predicate::str::contains("receivers = \"value\""));

    // Second time needs --force
    ifacegen()
        .current_dir(tmp.path())
        .arg("--init-config")
        .assert()
        .code(1);
    ifacegen()
        .current_dir(tmp.path())
        .args(["--init-config", "--force"])
        .assert()
        .success();
}
