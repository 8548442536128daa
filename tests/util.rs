//! Shared test utilities for integration tests
//!
//! Copies Go fixtures into temp dirs and builds the binary command.

#![allow(dead_code)]

use assert_cmd::prelude::*;
use assert_fs::prelude::*;
use std::path::PathBuf;
use std::process::Command;

/// Path of a checked-in fixture under tests/fixtures
pub fn fixture_path(name: &str) -> PathBuf
{
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Copy a fixture into `tmp` and return the child handle
pub fn fixture(
    tmp: &assert_fs::TempDir,
    name: &str,
) -> assert_fs::fixture::ChildPath
{
    let child = tmp.child(name);
    child
        .write_file(&fixture_path(name))
        .expect("copy fixture");
    child
}

/// The `ifacegen` binary with logging pinned, so ambient env vars
/// never leak into assertions
pub fn ifacegen() -> Command
{
    let mut cmd = Command::cargo_bin("ifacegen").expect("ifacegen binary");
    cmd.env_remove("IFACEGEN_LOG")
        .env("NO_COLOR", "1");
    cmd
}
