//! End-to-end tests for the packfill binary
//!
//! Each test runs in its own temp directory marked as a repository root, so
//! config discovery never escapes into the developer's tree, and points the
//! store at a file inside that directory.

use assert_cmd::assert::OutputAssertExt;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();
        Self { dir }
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    fn store_path(&self) -> PathBuf {
        self.path().join("pack_sizes.json")
    }

    fn write_config(&self, content: &str) {
        let config_dir = self.path().join(".packfill");
        fs::create_dir_all(&config_dir).unwrap();
        fs::write(config_dir.join("config.toml"), content).unwrap();
    }

    /// `packfill --store <tmp>/pack_sizes.json <args>`
    fn cmd(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("packfill"));
        cmd.current_dir(self.path())
            .env_remove("PACKFILL_HOME")
            .env_remove("RUST_LOG")
            .arg("--store")
            .arg(self.store_path())
            .args(args);
        cmd
    }

    /// `packfill <args>` without a store override
    fn bare_cmd(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("packfill"));
        cmd.current_dir(self.path())
            .env_remove("PACKFILL_HOME")
            .env_remove("RUST_LOG")
            .args(args);
        cmd
    }
}

#[test]
fn calculate_json_output_is_canonical() {
    let ws = Workspace::new();

    ws.cmd(&["calculate", "251", "--json"])
        .assert()
        .success()
        .stdout(
            r#"{"fulfilled":500,"overpacked":249,"packs":[{"count":1,"size":500}],"requested":251,"totalPacks":1}
"#,
        );
}

#[test]
fn calculate_scenarios_with_default_sizes() {
    let ws = Workspace::new();

    ws.cmd(&["calculate", "12001", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            r#""packs":[{"count":2,"size":5000},{"count":1,"size":2000},{"count":1,"size":250}]"#,
        ))
        .stdout(predicate::str::contains(r#""totalPacks":4"#));

    ws.cmd(&["calculate", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Fulfilled:   250"))
        .stdout(predicate::str::contains("  1 x 250"));
}

#[test]
fn calculate_does_not_create_store_file() {
    let ws = Workspace::new();

    ws.cmd(&["calculate", "501"]).assert().success();
    assert!(!ws.store_path().exists());
}

#[test]
fn calculate_zero_is_invalid_input() {
    let ws = Workspace::new();

    ws.cmd(&["calculate", "0"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Quantity 0 is not valid"));
}

#[test]
fn calculate_rejects_non_numeric_quantity() {
    let ws = Workspace::new();

    ws.cmd(&["calculate", "many"]).assert().code(2);
    ws.cmd(&["calculate", "-5"]).assert().code(2);
}

#[test]
fn calculate_respects_max_quantity() {
    let ws = Workspace::new();

    ws.cmd(&["--max-quantity", "1000", "calculate", "1001"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("supported maximum of 1000"));
    ws.cmd(&["--max-quantity", "1000", "calculate", "1000"])
        .assert()
        .success();
}

#[test]
fn huge_pack_size_is_rejected_before_searching() {
    let ws = Workspace::new();

    ws.cmd(&["sizes", "add", "2000000000"]).assert().success();
    ws.cmd(&["calculate", "1"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("sizes remove"));

    ws.cmd(&["sizes", "remove", "2000000000"]).assert().success();
    ws.cmd(&["calculate", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Fulfilled:   250"));
}

#[test]
fn sizes_add_list_remove_roundtrip() {
    let ws = Workspace::new();

    ws.cmd(&["sizes", "add", "750"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added pack size 750"));
    ws.cmd(&["sizes", "add", "750"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already present"));

    ws.cmd(&["sizes", "list", "--json"])
        .assert()
        .success()
        .stdout("{\"sizes\":[250,500,750,1000,2000,5000]}\n");

    let stored = fs::read_to_string(ws.store_path()).unwrap();
    assert_eq!(
        stored,
        "{\"sizes\":[250,500,750,1000,2000,5000],\"version\":1}\n"
    );

    ws.cmd(&["calculate", "751", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""fulfilled":1000"#))
        .stdout(predicate::str::contains(r#""totalPacks":1"#));

    ws.cmd(&["sizes", "remove", "750", "--json"])
        .assert()
        .success()
        .stdout("{\"changed\":true,\"size\":750,\"sizes\":[250,500,1000,2000,5000]}\n");
}

#[test]
fn sizes_remove_missing_is_not_found() {
    let ws = Workspace::new();

    ws.cmd(&["sizes", "remove", "999"])
        .assert()
        .code(5)
        .stderr(predicate::str::contains("999"));
}

#[test]
fn sizes_add_zero_is_invalid_input() {
    let ws = Workspace::new();

    ws.cmd(&["sizes", "add", "0"]).assert().code(3);
    assert!(!ws.store_path().exists());
}

#[test]
fn empty_store_reports_no_pack_sizes() {
    let ws = Workspace::new();
    ws.write_config("[store]\ninitial_sizes = []\n");

    ws.cmd(&["sizes", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No pack sizes configured"));
    ws.cmd(&["calculate", "10"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("No pack sizes are available"));
}

#[test]
fn corrupt_store_is_store_failure() {
    let ws = Workspace::new();
    fs::write(ws.store_path(), "{\"sizes\":[250,0],\"version\":1}\n").unwrap();

    ws.cmd(&["calculate", "10"]).assert().code(6);
    ws.cmd(&["sizes", "list"]).assert().code(6);
}

#[test]
fn config_file_initial_sizes_and_store_path() {
    let ws = Workspace::new();
    ws.write_config("[store]\npath = \"sizes.json\"\ninitial_sizes = [23, 31, 53]\n");

    ws.bare_cmd(&["calculate", "500000", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""fulfilled":500000"#))
        .stdout(predicate::str::contains(r#""totalPacks":9438"#));

    ws.bare_cmd(&["sizes", "add", "7"]).assert().success();
    assert!(ws.path().join(".packfill").join("sizes.json").exists());
}

#[test]
fn invalid_config_is_cli_args_error() {
    let ws = Workspace::new();
    ws.write_config("[defaults]\nmax_quantity = 0\n");

    ws.cmd(&["calculate", "10"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("max_quantity"));
}

#[test]
fn explicit_missing_config_is_cli_args_error() {
    let ws = Workspace::new();

    ws.cmd(&["--config", "missing.toml", "calculate", "10"])
        .assert()
        .code(2);
}

#[test]
fn config_command_shows_sources() {
    let ws = Workspace::new();
    ws.write_config("[defaults]\nmax_quantity = 5000\n");

    ws.cmd(&["config", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            r#""max_quantity":{"source":"config","value":"5000"}"#,
        ))
        .stdout(predicate::str::contains(r#""store_path":{"source":"cli""#));

    ws.cmd(&["config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Effective configuration:"))
        .stdout(predicate::str::contains("[default]"));
}

#[test]
fn json_stdout_stays_clean_when_verbose() {
    let ws = Workspace::new();

    let output = ws.cmd(&["calculate", "251", "--json", "--verbose"]).output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let value: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();
    assert_eq!(value["fulfilled"], 500);
}
