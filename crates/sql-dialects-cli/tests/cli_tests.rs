//! CLI integration tests for sql-dialects.
//!
//! These tests verify command-line argument parsing, help output,
//! generated SQL and exit codes for various error conditions.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

/// Get a command for the sql-dialects binary.
fn cmd() -> Command {
    Command::cargo_bin("sql-dialects").unwrap()
}

const USERS_SCHEMA: &str = r#"
tables:
  - name: users
    columns:
      - name: id
        type: integer
        autoincrement: true
      - name: email
        type: string
        length: 180
    indexes:
      - name: primary
        columns: [id]
        is_primary: true
sequences:
  - name: audit_seq
"#;

const USERS_WITH_NAME_SCHEMA: &str = r#"
tables:
  - name: users
    columns:
      - name: id
        type: integer
        autoincrement: true
      - name: email
        type: string
        length: 180
      - name: name
        type: string
        is_nullable: true
    indexes:
      - name: primary
        columns: [id]
        is_primary: true
sequences:
  - name: audit_seq
"#;

fn write_temp(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

// =============================================================================
// Help and Version Tests
// =============================================================================

#[test]
fn test_help_shows_all_commands() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("create"))
        .stdout(predicate::str::contains("drop"))
        .stdout(predicate::str::contains("diff"))
        .stdout(predicate::str::contains("introspect"))
        .stdout(predicate::str::contains("platforms"));
}

#[test]
fn test_introspect_subcommand_help() {
    cmd()
        .args(["introspect", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--table"))
        .stdout(predicate::str::contains("--database"));
}

#[test]
fn test_version_flag() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("sql-dialects"));
}

// =============================================================================
// Global Flags Tests
// =============================================================================

#[test]
fn test_global_flag_defaults() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--platform"))
        .stdout(predicate::str::contains("--output-json"))
        .stdout(predicate::str::contains("--log-format"))
        .stdout(predicate::str::contains("[default: text]"))
        .stdout(predicate::str::contains("[default: info]"));
}

// =============================================================================
// Generation Tests
// =============================================================================

#[test]
fn test_create_postgres() {
    let schema = write_temp(USERS_SCHEMA);
    cmd()
        .args(["--platform", "postgres", "create"])
        .arg(schema.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "CREATE SEQUENCE audit_seq INCREMENT BY 1 MINVALUE 1 START 1;",
        ))
        .stdout(predicate::str::contains(
            "CREATE TABLE users (id SERIAL NOT NULL, email VARCHAR(180) NOT NULL, PRIMARY KEY(id));",
        ));
}

#[test]
fn test_create_sqlite_skips_sequences() {
    let schema = write_temp(USERS_SCHEMA);
    cmd()
        .args(["--platform", "sqlite", "create"])
        .arg(schema.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "CREATE TABLE users (id INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL, email VARCHAR(180) NOT NULL);",
        ))
        .stdout(predicate::str::contains("SEQUENCE").not());
}

#[test]
fn test_create_mysql_applies_config_defaults() {
    let schema = write_temp(USERS_SCHEMA);
    let config = write_temp(
        r#"
platform:
  type: mysql
defaults:
  engine: MyISAM
"#,
    );
    cmd()
        .arg("--config")
        .arg(config.path())
        .arg("create")
        .arg(schema.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("ENGINE = MyISAM;"));
}

#[test]
fn test_drop_oracle_json_output() {
    let schema = write_temp(USERS_SCHEMA);
    let output = cmd()
        .args(["--platform", "oracle", "--output-json", "drop"])
        .arg(schema.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let statements: Vec<String> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(statements, vec!["DROP TABLE users", "DROP SEQUENCE audit_seq"]);
}

#[test]
fn test_diff_postgres() {
    let from = write_temp(USERS_SCHEMA);
    let to = write_temp(USERS_WITH_NAME_SCHEMA);
    cmd()
        .args(["--platform", "postgres", "diff"])
        .arg(from.path())
        .arg(to.path())
        .assert()
        .success()
        .stdout("ALTER TABLE users ADD name VARCHAR(255) DEFAULT NULL;\n");
}

#[test]
fn test_diff_identical_schemas_is_empty() {
    let from = write_temp(USERS_SCHEMA);
    let to = write_temp(USERS_SCHEMA);
    cmd()
        .args(["--platform", "sqlite", "diff"])
        .arg(from.path())
        .arg(to.path())
        .assert()
        .success()
        .stdout("");
}

#[test]
fn test_introspect_table_sqlite() {
    cmd()
        .args(["--platform", "sqlite", "introspect", "--table", "users"])
        .assert()
        .success()
        .stdout(predicate::str::contains("PRAGMA table_info('users');"))
        .stdout(predicate::str::contains("PRAGMA index_list('users');"));
}

#[test]
fn test_platforms_lists_builtins() {
    cmd()
        .arg("platforms")
        .assert()
        .success()
        .stdout(predicate::str::contains("mariadb"))
        .stdout(predicate::str::contains("oracle"))
        .stdout(predicate::str::contains("max_identifier=30"));
}

#[test]
fn test_platforms_json() {
    let output = cmd().args(["--output-json", "platforms"]).output().unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let sqlite = value
        .as_array()
        .unwrap()
        .iter()
        .find(|p| p["name"] == "sqlite")
        .unwrap();
    assert_eq!(sqlite["capabilities"]["sequences"], false);
}

#[test]
fn test_rust_log_overrides_verbosity() {
    let schema = write_temp(USERS_SCHEMA);
    cmd()
        .env_remove("RUST_LOG")
        .args(["--platform", "sqlite", "create"])
        .arg(schema.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("Loaded schema").not());

    cmd()
        .env("RUST_LOG", "debug")
        .args(["--platform", "sqlite", "create"])
        .arg(schema.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("Loaded schema"));
}

// =============================================================================
// Exit Code Tests
// =============================================================================

#[test]
fn test_missing_platform_exit_code() {
    let schema = write_temp(USERS_SCHEMA);
    cmd()
        .arg("create")
        .arg(schema.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No platform selected"));
}

#[test]
fn test_unknown_platform_exit_code() {
    let schema = write_temp(USERS_SCHEMA);
    cmd()
        .args(["--platform", "informix", "create"])
        .arg(schema.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Unknown platform type"));
}

#[test]
fn test_invalid_definition_exit_code() {
    let schema = write_temp(
        r#"
tables:
  - name: empty
    columns: []
"#,
    );
    cmd()
        .args(["--platform", "mysql", "create"])
        .arg(schema.path())
        .assert()
        .code(3)
        .stderr(predicate::str::contains("No columns specified"));
}

#[test]
fn test_missing_schema_file_exit_code() {
    cmd()
        .args(["--platform", "mysql", "create", "/nonexistent/schema.yaml"])
        .assert()
        .code(7);
}

#[test]
fn test_unknown_subcommand() {
    cmd()
        .arg("migrate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}
