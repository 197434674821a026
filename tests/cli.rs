use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

fn prefs_backup(base: &Path) -> Command {
    let mut cmd = Command::cargo_bin("prefs-backup").unwrap();
    cmd.env("PREFS_BACKUP_DATA_DIR", base).env_remove("RUST_LOG");
    cmd
}

fn store_file(base: &Path) -> std::path::PathBuf {
    base.join("datastore").join("florisboard-app-prefs.json")
}

fn write_store(base: &Path, contents: &str) {
    fs::create_dir_all(base.join("datastore")).unwrap();
    fs::write(store_file(base), contents).unwrap();
}

#[test]
fn test_export_to_stdout() {
    let temp = TempDir::new().unwrap();
    write_store(temp.path(), r#"{"theme":"night"}"#);

    let output = prefs_backup(temp.path())
        .args(["export", "-"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let backup: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(backup["format_version"], "1.0");
    assert_eq!(backup["payload"], r#"{"theme":"night"}"#);
    assert_eq!(backup["producer_version"], env!("CARGO_PKG_VERSION"));
}

#[test]
fn test_export_default_name_then_list() {
    let temp = TempDir::new().unwrap();

    prefs_backup(temp.path())
        .arg("export")
        .assert()
        .success()
        .stderr(predicate::str::contains("florisboard_settings_"));

    prefs_backup(temp.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Total: 1 backup(s)"));
}

#[test]
fn test_import_requires_force() {
    let temp = TempDir::new().unwrap();
    let backup = temp.path().join("backup.json");
    fs::write(
        &backup,
        r#"{"format_version":"1.0","created_at":0,"producer_version":"0.4.0","payload":"{\"a\":\"1\"}"}"#,
    )
    .unwrap();
    write_store(temp.path(), r#"{"keep":"me"}"#);

    prefs_backup(temp.path())
        .args(["import", backup.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("--force"));

    assert_eq!(fs::read_to_string(store_file(temp.path())).unwrap(), r#"{"keep":"me"}"#);
}

#[test]
fn test_export_import_round_trip() {
    let temp = TempDir::new().unwrap();
    let backup = temp.path().join("shared").join("mine.json");
    let original = r#"{"z":"night","a":12345678901234567890123,"glide":"true"}"#;
    write_store(temp.path(), original);

    prefs_backup(temp.path())
        .args(["export", backup.to_str().unwrap()])
        .assert()
        .success();

    write_store(temp.path(), r#"{"theme":"day"}"#);

    prefs_backup(temp.path())
        .args(["import", backup.to_str().unwrap(), "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Restored ~2 preferences"));

    assert_eq!(fs::read_to_string(store_file(temp.path())).unwrap(), original);
}

#[test]
fn test_inspect_malformed_backup() {
    let temp = TempDir::new().unwrap();
    let backup = temp.path().join("broken.json");
    fs::write(&backup, r#"{"format_version":"1.0","producer_version":"0.4.0"}"#).unwrap();

    prefs_backup(temp.path())
        .args(["inspect", backup.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Malformed backup envelope"));
}

#[test]
fn test_import_missing_backup() {
    let temp = TempDir::new().unwrap();

    prefs_backup(temp.path())
        .args(["import", "latest", "--force"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Backup not found: latest"));
}

#[test]
fn test_config_shows_paths() {
    let temp = TempDir::new().unwrap();

    prefs_backup(temp.path())
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("florisboard-app-prefs"));
}

#[test]
fn test_config_store_name_persists() {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("datastore")).unwrap();
    fs::write(temp.path().join("datastore").join("work.json"), r#"{"theme":"work"}"#).unwrap();

    prefs_backup(temp.path())
        .args(["config", "--store-name", "work"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Store name:          work"));

    let output = prefs_backup(temp.path())
        .args(["export", "-"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let backup: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(backup["payload"], r#"{"theme":"work"}"#);
}
