use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

#[cfg(not(feature = "storage-rocksdb"))]
#[test]
fn test_rocksdb_fallback_warning() {
    let mut cmd = Command::new(cargo_bin!("shopqr"));
    cmd.env_remove("SHOPQR_DATA_DIR")
        .env_remove("RUST_LOG")
        .args(["--db-path", "some_db", "summary"]);

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("WARNING: Persistent storage requested via --db-path, but 'storage-rocksdb' feature is not enabled. Falling back to In-Memory storage."))
        .stdout(predicate::str::contains("0.00,0.00,0.00,0.00,0.00,0.00,0.00,0"));
}

#[cfg(feature = "storage-rocksdb")]
#[test]
fn test_rocksdb_no_fallback_warning() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("test_db");

    let mut cmd = Command::new(cargo_bin!("shopqr"));
    cmd.env_remove("SHOPQR_DATA_DIR")
        .env_remove("RUST_LOG")
        .arg("--db-path")
        .arg(&db_path)
        .arg("summary");

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("WARNING").not());
}
