#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn sc() -> Command {
    cargo_bin_cmd!("sitecycle")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_sitecycle.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Write `contents` to a temp CSV file and return its path
pub fn write_csv(name: &str, contents: &str) -> String {
    let p = temp_out(name, "csv");
    fs::write(&p, contents).expect("write csv");
    p
}

/// Initialize DB (schema + default locations) in test mode
pub fn init_db(db_path: &str) {
    sc().args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

/// Initialize DB and record a small history through the CLI
pub fn init_db_with_data(db_path: &str) {
    init_db(db_path);

    sc().args([
        "--db",
        db_path,
        "change",
        "L Abdomen (Front)",
        "--at",
        "2025-09-01T08:00:00Z",
    ])
    .assert()
    .success();

    sc().args([
        "--db",
        db_path,
        "change",
        "R Thigh (Side)",
        "--note",
        "sore, red area",
        "--at",
        "2025-09-04T08:30:00Z",
    ])
    .assert()
    .success();
}
