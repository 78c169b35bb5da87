#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn rpc() -> Command {
    cargo_bin_cmd!("rpaycheck")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rpaycheck.sqlite", name));
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

/// Initialize a fresh SQLite-backed test database
pub fn init_db(db_path: &str) {
    rpc()
        .args(["--db", db_path, "--storage", "sqlite", "--test", "init"])
        .assert()
        .success();
}

/// Run `estimate --json` against a SQLite DB and return the parsed result
pub fn estimate_json(db_path: &str, hours: &str, net: Option<&str>) -> serde_json::Value {
    let mut args = vec!["--db", db_path, "--storage", "sqlite", "estimate", hours, "--json"];
    if let Some(n) = net {
        args.extend(["--net", n]);
    }

    let out = rpc().args(&args).assert().success().get_output().stdout.clone();
    serde_json::from_slice(&out).expect("estimate --json prints valid JSON")
}

pub fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}
