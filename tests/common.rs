#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn rctl() -> Command {
    cargo_bin_cmd!("rosterctl")
}

/// Create a unique test DB path inside the system temp dir and remove any
/// existing file (plus its session file)
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rosterctl.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    fs::remove_file(format!("{}.session", &db_path)).ok();
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

/// Initialize the database schema.
pub fn init_db(db_path: &str) {
    rctl()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

/// Log in as `username` with `password`.
pub fn login(db_path: &str, username: &str, password: &str) {
    rctl()
        .args(["--db", db_path, "login", username, "--password", password])
        .assert()
        .success();
}

/// Create a user while logged in as an admin (or as the bootstrap user).
pub fn add_user(db_path: &str, username: &str, full_name: &str, password: &str) {
    rctl()
        .args([
            "--db",
            db_path,
            "user",
            "add",
            username,
            "--full-name",
            full_name,
            "--password",
            password,
        ])
        .assert()
        .success();
}

/// Initialize DB, bootstrap an "admin" account and two staff accounts
/// (alice, bob), and leave the session logged in as admin.
pub fn init_db_with_staff(db_path: &str) {
    init_db(db_path);

    // First user bootstraps as administrator without a session.
    add_user(db_path, "admin", "Roster Admin", "admin123");
    login(db_path, "admin", "admin123");

    add_user(db_path, "alice", "Alice Anders", "alice123");
    add_user(db_path, "bob", "Bob Barker", "bob123");
}

/// Assign a shift as the currently logged-in admin.
pub fn set_shift(db_path: &str, username: &str, date: &str, code: &str) {
    rctl()
        .args(["--db", db_path, "shift", "set", username, date, code])
        .assert()
        .success();
}
