use predicates::str::contains;

mod common;
use common::{add_user, init_db, init_db_with_staff, login, rctl, setup_test_db};

#[test]
fn test_login_success_populates_session() {
    let db_path = setup_test_db("login_success");
    init_db_with_staff(&db_path);

    rctl()
        .args(["--db", &db_path, "login", "alice", "--password", "alice123"])
        .assert()
        .success()
        .stdout(contains("Logged in as alice"));

    rctl()
        .args(["--db", &db_path, "whoami"])
        .assert()
        .success()
        .stdout(contains("alice"))
        .stdout(contains("Alice Anders"));
}

#[test]
fn test_login_wrong_password_fails() {
    let db_path = setup_test_db("login_wrong_pw");
    init_db_with_staff(&db_path);

    rctl()
        .args(["--db", &db_path, "login", "alice", "--password", "nope"])
        .assert()
        .failure()
        .stderr(contains("Invalid username or password"));
}

#[test]
fn test_login_unknown_user_fails() {
    let db_path = setup_test_db("login_unknown");
    init_db(&db_path);
    add_user(&db_path, "admin", "Roster Admin", "admin123");

    rctl()
        .args(["--db", &db_path, "login", "ghost", "--password", "whatever"])
        .assert()
        .failure()
        .stderr(contains("Invalid username or password"));
}

#[test]
fn test_inactive_account_fails_even_with_correct_password() {
    let db_path = setup_test_db("login_inactive");
    init_db_with_staff(&db_path);

    rctl()
        .args(["--db", &db_path, "user", "deactivate", "alice"])
        .assert()
        .success();

    // Correct password, but the account is inactive.
    rctl()
        .args(["--db", &db_path, "login", "alice", "--password", "alice123"])
        .assert()
        .failure()
        .stderr(contains("inactive"));

    // Wrong password gives the same inactive message, not a credentials hint.
    rctl()
        .args(["--db", &db_path, "login", "alice", "--password", "nope"])
        .assert()
        .failure()
        .stderr(contains("inactive"));
}

#[test]
fn test_logout_clears_session() {
    let db_path = setup_test_db("logout");
    init_db_with_staff(&db_path);
    login(&db_path, "alice", "alice123");

    rctl()
        .args(["--db", &db_path, "logout"])
        .assert()
        .success();

    rctl()
        .args(["--db", &db_path, "whoami"])
        .assert()
        .failure()
        .stderr(contains("Not logged in"));
}

#[test]
fn test_passwd_changes_own_password() {
    let db_path = setup_test_db("passwd");
    init_db_with_staff(&db_path);
    login(&db_path, "alice", "alice123");

    rctl()
        .args([
            "--db", &db_path, "passwd", "--current", "alice123", "--new", "s3cret!",
        ])
        .assert()
        .success()
        .stdout(contains("Password updated"));

    rctl()
        .args(["--db", &db_path, "login", "alice", "--password", "alice123"])
        .assert()
        .failure();

    rctl()
        .args(["--db", &db_path, "login", "alice", "--password", "s3cret!"])
        .assert()
        .success();
}

#[test]
fn test_first_user_bootstraps_admin() {
    let db_path = setup_test_db("bootstrap_admin");
    init_db(&db_path);

    rctl()
        .args([
            "--db",
            &db_path,
            "user",
            "add",
            "root",
            "--full-name",
            "First Admin",
            "--password",
            "rootpw",
        ])
        .assert()
        .success()
        .stdout(contains("administrator"));

    login(&db_path, "root", "rootpw");
    rctl()
        .args(["--db", &db_path, "whoami"])
        .assert()
        .success()
        .stdout(contains("admin     : yes"));
}

#[test]
fn test_user_add_requires_admin_after_bootstrap() {
    let db_path = setup_test_db("add_requires_admin");
    init_db_with_staff(&db_path);
    login(&db_path, "alice", "alice123");

    rctl()
        .args([
            "--db",
            &db_path,
            "user",
            "add",
            "eve",
            "--full-name",
            "Eve Evil",
            "--password",
            "evepw",
        ])
        .assert()
        .failure()
        .stderr(contains("administrator"));
}

#[test]
fn test_duplicate_username_rejected() {
    let db_path = setup_test_db("duplicate_user");
    init_db_with_staff(&db_path);

    rctl()
        .args([
            "--db",
            &db_path,
            "user",
            "add",
            "alice",
            "--full-name",
            "Alice Again",
            "--password",
            "other",
        ])
        .assert()
        .failure()
        .stderr(contains("already taken"));
}
