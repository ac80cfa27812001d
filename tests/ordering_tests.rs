use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::{init_db_with_staff, login, rctl, setup_test_db};

#[test]
fn test_order_set_and_show() {
    let db_path = setup_test_db("order_set");
    init_db_with_staff(&db_path);

    rctl()
        .args([
            "--db", &db_path, "order", "set", "--month", "2025-03", "bob", "alice", "admin",
        ])
        .assert()
        .success()
        .stdout(contains("3 staff"));

    // bob first, alice second, admin third.
    let out = rctl()
        .args(["--db", &db_path, "order", "show", "--month", "2025-03"])
        .output()
        .expect("run order show");
    let stdout = String::from_utf8_lossy(&out.stdout).to_string();
    let bob_pos = stdout.find("bob").expect("bob listed");
    let alice_pos = stdout.find("alice").expect("alice listed");
    let admin_pos = stdout.find("admin").expect("admin listed");
    assert!(bob_pos < alice_pos && alice_pos < admin_pos);
}

#[test]
fn test_order_save_is_fully_replacing() {
    let db_path = setup_test_db("order_replace");
    init_db_with_staff(&db_path);

    rctl()
        .args([
            "--db", &db_path, "order", "set", "--month", "2025-03", "alice", "bob", "admin",
        ])
        .assert()
        .success();

    // Saving [bob, alice] afterwards leaves exactly 2 rows, not 3.
    rctl()
        .args([
            "--db", &db_path, "order", "set", "--month", "2025-03", "bob", "alice",
        ])
        .assert()
        .success()
        .stdout(contains("2 staff"));

    rctl()
        .args(["--db", &db_path, "order", "show", "--month", "2025-03"])
        .assert()
        .success()
        .stdout(contains("bob"))
        .stdout(contains("alice"))
        .stdout(contains("admin").not());
}

#[test]
fn test_order_set_does_not_touch_other_months() {
    let db_path = setup_test_db("order_months");
    init_db_with_staff(&db_path);

    rctl()
        .args([
            "--db", &db_path, "order", "set", "--month", "2025-03", "alice", "bob",
        ])
        .assert()
        .success();
    rctl()
        .args(["--db", &db_path, "order", "set", "--month", "2025-04", "bob"])
        .assert()
        .success();

    rctl()
        .args(["--db", &db_path, "order", "show", "--month", "2025-03"])
        .assert()
        .success()
        .stdout(contains("alice"));
}

#[test]
fn test_order_move_up() {
    let db_path = setup_test_db("order_move");
    init_db_with_staff(&db_path);

    rctl()
        .args([
            "--db", &db_path, "order", "set", "--month", "2025-03", "alice", "bob", "admin",
        ])
        .assert()
        .success();

    rctl()
        .args([
            "--db", &db_path, "order", "move", "--month", "2025-03", "bob", "--up",
        ])
        .assert()
        .success()
        .stdout(contains("Moved bob up"));

    let out = rctl()
        .args(["--db", &db_path, "order", "show", "--month", "2025-03"])
        .output()
        .expect("run order show");
    let stdout = String::from_utf8_lossy(&out.stdout).to_string();
    let bob_pos = stdout.find("bob").expect("bob listed");
    let alice_pos = stdout.find("alice").expect("alice listed");
    assert!(bob_pos < alice_pos);
}

#[test]
fn test_order_mutations_require_admin() {
    let db_path = setup_test_db("order_admin_only");
    init_db_with_staff(&db_path);
    login(&db_path, "alice", "alice123");

    rctl()
        .args([
            "--db", &db_path, "order", "set", "--month", "2025-03", "alice", "bob",
        ])
        .assert()
        .failure()
        .stderr(contains("administrator"));
}

#[test]
fn test_order_show_falls_back_to_active_staff() {
    let db_path = setup_test_db("order_fallback");
    init_db_with_staff(&db_path);

    rctl()
        .args(["--db", &db_path, "order", "show", "--month", "2025-07"])
        .assert()
        .success()
        .stdout(contains("No staff ordering saved"))
        .stdout(contains("alice"));
}
