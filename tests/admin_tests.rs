use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::{init_db_with_staff, login, rctl, set_shift, setup_test_db, temp_out};

#[test]
fn test_generate_fills_month_with_pattern() {
    let db_path = setup_test_db("generate_month");
    init_db_with_staff(&db_path);

    // Fix the staff order so the generated cells are deterministic.
    rctl()
        .args([
            "--db", &db_path, "order", "set", "--month", "2025-03", "admin", "alice", "bob",
        ])
        .assert()
        .success();

    rctl()
        .args([
            "--db",
            &db_path,
            "generate",
            "--from",
            "2025-03-01",
            "--to",
            "2025-03-31",
        ])
        .assert()
        .success()
        .stdout(contains("Roster generated: 93 shifts"));

    // First staff member starts the default rotation on day one: N.
    let out_file = temp_out("generate_grid", "csv");
    rctl()
        .args([
            "--db", &db_path, "roster", "--month", "2025-03", "--csv", &out_file,
        ])
        .assert()
        .success();
    let content = std::fs::read_to_string(&out_file).expect("read grid csv");
    let admin_row = content
        .lines()
        .find(|l| l.starts_with("admin"))
        .expect("admin row");
    let cells: Vec<&str> = admin_row.split(',').collect();
    // rotation: N,N,N,O,O,E,E,E,O,O,M,M,M,O,O with admin at offset 0
    assert_eq!(cells[2], "N");
    assert_eq!(cells[5], "O");
    assert_eq!(cells[7], "E");

    // alice has staff index 1 → offset 3: first day is O.
    let alice_row = content
        .lines()
        .find(|l| l.starts_with("alice"))
        .expect("alice row");
    let alice_cells: Vec<&str> = alice_row.split(',').collect();
    assert_eq!(alice_cells[2], "O");
}

#[test]
fn test_generate_custom_pattern_and_overwrite() {
    let db_path = setup_test_db("generate_custom");
    init_db_with_staff(&db_path);
    set_shift(&db_path, "alice", "2025-04-01", "AL");

    rctl()
        .args([
            "--db",
            &db_path,
            "generate",
            "--from",
            "2025-04-01",
            "--to",
            "2025-04-03",
            "--pattern",
            "CTR,O",
        ])
        .assert()
        .success();

    // The pre-existing AL cell was overwritten by the generator.
    login(&db_path, "alice", "alice123");
    rctl()
        .args(["--db", &db_path, "dashboard", "--month", "2025-04"])
        .assert()
        .success()
        .stdout(contains("Annual Leave").not());
}

#[test]
fn test_generate_requires_admin() {
    let db_path = setup_test_db("generate_admin_only");
    init_db_with_staff(&db_path);
    login(&db_path, "alice", "alice123");

    rctl()
        .args([
            "--db",
            &db_path,
            "generate",
            "--from",
            "2025-03-01",
            "--to",
            "2025-03-31",
        ])
        .assert()
        .failure()
        .stderr(contains("administrator"));
}

#[test]
fn test_generate_rejects_inverted_range() {
    let db_path = setup_test_db("generate_inverted");
    init_db_with_staff(&db_path);

    rctl()
        .args([
            "--db",
            &db_path,
            "generate",
            "--from",
            "2025-03-31",
            "--to",
            "2025-03-01",
        ])
        .assert()
        .failure()
        .stderr(contains("before start"));
}

#[test]
fn test_stats_counts() {
    let db_path = setup_test_db("stats");
    init_db_with_staff(&db_path);
    set_shift(&db_path, "alice", "2025-03-10", "N");
    set_shift(&db_path, "bob", "2025-03-12", "M");

    login(&db_path, "alice", "alice123");
    rctl()
        .args([
            "--db",
            &db_path,
            "exchange",
            "new",
            "--with",
            "bob",
            "--mine",
            "2025-03-10",
            "--theirs",
            "2025-03-12",
        ])
        .assert()
        .success();

    login(&db_path, "admin", "admin123");
    rctl()
        .args(["--db", &db_path, "stats"])
        .assert()
        .success()
        .stdout(contains("Users              : 3"))
        .stdout(contains("Total shifts       : 2"))
        .stdout(contains("Exchanges pending  : 1"));
}

#[test]
fn test_stats_requires_admin() {
    let db_path = setup_test_db("stats_admin_only");
    init_db_with_staff(&db_path);
    login(&db_path, "bob", "bob123");

    rctl()
        .args(["--db", &db_path, "stats"])
        .assert()
        .failure()
        .stderr(contains("administrator"));
}

#[test]
fn test_shift_set_requires_admin() {
    let db_path = setup_test_db("shift_admin_only");
    init_db_with_staff(&db_path);
    login(&db_path, "alice", "alice123");

    rctl()
        .args(["--db", &db_path, "shift", "set", "bob", "2025-03-10", "N"])
        .assert()
        .failure()
        .stderr(contains("administrator"));
}

#[test]
fn test_shift_set_overwrites_existing_cell() {
    let db_path = setup_test_db("shift_overwrite");
    init_db_with_staff(&db_path);
    set_shift(&db_path, "alice", "2025-03-10", "N");
    set_shift(&db_path, "alice", "2025-03-10", "AL");

    rctl()
        .args([
            "--db",
            &db_path,
            "shift",
            "list",
            "--from",
            "2025-03-10",
            "--to",
            "2025-03-10",
        ])
        .assert()
        .success()
        .stdout(contains("AL"))
        .stdout(contains("1 shift(s)"));
}

#[test]
fn test_shift_set_rejects_unknown_code() {
    let db_path = setup_test_db("shift_bad_code");
    init_db_with_staff(&db_path);

    rctl()
        .args(["--db", &db_path, "shift", "set", "alice", "2025-03-10", "XX"])
        .assert()
        .failure()
        .stderr(contains("Invalid shift code"));
}

#[test]
fn test_shift_del() {
    let db_path = setup_test_db("shift_del");
    init_db_with_staff(&db_path);
    set_shift(&db_path, "alice", "2025-03-10", "N");

    rctl()
        .args(["--db", &db_path, "shift", "del", "alice", "2025-03-10"])
        .assert()
        .success()
        .stdout(contains("Removed shift"));

    rctl()
        .args([
            "--db",
            &db_path,
            "shift",
            "list",
            "--from",
            "2025-03-10",
            "--to",
            "2025-03-10",
        ])
        .assert()
        .success()
        .stdout(contains("0 shift(s)"));
}

#[test]
fn test_export_csv_and_json() {
    let db_path = setup_test_db("export_shifts");
    init_db_with_staff(&db_path);
    set_shift(&db_path, "alice", "2025-03-10", "N");
    set_shift(&db_path, "bob", "2025-03-11", "E");

    let csv_file = temp_out("export_shifts", "csv");
    rctl()
        .args([
            "--db", &db_path, "export", "--format", "csv", "--file", &csv_file, "--month",
            "2025-03",
        ])
        .assert()
        .success()
        .stdout(contains("CSV export completed"));
    let csv_content = std::fs::read_to_string(&csv_file).expect("read csv");
    assert!(csv_content.contains("2025-03-10,alice,Alice Anders,N"));

    let json_file = temp_out("export_shifts", "json");
    rctl()
        .args([
            "--db", &db_path, "export", "--format", "json", "--file", &json_file, "--month",
            "2025-03",
        ])
        .assert()
        .success();
    let json_content = std::fs::read_to_string(&json_file).expect("read json");
    assert!(json_content.contains("\"username\": \"bob\""));
    assert!(json_content.contains("\"shift_code\": \"E\""));
}

#[test]
fn test_export_refuses_overwrite_without_force() {
    let db_path = setup_test_db("export_force");
    init_db_with_staff(&db_path);

    let csv_file = temp_out("export_force", "csv");
    std::fs::write(&csv_file, "existing").expect("pre-create file");

    rctl()
        .args([
            "--db", &db_path, "export", "--format", "csv", "--file", &csv_file, "--month",
            "2025-03",
        ])
        .assert()
        .failure()
        .stderr(contains("already exists"));

    rctl()
        .args([
            "--db", &db_path, "export", "--format", "csv", "--file", &csv_file, "--month",
            "2025-03", "--force",
        ])
        .assert()
        .success();
}

#[test]
fn test_event_add_and_list() {
    let db_path = setup_test_db("events");
    init_db_with_staff(&db_path);

    rctl()
        .args([
            "--db",
            &db_path,
            "event",
            "add",
            "2025-03-15",
            "Safety briefing",
            "--type",
            "meeting",
        ])
        .assert()
        .success();

    rctl()
        .args(["--db", &db_path, "event", "list", "--month", "2025-03"])
        .assert()
        .success()
        .stdout(contains("Safety briefing"))
        .stdout(contains("meeting"));

    rctl()
        .args(["--db", &db_path, "event", "list", "--month", "2025-04"])
        .assert()
        .success()
        .stdout(contains("No events"));
}

#[test]
fn test_db_maintenance_and_log() {
    let db_path = setup_test_db("db_maintenance");
    init_db_with_staff(&db_path);
    set_shift(&db_path, "alice", "2025-03-10", "N");

    rctl()
        .args(["--db", &db_path, "db", "--check"])
        .assert()
        .success()
        .stdout(contains("integrity OK"));

    rctl()
        .args(["--db", &db_path, "db", "--info"])
        .assert()
        .success()
        .stdout(contains("Schema version : 1"))
        .stdout(contains("Users          : 3"));

    // Mutations left an audit trail.
    rctl()
        .args(["--db", &db_path, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("shift_set"))
        .stdout(contains("user_add"));
}

#[test]
fn test_user_deactivate_hides_from_roster() {
    let db_path = setup_test_db("deactivate_roster");
    init_db_with_staff(&db_path);

    rctl()
        .args(["--db", &db_path, "user", "deactivate", "bob"])
        .assert()
        .success();

    rctl()
        .args(["--db", &db_path, "roster", "--month", "2025-03"])
        .assert()
        .success()
        .stdout(contains("alice"))
        .stdout(contains("bob").not());

    rctl()
        .args(["--db", &db_path, "user", "list"])
        .assert()
        .success()
        .stdout(contains("bob").not());

    rctl()
        .args(["--db", &db_path, "user", "list", "--all"])
        .assert()
        .success()
        .stdout(contains("bob"));
}
