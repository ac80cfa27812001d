use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::{init_db_with_staff, login, rctl, set_shift, setup_test_db};

/// Seed: alice works N on 2025-03-10, bob works M on 2025-03-12.
fn seed_shifts(db_path: &str) {
    set_shift(db_path, "alice", "2025-03-10", "N");
    set_shift(db_path, "bob", "2025-03-12", "M");
}

#[test]
fn test_exchange_create_and_list() {
    let db_path = setup_test_db("exchange_create");
    init_db_with_staff(&db_path);
    seed_shifts(&db_path);

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
            "--reason",
            "family event",
        ])
        .assert()
        .success()
        .stdout(contains("sent to bob"));

    rctl()
        .args(["--db", &db_path, "exchange", "list"])
        .assert()
        .success()
        .stdout(contains("pending"))
        .stdout(contains("alice"))
        .stdout(contains("bob"))
        .stdout(contains("family event"));
}

#[test]
fn test_exchange_missing_shift_creates_nothing() {
    let db_path = setup_test_db("exchange_missing_shift");
    init_db_with_staff(&db_path);
    // alice has a shift; bob has none on the requested date
    set_shift(&db_path, "alice", "2025-03-10", "N");

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
        .failure()
        .stderr(contains("No shift found for bob on 2025-03-12"));

    // No partial write: nothing to list.
    rctl()
        .args(["--db", &db_path, "exchange", "list"])
        .assert()
        .success()
        .stdout(contains("No exchange requests"));
}

#[test]
fn test_exchange_requester_shift_missing_too() {
    let db_path = setup_test_db("exchange_missing_own");
    init_db_with_staff(&db_path);
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
        .failure()
        .stderr(contains("No shift found for alice on 2025-03-10"));
}

#[test]
fn test_exchange_with_self_rejected() {
    let db_path = setup_test_db("exchange_self");
    init_db_with_staff(&db_path);
    set_shift(&db_path, "alice", "2025-03-10", "N");
    set_shift(&db_path, "alice", "2025-03-12", "M");

    login(&db_path, "alice", "alice123");
    rctl()
        .args([
            "--db",
            &db_path,
            "exchange",
            "new",
            "--with",
            "alice",
            "--mine",
            "2025-03-10",
            "--theirs",
            "2025-03-12",
        ])
        .assert()
        .failure()
        .stderr(contains("yourself"));
}

#[test]
fn test_approve_swaps_shifts() {
    let db_path = setup_test_db("exchange_approve_swap");
    init_db_with_staff(&db_path);
    seed_shifts(&db_path);

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

    // The target approves; the shifts swap.
    login(&db_path, "bob", "bob123");
    rctl()
        .args(["--db", &db_path, "exchange", "approve", "1"])
        .assert()
        .success()
        .stdout(contains("shifts swapped"));

    // alice now holds the 2025-03-12 M shift, bob the 2025-03-10 N shift.
    login(&db_path, "admin", "admin123");
    rctl()
        .args([
            "--db",
            &db_path,
            "shift",
            "list",
            "--from",
            "2025-03-01",
            "--to",
            "2025-03-31",
            "--user",
            "alice",
        ])
        .assert()
        .success()
        .stdout(contains("2025-03-12"))
        .stdout(contains("2025-03-10").not());

    rctl()
        .args([
            "--db",
            &db_path,
            "shift",
            "list",
            "--from",
            "2025-03-01",
            "--to",
            "2025-03-31",
            "--user",
            "bob",
        ])
        .assert()
        .success()
        .stdout(contains("2025-03-10"))
        .stdout(contains("2025-03-12").not());
}

#[test]
fn test_terminal_exchange_cannot_be_resolved_again() {
    let db_path = setup_test_db("exchange_terminal");
    init_db_with_staff(&db_path);
    seed_shifts(&db_path);

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

    login(&db_path, "bob", "bob123");
    rctl()
        .args(["--db", &db_path, "exchange", "approve", "1"])
        .assert()
        .success();

    // Second approve is rejected, as is a late reject.
    rctl()
        .args(["--db", &db_path, "exchange", "approve", "1"])
        .assert()
        .failure()
        .stderr(contains("already approved"));

    rctl()
        .args(["--db", &db_path, "exchange", "reject", "1"])
        .assert()
        .failure()
        .stderr(contains("already approved"));
}

#[test]
fn test_reject_does_not_swap() {
    let db_path = setup_test_db("exchange_reject");
    init_db_with_staff(&db_path);
    seed_shifts(&db_path);

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

    login(&db_path, "bob", "bob123");
    rctl()
        .args(["--db", &db_path, "exchange", "reject", "1"])
        .assert()
        .success();

    // alice keeps her original shift.
    login(&db_path, "admin", "admin123");
    rctl()
        .args([
            "--db",
            &db_path,
            "shift",
            "list",
            "--from",
            "2025-03-01",
            "--to",
            "2025-03-31",
            "--user",
            "alice",
        ])
        .assert()
        .success()
        .stdout(contains("2025-03-10"))
        .stdout(contains("2025-03-12").not());
}

#[test]
fn test_only_target_or_admin_may_resolve() {
    let db_path = setup_test_db("exchange_authz");
    init_db_with_staff(&db_path);
    seed_shifts(&db_path);
    set_shift(&db_path, "bob", "2025-03-14", "E");

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

    // The requester cannot approve their own request.
    rctl()
        .args(["--db", &db_path, "exchange", "approve", "1"])
        .assert()
        .failure()
        .stderr(contains("Not authorized"));

    // An admin can.
    login(&db_path, "admin", "admin123");
    rctl()
        .args(["--db", &db_path, "exchange", "approve", "1"])
        .assert()
        .success();
}

#[test]
fn test_non_admin_sees_only_own_exchanges() {
    let db_path = setup_test_db("exchange_visibility");
    init_db_with_staff(&db_path);
    seed_shifts(&db_path);

    // A third staff member not involved in the request.
    rctl()
        .args([
            "--db",
            &db_path,
            "user",
            "add",
            "carol",
            "--full-name",
            "Carol Chan",
            "--password",
            "carol123",
        ])
        .assert()
        .success();

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

    // carol is neither requester nor target: empty list.
    login(&db_path, "carol", "carol123");
    rctl()
        .args(["--db", &db_path, "exchange", "list"])
        .assert()
        .success()
        .stdout(contains("No exchange requests"));

    // bob (the target) sees it.
    login(&db_path, "bob", "bob123");
    rctl()
        .args(["--db", &db_path, "exchange", "list"])
        .assert()
        .success()
        .stdout(contains("alice"));

    // admins see everything.
    login(&db_path, "admin", "admin123");
    rctl()
        .args(["--db", &db_path, "exchange", "list"])
        .assert()
        .success()
        .stdout(contains("alice"));
}

#[test]
fn test_exchange_list_status_filter() {
    let db_path = setup_test_db("exchange_status_filter");
    init_db_with_staff(&db_path);
    seed_shifts(&db_path);

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

    login(&db_path, "bob", "bob123");
    rctl()
        .args(["--db", &db_path, "exchange", "reject", "1"])
        .assert()
        .success();

    rctl()
        .args(["--db", &db_path, "exchange", "list", "--status", "pending"])
        .assert()
        .success()
        .stdout(contains("No exchange requests"));

    rctl()
        .args(["--db", &db_path, "exchange", "list", "--status", "rejected"])
        .assert()
        .success()
        .stdout(contains("rejected"));
}
