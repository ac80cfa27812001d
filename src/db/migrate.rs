//! Versioned schema migrations.
//! Applied versions are tracked in `schema_migrations`; each pending
//! migration runs inside its own transaction.

use crate::ui::messages::info;
use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, Result, params};

const MIGRATIONS: &[(i64, &str)] = &[
    (
        1,
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            username      TEXT NOT NULL UNIQUE,
            full_name     TEXT NOT NULL,
            grade         TEXT NOT NULL,
            email         TEXT,
            phone         TEXT,
            is_admin      INTEGER NOT NULL DEFAULT 0,
            is_active     INTEGER NOT NULL DEFAULT 1,
            password_hash TEXT NOT NULL,
            created_at    TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS shifts (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id    INTEGER NOT NULL REFERENCES users(id),
            date       TEXT NOT NULL,
            shift_code TEXT NOT NULL CHECK (shift_code IN
                ('N','M','E','O','MOT','NOT','AL','CTR','CG','EL','TR','MT','MC')),
            created_at TEXT NOT NULL,
            UNIQUE (user_id, date)
        );

        CREATE INDEX IF NOT EXISTS idx_shifts_date ON shifts(date);

        CREATE TABLE IF NOT EXISTS shift_exchanges (
            id                INTEGER PRIMARY KEY AUTOINCREMENT,
            requester_id      INTEGER NOT NULL REFERENCES users(id),
            target_user_id    INTEGER NOT NULL REFERENCES users(id),
            original_shift_id INTEGER NOT NULL REFERENCES shifts(id),
            target_shift_id   INTEGER NOT NULL REFERENCES shifts(id),
            status            TEXT NOT NULL DEFAULT 'pending'
                              CHECK (status IN ('pending','approved','rejected')),
            reason            TEXT,
            created_at        TEXT NOT NULL,
            resolved_at       TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_exchanges_requester ON shift_exchanges(requester_id);
        CREATE INDEX IF NOT EXISTS idx_exchanges_target ON shift_exchanges(target_user_id);

        CREATE TABLE IF NOT EXISTS events (
            id    INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            date  TEXT NOT NULL,
            type  TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_events_date ON events(date);

        CREATE TABLE IF NOT EXISTS staff_ordering (
            id             INTEGER PRIMARY KEY AUTOINCREMENT,
            month_year     TEXT NOT NULL,
            user_id        INTEGER NOT NULL REFERENCES users(id),
            order_position INTEGER NOT NULL,
            created_by     INTEGER REFERENCES users(id),
            UNIQUE (month_year, user_id)
        );

        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    ),
];

/// Ensure the bookkeeping table exists.
fn ensure_migrations_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS schema_migrations (
            version    INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn current_version(conn: &Connection) -> Result<i64> {
    let mut stmt = conn.prepare("SELECT MAX(version) FROM schema_migrations")?;
    let v: Option<i64> = stmt.query_row([], |row| row.get(0)).optional()?.flatten();
    Ok(v.unwrap_or(0))
}

/// Run every migration newer than the recorded schema version.
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    ensure_migrations_table(conn)?;
    let applied = current_version(conn)?;

    for (version, sql) in MIGRATIONS {
        if *version <= applied {
            continue;
        }
        info(format!("Applying schema migration {version}..."));
        conn.execute_batch("BEGIN")?;
        if let Err(e) = conn.execute_batch(sql) {
            conn.execute_batch("ROLLBACK")?;
            return Err(e);
        }
        conn.execute(
            "INSERT INTO schema_migrations (version, applied_at) VALUES (?1, ?2)",
            params![version, Utc::now().to_rfc3339()],
        )?;
        conn.execute_batch("COMMIT")?;
    }

    Ok(())
}

/// `PRAGMA integrity_check` result, "ok" when healthy.
pub fn integrity_check(conn: &Connection) -> Result<String> {
    conn.query_row("PRAGMA integrity_check", [], |row| row.get(0))
}

/// Reclaim free pages.
pub fn vacuum(conn: &Connection) -> Result<()> {
    conn.execute_batch("VACUUM")?;
    Ok(())
}

/// (schema_version, user_count, shift_count) summary for `db --info`.
pub fn db_info(conn: &Connection) -> Result<(i64, i64, i64)> {
    let version = current_version(conn)?;
    let users: i64 = conn.query_row("SELECT COUNT(*) FROM users", [], |r| r.get(0))?;
    let shifts: i64 = conn.query_row("SELECT COUNT(*) FROM shifts", [], |r| r.get(0))?;
    Ok((version, users, shifts))
}
