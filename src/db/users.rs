use crate::errors::{AppError, AppResult};
use crate::models::user::{NewUser, User};
use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

pub fn map_user_row(row: &Row) -> Result<User> {
    Ok(User {
        id: row.get("id")?,
        username: row.get("username")?,
        full_name: row.get("full_name")?,
        grade: row.get("grade")?,
        email: row.get("email")?,
        phone: row.get("phone")?,
        is_admin: row.get::<_, i64>("is_admin")? != 0,
        is_active: row.get::<_, i64>("is_active")? != 0,
        created_at: row.get("created_at")?,
    })
}

const USER_COLS: &str =
    "id, username, full_name, grade, email, phone, is_admin, is_active, created_at";

/// Insert a new user with an already-hashed password.
/// A duplicate username surfaces as `AppError::DuplicateUser`.
pub fn insert_user(conn: &Connection, new: &NewUser, password_hash: &str) -> AppResult<i64> {
    let res = conn.execute(
        "INSERT INTO users (username, full_name, grade, email, phone, is_admin, is_active, password_hash, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, 1, ?7, ?8)",
        params![
            new.username,
            new.full_name,
            new.grade,
            new.email,
            new.phone,
            new.is_admin as i64,
            password_hash,
            Utc::now().to_rfc3339(),
        ],
    );

    match res {
        Ok(_) => Ok(conn.last_insert_rowid()),
        Err(rusqlite::Error::SqliteFailure(e, _))
            if e.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            Err(AppError::DuplicateUser(new.username.clone()))
        }
        Err(e) => Err(e.into()),
    }
}

pub fn get_user_by_id(conn: &Connection, id: i64) -> AppResult<Option<User>> {
    let mut stmt =
        conn.prepare_cached(&format!("SELECT {USER_COLS} FROM users WHERE id = ?1"))?;
    Ok(stmt.query_row([id], map_user_row).optional()?)
}

pub fn get_user_by_username(conn: &Connection, username: &str) -> AppResult<Option<User>> {
    let mut stmt =
        conn.prepare_cached(&format!("SELECT {USER_COLS} FROM users WHERE username = ?1"))?;
    Ok(stmt.query_row([username], map_user_row).optional()?)
}

/// Resolve a username or fail with a lookup-miss error.
pub fn require_user(conn: &Connection, username: &str) -> AppResult<User> {
    get_user_by_username(conn, username)?
        .ok_or_else(|| AppError::UserNotFound(username.to_string()))
}

/// List users ordered by username; active only unless `all`.
pub fn list_users(conn: &Connection, all: bool) -> AppResult<Vec<User>> {
    let sql = if all {
        format!("SELECT {USER_COLS} FROM users ORDER BY username ASC")
    } else {
        format!("SELECT {USER_COLS} FROM users WHERE is_active = 1 ORDER BY username ASC")
    };
    let mut stmt = conn.prepare_cached(&sql)?;
    let rows = stmt.query_map([], map_user_row)?;
    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn set_active(conn: &Connection, user_id: i64, active: bool) -> AppResult<()> {
    conn.execute(
        "UPDATE users SET is_active = ?1 WHERE id = ?2",
        params![active as i64, user_id],
    )?;
    Ok(())
}

pub fn set_password_hash(conn: &Connection, user_id: i64, hash: &str) -> AppResult<()> {
    conn.execute(
        "UPDATE users SET password_hash = ?1 WHERE id = ?2",
        params![hash, user_id],
    )?;
    Ok(())
}

/// Fetch a user together with the stored credential hash, for login.
pub fn get_user_with_hash(
    conn: &Connection,
    username: &str,
) -> AppResult<Option<(User, String)>> {
    let mut stmt = conn.prepare_cached(&format!(
        "SELECT {USER_COLS}, password_hash FROM users WHERE username = ?1"
    ))?;
    let row = stmt
        .query_row([username], |row| {
            Ok((map_user_row(row)?, row.get::<_, String>("password_hash")?))
        })
        .optional()?;
    Ok(row)
}

/// True when the users table is empty: the very first `user add` is allowed
/// without a session and bootstraps the administrator account.
pub fn no_users_yet(conn: &Connection) -> AppResult<bool> {
    let n: i64 = conn.query_row("SELECT COUNT(*) FROM users", [], |r| r.get(0))?;
    Ok(n == 0)
}
