//! Local identity: username/password credentials and a file-based session.
//!
//! The session file lives next to the database and stores only the logged-in
//! user's id; the user row itself is re-read on every command, so a
//! deactivated or deleted account invalidates the session immediately.

pub mod password;

use crate::config::Config;
use crate::db::log::audit;
use crate::db::users;
use crate::errors::{AppError, AppResult};
use crate::models::user::User;
use chrono::Utc;
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use std::fs;

#[derive(Debug, Serialize, Deserialize)]
pub struct Session {
    pub user_id: i64,
    pub username: String,
    pub logged_in_at: String,
}

pub fn load_session(cfg: &Config) -> Option<Session> {
    let path = cfg.session_file();
    let content = fs::read_to_string(path).ok()?;
    serde_json::from_str(&content).ok()
}

fn save_session(cfg: &Config, session: &Session) -> AppResult<()> {
    let json = serde_json::to_string_pretty(session)
        .map_err(|e| AppError::Other(e.to_string()))?;
    fs::write(cfg.session_file(), json)?;
    Ok(())
}

pub fn clear_session(cfg: &Config) -> AppResult<()> {
    let path = cfg.session_file();
    if path.exists() {
        fs::remove_file(path)?;
    }
    Ok(())
}

/// Verify credentials and persist the session.
///
/// The active check runs before password verification: a deactivated account
/// gets the inactive message regardless of password correctness.
pub fn login(conn: &Connection, cfg: &Config, username: &str, password: &str) -> AppResult<User> {
    let (user, hash) =
        users::get_user_with_hash(conn, username)?.ok_or(AppError::InvalidCredentials)?;

    if !user.is_active {
        return Err(AppError::AccountInactive(user.username));
    }

    if !password::verify_password(password, &hash)? {
        return Err(AppError::InvalidCredentials);
    }

    let session = Session {
        user_id: user.id,
        username: user.username.clone(),
        logged_in_at: Utc::now().to_rfc3339(),
    };
    save_session(cfg, &session)?;
    audit(conn, "login", &user.username, "logged in")?;

    Ok(user)
}

/// Resolve the session file to a live user row.
/// A session pointing at a missing or deactivated account counts as logged
/// out.
pub fn current_user(conn: &Connection, cfg: &Config) -> AppResult<User> {
    let session = load_session(cfg).ok_or(AppError::NotLoggedIn)?;
    let user = users::get_user_by_id(conn, session.user_id)?.ok_or(AppError::NotLoggedIn)?;
    if !user.is_active {
        return Err(AppError::NotLoggedIn);
    }
    Ok(user)
}

pub fn require_admin(user: &User) -> AppResult<()> {
    if user.is_admin {
        Ok(())
    } else {
        Err(AppError::AdminRequired)
    }
}
