//! Unified application error type.
//! All modules (db, auth, cli, utils) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid month format: {0} (expected YYYY-MM)")]
    InvalidMonth(String),

    #[error("Invalid shift code: {0}")]
    InvalidShiftCode(String),

    #[error("Invalid exchange status: {0}")]
    InvalidStatus(String),

    // ---------------------------
    // Lookup misses
    // ---------------------------
    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("No shift found for {username} on {date}")]
    ShiftNotFound { username: String, date: String },

    #[error("Exchange request not found: {0}")]
    ExchangeNotFound(i64),

    // ---------------------------
    // Lifecycle / authorization
    // ---------------------------
    #[error("Exchange request {id} is already {status}")]
    ExchangeAlreadyResolved { id: i64, status: String },

    #[error("Invalid exchange request: {0}")]
    InvalidExchange(String),

    #[error("Not authorized: {0}")]
    NotAuthorized(String),

    #[error("This operation requires an administrator account")]
    AdminRequired,

    // ---------------------------
    // Authentication
    // ---------------------------
    #[error("Not logged in. Run `rosterctl login <username>` first")]
    NotLoggedIn,

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Account '{0}' is inactive. Contact an administrator")]
    AccountInactive(String),

    #[error("Username already taken: {0}")]
    DuplicateUser(String),

    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,

    #[error("Failed to save configuration")]
    ConfigSave,

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export format not supported: {0}")]
    InvalidExportFormat(String),

    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
