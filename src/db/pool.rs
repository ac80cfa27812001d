//! SQLite connection wrapper (lightweight for CLI usage).

use rusqlite::{Connection, Result};
use std::path::Path;

pub struct DbPool {
    pub conn: Connection,
}

impl DbPool {
    pub fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(Path::new(path))?;
        // Exchange and ordering rows reference users and shifts.
        conn.pragma_update(None, "foreign_keys", "ON")?;
        Ok(Self { conn })
    }
}
