use crate::errors::AppResult;
use rusqlite::Connection;
use serde::Serialize;

/// Headline counts for the admin panel.
#[derive(Debug, Serialize)]
pub struct RosterStats {
    pub users: i64,
    pub shifts: i64,
    pub pending_exchanges: i64,
}

pub fn load_stats(conn: &Connection) -> AppResult<RosterStats> {
    let users: i64 = conn.query_row("SELECT COUNT(*) FROM users", [], |r| r.get(0))?;
    let shifts: i64 = conn.query_row("SELECT COUNT(*) FROM shifts", [], |r| r.get(0))?;
    let pending_exchanges: i64 = conn.query_row(
        "SELECT COUNT(*) FROM shift_exchanges WHERE status = 'pending'",
        [],
        |r| r.get(0),
    )?;

    Ok(RosterStats {
        users,
        shifts,
        pending_exchanges,
    })
}
