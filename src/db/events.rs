use crate::errors::{AppError, AppResult};
use crate::models::event::Event;
use chrono::NaiveDate;
use rusqlite::{Connection, Result, Row, params};

fn map_event_row(row: &Row) -> Result<Event> {
    let date_str: String = row.get("date")?;
    let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidDate(date_str.clone())),
        )
    })?;

    Ok(Event {
        id: row.get("id")?,
        title: row.get("title")?,
        date,
        kind: row.get("type")?,
    })
}

pub fn insert_event(
    conn: &Connection,
    title: &str,
    date: &NaiveDate,
    kind: &str,
) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO events (title, date, type) VALUES (?1, ?2, ?3)",
        params![title, date.format("%Y-%m-%d").to_string(), kind],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Calendar events inside [from, to], date ascending.
pub fn events_in_range(
    conn: &Connection,
    from: &NaiveDate,
    to: &NaiveDate,
) -> AppResult<Vec<Event>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, title, date, type FROM events
         WHERE date >= ?1 AND date <= ?2
         ORDER BY date ASC",
    )?;
    let rows = stmt.query_map(
        params![
            from.format("%Y-%m-%d").to_string(),
            to.format("%Y-%m-%d").to_string()
        ],
        map_event_row,
    )?;
    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
