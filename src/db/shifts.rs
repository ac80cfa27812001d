use crate::errors::{AppError, AppResult};
use crate::models::shift::{Shift, ShiftWithUser};
use crate::models::shift_code::ShiftCode;
use chrono::{NaiveDate, Utc};
use rusqlite::{Connection, OptionalExtension, Result, Row, ToSql, params};

pub fn map_shift_row(row: &Row) -> Result<Shift> {
    let date_str: String = row.get("date")?;
    let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidDate(date_str.clone())),
        )
    })?;

    let code_str: String = row.get("shift_code")?;
    let shift_code = ShiftCode::from_db_str(&code_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidShiftCode(code_str.clone())),
        )
    })?;

    Ok(Shift {
        id: row.get("id")?,
        user_id: row.get("user_id")?,
        date,
        shift_code,
        created_at: row.get("created_at")?,
    })
}

/// Insert or update the single (user, date) cell.
pub fn upsert_shift(
    conn: &Connection,
    user_id: i64,
    date: &NaiveDate,
    code: ShiftCode,
) -> AppResult<()> {
    let date_str = date.format("%Y-%m-%d").to_string();
    let mut stmt = conn.prepare_cached(
        "UPDATE shifts SET shift_code = ?1 WHERE user_id = ?2 AND date = ?3",
    )?;
    let rows = stmt.execute(params![code.to_db_str(), user_id, date_str])?;

    if rows == 0 {
        let mut ins = conn.prepare_cached(
            "INSERT INTO shifts (user_id, date, shift_code, created_at) VALUES (?1, ?2, ?3, ?4)",
        )?;
        ins.execute(params![
            user_id,
            date_str,
            code.to_db_str(),
            Utc::now().to_rfc3339()
        ])?;
    }
    Ok(())
}

/// Delete the (user, date) cell. Returns number of rows deleted.
pub fn delete_shift(conn: &Connection, user_id: i64, date: &NaiveDate) -> AppResult<usize> {
    let n = conn.execute(
        "DELETE FROM shifts WHERE user_id = ?1 AND date = ?2",
        params![user_id, date.format("%Y-%m-%d").to_string()],
    )?;
    Ok(n)
}

/// Point lookup: the shift id for a (user, date) pair, if assigned.
pub fn find_shift_id(
    conn: &Connection,
    user_id: i64,
    date: &NaiveDate,
) -> AppResult<Option<i64>> {
    let mut stmt =
        conn.prepare_cached("SELECT id FROM shifts WHERE user_id = ?1 AND date = ?2")?;
    let id = stmt
        .query_row(params![user_id, date.format("%Y-%m-%d").to_string()], |r| {
            r.get(0)
        })
        .optional()?;
    Ok(id)
}

/// All shifts of one user inside [from, to], date ascending.
pub fn shifts_for_user_in_range(
    conn: &Connection,
    user_id: i64,
    from: &NaiveDate,
    to: &NaiveDate,
) -> AppResult<Vec<Shift>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, user_id, date, shift_code, created_at FROM shifts
         WHERE user_id = ?1 AND date >= ?2 AND date <= ?3
         ORDER BY date ASC",
    )?;
    let rows = stmt.query_map(
        params![
            user_id,
            from.format("%Y-%m-%d").to_string(),
            to.format("%Y-%m-%d").to_string()
        ],
        map_shift_row,
    )?;
    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// All shifts inside [from, to] regardless of owner: one range query feeds
/// the whole roster grid.
pub fn shifts_in_range(
    conn: &Connection,
    from: &NaiveDate,
    to: &NaiveDate,
) -> AppResult<Vec<Shift>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, user_id, date, shift_code, created_at FROM shifts
         WHERE date >= ?1 AND date <= ?2
         ORDER BY date ASC",
    )?;
    let rows = stmt.query_map(
        params![
            from.format("%Y-%m-%d").to_string(),
            to.format("%Y-%m-%d").to_string()
        ],
        map_shift_row,
    )?;
    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Range listing joined to owner names, for the admin table and exports.
/// `limit = 0` means no limit.
pub fn shifts_with_users_in_range(
    conn: &Connection,
    from: &NaiveDate,
    to: &NaiveDate,
    user_id: Option<i64>,
    limit: usize,
) -> AppResult<Vec<ShiftWithUser>> {
    let mut sql = String::from(
        "SELECT s.id, s.date, s.shift_code, s.user_id, u.username, u.full_name
         FROM shifts s
         JOIN users u ON u.id = s.user_id
         WHERE s.date >= ?1 AND s.date <= ?2",
    );
    let from_s = from.format("%Y-%m-%d").to_string();
    let to_s = to.format("%Y-%m-%d").to_string();
    let mut param_refs: Vec<&dyn ToSql> = vec![&from_s, &to_s];

    if let Some(uid) = user_id.as_ref() {
        sql.push_str(" AND s.user_id = ?3");
        param_refs.push(uid);
    }
    sql.push_str(" ORDER BY s.date ASC, u.username ASC");
    if limit > 0 {
        sql.push_str(&format!(" LIMIT {limit}"));
    }

    let mut stmt = conn.prepare_cached(&sql)?;
    let rows = stmt.query_map(param_refs.as_slice(), |row| {
        let date_str: String = row.get(1)?;
        let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").map_err(|_| {
            rusqlite::Error::FromSqlConversionFailure(
                1,
                rusqlite::types::Type::Text,
                Box::new(AppError::InvalidDate(date_str.clone())),
            )
        })?;
        let code_str: String = row.get(2)?;
        let shift_code = ShiftCode::from_db_str(&code_str).ok_or_else(|| {
            rusqlite::Error::FromSqlConversionFailure(
                2,
                rusqlite::types::Type::Text,
                Box::new(AppError::InvalidShiftCode(code_str.clone())),
            )
        })?;
        Ok(ShiftWithUser {
            id: row.get(0)?,
            date,
            shift_code,
            user_id: row.get(3)?,
            username: row.get(4)?,
            full_name: row.get(5)?,
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
