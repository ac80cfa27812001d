//! Per-month staff ranking.
//!
//! Saves are an upsert/merge keyed by UNIQUE(month_year, user_id): positions
//! are rewritten in place and rows absent from the new ranking are deleted,
//! all inside one transaction, so a reader never observes a transient empty
//! month.

use crate::db::log::audit;
use crate::db::users::map_user_row;
use crate::errors::AppResult;
use crate::models::ordering::OrderingEntry;
use crate::models::user::User;
use rusqlite::{Connection, ToSql, params};

/// Replace month `month_year`'s ranking with `user_ids`, positions 1-based
/// in the given sequence.
pub fn save_ordering(
    conn: &mut Connection,
    month_year: &str,
    user_ids: &[i64],
    created_by: i64,
) -> AppResult<()> {
    let tx = conn.transaction()?;

    for (idx, uid) in user_ids.iter().enumerate() {
        tx.execute(
            "INSERT INTO staff_ordering (month_year, user_id, order_position, created_by)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT (month_year, user_id)
             DO UPDATE SET order_position = excluded.order_position,
                           created_by = excluded.created_by",
            params![month_year, uid, (idx + 1) as i64, created_by],
        )?;
    }

    // Drop rows for staff no longer ranked this month.
    if user_ids.is_empty() {
        tx.execute(
            "DELETE FROM staff_ordering WHERE month_year = ?1",
            params![month_year],
        )?;
    } else {
        let placeholders = vec!["?"; user_ids.len()].join(",");
        let sql = format!(
            "DELETE FROM staff_ordering WHERE month_year = ? AND user_id NOT IN ({placeholders})"
        );
        let mut param_refs: Vec<&dyn ToSql> = vec![&month_year];
        for uid in user_ids {
            param_refs.push(uid);
        }
        tx.execute(&sql, param_refs.as_slice())?;
    }

    audit(
        &tx,
        "order_save",
        month_year,
        &format!("{} staff ranked", user_ids.len()),
    )?;

    tx.commit()?;
    Ok(())
}

/// The month's ranking joined to user rows, position ascending.
/// Empty when no ordering was saved for the month.
pub fn ordering_for_month(conn: &Connection, month_year: &str) -> AppResult<Vec<OrderingEntry>> {
    let mut stmt = conn.prepare_cached(
        "SELECT o.user_id, u.username, u.full_name, u.grade, o.order_position
         FROM staff_ordering o
         JOIN users u ON u.id = o.user_id
         WHERE o.month_year = ?1
         ORDER BY o.order_position ASC",
    )?;
    let rows = stmt.query_map([month_year], |row| {
        Ok(OrderingEntry {
            user_id: row.get(0)?,
            username: row.get(1)?,
            full_name: row.get(2)?,
            grade: row.get(3)?,
            position: row.get(4)?,
        })
    })?;
    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Active staff in roster order for a month: the saved ranking when one
/// exists (skipping deactivated accounts), otherwise active users by
/// username.
pub fn ordered_active_staff(conn: &Connection, month_year: &str) -> AppResult<Vec<User>> {
    let mut stmt = conn.prepare_cached(
        "SELECT u.id, u.username, u.full_name, u.grade, u.email, u.phone,
                u.is_admin, u.is_active, u.created_at
         FROM staff_ordering o
         JOIN users u ON u.id = o.user_id
         WHERE o.month_year = ?1 AND u.is_active = 1
         ORDER BY o.order_position ASC",
    )?;
    let rows = stmt.query_map([month_year], map_user_row)?;
    let mut ranked = Vec::new();
    for r in rows {
        ranked.push(r?);
    }

    if !ranked.is_empty() {
        return Ok(ranked);
    }

    crate::db::users::list_users(conn, false)
}
