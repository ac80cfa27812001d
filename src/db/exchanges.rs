//! Shift-exchange lifecycle: create, list, approve, reject.
//!
//! A request moves pending → approved or pending → rejected exactly once.
//! Approving swaps the two shift assignments in the same transaction that
//! flips the status, so the roster and the request can never disagree.

use crate::db::log::audit;
use crate::errors::{AppError, AppResult};
use crate::models::exchange::{Exchange, ExchangeDetail, ExchangeStatus};
use crate::models::shift_code::ShiftCode;
use crate::models::user::User;
use chrono::{NaiveDate, Utc};
use rusqlite::{Connection, OptionalExtension, Result, Row, ToSql, params};

fn map_exchange_row(row: &Row) -> Result<Exchange> {
    let status_str: String = row.get("status")?;
    let status = ExchangeStatus::from_db_str(&status_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidStatus(status_str.clone())),
        )
    })?;

    Ok(Exchange {
        id: row.get("id")?,
        requester_id: row.get("requester_id")?,
        target_user_id: row.get("target_user_id")?,
        original_shift_id: row.get("original_shift_id")?,
        target_shift_id: row.get("target_shift_id")?,
        status,
        reason: row.get("reason")?,
        created_at: row.get("created_at")?,
        resolved_at: row.get("resolved_at")?,
    })
}

pub fn get_exchange(conn: &Connection, id: i64) -> AppResult<Option<Exchange>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, requester_id, target_user_id, original_shift_id, target_shift_id,
                status, reason, created_at, resolved_at
         FROM shift_exchanges WHERE id = ?1",
    )?;
    Ok(stmt.query_row([id], map_exchange_row).optional()?)
}

/// Create a pending exchange request.
///
/// Both (user, date) → shift lookups run inside the same transaction as the
/// insert, so a shift deleted between lookup and insert cannot produce a
/// dangling reference. Either lookup missing aborts with `ShiftNotFound`
/// and nothing is written.
pub fn create_exchange(
    conn: &mut Connection,
    requester: &User,
    target: &User,
    original_date: &NaiveDate,
    target_date: &NaiveDate,
    reason: Option<&str>,
) -> AppResult<i64> {
    if requester.id == target.id {
        return Err(AppError::InvalidExchange(
            "cannot exchange a shift with yourself".to_string(),
        ));
    }

    let tx = conn.transaction()?;

    let original_shift_id = lookup_shift_id(&tx, requester.id, original_date)?.ok_or_else(|| {
        AppError::ShiftNotFound {
            username: requester.username.clone(),
            date: original_date.format("%Y-%m-%d").to_string(),
        }
    })?;
    let target_shift_id = lookup_shift_id(&tx, target.id, target_date)?.ok_or_else(|| {
        AppError::ShiftNotFound {
            username: target.username.clone(),
            date: target_date.format("%Y-%m-%d").to_string(),
        }
    })?;

    tx.execute(
        "INSERT INTO shift_exchanges
             (requester_id, target_user_id, original_shift_id, target_shift_id, status, reason, created_at)
         VALUES (?1, ?2, ?3, ?4, 'pending', ?5, ?6)",
        params![
            requester.id,
            target.id,
            original_shift_id,
            target_shift_id,
            reason,
            Utc::now().to_rfc3339(),
        ],
    )?;
    let id = tx.last_insert_rowid();

    audit(
        &tx,
        "exchange_new",
        &id.to_string(),
        &format!(
            "{} requested swap with {} ({} for {})",
            requester.username,
            target.username,
            original_date.format("%Y-%m-%d"),
            target_date.format("%Y-%m-%d"),
        ),
    )?;

    tx.commit()?;
    Ok(id)
}

fn lookup_shift_id(conn: &Connection, user_id: i64, date: &NaiveDate) -> AppResult<Option<i64>> {
    let mut stmt =
        conn.prepare_cached("SELECT id FROM shifts WHERE user_id = ?1 AND date = ?2")?;
    let id = stmt
        .query_row(params![user_id, date.format("%Y-%m-%d").to_string()], |r| {
            r.get(0)
        })
        .optional()?;
    Ok(id)
}

/// Approve or reject a pending exchange.
///
/// Authorized callers are the exchange's target user or an admin. Terminal
/// states are final: resolving an already-resolved request is an error.
/// Approval swaps the (date, shift_code) payloads of the two shift rows:
/// each party keeps their own row, repointed at the other slot. That stays
/// clear of transient UNIQUE(user_id, date) collisions; a genuine
/// double-booking still violates the constraint and rolls the whole
/// transaction back.
pub fn resolve_exchange(
    conn: &mut Connection,
    id: i64,
    caller: &User,
    approve: bool,
) -> AppResult<()> {
    let tx = conn.transaction()?;

    let exchange = {
        let mut stmt = tx.prepare_cached(
            "SELECT id, requester_id, target_user_id, original_shift_id, target_shift_id,
                    status, reason, created_at, resolved_at
             FROM shift_exchanges WHERE id = ?1",
        )?;
        stmt.query_row([id], map_exchange_row).optional()?
    }
    .ok_or(AppError::ExchangeNotFound(id))?;

    if !caller.is_admin && caller.id != exchange.target_user_id {
        return Err(AppError::NotAuthorized(
            "only the request's target or an administrator may resolve it".to_string(),
        ));
    }

    if exchange.status.is_terminal() {
        return Err(AppError::ExchangeAlreadyResolved {
            id,
            status: exchange.status.to_db_str().to_string(),
        });
    }

    if approve {
        swap_shift_slots(&tx, exchange.original_shift_id, exchange.target_shift_id)?;
    }

    let new_status = if approve {
        ExchangeStatus::Approved
    } else {
        ExchangeStatus::Rejected
    };
    tx.execute(
        "UPDATE shift_exchanges SET status = ?1, resolved_at = ?2 WHERE id = ?3",
        params![new_status.to_db_str(), Utc::now().to_rfc3339(), id],
    )?;

    audit(
        &tx,
        if approve {
            "exchange_approve"
        } else {
            "exchange_reject"
        },
        &id.to_string(),
        &format!("resolved by {}", caller.username),
    )?;

    tx.commit()?;
    Ok(())
}

/// Swap the (date, shift_code) payloads of two shift rows in one statement.
fn swap_shift_slots(conn: &Connection, first_id: i64, second_id: i64) -> AppResult<()> {
    let (first_date, first_code) = shift_slot(conn, first_id)?;
    let (second_date, second_code) = shift_slot(conn, second_id)?;

    conn.execute(
        "UPDATE shifts SET
             date = CASE id WHEN ?1 THEN ?3 ELSE ?5 END,
             shift_code = CASE id WHEN ?1 THEN ?4 ELSE ?6 END
         WHERE id IN (?1, ?2)",
        params![first_id, second_id, second_date, second_code, first_date, first_code],
    )?;
    Ok(())
}

fn shift_slot(conn: &Connection, shift_id: i64) -> AppResult<(String, String)> {
    let mut stmt = conn.prepare_cached("SELECT date, shift_code FROM shifts WHERE id = ?1")?;
    let slot = stmt
        .query_row([shift_id], |r| Ok((r.get::<_, String>(0)?, r.get::<_, String>(1)?)))
        .optional()?;
    slot.ok_or_else(|| AppError::Other(format!("shift row {shift_id} vanished")))
}

/// List exchanges denormalized for display with one joined query.
/// `viewer = None` is the admin view (everything); otherwise only rows
/// where the viewer is requester or target.
pub fn list_exchanges(
    conn: &Connection,
    viewer: Option<i64>,
    status: Option<ExchangeStatus>,
) -> AppResult<Vec<ExchangeDetail>> {
    let mut sql = String::from(
        "SELECT e.id, e.requester_id, ru.username, ru.full_name,
                e.target_user_id, tu.username, tu.full_name,
                os.date, os.shift_code, ts.date, ts.shift_code,
                e.status, e.reason, e.created_at
         FROM shift_exchanges e
         JOIN users ru ON ru.id = e.requester_id
         JOIN users tu ON tu.id = e.target_user_id
         JOIN shifts os ON os.id = e.original_shift_id
         JOIN shifts ts ON ts.id = e.target_shift_id",
    );

    let mut conditions: Vec<String> = Vec::new();
    let mut owned: Vec<Box<dyn ToSql>> = Vec::new();

    if let Some(uid) = viewer {
        conditions.push(format!(
            "(e.requester_id = ?{n} OR e.target_user_id = ?{n})",
            n = owned.len() + 1
        ));
        owned.push(Box::new(uid));
    }
    if let Some(st) = status {
        conditions.push(format!("e.status = ?{}", owned.len() + 1));
        owned.push(Box::new(st.to_db_str().to_string()));
    }
    if !conditions.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&conditions.join(" AND "));
    }
    sql.push_str(" ORDER BY e.created_at DESC");

    let mut stmt = conn.prepare_cached(&sql)?;
    let param_refs: Vec<&dyn ToSql> = owned.iter().map(|b| b.as_ref()).collect();
    let rows = stmt.query_map(param_refs.as_slice(), map_detail_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

fn map_detail_row(row: &Row) -> Result<ExchangeDetail> {
    let parse_date = |idx: usize, s: String| {
        NaiveDate::parse_from_str(&s, "%Y-%m-%d").map_err(|_| {
            rusqlite::Error::FromSqlConversionFailure(
                idx,
                rusqlite::types::Type::Text,
                Box::new(AppError::InvalidDate(s.clone())),
            )
        })
    };
    let parse_code = |idx: usize, s: String| {
        ShiftCode::from_db_str(&s).ok_or_else(|| {
            rusqlite::Error::FromSqlConversionFailure(
                idx,
                rusqlite::types::Type::Text,
                Box::new(AppError::InvalidShiftCode(s.clone())),
            )
        })
    };

    let status_str: String = row.get(11)?;
    let status = ExchangeStatus::from_db_str(&status_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            11,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidStatus(status_str.clone())),
        )
    })?;

    Ok(ExchangeDetail {
        id: row.get(0)?,
        requester_id: row.get(1)?,
        requester_username: row.get(2)?,
        requester_name: row.get(3)?,
        target_user_id: row.get(4)?,
        target_username: row.get(5)?,
        target_name: row.get(6)?,
        original_date: parse_date(7, row.get(7)?)?,
        original_code: parse_code(8, row.get(8)?)?,
        target_date: parse_date(9, row.get(9)?)?,
        target_code: parse_code(10, row.get(10)?)?,
        status,
        reason: row.get(12)?,
        created_at: row.get(13)?,
    })
}
