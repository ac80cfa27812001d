use crate::auth;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::log::audit;
use crate::db::ordering::ordered_active_staff;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::shift_code::{DEFAULT_PATTERN, ShiftCode};
use crate::ui::messages::success;
use crate::utils::date;
use chrono::Utc;
use rusqlite::params;

/// Generate the roster for a date range by cycling a rotation pattern.
///
/// Each staff member starts the pattern at a different offset
/// (`staff_index * 3`), so the department's nights, evenings and mornings
/// stay staggered. Staff are taken in staff-ordering order for each month
/// covered, which is how the ordering biases generation. Existing cells in
/// the range are overwritten; the whole run is a single transaction.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Generate { from, to, pattern } = cmd {
        let mut pool = DbPool::new(&cfg.database)?;
        let caller = auth::current_user(&pool.conn, cfg)?;
        auth::require_admin(&caller)?;

        let from_d = date::parse_date(from).ok_or_else(|| AppError::InvalidDate(from.clone()))?;
        let to_d = date::parse_date(to).ok_or_else(|| AppError::InvalidDate(to.clone()))?;
        if to_d < from_d {
            return Err(AppError::InvalidDate(format!(
                "range end {to} is before start {from}"
            )));
        }

        let rotation: Vec<ShiftCode> = match pattern {
            Some(p) => parse_pattern(p)?,
            None => DEFAULT_PATTERN.to_vec(),
        };

        let days = date::days_between(&from_d, &to_d);
        let mut written = 0usize;

        let tx = pool.conn.transaction()?;
        {
            let mut update = tx.prepare_cached(
                "UPDATE shifts SET shift_code = ?1 WHERE user_id = ?2 AND date = ?3",
            )?;
            let mut insert = tx.prepare_cached(
                "INSERT INTO shifts (user_id, date, shift_code, created_at)
                 VALUES (?1, ?2, ?3, ?4)",
            )?;

            // Staff order can change at month boundaries; cache per month key.
            let mut current_key = String::new();
            let mut staff = Vec::new();

            for (day_index, day) in days.iter().enumerate() {
                let key = date::month_key(day);
                if key != current_key {
                    staff = ordered_active_staff(&tx, &key)?;
                    current_key = key;
                }

                let date_str = day.format("%Y-%m-%d").to_string();
                for (staff_index, user) in staff.iter().enumerate() {
                    let code = rotation[(staff_index * 3 + day_index) % rotation.len()];
                    let changed =
                        update.execute(params![code.to_db_str(), user.id, date_str])?;
                    if changed == 0 {
                        insert.execute(params![
                            user.id,
                            date_str,
                            code.to_db_str(),
                            Utc::now().to_rfc3339()
                        ])?;
                    }
                    written += 1;
                }
            }
        }

        audit(
            &tx,
            "generate",
            &format!("{from}..{to}"),
            &format!("generated {written} shifts"),
        )?;
        tx.commit()?;

        success(format!("Roster generated: {written} shifts ({from} to {to})"));
    }
    Ok(())
}

fn parse_pattern(p: &str) -> AppResult<Vec<ShiftCode>> {
    let codes: Vec<ShiftCode> = p
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| ShiftCode::from_code(s).ok_or_else(|| AppError::InvalidShiftCode(s.to_string())))
        .collect::<AppResult<_>>()?;

    if codes.is_empty() {
        return Err(AppError::InvalidShiftCode(
            "pattern must contain at least one code".to_string(),
        ));
    }
    Ok(codes)
}
