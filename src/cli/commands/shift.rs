use crate::auth;
use crate::cli::parser::{Commands, ShiftAction};
use crate::config::Config;
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::db::shifts;
use crate::db::users::require_user;
use crate::errors::{AppError, AppResult};
use crate::models::shift_code::ShiftCode;
use crate::ui::messages::{success, warning};
use crate::utils::date;
use crate::utils::table::{Column, Table};

/// Admin editing of individual (user, date) cells, plus range listing.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Shift { action } = cmd {
        let pool = DbPool::new(&cfg.database)?;
        let caller = auth::current_user(&pool.conn, cfg)?;

        match action {
            ShiftAction::Set {
                username,
                date: date_str,
                code,
            } => {
                auth::require_admin(&caller)?;
                let user = require_user(&pool.conn, username)?;
                let d = date::parse_date(date_str)
                    .ok_or_else(|| AppError::InvalidDate(date_str.clone()))?;
                let shift_code = ShiftCode::from_code(code)
                    .ok_or_else(|| AppError::InvalidShiftCode(code.clone()))?;

                shifts::upsert_shift(&pool.conn, user.id, &d, shift_code)?;
                audit(
                    &pool.conn,
                    "shift_set",
                    username,
                    &format!("{} = {}", date_str, shift_code.code()),
                )?;
                success(format!(
                    "{} on {} set to {} ({})",
                    username,
                    date_str,
                    shift_code.code(),
                    shift_code.label()
                ));
            }

            ShiftAction::Del {
                username,
                date: date_str,
            } => {
                auth::require_admin(&caller)?;
                let user = require_user(&pool.conn, username)?;
                let d = date::parse_date(date_str)
                    .ok_or_else(|| AppError::InvalidDate(date_str.clone()))?;

                let deleted = shifts::delete_shift(&pool.conn, user.id, &d)?;
                if deleted == 0 {
                    warning(format!("No shift for {username} on {date_str}"));
                } else {
                    audit(&pool.conn, "shift_del", username, date_str)?;
                    success(format!("Removed shift for {username} on {date_str}"));
                }
            }

            ShiftAction::List {
                from,
                to,
                user,
                limit,
            } => {
                let (month_from, month_to) = date::month_bounds(&date::today());
                let from_d = match from {
                    Some(s) => {
                        date::parse_date(s).ok_or_else(|| AppError::InvalidDate(s.clone()))?
                    }
                    None => month_from,
                };
                let to_d = match to {
                    Some(s) => {
                        date::parse_date(s).ok_or_else(|| AppError::InvalidDate(s.clone()))?
                    }
                    None => month_to,
                };

                let user_id = match user {
                    Some(name) => Some(require_user(&pool.conn, name)?.id),
                    None => None,
                };

                let rows =
                    shifts::shifts_with_users_in_range(&pool.conn, &from_d, &to_d, user_id, *limit)?;

                let mut table = Table::new(vec![
                    Column::new("ID", 5),
                    Column::new("DATE", 10),
                    Column::new("USERNAME", 12),
                    Column::new("FULL NAME", 24),
                    Column::new("SHIFT", 5),
                ]);
                for r in &rows {
                    table.add_row(vec![
                        r.id.to_string(),
                        r.date.format("%Y-%m-%d").to_string(),
                        r.username.clone(),
                        r.full_name.clone(),
                        r.shift_code.code().to_string(),
                    ]);
                }
                print!("{}", table.render());
                println!("{} shift(s)", rows.len());
            }
        }
    }
    Ok(())
}
