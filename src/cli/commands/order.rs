use crate::auth;
use crate::cli::parser::{Commands, OrderAction};
use crate::config::Config;
use crate::db::ordering;
use crate::db::pool::DbPool;
use crate::db::users::{list_users, require_user};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success};
use crate::utils::date;
use crate::utils::table::{Column, Table};

/// Per-month staff ranking used by roster generation.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Order { action } = cmd {
        let mut pool = DbPool::new(&cfg.database)?;

        match action {
            OrderAction::Show { month } => {
                auth::current_user(&pool.conn, cfg)?;
                let key = match month {
                    Some(m) => {
                        date::parse_month(m)
                            .map(|d| date::month_key(&d))
                            .ok_or_else(|| AppError::InvalidMonth(m.clone()))?
                    }
                    None => date::current_month_key(),
                };

                let entries = ordering::ordering_for_month(&pool.conn, &key)?;
                if entries.is_empty() {
                    info(format!(
                        "No staff ordering saved for {key}; active staff by username:"
                    ));
                    for (i, u) in list_users(&pool.conn, false)?.iter().enumerate() {
                        println!("{:>3}. {} ({})", i + 1, u.username, u.full_name);
                    }
                    return Ok(());
                }

                let mut table = Table::new(vec![
                    Column::new("POS", 4),
                    Column::new("USERNAME", 12),
                    Column::new("FULL NAME", 24),
                    Column::new("GRADE", 6),
                ]);
                for e in &entries {
                    table.add_row(vec![
                        e.position.to_string(),
                        e.username.clone(),
                        e.full_name.clone(),
                        e.grade.clone(),
                    ]);
                }
                print!("{}", table.render());
            }

            OrderAction::Set { month, usernames } => {
                let caller = auth::current_user(&pool.conn, cfg)?;
                auth::require_admin(&caller)?;
                let key = date::parse_month(month)
                    .map(|d| date::month_key(&d))
                    .ok_or_else(|| AppError::InvalidMonth(month.clone()))?;

                let mut ids = Vec::with_capacity(usernames.len());
                for name in usernames {
                    ids.push(require_user(&pool.conn, name)?.id);
                }

                ordering::save_ordering(&mut pool.conn, &key, &ids, caller.id)?;
                success(format!("Staff ordering for {key} saved ({} staff)", ids.len()));
            }

            OrderAction::Move {
                month,
                username,
                up,
                down,
            } => {
                let caller = auth::current_user(&pool.conn, cfg)?;
                auth::require_admin(&caller)?;
                if *up == *down {
                    return Err(AppError::Other(
                        "specify exactly one of --up or --down".to_string(),
                    ));
                }
                let key = date::parse_month(month)
                    .map(|d| date::month_key(&d))
                    .ok_or_else(|| AppError::InvalidMonth(month.clone()))?;

                // Start from the saved ordering, or the active-staff fallback
                // when the month has none yet.
                let mut ids: Vec<(i64, String)> = {
                    let entries = ordering::ordering_for_month(&pool.conn, &key)?;
                    if entries.is_empty() {
                        list_users(&pool.conn, false)?
                            .into_iter()
                            .map(|u| (u.id, u.username))
                            .collect()
                    } else {
                        entries
                            .into_iter()
                            .map(|e| (e.user_id, e.username))
                            .collect()
                    }
                };

                let pos = ids
                    .iter()
                    .position(|(_, name)| name == username)
                    .ok_or_else(|| AppError::UserNotFound(username.clone()))?;

                let swap_with = if *up {
                    pos.checked_sub(1)
                } else if pos + 1 < ids.len() {
                    Some(pos + 1)
                } else {
                    None
                };

                match swap_with {
                    Some(other) => {
                        ids.swap(pos, other);
                        let id_list: Vec<i64> = ids.iter().map(|(id, _)| *id).collect();
                        ordering::save_ordering(&mut pool.conn, &key, &id_list, caller.id)?;
                        success(format!(
                            "Moved {} {} in {}",
                            username,
                            if *up { "up" } else { "down" },
                            key
                        ));
                    }
                    None => {
                        info(format!("{username} is already at the edge of the list"));
                    }
                }
            }
        }
    }
    Ok(())
}
