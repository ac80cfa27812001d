use crate::auth;
use crate::cli::parser::{Commands, ExchangeAction};
use crate::config::Config;
use crate::db::exchanges;
use crate::db::pool::DbPool;
use crate::db::users::require_user;
use crate::errors::{AppError, AppResult};
use crate::models::exchange::ExchangeStatus;
use crate::ui::messages::success;
use crate::utils::date;
use crate::utils::table::{Column, Table};

/// Shift-exchange requests: create, list, approve, reject.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Exchange { action } = cmd {
        let mut pool = DbPool::new(&cfg.database)?;
        let caller = auth::current_user(&pool.conn, cfg)?;

        match action {
            ExchangeAction::New {
                with,
                mine,
                theirs,
                reason,
            } => {
                let target = require_user(&pool.conn, with)?;
                let mine_d =
                    date::parse_date(mine).ok_or_else(|| AppError::InvalidDate(mine.clone()))?;
                let theirs_d = date::parse_date(theirs)
                    .ok_or_else(|| AppError::InvalidDate(theirs.clone()))?;

                let id = exchanges::create_exchange(
                    &mut pool.conn,
                    &caller,
                    &target,
                    &mine_d,
                    &theirs_d,
                    reason.as_deref(),
                )?;
                success(format!(
                    "Exchange request {id} sent to {} ({} for {})",
                    target.username, mine, theirs
                ));
            }

            ExchangeAction::List { status } => {
                let status_filter = match status {
                    Some(s) => Some(
                        ExchangeStatus::from_db_str(s)
                            .ok_or_else(|| AppError::InvalidStatus(s.clone()))?,
                    ),
                    None => None,
                };

                // Admins see everything; everyone else only their own rows.
                let viewer = if caller.is_admin {
                    None
                } else {
                    Some(caller.id)
                };
                let rows = exchanges::list_exchanges(&pool.conn, viewer, status_filter)?;

                if rows.is_empty() {
                    println!("No exchange requests.");
                    return Ok(());
                }

                let mut table = Table::new(vec![
                    Column::new("ID", 4),
                    Column::new("STATUS", 8),
                    Column::new("FROM", 12),
                    Column::new("GIVES", 16),
                    Column::new("TO", 12),
                    Column::new("TAKES", 16),
                    Column::new("REASON", 20),
                ]);
                for r in &rows {
                    table.add_row(vec![
                        r.id.to_string(),
                        r.status.to_db_str().to_string(),
                        r.requester_username.clone(),
                        format!("{} {}", r.original_date.format("%Y-%m-%d"), r.original_code.code()),
                        r.target_username.clone(),
                        format!("{} {}", r.target_date.format("%Y-%m-%d"), r.target_code.code()),
                        r.reason.clone().unwrap_or_default(),
                    ]);
                }
                print!("{}", table.render());
                println!("{} request(s)", rows.len());
            }

            ExchangeAction::Approve { id } => {
                exchanges::resolve_exchange(&mut pool.conn, *id, &caller, true)?;
                success(format!("Exchange request {id} approved; shifts swapped"));
            }

            ExchangeAction::Reject { id } => {
                exchanges::resolve_exchange(&mut pool.conn, *id, &caller, false)?;
                success(format!("Exchange request {id} rejected"));
            }
        }
    }
    Ok(())
}
