use crate::auth;
use crate::cli::parser::{Commands, EventAction};
use crate::config::Config;
use crate::db::events;
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use crate::utils::date;
use crate::utils::table::{Column, Table};

/// Calendar events shown alongside the roster.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Event { action } = cmd {
        let pool = DbPool::new(&cfg.database)?;

        match action {
            EventAction::Add {
                date: date_str,
                title,
                kind,
            } => {
                let caller = auth::current_user(&pool.conn, cfg)?;
                auth::require_admin(&caller)?;
                let d = date::parse_date(date_str)
                    .ok_or_else(|| AppError::InvalidDate(date_str.clone()))?;

                let id = events::insert_event(&pool.conn, title, &d, kind)?;
                audit(&pool.conn, "event_add", &id.to_string(), title)?;
                success(format!("Event added for {date_str}: {title} [{kind}]"));
            }

            EventAction::List { month } => {
                auth::current_user(&pool.conn, cfg)?;
                let first = match month {
                    Some(m) => {
                        date::parse_month(m).ok_or_else(|| AppError::InvalidMonth(m.clone()))?
                    }
                    None => date::month_bounds(&date::today()).0,
                };
                let days = date::month_days(&first);
                let (from, to) = (*days.first().unwrap(), *days.last().unwrap());

                let list = events::events_in_range(&pool.conn, &from, &to)?;
                if list.is_empty() {
                    println!("No events for {}", first.format("%B %Y"));
                    return Ok(());
                }

                let mut table = Table::new(vec![
                    Column::new("DATE", 10),
                    Column::new("TITLE", 24),
                    Column::new("TYPE", 10),
                ]);
                for ev in &list {
                    table.add_row(vec![
                        ev.date.format("%Y-%m-%d").to_string(),
                        ev.title.clone(),
                        ev.kind.clone(),
                    ]);
                }
                print!("{}", table.render());
            }
        }
    }
    Ok(())
}
