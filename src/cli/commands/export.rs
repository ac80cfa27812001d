use crate::auth;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::export::export_shifts;
use crate::utils::date;

/// Export one month of shift data to CSV or JSON.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        month,
        force,
    } = cmd
    {
        let pool = DbPool::new(&cfg.database)?;
        // Any logged-in staff member may export; the roster is not secret.
        auth::current_user(&pool.conn, cfg)?;

        let first = match month {
            Some(m) => date::parse_month(m).ok_or_else(|| AppError::InvalidMonth(m.clone()))?,
            None => date::month_bounds(&date::today()).0,
        };
        let days = date::month_days(&first);
        let (from, to) = (*days.first().unwrap(), *days.last().unwrap());

        export_shifts(&pool.conn, format, file, &from, &to, *force)?;
    }
    Ok(())
}
