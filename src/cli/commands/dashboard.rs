use crate::auth;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::pool::DbPool;
use crate::db::shifts::shifts_for_user_in_range;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{header, info};
use crate::utils::date;
use crate::utils::table::{Column, Table};

/// Your own shifts for one month.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Dashboard { month } = cmd {
        let pool = DbPool::new(&cfg.database)?;
        let user = auth::current_user(&pool.conn, cfg)?;

        let first = match month {
            Some(m) => date::parse_month(m).ok_or_else(|| AppError::InvalidMonth(m.clone()))?,
            None => date::month_bounds(&date::today()).0,
        };
        let days = date::month_days(&first);
        let (from, to) = (*days.first().unwrap(), *days.last().unwrap());

        let shifts = shifts_for_user_in_range(&pool.conn, user.id, &from, &to)?;
        let by_date: std::collections::HashMap<_, _> =
            shifts.iter().map(|s| (s.date, s.shift_code)).collect();

        header(format!(
            "Shifts for {} {}",
            user.username,
            first.format("%B %Y")
        ));

        let mut table = Table::new(vec![
            Column::new("DATE", 10),
            Column::new("DAY", 3),
            Column::new("SHIFT", 5),
            Column::new("", 14),
        ]);
        for d in &days {
            match by_date.get(d) {
                Some(code) => table.add_row(vec![
                    d.format("%Y-%m-%d").to_string(),
                    d.format("%a").to_string(),
                    code.code().to_string(),
                    code.label().to_string(),
                ]),
                None => table.add_row(vec![
                    d.format("%Y-%m-%d").to_string(),
                    d.format("%a").to_string(),
                    cfg.roster_placeholder.clone(),
                    String::new(),
                ]),
            }
        }
        print!("{}", table.render());

        if shifts.is_empty() {
            info("No shifts assigned this month. Ask an administrator to run `rosterctl generate`.");
        }
    }
    Ok(())
}
