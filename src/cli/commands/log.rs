use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::log::load_log;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::table::{Column, Table};

/// Print the internal audit log.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Log { print } = cmd
        && *print
    {
        let pool = DbPool::new(&cfg.database)?;
        let rows = load_log(&pool.conn)?;

        if rows.is_empty() {
            println!("Audit log is empty.");
            return Ok(());
        }

        let mut table = Table::new(vec![
            Column::new("DATE", 25),
            Column::new("OPERATION", 16),
            Column::new("TARGET", 12),
            Column::new("MESSAGE", 40),
        ]);
        for (date, operation, target, message) in rows {
            table.add_row(vec![date, operation, target, message]);
        }
        print!("{}", table.render());
    }
    Ok(())
}
