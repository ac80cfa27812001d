use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::migrate;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success};

/// Database maintenance: migrations, integrity check, vacuum, info.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Db {
        migrate: run_migrate,
        check,
        vacuum,
        info: show_info,
    } = cmd
    {
        let pool = DbPool::new(&cfg.database)?;

        if *run_migrate {
            migrate::run_pending_migrations(&pool.conn)?;
            success("Migrations up to date");
        }

        if *check {
            let result = migrate::integrity_check(&pool.conn)?;
            if result == "ok" {
                success("Database integrity OK");
            } else {
                return Err(AppError::Migration(format!(
                    "integrity check failed: {result}"
                )));
            }
        }

        if *vacuum {
            migrate::vacuum(&pool.conn)?;
            success("Database optimized");
        }

        if *show_info {
            let (version, users, shifts) = migrate::db_info(&pool.conn)?;
            info(format!("Database       : {}", cfg.database));
            info(format!("Schema version : {version}"));
            info(format!("Users          : {users}"));
            info(format!("Shifts         : {shifts}"));
        }
    }
    Ok(())
}
