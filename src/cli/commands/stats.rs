use crate::auth;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::pool::DbPool;
use crate::db::stats::load_stats;
use crate::errors::AppResult;
use crate::ui::messages::header;

/// Headline counts for administrators.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Stats = cmd {
        let pool = DbPool::new(&cfg.database)?;
        let caller = auth::current_user(&pool.conn, cfg)?;
        auth::require_admin(&caller)?;

        let stats = load_stats(&pool.conn)?;
        header("Roster statistics");
        println!("Users              : {}", stats.users);
        println!("Total shifts       : {}", stats.shifts);
        println!("Exchanges pending  : {}", stats.pending_exchanges);
    }
    Ok(())
}
