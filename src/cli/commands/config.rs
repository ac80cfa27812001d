use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{success, warning};
use std::fs;

/// View or check the configuration file.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        check,
    } = cmd
    {
        if *print_config {
            let path = Config::config_file();
            if path.exists() {
                let content = fs::read_to_string(&path)?;
                println!("# {}", path.display());
                println!("{content}");
            } else {
                warning(format!(
                    "No config file at {} (defaults in use)",
                    path.display()
                ));
            }
        }

        if *check {
            if cfg.database.is_empty() {
                return Err(AppError::Config("database path is empty".to_string()));
            }
            if cfg.roster_placeholder.is_empty() {
                return Err(AppError::Config(
                    "roster_placeholder must not be empty".to_string(),
                ));
            }
            success("Configuration OK");
        }
    }
    Ok(())
}
