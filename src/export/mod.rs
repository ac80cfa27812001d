mod csv_out;
mod json_out;

use crate::db::shifts::shifts_with_users_in_range;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use chrono::NaiveDate;
use clap::ValueEnum;
use rusqlite::Connection;
use std::path::Path;

#[derive(Clone, Debug, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

/// Export all shifts in [from, to] (joined to owner names) to `file`.
/// Refuses to overwrite an existing file unless `force`.
pub fn export_shifts(
    conn: &Connection,
    format: &ExportFormat,
    file: &str,
    from: &NaiveDate,
    to: &NaiveDate,
    force: bool,
) -> AppResult<()> {
    let path = Path::new(file);
    if path.exists() && !force {
        return Err(AppError::Export(format!(
            "file already exists: {file} (use --force to overwrite)"
        )));
    }

    let rows = shifts_with_users_in_range(conn, from, to, None, 0)?;

    match format {
        ExportFormat::Csv => csv_out::write_csv(file, &rows)?,
        ExportFormat::Json => json_out::write_json(file, &rows)?,
    }

    success(format!(
        "{} export completed: {} ({} rows)",
        format.as_str().to_uppercase(),
        path.display(),
        rows.len()
    ));
    Ok(())
}
