use crate::errors::{AppError, AppResult};
use crate::models::shift::ShiftWithUser;
use std::fs::File;

/// Write shift rows as pretty-printed JSON.
pub fn write_json(path: &str, rows: &[ShiftWithUser]) -> AppResult<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, rows).map_err(|e| AppError::Export(e.to_string()))?;
    Ok(())
}
