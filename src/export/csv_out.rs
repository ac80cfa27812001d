use crate::errors::{AppError, AppResult};
use crate::models::shift::ShiftWithUser;
use csv::Writer;

/// Write shift rows as CSV.
pub fn write_csv(path: &str, rows: &[ShiftWithUser]) -> AppResult<()> {
    let mut wtr = Writer::from_path(path).map_err(|e| AppError::Export(e.to_string()))?;

    wtr.write_record(["date", "username", "full_name", "shift_code"])
        .map_err(|e| AppError::Export(e.to_string()))?;

    for row in rows {
        wtr.write_record(&[
            row.date.format("%Y-%m-%d").to_string(),
            row.username.clone(),
            row.full_name.clone(),
            row.shift_code.code().to_string(),
        ])
        .map_err(|e| AppError::Export(e.to_string()))?;
    }

    wtr.flush()?;
    Ok(())
}
