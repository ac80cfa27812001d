use super::shift_code::ShiftCode;
use chrono::NaiveDate;
use serde::Serialize;

/// One assigned shift: exactly one row per (user, date).
#[derive(Debug, Clone, Serialize)]
pub struct Shift {
    pub id: i64,
    pub user_id: i64,
    pub date: NaiveDate,     // ⇔ shifts.date (TEXT "YYYY-MM-DD")
    pub shift_code: ShiftCode, // ⇔ shifts.shift_code
    pub created_at: String,  // ⇔ shifts.created_at (TEXT, ISO8601)
}

/// A shift joined to its owner, for admin listings and exports.
#[derive(Debug, Clone, Serialize)]
pub struct ShiftWithUser {
    pub id: i64,
    pub date: NaiveDate,
    pub shift_code: ShiftCode,
    pub user_id: i64,
    pub username: String,
    pub full_name: String,
}
