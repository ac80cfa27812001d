use super::shift_code::ShiftCode;
use chrono::NaiveDate;
use serde::Serialize;

/// Lifecycle of a shift-exchange request.
///
/// `Pending` is the only non-terminal state: a request moves to `Approved`
/// or `Rejected` exactly once and never transitions out of either.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExchangeStatus {
    Pending,
    Approved,
    Rejected,
}

impl ExchangeStatus {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            ExchangeStatus::Pending => "pending",
            ExchangeStatus::Approved => "approved",
            ExchangeStatus::Rejected => "rejected",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(ExchangeStatus::Pending),
            "approved" => Some(ExchangeStatus::Approved),
            "rejected" => Some(ExchangeStatus::Rejected),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, ExchangeStatus::Pending)
    }
}

/// A shift-exchange request row, as stored.
#[derive(Debug, Clone, Serialize)]
pub struct Exchange {
    pub id: i64,
    pub requester_id: i64,
    pub target_user_id: i64,
    pub original_shift_id: i64,
    pub target_shift_id: i64,
    pub status: ExchangeStatus,
    pub reason: Option<String>,
    pub created_at: String,          // ISO 8601
    pub resolved_at: Option<String>, // set on approve/reject
}

/// An exchange denormalized for display: both parties and both shifts,
/// produced by a single joined query.
#[derive(Debug, Clone, Serialize)]
pub struct ExchangeDetail {
    pub id: i64,
    pub requester_id: i64,
    pub requester_username: String,
    pub requester_name: String,
    pub target_user_id: i64,
    pub target_username: String,
    pub target_name: String,
    pub original_date: NaiveDate,
    pub original_code: ShiftCode,
    pub target_date: NaiveDate,
    pub target_code: ShiftCode,
    pub status: ExchangeStatus,
    pub reason: Option<String>,
    pub created_at: String,
}
