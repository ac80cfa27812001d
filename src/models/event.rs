use chrono::NaiveDate;
use serde::Serialize;

/// An informational calendar entry shown alongside the roster.
/// No lifecycle beyond create/list.
#[derive(Debug, Clone, Serialize)]
pub struct Event {
    pub id: i64,
    pub title: String,
    pub date: NaiveDate, // ⇔ events.date (TEXT "YYYY-MM-DD")
    pub kind: String,    // ⇔ events.type (free-form: "meeting", "holiday", ...)
}
