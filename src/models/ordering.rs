use serde::Serialize;

/// One row of a month's staff ranking, joined to the user it ranks.
#[derive(Debug, Clone, Serialize)]
pub struct OrderingEntry {
    pub user_id: i64,
    pub username: String,
    pub full_name: String,
    pub grade: String,
    pub position: i64, // 1-based
}
