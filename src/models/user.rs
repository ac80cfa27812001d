use serde::Serialize;

/// A staff member row.
/// The password hash never leaves the db layer; it is not part of this model.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub full_name: String,
    pub grade: String, // e.g. "PP4", "PP6"
    pub email: Option<String>,
    pub phone: Option<String>,
    pub is_admin: bool,
    pub is_active: bool,
    pub created_at: String, // ISO 8601
}

/// Input for `user add`.
#[derive(Debug)]
pub struct NewUser {
    pub username: String,
    pub full_name: String,
    pub grade: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub is_admin: bool,
}
