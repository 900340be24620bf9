use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    /// Annual vacation allowance in days.
    pub vacation_days: i64,
}
