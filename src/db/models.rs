//! Database row types matching `migrations/`. Timestamps are nanosecond UTC epochs.
use serde::Serialize;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRow {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub department: Option<String>,
    pub role: String,
    pub password_hash: String,
    pub created_at: i64,
    pub is_active: bool,
}

/// Persisted forecast. Volume and price are stored as REAL to match the
/// reporting schema even though the generator only produces integers.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct PredictionRow {
    pub id: i64,
    pub user_id: i64,
    pub department: String,
    pub target_month: i64,
    pub target_year: i64,
    pub predicted_volume: f64,
    pub predicted_price: f64,
    pub confidence: f64,
    pub created_at: i64,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub department: Option<String>,
    pub role: String,
    pub password_hash: String,
}
