use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Workout {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    /// Creation time, never updated
    pub date: DateTime<Utc>,
}
