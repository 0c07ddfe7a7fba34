use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct ExerciseSet {
    pub id: i64,
    pub workout_exercise_id: i64,
    pub reps: i64,
    pub weight: i64,
    /// Seconds
    pub time: i64,
    pub distance: f64,
}

/// The values logged for a set, all zero for a freshly added one.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SetValues {
    pub reps: i64,
    pub weight: i64,
    pub time: i64,
    pub distance: f64,
}
