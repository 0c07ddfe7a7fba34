use chrono::{DateTime, Utc};
use serde::Serialize;

/// Summary of one exercise of a workout.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExerciseReport {
    pub workout_exercise_id: i64,
    pub report: String,
}

/// Summary of a workout as shown in the workout list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkoutReport {
    pub workout_id: i64,
    pub name: String,
    pub date: DateTime<Utc>,
    pub exercise_reports: Vec<ExerciseReport>,
}
