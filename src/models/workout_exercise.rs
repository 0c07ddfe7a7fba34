use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::exercise::{ExerciseKind, ExerciseType};

#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct WorkoutExercise {
    pub id: i64,
    pub workout_id: i64,
    pub exercise_id: i64,
    pub done: bool,
}

/// A workout exercise joined with the exercise it refers to.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct WorkoutExerciseDetail {
    pub id: i64,
    pub workout_id: i64,
    pub exercise_id: i64,
    pub done: bool,
    pub exercise_name: String,
    pub exercise_type: ExerciseType,
    pub goal: String,
}

impl WorkoutExerciseDetail {
    pub fn kind(&self) -> ExerciseKind {
        ExerciseKind::resolve(self.exercise_type, &self.goal)
    }
}
