use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Goal of a cardio exercise counted in repetitions.
pub const GOAL_REPETITIONS: &str = "Repetitions";
/// Goal of a cardio exercise measured by distance.
pub const GOAL_DISTANCE: &str = "Distance";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[repr(i32)]
pub enum ExerciseType {
    #[default]
    Strength = 0,
    Cardio = 1,
}

impl ExerciseType {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "0" | "strength" => Some(ExerciseType::Strength),
            "1" | "cardio" => Some(ExerciseType::Cardio),
            _ => None,
        }
    }

    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(ExerciseType::Strength),
            1 => Some(ExerciseType::Cardio),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Exercise {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub exercise_type: ExerciseType,
    pub goal: String,
}

impl Exercise {
    pub fn kind(&self) -> ExerciseKind {
        ExerciseKind::resolve(self.exercise_type, &self.goal)
    }
}

/// An entry of the exercise selector of workout forms.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct ExerciseChoice {
    pub id: i64,
    pub name: String,
}

/// How the sets of an exercise are logged and summarised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseKind {
    Strength,
    CardioRepetitions,
    CardioDistance,
}

impl ExerciseKind {
    /// Cardio exercises without the repetitions goal are measured by distance.
    pub fn resolve(exercise_type: ExerciseType, goal: &str) -> Self {
        match exercise_type {
            ExerciseType::Strength => ExerciseKind::Strength,
            ExerciseType::Cardio if goal.trim().eq_ignore_ascii_case(GOAL_REPETITIONS) => {
                ExerciseKind::CardioRepetitions
            }
            ExerciseType::Cardio => ExerciseKind::CardioDistance,
        }
    }

    /// Name of the view used to log sets of this kind.
    pub fn edit_view(&self) -> &'static str {
        match self {
            ExerciseKind::Strength => "edit_workout_exercise_strength",
            ExerciseKind::CardioRepetitions => "edit_workout_exercise_repetitions",
            ExerciseKind::CardioDistance => "edit_workout_exercise_distance",
        }
    }
}
