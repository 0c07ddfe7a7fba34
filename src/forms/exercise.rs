use serde::{Deserialize, Serialize};

use crate::forms::{clean_optional_text, clean_required_text, is_blank, FieldValue, FormErrors};
use crate::models::exercise::{Exercise, ExerciseType};

pub const NAME_MAX_LENGTH: usize = 200;
pub const GOAL_MAX_LENGTH: usize = 12;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExerciseForm {
    pub name: Option<FieldValue>,
    #[serde(rename = "type")]
    pub exercise_type: Option<FieldValue>,
    pub goal: Option<FieldValue>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidExercise {
    pub name: String,
    pub exercise_type: ExerciseType,
    pub goal: String,
}

impl ExerciseForm {
    pub fn from_exercise(exercise: &Exercise) -> Self {
        Self {
            name: Some(FieldValue::Text(exercise.name.clone())),
            exercise_type: Some(FieldValue::Integer(exercise.exercise_type as i64)),
            goal: Some(FieldValue::Text(exercise.goal.clone())),
        }
    }

    pub fn validate(&self) -> Result<ValidExercise, FormErrors> {
        let mut errors = FormErrors::new();

        let name = clean_required_text(self.name.as_ref(), NAME_MAX_LENGTH)
            .map_err(|e| errors.add("name", e))
            .unwrap_or_default();
        let exercise_type = clean_exercise_type(self.exercise_type.as_ref())
            .map_err(|e| errors.add("type", e))
            .unwrap_or_default();
        let goal = clean_optional_text(self.goal.as_ref(), GOAL_MAX_LENGTH)
            .map_err(|e| errors.add("goal", e))
            .unwrap_or_default();

        errors.into_result(|| ValidExercise {
            name,
            exercise_type,
            goal,
        })
    }
}

fn clean_exercise_type(value: Option<&FieldValue>) -> Result<ExerciseType, String> {
    if is_blank(value) {
        return Ok(ExerciseType::default());
    }
    let parsed = match value {
        Some(FieldValue::Integer(code)) => ExerciseType::from_code(*code),
        Some(FieldValue::Text(s)) => ExerciseType::from_str(s),
        _ => None,
    };
    parsed.ok_or_else(|| {
        let submitted = value.map(FieldValue::to_text).unwrap_or_default();
        format!(
            "Select a valid choice. {} is not one of the available choices.",
            submitted
        )
    })
}
