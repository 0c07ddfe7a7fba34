use serde::{Deserialize, Serialize};

use crate::forms::{
    clean_boolean, clean_choice, is_blank, validate_formset, FieldValue, FormErrors,
    FormsetErrors, FormsetRow,
};

/// Label of the "nothing selected" entry of the exercise selector.
pub const EMPTY_LABEL: &str = "( --- Select Exercise --- )";

/// Selection of an exercise to add to a workout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkoutExerciseForm {
    pub exercise: Option<FieldValue>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidWorkoutExercise {
    pub exercise_id: i64,
}

impl WorkoutExerciseForm {
    /// `choices` are the ids of the exercises the user may pick from.
    pub fn validate(&self, choices: &[i64]) -> Result<ValidWorkoutExercise, FormErrors> {
        let mut errors = FormErrors::new();
        let exercise_id = clean_choice(self.exercise.as_ref(), choices)
            .map_err(|e| errors.add("exercise", e))
            .unwrap_or_default();
        errors.into_result(|| ValidWorkoutExercise { exercise_id })
    }

    /// The selector starts out empty, so any selection is a change.
    pub fn has_changed(&self) -> bool {
        !is_blank(self.exercise.as_ref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkoutExerciseRow {
    pub id: Option<FieldValue>,
    pub exercise: Option<FieldValue>,
    pub done: Option<FieldValue>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidWorkoutExerciseRow {
    pub exercise_id: i64,
    pub done: bool,
}

/// All exercises of one workout, edited together.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkoutExerciseFormset {
    #[serde(default)]
    pub form: Vec<WorkoutExerciseRow>,
}

impl WorkoutExerciseFormset {
    pub fn validate(
        &self,
        existing_ids: &[i64],
        choices: &[i64],
    ) -> Result<Vec<FormsetRow<ValidWorkoutExerciseRow>>, FormsetErrors> {
        validate_formset(
            &self.form,
            existing_ids,
            |row| row.id.as_ref(),
            |row| {
                let mut errors = FormErrors::new();
                let exercise_id = clean_choice(row.exercise.as_ref(), choices)
                    .map_err(|e| errors.add("exercise", e))
                    .unwrap_or_default();
                let done = clean_boolean(row.done.as_ref());
                errors.into_result(|| ValidWorkoutExerciseRow { exercise_id, done })
            },
        )
    }
}
