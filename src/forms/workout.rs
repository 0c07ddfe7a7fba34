use serde::{Deserialize, Serialize};

use crate::forms::workout_exercise::WorkoutExerciseForm;
use crate::forms::{clean_required_text, FieldValue, FormErrors};
use crate::models::workout::Workout;

pub const NAME_MAX_LENGTH: usize = 200;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkoutForm {
    pub name: Option<FieldValue>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidWorkout {
    pub name: String,
}

impl WorkoutForm {
    /// Initial data of the edit form.
    pub fn from_workout(workout: &Workout) -> Self {
        Self {
            name: Some(FieldValue::Text(workout.name.clone())),
        }
    }

    pub fn validate(&self) -> Result<ValidWorkout, FormErrors> {
        let mut errors = FormErrors::new();
        let name = clean_required_text(self.name.as_ref(), NAME_MAX_LENGTH)
            .map_err(|e| errors.add("name", e))
            .unwrap_or_default();
        errors.into_result(|| ValidWorkout { name })
    }

    /// Whether the submitted name differs from the stored one.
    pub fn has_changed(&self, initial: &Workout) -> bool {
        let submitted = self.name.as_ref().map(FieldValue::to_text).unwrap_or_default();
        submitted != initial.name
    }
}

/// Body of the add and edit workout forms, one object per form prefix.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WorkoutSubmission {
    #[serde(default)]
    pub workout: WorkoutForm,
    #[serde(default)]
    pub workout_exercise: WorkoutExerciseForm,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::REQUIRED;
    use chrono::Utc;

    fn workout(name: &str) -> Workout {
        Workout {
            id: 1,
            user_id: 1,
            name: name.to_string(),
            date: Utc::now(),
        }
    }

    #[test]
    fn test_name_is_trimmed() {
        let form = WorkoutForm { name: Some("  Leg day ".into()) };
        assert_eq!(form.validate().unwrap().name, "Leg day");
    }

    #[test]
    fn test_blank_name_is_rejected() {
        for name in [None, Some("".into()), Some("   ".into())] {
            let errors = WorkoutForm { name }.validate().unwrap_err();
            assert_eq!(errors.get("name"), [REQUIRED.to_string()]);
        }
    }

    #[test]
    fn test_name_length_limit() {
        let ok = WorkoutForm { name: Some("a".repeat(NAME_MAX_LENGTH).as_str().into()) };
        assert!(ok.validate().is_ok());
        let too_long = WorkoutForm { name: Some("a".repeat(NAME_MAX_LENGTH + 1).as_str().into()) };
        assert!(!too_long.validate().unwrap_err().get("name").is_empty());
    }

    #[test]
    fn test_change_detection() {
        let stored = workout("Push");
        assert!(!WorkoutForm { name: Some(" Push ".into()) }.has_changed(&stored));
        assert!(WorkoutForm { name: Some("Pull".into()) }.has_changed(&stored));
        assert!(WorkoutForm { name: None }.has_changed(&stored));
    }
}
