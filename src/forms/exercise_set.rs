use serde::{Deserialize, Serialize};

use crate::forms::{
    clean_non_negative_float, clean_non_negative_integer, validate_formset, FieldValue,
    FormErrors, FormsetErrors, FormsetRow,
};
use crate::forms::workout_exercise::WorkoutExerciseForm;
use crate::models::exercise_set::SetValues;

/// A single logged set. Every field is optional and defaults to 0.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExerciseSetForm {
    pub reps: Option<FieldValue>,
    pub weight: Option<FieldValue>,
    pub time: Option<FieldValue>,
    pub distance: Option<FieldValue>,
}

impl ExerciseSetForm {
    pub fn validate(&self) -> Result<SetValues, FormErrors> {
        clean_set_values(
            self.reps.as_ref(),
            self.weight.as_ref(),
            self.time.as_ref(),
            self.distance.as_ref(),
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExerciseSetRow {
    pub id: Option<FieldValue>,
    pub reps: Option<FieldValue>,
    pub weight: Option<FieldValue>,
    pub time: Option<FieldValue>,
    pub distance: Option<FieldValue>,
}

/// All sets of one workout exercise, edited together.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExerciseSetFormset {
    #[serde(default)]
    pub form: Vec<ExerciseSetRow>,
}

impl ExerciseSetFormset {
    pub fn validate(&self, existing_ids: &[i64]) -> Result<Vec<FormsetRow<SetValues>>, FormsetErrors> {
        validate_formset(
            &self.form,
            existing_ids,
            |row| row.id.as_ref(),
            |row| {
                clean_set_values(
                    row.reps.as_ref(),
                    row.weight.as_ref(),
                    row.time.as_ref(),
                    row.distance.as_ref(),
                )
            },
        )
    }
}

/// Body of the set logging form: the exercise selection plus the new set.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExerciseSetSubmission {
    #[serde(default)]
    pub workout_exercise: WorkoutExerciseForm,
    #[serde(default)]
    pub exercise_set: ExerciseSetForm,
}

fn clean_set_values(
    reps: Option<&FieldValue>,
    weight: Option<&FieldValue>,
    time: Option<&FieldValue>,
    distance: Option<&FieldValue>,
) -> Result<SetValues, FormErrors> {
    let mut errors = FormErrors::new();
    let mut integer = |field: &str, value: Option<&FieldValue>| {
        clean_non_negative_integer(value)
            .map_err(|e| errors.add(field, e))
            .unwrap_or_default()
    };
    let reps = integer("reps", reps);
    let weight = integer("weight", weight);
    let time = integer("time", time);
    let distance = clean_non_negative_float(distance)
        .map_err(|e| errors.add("distance", e))
        .unwrap_or_default();

    errors.into_result(|| SetValues {
        reps,
        weight,
        time,
        distance,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::{INVALID_INTEGER, INVALID_NUMBER, NEGATIVE_VALUE, TAMPERED_FORMSET};

    #[test]
    fn test_empty_set_is_all_zero() {
        assert_eq!(ExerciseSetForm::default().validate().unwrap(), SetValues::default());
    }

    #[test]
    fn test_values_are_parsed() {
        let form = ExerciseSetForm {
            reps: Some("8".into()),
            weight: Some(FieldValue::Integer(60)),
            time: None,
            distance: Some("5.25".into()),
        };
        assert_eq!(
            form.validate().unwrap(),
            SetValues { reps: 8, weight: 60, time: 0, distance: 5.25 }
        );
    }

    #[test]
    fn test_invalid_values_are_reported_per_field() {
        let form = ExerciseSetForm {
            reps: Some(FieldValue::Integer(-1)),
            weight: Some("heavy".into()),
            time: Some(FieldValue::Float(1.5)),
            distance: Some("far".into()),
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get("reps"), [NEGATIVE_VALUE.to_string()]);
        assert_eq!(errors.get("weight"), [INVALID_INTEGER.to_string()]);
        assert_eq!(errors.get("time"), [INVALID_INTEGER.to_string()]);
        assert_eq!(errors.get("distance"), [INVALID_NUMBER.to_string()]);
    }

    #[test]
    fn test_formset_validation() {
        let formset: ExerciseSetFormset = serde_json::from_str(
            r#"{"form": [{"id": 4, "reps": 10, "weight": 50}, {"id": 5, "reps": "12", "weight": "55"}]}"#,
        )
        .unwrap();
        let rows = formset.validate(&[4, 5]).unwrap();
        assert_eq!(rows[0].id, 4);
        assert_eq!(rows[0].values.reps, 10);
        assert_eq!(rows[1].values.weight, 55);

        let errors = formset.validate(&[4, 5, 6]).unwrap_err();
        assert_eq!(errors.non_form_errors, vec![TAMPERED_FORMSET.to_string()]);
    }

    #[test]
    fn test_formset_rejects_negative_row() {
        let formset: ExerciseSetFormset =
            serde_json::from_str(r#"{"form": [{"id": 4, "reps": -3}]}"#).unwrap();
        let errors = formset.validate(&[4]).unwrap_err();
        assert_eq!(errors.forms[0].get("reps"), [NEGATIVE_VALUE.to_string()]);
    }
}
