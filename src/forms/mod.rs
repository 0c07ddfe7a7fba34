//! Validation of submitted forms.
//!
//! A form takes the raw fields of a request and turns them either into a typed record that is
//! ready for storage or into field-level error messages. Nothing in here touches the store, so
//! a failed validation can never leave a partial write behind.

pub mod exercise;
pub mod exercise_set;
pub mod workout;
pub mod workout_exercise;

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

pub const REQUIRED: &str = "This field is required.";
pub const INVALID_CHOICE: &str = "Select a valid choice. That choice is not one of the available choices.";
pub const INVALID_INTEGER: &str = "Enter a whole number.";
pub const INVALID_NUMBER: &str = "Enter a number.";
pub const NEGATIVE_VALUE: &str = "Ensure this value is greater than or equal to 0.";
pub const TAMPERED_FORMSET: &str = "Form data is missing or has been tampered with.";
pub const DUPLICATE_ROW: &str = "Please correct the duplicate data for id, which must be unique.";

/// Key under which errors not tied to a single field are reported.
pub const NON_FIELD_ERRORS: &str = "__all__";

/// A raw value as submitted in a request body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl FieldValue {
    /// The value as a text input would carry it, surrounding whitespace stripped.
    pub fn to_text(&self) -> String {
        match self {
            FieldValue::Bool(b) => b.to_string(),
            FieldValue::Integer(i) => i.to_string(),
            FieldValue::Float(f) => f.to_string(),
            FieldValue::Text(s) => s.trim().to_string(),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

/// Field name to error messages.
#[derive(Debug, Clone, Default, PartialEq, Serialize, thiserror::Error)]
#[error("invalid form: {0:?}")]
#[serde(transparent)]
pub struct FormErrors(BTreeMap<String, Vec<String>>);

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_string()).or_default().push(message.into());
    }

    pub fn merge(&mut self, other: FormErrors) {
        for (field, messages) in other.0 {
            self.0.entry(field).or_default().extend(messages);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or_default()
    }

    /// `Ok(value)` when no error was recorded.
    pub fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T, FormErrors> {
        if self.is_empty() {
            Ok(value())
        } else {
            Err(self)
        }
    }
}

/// Errors of a batch form: problems with the batch as a whole plus one entry per row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, thiserror::Error)]
#[error("invalid formset")]
pub struct FormsetErrors {
    pub non_form_errors: Vec<String>,
    pub forms: Vec<FormErrors>,
}

impl FormsetErrors {
    pub fn is_empty(&self) -> bool {
        self.non_form_errors.is_empty() && self.forms.iter().all(FormErrors::is_empty)
    }
}

/// A validated formset row together with the stored record it maps back to.
#[derive(Debug, Clone, PartialEq)]
pub struct FormsetRow<T> {
    pub id: i64,
    pub values: T,
}

/// Validate a batch of rows as one unit.
///
/// The batch must hold exactly one row per stored record (`existing_ids`); every row is
/// validated on its own and all problems are reported together.
pub(crate) fn validate_formset<R, T>(
    rows: &[R],
    existing_ids: &[i64],
    row_id: impl Fn(&R) -> Option<&FieldValue>,
    validate_row: impl Fn(&R) -> Result<T, FormErrors>,
) -> Result<Vec<FormsetRow<T>>, FormsetErrors> {
    let mut errors = FormsetErrors::default();
    if rows.len() != existing_ids.len() {
        errors.non_form_errors.push(TAMPERED_FORMSET.to_string());
    }

    let mut seen = HashSet::new();
    let mut valid = Vec::with_capacity(rows.len());
    for row in rows {
        let mut row_errors = FormErrors::new();

        let id = match clean_choice(row_id(row), existing_ids) {
            Ok(id) => {
                if seen.insert(id) {
                    Some(id)
                } else {
                    row_errors.add("id", DUPLICATE_ROW);
                    None
                }
            }
            Err(message) => {
                row_errors.add("id", message);
                None
            }
        };

        let values = match validate_row(row) {
            Ok(values) => Some(values),
            Err(e) => {
                row_errors.merge(e);
                None
            }
        };

        if let (Some(id), Some(values)) = (id, values) {
            valid.push(FormsetRow { id, values });
        }
        errors.forms.push(row_errors);
    }

    if errors.is_empty() {
        Ok(valid)
    } else {
        Err(errors)
    }
}

pub(crate) fn is_blank(value: Option<&FieldValue>) -> bool {
    match value {
        None => true,
        Some(FieldValue::Text(s)) => s.trim().is_empty(),
        Some(_) => false,
    }
}

pub(crate) fn clean_required_text(value: Option<&FieldValue>, max_length: usize) -> Result<String, String> {
    if is_blank(value) {
        return Err(REQUIRED.to_string());
    }
    clean_optional_text(value, max_length)
}

pub(crate) fn clean_optional_text(value: Option<&FieldValue>, max_length: usize) -> Result<String, String> {
    let text = value.map(FieldValue::to_text).unwrap_or_default();
    let length = text.chars().count();
    if length > max_length {
        return Err(format!(
            "Ensure this value has at most {} characters (it has {}).",
            max_length, length
        ));
    }
    Ok(text)
}

/// Absent and blank values count as 0.
pub(crate) fn clean_non_negative_integer(value: Option<&FieldValue>) -> Result<i64, String> {
    if is_blank(value) {
        return Ok(0);
    }
    let number = match value {
        Some(FieldValue::Integer(i)) => *i,
        Some(FieldValue::Float(f)) if f.is_finite() && f.fract() == 0.0 => *f as i64,
        Some(FieldValue::Text(s)) => parse_whole_number(s.trim()).ok_or_else(|| INVALID_INTEGER.to_string())?,
        _ => return Err(INVALID_INTEGER.to_string()),
    };
    if number < 0 {
        return Err(NEGATIVE_VALUE.to_string());
    }
    Ok(number)
}

fn parse_whole_number(s: &str) -> Option<i64> {
    if let Ok(i) = s.parse::<i64>() {
        return Some(i);
    }
    // "12.0" is still a whole number
    let (whole, fraction) = s.split_once('.')?;
    if !fraction.is_empty() && fraction.chars().all(|c| c == '0') {
        whole.parse::<i64>().ok()
    } else {
        None
    }
}

/// Absent and blank values count as 0.0.
pub(crate) fn clean_non_negative_float(value: Option<&FieldValue>) -> Result<f64, String> {
    if is_blank(value) {
        return Ok(0.0);
    }
    let number = match value {
        Some(FieldValue::Integer(i)) => *i as f64,
        Some(FieldValue::Float(f)) => *f,
        Some(FieldValue::Text(s)) => s.trim().parse::<f64>().map_err(|_| INVALID_NUMBER.to_string())?,
        _ => return Err(INVALID_NUMBER.to_string()),
    };
    if !number.is_finite() {
        return Err(INVALID_NUMBER.to_string());
    }
    if number < 0.0 {
        return Err(NEGATIVE_VALUE.to_string());
    }
    Ok(number)
}

/// An id picked from `choices`; blank means nothing was picked.
pub(crate) fn clean_choice(value: Option<&FieldValue>, choices: &[i64]) -> Result<i64, String> {
    if is_blank(value) {
        return Err(REQUIRED.to_string());
    }
    let id = match value {
        Some(FieldValue::Integer(i)) => Some(*i),
        Some(FieldValue::Text(s)) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    match id {
        Some(id) if choices.contains(&id) => Ok(id),
        _ => Err(INVALID_CHOICE.to_string()),
    }
}

/// Checkbox semantics: anything but an explicit "off" value is checked.
pub(crate) fn clean_boolean(value: Option<&FieldValue>) -> bool {
    match value {
        None => false,
        Some(FieldValue::Bool(b)) => *b,
        Some(FieldValue::Integer(i)) => *i != 0,
        Some(FieldValue::Float(f)) => *f != 0.0,
        Some(FieldValue::Text(s)) => {
            let s = s.trim().to_lowercase();
            !matches!(s.as_str(), "" | "0" | "false" | "off" | "no")
        }
    }
}
