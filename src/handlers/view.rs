//! Responses shared by all page handlers.

use actix_web::{http::header, HttpResponse};
use serde::Serialize;

use crate::models::common::View;

pub const WORKOUT_LIST_PATH: &str = "/workouts";
pub const EXERCISE_LIST_PATH: &str = "/exercises";

pub fn edit_workout_path(workout_id: i64) -> String {
    format!("/workouts/{}/edit", workout_id)
}

pub fn edit_workout_exercise_path(workout_exercise_id: i64) -> String {
    format!("/workout_exercises/{}/edit", workout_exercise_id)
}

pub fn render<T: Serialize>(view: &'static str, context: T) -> HttpResponse {
    HttpResponse::Ok().json(View::new(view, context))
}

/// Re-render a form view after a failed validation.
pub fn render_invalid<T: Serialize>(view: &'static str, context: T) -> HttpResponse {
    HttpResponse::UnprocessableEntity().json(View::new(view, context))
}

pub fn redirect(location: impl Into<String>) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location.into()))
        .finish()
}
