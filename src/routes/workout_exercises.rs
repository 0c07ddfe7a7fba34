use actix_web::{delete, get, post, put, web, HttpResponse};
use sqlx::SqlitePool;

use crate::forms::exercise_set::{ExerciseSetFormset, ExerciseSetSubmission};
use crate::handlers::error::AppError;
use crate::handlers::{exercise_set_handler, workout_exercise_handler};
use crate::models::session::SessionContext;

#[get("/{workout_exercise_id}/edit")]
async fn edit_workout_exercise_form(
    path: web::Path<i64>,
    session: SessionContext,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse, AppError> {
    workout_exercise_handler::edit_workout_exercise_form(path, session, pool).await
}

#[post("/{workout_exercise_id}/edit")]
async fn edit_workout_exercise(
    path: web::Path<i64>,
    form: web::Json<ExerciseSetSubmission>,
    session: SessionContext,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse, AppError> {
    workout_exercise_handler::edit_workout_exercise(path, form, session, pool).await
}

#[post("/{workout_exercise_id}/sets")]
async fn add_exercise_set(
    path: web::Path<i64>,
    session: SessionContext,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse, AppError> {
    exercise_set_handler::add_exercise_set(path, session, pool).await
}

#[put("/{workout_exercise_id}/sets")]
async fn update_exercise_sets(
    path: web::Path<i64>,
    formset: web::Json<ExerciseSetFormset>,
    session: SessionContext,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse, AppError> {
    exercise_set_handler::update_exercise_sets(path, formset, session, pool).await
}

#[delete("/{workout_exercise_id}/sets/{set_id}")]
async fn delete_exercise_set(
    path: web::Path<(i64, i64)>,
    session: SessionContext,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse, AppError> {
    exercise_set_handler::delete_exercise_set(path, session, pool).await
}
