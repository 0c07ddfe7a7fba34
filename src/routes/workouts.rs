use actix_web::{delete, get, post, put, web, HttpResponse};
use sqlx::SqlitePool;

use crate::config::settings::PaginationSettings;
use crate::forms::workout::WorkoutSubmission;
use crate::forms::workout_exercise::WorkoutExerciseFormset;
use crate::handlers::error::AppError;
use crate::handlers::{workout_exercise_handler, workout_handler};
use crate::models::session::SessionContext;
use crate::utils::pagination::PageQuery;

#[get("")]
async fn workout_list(
    query: web::Query<PageQuery>,
    session: SessionContext,
    pool: web::Data<SqlitePool>,
    pagination: web::Data<PaginationSettings>,
) -> Result<HttpResponse, AppError> {
    workout_handler::list_workouts(query, session, pool, pagination).await
}

#[get("/add")]
async fn add_workout_form(
    session: SessionContext,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse, AppError> {
    workout_handler::add_workout_form(session, pool).await
}

#[post("/add")]
async fn add_workout(
    form: web::Json<WorkoutSubmission>,
    session: SessionContext,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse, AppError> {
    workout_handler::add_workout(form, session, pool).await
}

#[get("/{workout_id}/edit")]
async fn edit_workout_form(
    path: web::Path<i64>,
    session: SessionContext,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse, AppError> {
    workout_handler::edit_workout_form(path, session, pool).await
}

#[post("/{workout_id}/edit")]
async fn edit_workout(
    path: web::Path<i64>,
    form: web::Json<WorkoutSubmission>,
    session: SessionContext,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse, AppError> {
    workout_handler::edit_workout(path, form, session, pool).await
}

#[delete("/{workout_id}")]
async fn delete_workout(
    path: web::Path<i64>,
    session: SessionContext,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse, AppError> {
    workout_handler::delete_workout(path, session, pool).await
}

#[post("/{workout_id}/workout_exercises")]
async fn add_workout_exercise(
    path: web::Path<i64>,
    session: SessionContext,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse, AppError> {
    workout_exercise_handler::add_workout_exercise(path, session, pool).await
}

#[put("/{workout_id}/workout_exercises")]
async fn update_workout_exercises(
    path: web::Path<i64>,
    formset: web::Json<WorkoutExerciseFormset>,
    session: SessionContext,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse, AppError> {
    workout_exercise_handler::update_workout_exercises(path, formset, session, pool).await
}

#[delete("/{workout_id}/workout_exercises/{workout_exercise_id}")]
async fn delete_workout_exercise(
    path: web::Path<(i64, i64)>,
    session: SessionContext,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse, AppError> {
    workout_exercise_handler::delete_workout_exercise(path, session, pool).await
}
