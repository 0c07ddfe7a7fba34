use actix_web::{delete, get, post, web, HttpResponse};
use sqlx::SqlitePool;

use crate::config::settings::PaginationSettings;
use crate::forms::exercise::ExerciseForm;
use crate::handlers::error::AppError;
use crate::handlers::exercise_handler;
use crate::models::session::SessionContext;
use crate::utils::pagination::PageQuery;

#[get("")]
async fn exercise_list(
    query: web::Query<PageQuery>,
    session: SessionContext,
    pool: web::Data<SqlitePool>,
    pagination: web::Data<PaginationSettings>,
) -> Result<HttpResponse, AppError> {
    exercise_handler::list_exercises(query, session, pool, pagination).await
}

#[post("")]
async fn add_exercise(
    form: web::Json<ExerciseForm>,
    session: SessionContext,
    pool: web::Data<SqlitePool>,
    pagination: web::Data<PaginationSettings>,
) -> Result<HttpResponse, AppError> {
    exercise_handler::add_exercise(form, session, pool, pagination).await
}

#[post("/edit")]
async fn edit_exercise(
    form: web::Json<ExerciseForm>,
    session: SessionContext,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse, AppError> {
    exercise_handler::edit_exercise(form, session, pool).await
}

#[get("/{exercise_id}/edit")]
async fn edit_exercise_form(
    path: web::Path<i64>,
    session: SessionContext,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse, AppError> {
    exercise_handler::edit_exercise_form(path, session, pool).await
}

#[delete("/{exercise_id}")]
async fn delete_exercise(
    path: web::Path<i64>,
    session: SessionContext,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse, AppError> {
    exercise_handler::delete_exercise(path, session, pool).await
}
