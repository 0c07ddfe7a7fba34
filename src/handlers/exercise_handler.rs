//! The user's exercise catalogue.

use actix_web::{web, HttpResponse};
use serde_json::json;
use sqlx::SqlitePool;

use crate::config::settings::PaginationSettings;
use crate::db::{exercises, sessions, StoreError};
use crate::forms::exercise::ExerciseForm;
use crate::handlers::error::AppError;
use crate::handlers::view::{redirect, render, render_invalid, EXERCISE_LIST_PATH};
use crate::models::session::{FlashMessage, SessionContext};
use crate::utils::pagination::{PageQuery, Paginator};

pub const NAME_MISSING: &str = "You need to enter a Name for the exercise, before adding it!";
pub const EXERCISE_IN_USE: &str = "This exercise cannot be deleted because it is being used in a workout!";

#[tracing::instrument(name = "List exercises", skip(session, pool, pagination), fields(user_id = %session.user_id))]
pub async fn list_exercises(
    query: web::Query<PageQuery>,
    session: SessionContext,
    pool: web::Data<SqlitePool>,
    pagination: web::Data<PaginationSettings>,
) -> Result<HttpResponse, AppError> {
    let mut conn = pool.acquire().await?;
    let exercises = exercises::list_exercises(&mut conn, session.user_id).await?;
    let messages = sessions::take_messages(&mut conn, &session.session_id).await?;
    let page = Paginator::new(pagination.exercises_per_page).get_page(exercises, query.page.as_deref());

    Ok(render("edit_exercise_list", json!({
        "exercise_form": ExerciseForm::default(),
        "page": page,
        "messages": messages,
    })))
}

#[tracing::instrument(name = "Add exercise", skip(form, session, pool, pagination), fields(user_id = %session.user_id))]
pub async fn add_exercise(
    form: web::Json<ExerciseForm>,
    session: SessionContext,
    pool: web::Data<SqlitePool>,
    pagination: web::Data<PaginationSettings>,
) -> Result<HttpResponse, AppError> {
    let exercise = match form.validate() {
        Ok(exercise) => exercise,
        Err(errors) => {
            tracing::info!("Invalid exercise submission");
            let mut conn = pool.acquire().await?;
            let exercises = exercises::list_exercises(&mut conn, session.user_id).await?;
            let mut messages = sessions::take_messages(&mut conn, &session.session_id).await?;
            messages.push(FlashMessage::error(NAME_MISSING));
            let page = Paginator::new(pagination.exercises_per_page).get_page(exercises, None);

            return Ok(render_invalid("edit_exercise_list", json!({
                "exercise_form": form.into_inner(),
                "errors": errors,
                "page": page,
                "messages": messages,
            })));
        }
    };

    let mut tx = pool.begin().await?;
    let exercise_id = exercises::insert_exercise(&mut tx, session.user_id, &exercise).await?;
    tx.commit().await?;

    tracing::info!("Created exercise {}", exercise_id);
    Ok(redirect(EXERCISE_LIST_PATH))
}

/// Show an exercise for editing and remember it in the session as the one being edited.
#[tracing::instrument(name = "Show edit exercise form", skip(session, pool), fields(user_id = %session.user_id))]
pub async fn edit_exercise_form(
    path: web::Path<i64>,
    mut session: SessionContext,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse, AppError> {
    let exercise_id = path.into_inner();

    let mut tx = pool.begin().await?;
    let exercise = exercises::get_exercise(&mut tx, session.user_id, exercise_id).await?;
    session.edit_exercise_id = Some(exercise.id);
    sessions::save_session(&mut tx, &mut session).await?;
    tx.commit().await?;

    Ok(render("edit_exercise", json!({
        "exercise": exercise,
        "exercise_form": ExerciseForm::from_exercise(&exercise),
    })))
}

/// Save the exercise whose edit form was opened last in this session.
#[tracing::instrument(name = "Edit exercise", skip(form, session, pool), fields(user_id = %session.user_id))]
pub async fn edit_exercise(
    form: web::Json<ExerciseForm>,
    session: SessionContext,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse, AppError> {
    let exercise_id = session.edit_exercise_id.ok_or(AppError::NotFound("Exercise"))?;

    let mut tx = pool.begin().await?;
    let exercise = exercises::get_exercise(&mut tx, session.user_id, exercise_id).await?;

    let valid = match form.validate() {
        Ok(valid) => valid,
        Err(errors) => {
            tracing::info!("Invalid exercise submission");
            return Ok(render_invalid("edit_exercise", json!({
                "exercise": exercise,
                "exercise_form": form.into_inner(),
                "errors": errors,
            })));
        }
    };

    exercises::update_exercise(&mut tx, session.user_id, exercise.id, &valid).await?;
    tx.commit().await?;

    Ok(redirect(EXERCISE_LIST_PATH))
}

/// Delete an exercise unless a workout still uses it.
#[tracing::instrument(name = "Delete exercise", skip(session, pool), fields(user_id = %session.user_id))]
pub async fn delete_exercise(
    path: web::Path<i64>,
    mut session: SessionContext,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse, AppError> {
    let exercise_id = path.into_inner();

    let mut tx = pool.begin().await?;
    match exercises::delete_exercise(&mut tx, session.user_id, exercise_id).await {
        Ok(()) => {
            if session.edit_exercise_id == Some(exercise_id) {
                session.edit_exercise_id = None;
                sessions::save_session(&mut tx, &mut session).await?;
            }
        }
        Err(StoreError::ExerciseInUse(id)) => {
            tracing::info!("Exercise {} is in use and was kept", id);
            session.flash(FlashMessage::error(EXERCISE_IN_USE));
            sessions::save_session(&mut tx, &mut session).await?;
        }
        Err(e) => return Err(e.into()),
    }
    tx.commit().await?;

    Ok(redirect(EXERCISE_LIST_PATH))
}
