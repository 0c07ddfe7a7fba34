use actix_web::{web, HttpResponse};
use serde_json::json;
use sqlx::SqlitePool;

use crate::db::{exercise_sets, workout_exercises};
use crate::forms::exercise_set::{ExerciseSetForm, ExerciseSetFormset};
use crate::forms::workout_exercise::WorkoutExerciseForm;
use crate::forms::FieldValue;
use crate::handlers::error::AppError;
use crate::handlers::view::{edit_workout_exercise_path, redirect, render_invalid};
use crate::handlers::workout_exercise_handler::edit_sets_context;
use crate::models::exercise_set::SetValues;
use crate::models::session::SessionContext;

/// Log an empty set, to be filled in with the batch editor.
#[tracing::instrument(name = "Add exercise set", skip(session, pool), fields(user_id = %session.user_id))]
pub async fn add_exercise_set(
    path: web::Path<i64>,
    session: SessionContext,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse, AppError> {
    let workout_exercise_id = path.into_inner();

    let mut tx = pool.begin().await?;
    let detail = workout_exercises::get_workout_exercise(&mut tx, session.user_id, workout_exercise_id).await?;
    exercise_sets::insert_exercise_set(&mut tx, detail.id, &SetValues::default()).await?;
    tx.commit().await?;

    Ok(redirect(edit_workout_exercise_path(detail.id)))
}

/// Save all sets of a workout exercise at once.
#[tracing::instrument(name = "Update exercise sets", skip(formset, session, pool), fields(user_id = %session.user_id))]
pub async fn update_exercise_sets(
    path: web::Path<i64>,
    formset: web::Json<ExerciseSetFormset>,
    session: SessionContext,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse, AppError> {
    let workout_exercise_id = path.into_inner();
    let mut conn = pool.acquire().await?;
    let detail = workout_exercises::get_workout_exercise(&mut conn, session.user_id, workout_exercise_id).await?;
    let existing: Vec<i64> = exercise_sets::list_for_workout_exercise(&mut conn, detail.id)
        .await?
        .iter()
        .map(|set| set.id)
        .collect();

    let rows = match formset.validate(&existing) {
        Ok(rows) => rows,
        Err(errors) => {
            tracing::info!("Invalid exercise set formset");
            let workout_exercise_form = WorkoutExerciseForm {
                exercise: Some(FieldValue::Integer(detail.exercise_id)),
            };
            let mut context = edit_sets_context(
                &mut conn,
                &session,
                &detail,
                &workout_exercise_form,
                &ExerciseSetForm::default(),
            )
            .await?;
            context["formset"] = json!(formset.into_inner());
            context["formset_errors"] = json!(errors);
            return Ok(render_invalid(detail.kind().edit_view(), context));
        }
    };
    drop(conn);

    let mut tx = pool.begin().await?;
    for row in &rows {
        exercise_sets::update_exercise_set(&mut tx, row.id, &row.values).await?;
    }
    tx.commit().await?;

    Ok(redirect(edit_workout_exercise_path(detail.id)))
}

#[tracing::instrument(name = "Delete exercise set", skip(session, pool), fields(user_id = %session.user_id))]
pub async fn delete_exercise_set(
    path: web::Path<(i64, i64)>,
    session: SessionContext,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse, AppError> {
    let (workout_exercise_id, set_id) = path.into_inner();

    let mut tx = pool.begin().await?;
    let detail = workout_exercises::get_workout_exercise(&mut tx, session.user_id, workout_exercise_id).await?;
    exercise_sets::delete_exercise_set(&mut tx, detail.id, set_id).await?;
    tx.commit().await?;

    Ok(redirect(edit_workout_exercise_path(detail.id)))
}
