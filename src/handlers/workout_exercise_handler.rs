//! Exercises within a workout: adding, batch editing, removing, and logging sets against one.

use actix_web::{web, HttpResponse};
use serde_json::json;
use sqlx::{SqliteConnection, SqlitePool};

use crate::db::{exercise_sets, exercises, sessions, workout_exercises, workouts};
use crate::forms::exercise_set::{ExerciseSetForm, ExerciseSetSubmission};
use crate::forms::workout::WorkoutForm;
use crate::forms::workout_exercise::{WorkoutExerciseForm, WorkoutExerciseFormset, EMPTY_LABEL};
use crate::forms::FieldValue;
use crate::handlers::error::AppError;
use crate::handlers::view::{edit_workout_exercise_path, edit_workout_path, redirect, render, render_invalid};
use crate::handlers::workout_handler::edit_workout_context;
use crate::models::session::{FlashMessage, SessionContext};
use crate::models::workout_exercise::WorkoutExerciseDetail;

pub const NO_EXERCISES: &str = "Create an exercise before adding it to a workout!";

/// Append the user's oldest exercise to a workout, to be changed in the batch editor.
#[tracing::instrument(name = "Add workout exercise", skip(session, pool), fields(user_id = %session.user_id))]
pub async fn add_workout_exercise(
    path: web::Path<i64>,
    mut session: SessionContext,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse, AppError> {
    let workout_id = path.into_inner();
    let mut tx = pool.begin().await?;
    let workout = workouts::get_workout(&mut tx, session.user_id, workout_id).await?;

    match exercises::first_exercise_id(&mut tx, session.user_id).await? {
        Some(exercise_id) => {
            workout_exercises::insert_workout_exercise(&mut tx, workout.id, exercise_id).await?;
        }
        None => {
            tracing::info!("User has no exercise to add");
            session.flash(FlashMessage::error(NO_EXERCISES));
            sessions::save_session(&mut tx, &mut session).await?;
        }
    }
    tx.commit().await?;

    Ok(redirect(edit_workout_path(workout.id)))
}

/// Save all exercises of a workout at once.
#[tracing::instrument(name = "Update workout exercises", skip(formset, session, pool), fields(user_id = %session.user_id))]
pub async fn update_workout_exercises(
    path: web::Path<i64>,
    formset: web::Json<WorkoutExerciseFormset>,
    session: SessionContext,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse, AppError> {
    let workout_id = path.into_inner();
    let mut conn = pool.acquire().await?;
    let workout = workouts::get_workout(&mut conn, session.user_id, workout_id).await?;
    let existing: Vec<i64> = workout_exercises::list_for_workout(&mut conn, workout.id)
        .await?
        .iter()
        .map(|we| we.id)
        .collect();
    let choices: Vec<i64> = exercises::list_choices(&mut conn, session.user_id)
        .await?
        .iter()
        .map(|c| c.id)
        .collect();

    let rows = match formset.validate(&existing, &choices) {
        Ok(rows) => rows,
        Err(errors) => {
            tracing::info!("Invalid workout exercise formset");
            let mut context = edit_workout_context(
                &mut conn,
                &session,
                &workout,
                &WorkoutForm::from_workout(&workout),
                &WorkoutExerciseForm::default(),
            )
            .await?;
            context["formset"] = json!(formset.into_inner());
            context["formset_errors"] = json!(errors);
            return Ok(render_invalid("edit_workout", context));
        }
    };
    drop(conn);

    let mut tx = pool.begin().await?;
    for row in &rows {
        workout_exercises::update_workout_exercise(&mut tx, row.id, row.values.exercise_id, row.values.done).await?;
    }
    tx.commit().await?;

    Ok(redirect(edit_workout_path(workout.id)))
}

#[tracing::instrument(name = "Delete workout exercise", skip(session, pool), fields(user_id = %session.user_id))]
pub async fn delete_workout_exercise(
    path: web::Path<(i64, i64)>,
    session: SessionContext,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse, AppError> {
    let (workout_id, workout_exercise_id) = path.into_inner();

    let mut tx = pool.begin().await?;
    workout_exercises::delete_workout_exercise(&mut tx, session.user_id, workout_id, workout_exercise_id).await?;
    tx.commit().await?;

    Ok(redirect(edit_workout_path(workout_id)))
}

/// Context of the set logging views. The view itself depends on the exercise kind.
pub(crate) async fn edit_sets_context(
    conn: &mut SqliteConnection,
    session: &SessionContext,
    detail: &WorkoutExerciseDetail,
    workout_exercise_form: &WorkoutExerciseForm,
    exercise_set_form: &ExerciseSetForm,
) -> Result<serde_json::Value, AppError> {
    let exercise = exercises::get_exercise(conn, session.user_id, detail.exercise_id).await?;
    let exercise_sets = exercise_sets::list_for_workout_exercise(conn, detail.id).await?;
    let choices = exercises::list_choices(conn, session.user_id).await?;

    Ok(json!({
        "workout_exercise": detail,
        "exercise": exercise,
        "workout_exercise_form": workout_exercise_form,
        "exercise_set_form": exercise_set_form,
        "exercise_sets": exercise_sets,
        "exercise_choices": choices,
        "empty_label": EMPTY_LABEL,
    }))
}

#[tracing::instrument(name = "Show exercise sets", skip(session, pool), fields(user_id = %session.user_id))]
pub async fn edit_workout_exercise_form(
    path: web::Path<i64>,
    session: SessionContext,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse, AppError> {
    let workout_exercise_id = path.into_inner();
    let mut conn = pool.acquire().await?;
    let detail = workout_exercises::get_workout_exercise(&mut conn, session.user_id, workout_exercise_id).await?;

    let workout_exercise_form = WorkoutExerciseForm {
        exercise: Some(FieldValue::Integer(detail.exercise_id)),
    };
    let context = edit_sets_context(
        &mut conn,
        &session,
        &detail,
        &workout_exercise_form,
        &ExerciseSetForm::default(),
    )
    .await?;
    Ok(render(detail.kind().edit_view(), context))
}

/// Change the exercise of a workout exercise and log a new set for it.
#[tracing::instrument(name = "Log exercise set", skip(form, session, pool), fields(user_id = %session.user_id))]
pub async fn edit_workout_exercise(
    path: web::Path<i64>,
    form: web::Json<ExerciseSetSubmission>,
    session: SessionContext,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse, AppError> {
    let workout_exercise_id = path.into_inner();
    let mut conn = pool.acquire().await?;
    let detail = workout_exercises::get_workout_exercise(&mut conn, session.user_id, workout_exercise_id).await?;
    let choices: Vec<i64> = exercises::list_choices(&mut conn, session.user_id)
        .await?
        .iter()
        .map(|c| c.id)
        .collect();

    let selection = form.workout_exercise.validate(&choices);
    let values = form.exercise_set.validate();

    let (selection, values) = match (selection, values) {
        (Ok(selection), Ok(values)) => (selection, values),
        (selection, values) => {
            tracing::info!("Invalid exercise set submission");
            let mut context = edit_sets_context(
                &mut conn,
                &session,
                &detail,
                &form.workout_exercise,
                &form.exercise_set,
            )
            .await?;
            context["errors"] = json!({
                "workout_exercise": selection.err().unwrap_or_default(),
                "exercise_set": values.err().unwrap_or_default(),
            });
            return Ok(render_invalid(detail.kind().edit_view(), context));
        }
    };
    drop(conn);

    let mut tx = pool.begin().await?;
    workout_exercises::set_exercise(&mut tx, detail.id, selection.exercise_id).await?;
    exercise_sets::insert_exercise_set(&mut tx, detail.id, &values).await?;
    tx.commit().await?;

    Ok(redirect(edit_workout_exercise_path(detail.id)))
}
