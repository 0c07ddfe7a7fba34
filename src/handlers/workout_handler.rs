//! Workout list, creation, editing and deletion.

use actix_web::{web, HttpResponse};
use chrono::Utc;
use serde_json::json;
use sqlx::{SqliteConnection, SqlitePool};

use crate::config::settings::PaginationSettings;
use crate::db::{exercises, sessions, workout_exercises, workouts};
use crate::forms::workout::{WorkoutForm, WorkoutSubmission};
use crate::forms::workout_exercise::{WorkoutExerciseForm, EMPTY_LABEL};
use crate::handlers::error::AppError;
use crate::handlers::view::{edit_workout_path, redirect, render, render_invalid, WORKOUT_LIST_PATH};
use crate::models::exercise::ExerciseChoice;
use crate::models::session::{FlashMessage, SessionContext};
use crate::models::workout::Workout;
use crate::services::generate_reports;
use crate::utils::pagination::{PageQuery, Paginator};

pub const FORGOTTEN_SELECTION: &str = "You might have forgotten to select the exercise you want to add!";

fn choice_ids(choices: &[ExerciseChoice]) -> Vec<i64> {
    choices.iter().map(|c| c.id).collect()
}

#[tracing::instrument(name = "List workouts", skip(session, pool, pagination), fields(user_id = %session.user_id))]
pub async fn list_workouts(
    query: web::Query<PageQuery>,
    session: SessionContext,
    pool: web::Data<SqlitePool>,
    pagination: web::Data<PaginationSettings>,
) -> Result<HttpResponse, AppError> {
    let mut conn = pool.acquire().await?;

    let reports = generate_reports(&mut conn, session.user_id).await?;
    let messages = sessions::take_messages(&mut conn, &session.session_id).await?;
    let page = Paginator::new(pagination.workouts_per_page).get_page(reports, query.page.as_deref());

    Ok(render("workout_list", json!({
        "page": page,
        "messages": messages,
    })))
}

#[tracing::instrument(name = "Show add workout form", skip(session, pool), fields(user_id = %session.user_id))]
pub async fn add_workout_form(
    session: SessionContext,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse, AppError> {
    let mut conn = pool.acquire().await?;
    let choices = exercises::list_choices(&mut conn, session.user_id).await?;

    Ok(render("add_workout", json!({
        "workout_form": WorkoutForm::default(),
        "workout_exercise_form": WorkoutExerciseForm::default(),
        "exercise_choices": choices,
        "empty_label": EMPTY_LABEL,
    })))
}

/// Create a workout together with its first exercise.
///
/// Both forms are validated before anything is written, and both rows are inserted in one
/// transaction, so a bad selection never leaves an empty workout behind.
#[tracing::instrument(name = "Add workout", skip(form, session, pool), fields(user_id = %session.user_id))]
pub async fn add_workout(
    form: web::Json<WorkoutSubmission>,
    session: SessionContext,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse, AppError> {
    let mut conn = pool.acquire().await?;
    let choices = exercises::list_choices(&mut conn, session.user_id).await?;

    let workout = form.workout.validate();
    let selection = form.workout_exercise.validate(&choice_ids(&choices));

    let (workout, selection) = match (workout, selection) {
        (Ok(workout), Ok(selection)) => (workout, selection),
        (workout, selection) => {
            tracing::info!("Invalid add workout submission");
            return Ok(render_invalid("add_workout", json!({
                "workout_form": form.workout,
                "workout_exercise_form": form.workout_exercise,
                "errors": {
                    "workout": workout.err().unwrap_or_default(),
                    "workout_exercise": selection.err().unwrap_or_default(),
                },
                "exercise_choices": choices,
                "empty_label": EMPTY_LABEL,
            })));
        }
    };
    drop(conn);

    let mut tx = pool.begin().await?;
    let workout_id = workouts::insert_workout(&mut tx, session.user_id, &workout.name, Utc::now()).await?;
    workout_exercises::insert_workout_exercise(&mut tx, workout_id, selection.exercise_id).await?;
    tx.commit().await?;

    tracing::info!("Created workout {}", workout_id);
    Ok(redirect(edit_workout_path(workout_id)))
}

/// Everything the edit workout view shows besides the submitted forms.
pub(crate) async fn edit_workout_context(
    conn: &mut SqliteConnection,
    session: &SessionContext,
    workout: &Workout,
    workout_form: &WorkoutForm,
    workout_exercise_form: &WorkoutExerciseForm,
) -> Result<serde_json::Value, AppError> {
    let workout_exercises = workout_exercises::list_for_workout(conn, workout.id).await?;
    let choices = exercises::list_choices(conn, session.user_id).await?;
    let messages = sessions::take_messages(conn, &session.session_id).await?;

    Ok(json!({
        "workout": workout,
        "workout_form": workout_form,
        "workout_exercise_form": workout_exercise_form,
        "workout_exercises": workout_exercises,
        "exercise_choices": choices,
        "empty_label": EMPTY_LABEL,
        "messages": messages,
    }))
}

#[tracing::instrument(name = "Show edit workout form", skip(session, pool), fields(user_id = %session.user_id))]
pub async fn edit_workout_form(
    path: web::Path<i64>,
    session: SessionContext,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse, AppError> {
    let workout_id = path.into_inner();
    let mut conn = pool.acquire().await?;
    let workout = workouts::get_workout(&mut conn, session.user_id, workout_id).await?;

    let context = edit_workout_context(
        &mut conn,
        &session,
        &workout,
        &WorkoutForm::from_workout(&workout),
        &WorkoutExerciseForm::default(),
    )
    .await?;
    Ok(render("edit_workout", context))
}

/// Save the workout name, append an exercise, or both.
///
/// Only the form that was touched has to be valid. When both or neither changed, both must be.
#[tracing::instrument(name = "Edit workout", skip(form, session, pool), fields(user_id = %session.user_id))]
pub async fn edit_workout(
    path: web::Path<i64>,
    form: web::Json<WorkoutSubmission>,
    session: SessionContext,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse, AppError> {
    let workout_id = path.into_inner();
    let mut conn = pool.acquire().await?;
    let workout = workouts::get_workout(&mut conn, session.user_id, workout_id).await?;
    let choices = exercises::list_choices(&mut conn, session.user_id).await?;

    let workout_changed = form.workout.has_changed(&workout);
    let selection_changed = form.workout_exercise.has_changed();
    let validated_workout = form.workout.validate();
    let validated_selection = form.workout_exercise.validate(&choice_ids(&choices));

    let (name, exercise_id) = match (&validated_workout, &validated_selection) {
        (Ok(valid), _) if workout_changed && !selection_changed => (Some(valid.name.as_str()), None),
        (_, Ok(valid)) if selection_changed && !workout_changed => (None, Some(valid.exercise_id)),
        (Ok(workout), Ok(selection)) => (Some(workout.name.as_str()), Some(selection.exercise_id)),
        _ => {
            tracing::info!("Invalid edit workout submission");
            let mut context = edit_workout_context(
                &mut conn,
                &session,
                &workout,
                &form.workout,
                &form.workout_exercise,
            )
            .await?;
            context["errors"] = json!({
                "workout": validated_workout.clone().err().unwrap_or_default(),
                "workout_exercise": validated_selection.clone().err().unwrap_or_default(),
            });
            if let Some(messages) = context["messages"].as_array_mut() {
                messages.push(json!(FlashMessage::error(FORGOTTEN_SELECTION)));
            }
            return Ok(render_invalid("edit_workout", context));
        }
    };
    drop(conn);

    let mut tx = pool.begin().await?;
    if let Some(name) = name {
        workouts::update_workout_name(&mut tx, session.user_id, workout.id, name).await?;
    }
    if let Some(exercise_id) = exercise_id {
        workout_exercises::insert_workout_exercise(&mut tx, workout.id, exercise_id).await?;
    }
    tx.commit().await?;

    Ok(redirect(edit_workout_path(workout.id)))
}

#[tracing::instrument(name = "Delete workout", skip(session, pool), fields(user_id = %session.user_id))]
pub async fn delete_workout(
    path: web::Path<i64>,
    session: SessionContext,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse, AppError> {
    let workout_id = path.into_inner();

    let mut tx = pool.begin().await?;
    workouts::delete_workout(&mut tx, session.user_id, workout_id).await?;
    tx.commit().await?;

    Ok(redirect(WORKOUT_LIST_PATH))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::FormErrors;

    #[test]
    fn test_choice_ids() {
        let choices = vec![
            ExerciseChoice { id: 3, name: "Squat".to_string() },
            ExerciseChoice { id: 5, name: "Row".to_string() },
        ];
        assert_eq!(choice_ids(&choices), vec![3, 5]);
    }

    #[test]
    fn test_form_errors_serialize_per_field() {
        let mut errors = FormErrors::new();
        errors.add("name", "This field is required.");
        assert_eq!(
            serde_json::to_value(&errors).unwrap(),
            json!({ "name": ["This field is required."] })
        );
    }
}
