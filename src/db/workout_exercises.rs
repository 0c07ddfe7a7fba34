use sqlx::SqliteConnection;

use crate::db::{require, require_affected, StoreError, StoreResult};
use crate::models::workout_exercise::WorkoutExerciseDetail;

const ENTITY: &str = "Workout exercise";

const DETAIL_COLUMNS: &str = r#"
    SELECT we.id, we.workout_id, we.exercise_id, we.done,
           e.name AS exercise_name, e.exercise_type, e.goal
    FROM workout_exercises we
    JOIN workouts w ON w.id = we.workout_id
    JOIN exercises e ON e.id = we.exercise_id
"#;

pub async fn insert_workout_exercise(
    conn: &mut SqliteConnection,
    workout_id: i64,
    exercise_id: i64,
) -> StoreResult<i64> {
    let result = sqlx::query("INSERT INTO workout_exercises (workout_id, exercise_id, done) VALUES (?, ?, FALSE)")
        .bind(workout_id)
        .bind(exercise_id)
        .execute(&mut *conn)
        .await?;
    Ok(result.last_insert_rowid())
}

pub async fn get_workout_exercise(
    conn: &mut SqliteConnection,
    user_id: i64,
    workout_exercise_id: i64,
) -> StoreResult<WorkoutExerciseDetail> {
    let query = format!("{DETAIL_COLUMNS} WHERE we.id = ? AND w.user_id = ?");
    let detail = sqlx::query_as::<_, WorkoutExerciseDetail>(&query)
        .bind(workout_exercise_id)
        .bind(user_id)
        .fetch_optional(&mut *conn)
        .await?;
    require(detail, ENTITY)
}

/// The exercises of one workout in the order they were added.
pub async fn list_for_workout(
    conn: &mut SqliteConnection,
    workout_id: i64,
) -> StoreResult<Vec<WorkoutExerciseDetail>> {
    let query = format!("{DETAIL_COLUMNS} WHERE we.workout_id = ? ORDER BY we.id");
    let details = sqlx::query_as::<_, WorkoutExerciseDetail>(&query)
        .bind(workout_id)
        .fetch_all(&mut *conn)
        .await?;
    Ok(details)
}

/// The exercises of all workouts of a user, in the order they were added.
pub async fn list_for_user(conn: &mut SqliteConnection, user_id: i64) -> StoreResult<Vec<WorkoutExerciseDetail>> {
    let query = format!("{DETAIL_COLUMNS} WHERE w.user_id = ? ORDER BY we.id");
    let details = sqlx::query_as::<_, WorkoutExerciseDetail>(&query)
        .bind(user_id)
        .fetch_all(&mut *conn)
        .await?;
    Ok(details)
}

pub async fn update_workout_exercise(
    conn: &mut SqliteConnection,
    workout_exercise_id: i64,
    exercise_id: i64,
    done: bool,
) -> StoreResult<()> {
    let result = sqlx::query("UPDATE workout_exercises SET exercise_id = ?, done = ? WHERE id = ?")
        .bind(exercise_id)
        .bind(done)
        .bind(workout_exercise_id)
        .execute(&mut *conn)
        .await?;
    require_affected(result.rows_affected(), ENTITY)
}

pub async fn set_exercise(conn: &mut SqliteConnection, workout_exercise_id: i64, exercise_id: i64) -> StoreResult<()> {
    let result = sqlx::query("UPDATE workout_exercises SET exercise_id = ? WHERE id = ?")
        .bind(exercise_id)
        .bind(workout_exercise_id)
        .execute(&mut *conn)
        .await?;
    require_affected(result.rows_affected(), ENTITY)
}

/// Delete a workout exercise of the given workout together with its sets.
#[tracing::instrument(name = "Delete workout exercise", skip(conn))]
pub async fn delete_workout_exercise(
    conn: &mut SqliteConnection,
    user_id: i64,
    workout_id: i64,
    workout_exercise_id: i64,
) -> StoreResult<()> {
    let detail = get_workout_exercise(conn, user_id, workout_exercise_id).await?;
    if detail.workout_id != workout_id {
        return Err(StoreError::NotFound(ENTITY));
    }

    sqlx::query("DELETE FROM exercise_sets WHERE workout_exercise_id = ?")
        .bind(workout_exercise_id)
        .execute(&mut *conn)
        .await?;

    let result = sqlx::query("DELETE FROM workout_exercises WHERE id = ?")
        .bind(workout_exercise_id)
        .execute(&mut *conn)
        .await?;
    require_affected(result.rows_affected(), ENTITY)
}
