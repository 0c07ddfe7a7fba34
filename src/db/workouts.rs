use chrono::{DateTime, Utc};
use sqlx::SqliteConnection;

use crate::db::{require, require_affected, StoreResult};
use crate::models::workout::Workout;

const ENTITY: &str = "Workout";

pub async fn insert_workout(
    conn: &mut SqliteConnection,
    user_id: i64,
    name: &str,
    date: DateTime<Utc>,
) -> StoreResult<i64> {
    let result = sqlx::query("INSERT INTO workouts (user_id, name, date) VALUES (?, ?, ?)")
        .bind(user_id)
        .bind(name)
        .bind(date)
        .execute(&mut *conn)
        .await?;
    Ok(result.last_insert_rowid())
}

pub async fn get_workout(conn: &mut SqliteConnection, user_id: i64, workout_id: i64) -> StoreResult<Workout> {
    let workout = sqlx::query_as::<_, Workout>(
        "SELECT id, user_id, name, date FROM workouts WHERE id = ? AND user_id = ?",
    )
    .bind(workout_id)
    .bind(user_id)
    .fetch_optional(&mut *conn)
    .await?;
    require(workout, ENTITY)
}

/// Newest first, ties broken by the later insert.
pub async fn list_workouts(conn: &mut SqliteConnection, user_id: i64) -> StoreResult<Vec<Workout>> {
    let workouts = sqlx::query_as::<_, Workout>(
        "SELECT id, user_id, name, date FROM workouts WHERE user_id = ? ORDER BY date DESC, id DESC",
    )
    .bind(user_id)
    .fetch_all(&mut *conn)
    .await?;
    Ok(workouts)
}

/// Only the name is editable, the date is fixed at creation.
pub async fn update_workout_name(
    conn: &mut SqliteConnection,
    user_id: i64,
    workout_id: i64,
    name: &str,
) -> StoreResult<()> {
    let result = sqlx::query("UPDATE workouts SET name = ? WHERE id = ? AND user_id = ?")
        .bind(name)
        .bind(workout_id)
        .bind(user_id)
        .execute(&mut *conn)
        .await?;
    require_affected(result.rows_affected(), ENTITY)
}

/// Delete a workout together with its exercises and their sets.
#[tracing::instrument(name = "Delete workout", skip(conn))]
pub async fn delete_workout(conn: &mut SqliteConnection, user_id: i64, workout_id: i64) -> StoreResult<()> {
    get_workout(conn, user_id, workout_id).await?;

    sqlx::query(
        r#"
        DELETE FROM exercise_sets
        WHERE workout_exercise_id IN (SELECT id FROM workout_exercises WHERE workout_id = ?)
        "#,
    )
    .bind(workout_id)
    .execute(&mut *conn)
    .await?;

    sqlx::query("DELETE FROM workout_exercises WHERE workout_id = ?")
        .bind(workout_id)
        .execute(&mut *conn)
        .await?;

    let result = sqlx::query("DELETE FROM workouts WHERE id = ? AND user_id = ?")
        .bind(workout_id)
        .bind(user_id)
        .execute(&mut *conn)
        .await?;
    require_affected(result.rows_affected(), ENTITY)
}
