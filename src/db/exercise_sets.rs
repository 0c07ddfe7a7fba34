use sqlx::SqliteConnection;

use crate::db::{require_affected, StoreResult};
use crate::models::exercise_set::{ExerciseSet, SetValues};

const ENTITY: &str = "Exercise set";

pub async fn insert_exercise_set(
    conn: &mut SqliteConnection,
    workout_exercise_id: i64,
    values: &SetValues,
) -> StoreResult<i64> {
    let result = sqlx::query(
        r#"
        INSERT INTO exercise_sets (workout_exercise_id, reps, weight, time, distance)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(workout_exercise_id)
    .bind(values.reps)
    .bind(values.weight)
    .bind(values.time)
    .bind(values.distance)
    .execute(&mut *conn)
    .await?;
    Ok(result.last_insert_rowid())
}

/// Sets of one workout exercise in the order they were logged.
pub async fn list_for_workout_exercise(
    conn: &mut SqliteConnection,
    workout_exercise_id: i64,
) -> StoreResult<Vec<ExerciseSet>> {
    let sets = sqlx::query_as::<_, ExerciseSet>(
        r#"
        SELECT id, workout_exercise_id, reps, weight, time, distance
        FROM exercise_sets
        WHERE workout_exercise_id = ?
        ORDER BY id
        "#,
    )
    .bind(workout_exercise_id)
    .fetch_all(&mut *conn)
    .await?;
    Ok(sets)
}

/// Sets of all workouts of a user in the order they were logged.
pub async fn list_for_user(conn: &mut SqliteConnection, user_id: i64) -> StoreResult<Vec<ExerciseSet>> {
    let sets = sqlx::query_as::<_, ExerciseSet>(
        r#"
        SELECT s.id, s.workout_exercise_id, s.reps, s.weight, s.time, s.distance
        FROM exercise_sets s
        JOIN workout_exercises we ON we.id = s.workout_exercise_id
        JOIN workouts w ON w.id = we.workout_id
        WHERE w.user_id = ?
        ORDER BY s.id
        "#,
    )
    .bind(user_id)
    .fetch_all(&mut *conn)
    .await?;
    Ok(sets)
}

pub async fn update_exercise_set(conn: &mut SqliteConnection, set_id: i64, values: &SetValues) -> StoreResult<()> {
    let result = sqlx::query(
        "UPDATE exercise_sets SET reps = ?, weight = ?, time = ?, distance = ? WHERE id = ?",
    )
    .bind(values.reps)
    .bind(values.weight)
    .bind(values.time)
    .bind(values.distance)
    .bind(set_id)
    .execute(&mut *conn)
    .await?;
    require_affected(result.rows_affected(), ENTITY)
}

/// Delete a set of the given workout exercise.
pub async fn delete_exercise_set(
    conn: &mut SqliteConnection,
    workout_exercise_id: i64,
    set_id: i64,
) -> StoreResult<()> {
    let result = sqlx::query("DELETE FROM exercise_sets WHERE id = ? AND workout_exercise_id = ?")
        .bind(set_id)
        .bind(workout_exercise_id)
        .execute(&mut *conn)
        .await?;
    require_affected(result.rows_affected(), ENTITY)
}
