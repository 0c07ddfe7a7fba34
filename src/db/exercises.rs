use sqlx::SqliteConnection;

use crate::db::{require, require_affected, StoreError, StoreResult};
use crate::forms::exercise::ValidExercise;
use crate::models::exercise::{Exercise, ExerciseChoice};

const ENTITY: &str = "Exercise";

pub async fn insert_exercise(
    conn: &mut SqliteConnection,
    user_id: i64,
    exercise: &ValidExercise,
) -> StoreResult<i64> {
    let result = sqlx::query(
        "INSERT INTO exercises (user_id, name, exercise_type, goal) VALUES (?, ?, ?, ?)",
    )
    .bind(user_id)
    .bind(&exercise.name)
    .bind(exercise.exercise_type)
    .bind(&exercise.goal)
    .execute(&mut *conn)
    .await?;
    Ok(result.last_insert_rowid())
}

pub async fn get_exercise(conn: &mut SqliteConnection, user_id: i64, exercise_id: i64) -> StoreResult<Exercise> {
    let exercise = sqlx::query_as::<_, Exercise>(
        "SELECT id, user_id, name, exercise_type, goal FROM exercises WHERE id = ? AND user_id = ?",
    )
    .bind(exercise_id)
    .bind(user_id)
    .fetch_optional(&mut *conn)
    .await?;
    require(exercise, ENTITY)
}

/// Newest first.
pub async fn list_exercises(conn: &mut SqliteConnection, user_id: i64) -> StoreResult<Vec<Exercise>> {
    let exercises = sqlx::query_as::<_, Exercise>(
        "SELECT id, user_id, name, exercise_type, goal FROM exercises WHERE user_id = ? ORDER BY id DESC",
    )
    .bind(user_id)
    .fetch_all(&mut *conn)
    .await?;
    Ok(exercises)
}

/// Entries of the exercise selector, in creation order.
pub async fn list_choices(conn: &mut SqliteConnection, user_id: i64) -> StoreResult<Vec<ExerciseChoice>> {
    let choices = sqlx::query_as::<_, ExerciseChoice>(
        "SELECT id, name FROM exercises WHERE user_id = ? ORDER BY id",
    )
    .bind(user_id)
    .fetch_all(&mut *conn)
    .await?;
    Ok(choices)
}

/// The user's oldest exercise, if any.
pub async fn first_exercise_id(conn: &mut SqliteConnection, user_id: i64) -> StoreResult<Option<i64>> {
    let id = sqlx::query_scalar::<_, i64>(
        "SELECT id FROM exercises WHERE user_id = ? ORDER BY id LIMIT 1",
    )
    .bind(user_id)
    .fetch_optional(&mut *conn)
    .await?;
    Ok(id)
}

pub async fn update_exercise(
    conn: &mut SqliteConnection,
    user_id: i64,
    exercise_id: i64,
    exercise: &ValidExercise,
) -> StoreResult<()> {
    let result = sqlx::query(
        "UPDATE exercises SET name = ?, exercise_type = ?, goal = ? WHERE id = ? AND user_id = ?",
    )
    .bind(&exercise.name)
    .bind(exercise.exercise_type)
    .bind(&exercise.goal)
    .bind(exercise_id)
    .bind(user_id)
    .execute(&mut *conn)
    .await?;
    require_affected(result.rows_affected(), ENTITY)
}

/// Delete an exercise no workout refers to.
///
/// Fails with `ExerciseInUse` and leaves the row in place otherwise.
#[tracing::instrument(name = "Delete exercise", skip(conn))]
pub async fn delete_exercise(conn: &mut SqliteConnection, user_id: i64, exercise_id: i64) -> StoreResult<()> {
    get_exercise(conn, user_id, exercise_id).await?;

    let references = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM workout_exercises WHERE exercise_id = ?",
    )
    .bind(exercise_id)
    .fetch_one(&mut *conn)
    .await?;
    if references > 0 {
        return Err(StoreError::ExerciseInUse(exercise_id));
    }

    let result = sqlx::query("DELETE FROM exercises WHERE id = ? AND user_id = ?")
        .bind(exercise_id)
        .bind(user_id)
        .execute(&mut *conn)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_foreign_key_violation() => {
                StoreError::ExerciseInUse(exercise_id)
            }
            e => StoreError::Database(e),
        })?;
    require_affected(result.rows_affected(), ENTITY)
}
