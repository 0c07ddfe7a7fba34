//! Persistence of all entities in SQLite.
//!
//! Every query is scoped to the owning user: a row that belongs to somebody else is reported
//! exactly like a row that does not exist. Functions take a plain connection so callers decide
//! whether they run inside a transaction (`&mut *tx`) or on a pooled connection.

pub mod exercise_sets;
pub mod exercises;
pub mod sessions;
pub mod users;
pub mod workout_exercises;
pub mod workouts;

use sqlx::SqlitePool;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("Exercise {0} is used in a workout")]
    ExerciseInUse(i64),
    #[error("{0} already exists")]
    Conflict(&'static str),
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Unwrap an optional record, reporting `entity` as not found when missing.
pub(crate) fn require<T>(record: Option<T>, entity: &'static str) -> StoreResult<T> {
    record.ok_or(StoreError::NotFound(entity))
}

/// Fail with `NotFound` when a write touched no row.
pub(crate) fn require_affected(rows_affected: u64, entity: &'static str) -> StoreResult<()> {
    if rows_affected == 0 {
        Err(StoreError::NotFound(entity))
    } else {
        Ok(())
    }
}

/// Apply the embedded migrations in `migrations/`.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
