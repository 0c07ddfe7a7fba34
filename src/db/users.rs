use chrono::Utc;
use sqlx::SqliteConnection;

use crate::db::{StoreError, StoreResult};
use crate::models::user::UserCredentials;

#[tracing::instrument(name = "Insert user", skip(conn, password_hash))]
pub async fn insert_user(
    conn: &mut SqliteConnection,
    username: &str,
    email: &str,
    password_hash: &str,
) -> StoreResult<i64> {
    let result = sqlx::query(
        r#"
        INSERT INTO users (username, email, password_hash, created_at)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(username)
    .bind(email)
    .bind(password_hash)
    .bind(Utc::now())
    .execute(&mut *conn)
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
            StoreError::Conflict("Username")
        }
        e => {
            tracing::error!("Failed to execute user insert query: {:?}", e);
            StoreError::Database(e)
        }
    })?;

    Ok(result.last_insert_rowid())
}

pub async fn find_credentials(
    conn: &mut SqliteConnection,
    username: &str,
) -> StoreResult<Option<UserCredentials>> {
    let user = sqlx::query_as::<_, UserCredentials>(
        "SELECT id, username, password_hash FROM users WHERE username = ?",
    )
    .bind(username)
    .fetch_optional(&mut *conn)
    .await?;
    Ok(user)
}
