//! Login sessions and the flash messages queued on them.

use chrono::Utc;
use sqlx::{FromRow, SqliteConnection};
use uuid::Uuid;

use crate::db::{require, StoreResult};
use crate::models::session::{FlashMessage, MessageLevel, SessionContext};

#[derive(FromRow)]
struct SessionRow {
    id: String,
    user_id: i64,
    username: String,
    edit_exercise_id: Option<i64>,
}

/// Open a new session for `user_id` and return its id.
pub async fn create_session(conn: &mut SqliteConnection, user_id: i64) -> StoreResult<String> {
    let session_id = Uuid::new_v4().to_string();
    sqlx::query("INSERT INTO sessions (id, user_id, created_at) VALUES (?, ?, ?)")
        .bind(&session_id)
        .bind(user_id)
        .bind(Utc::now())
        .execute(&mut *conn)
        .await?;
    Ok(session_id)
}

/// Load a session, which must belong to `user_id`.
pub async fn load_session(
    conn: &mut SqliteConnection,
    session_id: &str,
    user_id: i64,
) -> StoreResult<SessionContext> {
    let row = sqlx::query_as::<_, SessionRow>(
        r#"
        SELECT s.id, s.user_id, u.username, s.edit_exercise_id
        FROM sessions s
        JOIN users u ON u.id = s.user_id
        WHERE s.id = ? AND s.user_id = ?
        "#,
    )
    .bind(session_id)
    .bind(user_id)
    .fetch_optional(&mut *conn)
    .await?;

    let row = require(row, "Session")?;
    Ok(SessionContext::new(row.id, row.user_id, row.username, row.edit_exercise_id))
}

/// Persist the remembered exercise and any queued messages.
pub async fn save_session(conn: &mut SqliteConnection, session: &mut SessionContext) -> StoreResult<()> {
    sqlx::query("UPDATE sessions SET edit_exercise_id = ? WHERE id = ?")
        .bind(session.edit_exercise_id)
        .bind(&session.session_id)
        .execute(&mut *conn)
        .await?;

    for message in session.take_pending_messages() {
        sqlx::query("INSERT INTO session_messages (session_id, level, message) VALUES (?, ?, ?)")
            .bind(&session.session_id)
            .bind(message.level.as_str())
            .bind(&message.message)
            .execute(&mut *conn)
            .await?;
    }
    Ok(())
}

/// Remove and return the queued messages, oldest first.
pub async fn take_messages(conn: &mut SqliteConnection, session_id: &str) -> StoreResult<Vec<FlashMessage>> {
    let rows = sqlx::query_as::<_, (String, String)>(
        "SELECT level, message FROM session_messages WHERE session_id = ? ORDER BY id",
    )
    .bind(session_id)
    .fetch_all(&mut *conn)
    .await?;

    sqlx::query("DELETE FROM session_messages WHERE session_id = ?")
        .bind(session_id)
        .execute(&mut *conn)
        .await?;

    Ok(rows
        .into_iter()
        .map(|(level, message)| FlashMessage {
            level: MessageLevel::from_str(&level).unwrap_or(MessageLevel::Info),
            message,
        })
        .collect())
}
