use actix_web::{web, HttpResponse};
use secrecy::ExposeSecret;
use sqlx::SqlitePool;

use crate::db::users;
use crate::handlers::error::AppError;
use crate::models::common::ApiResponse;
use crate::models::user::RegistrationRequest;
use crate::utils::password::hash_password;

#[tracing::instrument(
    name = "Adding a new user",
    // Don't show arguments
    skip(user_form, pool),
    fields(
        username = %user_form.username,
        email = %user_form
    )
)]
pub async fn register_user(
    user_form: web::Json<RegistrationRequest>,
    pool: web::Data<SqlitePool>
) -> Result<HttpResponse, AppError> {
    let username = user_form.username.trim();
    if username.is_empty() || user_form.password.expose_secret().is_empty() {
        return Err(AppError::BadRequest("Username and password are required".to_string()));
    }

    let password_hash = hash_password(user_form.password.expose_secret())?;

    let mut conn = pool.acquire().await?;
    let user_id = users::insert_user(&mut conn, username, user_form.email.trim(), &password_hash).await?;

    tracing::info!("Registered user {}", user_id);
    Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_message("User registered successfully")))
}
