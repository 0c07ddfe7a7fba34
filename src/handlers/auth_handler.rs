// src/handlers/auth_handler.rs
use actix_web::{web, HttpResponse};
use secrecy::ExposeSecret;
use sqlx::SqlitePool;

use crate::auth::jwt::generate_token;
use crate::config::jwt::JwtSettings;
use crate::db::{sessions, users};
use crate::handlers::error::AppError;
use crate::models::auth::{LoginRequest, LoginResponse};
use crate::utils::password::verify_password;

/// Check the credentials, open a login session and hand out a token naming it.
#[tracing::instrument(
    name = "Login user attempt",
    skip(login_form, pool, jwt_settings),
    fields(
        username = %login_form.username
    )
)]
pub async fn login_user(
    login_form: web::Json<LoginRequest>,
    pool: web::Data<SqlitePool>,
    jwt_settings: web::Data<JwtSettings>
) -> Result<HttpResponse, AppError> {
    let mut conn = pool.acquire().await?;

    let user = match users::find_credentials(&mut conn, &login_form.username).await? {
        Some(user) => user,
        None => {
            tracing::info!("User not found or invalid credentials");
            return Err(AppError::Unauthorized);
        }
    };

    if !verify_password(login_form.password.expose_secret(), &user.password_hash) {
        tracing::info!("Invalid password");
        return Err(AppError::Unauthorized);
    }

    let session_id = sessions::create_session(&mut conn, user.id).await?;
    let token = generate_token(user.id, &user.username, &session_id, &jwt_settings)?;

    tracing::info!("User {} logged in", user.id);
    Ok(HttpResponse::Ok().json(LoginResponse { token }))
}
