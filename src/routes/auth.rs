// src/routes/auth.rs
use actix_web::{post, web, HttpResponse};
use sqlx::SqlitePool;

use crate::config::jwt::JwtSettings;
use crate::handlers::auth_handler::login_user;
use crate::handlers::error::AppError;
use crate::models::auth::LoginRequest;

#[post("/login")]
async fn login(
    login_form: web::Json<LoginRequest>,
    pool: web::Data<SqlitePool>,
    jwt_settings: web::Data<JwtSettings>
) -> Result<HttpResponse, AppError> {
    login_user(login_form, pool, jwt_settings).await
}
