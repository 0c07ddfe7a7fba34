use actix_web::{
    dev::Payload,
    error::{ErrorInternalServerError, ErrorUnauthorized},
    web, Error, FromRequest, HttpMessage, HttpRequest,
};
use futures_util::future::LocalBoxFuture;
use sqlx::SqlitePool;

use crate::auth::jwt::Claims;
use crate::db::{sessions, StoreError};
use crate::models::session::SessionContext;

/// Loads the login session named by the `sid` claim.
///
/// Only usable behind `AuthMiddleware`, which puts the claims into the request extensions.
impl FromRequest for SessionContext {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let claims = req.extensions().get::<Claims>().cloned();
        let pool = req.app_data::<web::Data<SqlitePool>>().cloned();

        Box::pin(async move {
            let claims = claims.ok_or_else(|| ErrorUnauthorized("Not authenticated"))?;
            let user_id = claims
                .user_id()
                .ok_or_else(|| ErrorUnauthorized("Invalid token subject"))?;
            let pool = pool.ok_or_else(|| ErrorInternalServerError("Database pool not configured"))?;

            let mut conn = pool.acquire().await.map_err(|e| {
                tracing::error!("Failed to acquire a connection: {:?}", e);
                ErrorInternalServerError("Database error")
            })?;

            match sessions::load_session(&mut conn, &claims.sid, user_id).await {
                Ok(session) => Ok(session),
                Err(StoreError::NotFound(_)) => {
                    tracing::info!("Unknown session {} for user {}", claims.sid, user_id);
                    Err(ErrorUnauthorized("Session not found"))
                }
                Err(e) => {
                    tracing::error!("Failed to load session: {:?}", e);
                    Err(ErrorInternalServerError("Database error"))
                }
            }
        })
    }
}
