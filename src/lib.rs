use actix_web::{web, App, HttpServer};
use actix_web::dev::Server;
use tracing_actix_web::TracingLogger;
use sqlx::SqlitePool;
use std::net::TcpListener;

pub mod auth;
pub mod config;
mod routes;
mod handlers;
pub mod forms;
pub mod models;
pub mod utils;
mod middleware;
pub mod db;
pub mod services;
pub mod telemetry;
use crate::routes::init_routes;
use crate::config::jwt::JwtSettings;
use crate::config::settings::PaginationSettings;

pub fn run(
    listener: TcpListener,
    db_pool: SqlitePool,
    jwt_settings: JwtSettings,
    pagination: PaginationSettings,
) -> Result<Server, std::io::Error> {
    // Wrap using web::Data, which boils down to an Arc smart pointer
    let db_pool_data = web::Data::new(db_pool);
    let jwt_settings = web::Data::new(jwt_settings);
    let pagination = web::Data::new(pagination);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            // Get a pointer copy and attach it to the application state
            .app_data(db_pool_data.clone())
            .app_data(jwt_settings.clone())
            .app_data(pagination.clone())
            .configure(init_routes)
    })
    .listen(listener)?
    .run();

    Ok(server)
}
