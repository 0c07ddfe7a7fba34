use std::net::TcpListener;

use workout_tracker::run;
use workout_tracker::config::settings::{get_config, get_jwt_settings};
use workout_tracker::db::run_migrations;
use workout_tracker::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Panic if we can't read the config
    let config = get_config().expect("Failed to read the config.");

    let subscriber = get_subscriber(
        "workout-tracker".into(),
        config.application.log_level.clone(),
        std::io::stdout
    );
    init_subscriber(subscriber);

    let jwt_settings = get_jwt_settings(&config);

    // Only try to establish connection when actually used
    let connection_pool = config.database
        .create_pool()
        .expect("Failed to create SQLite connection pool");

    if let Err(e) = run_migrations(&connection_pool).await {
        tracing::error!("❌ Failed to run database migrations: {}", e);
        std::process::exit(1);
    }
    tracing::info!("✅ Database migrations applied");

    let address = format!("{}:{}", config.application.host, config.application.port);
    let listener = TcpListener::bind(&address)?;
    tracing::info!("Listening on {}", address);

    run(
        listener,
        connection_pool,
        jwt_settings,
        config.pagination,
    )?.await
}
