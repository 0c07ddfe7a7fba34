use serde_json::{json, Value};
use sqlx::SqlitePool;
use std::net::TcpListener;
use uuid::Uuid;
use once_cell::sync::Lazy;
use reqwest::{Client, Response};

use workout_tracker::run;
use workout_tracker::config::settings::{get_config, get_jwt_settings};
use workout_tracker::db::run_migrations;
use workout_tracker::telemetry::{get_subscriber, init_subscriber};

// Ensure that the `tracing` stack is only initialised once using `once_cell`
static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();

    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(
            subscriber_name,
            default_filter_level,
            std::io::stdout
        );
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(
            subscriber_name,
            default_filter_level,
            std::io::sink
        );
        init_subscriber(subscriber);
    }
});

pub struct TestApp {
    pub address: String,
    pub db_pool: SqlitePool,
    /// Does not follow redirects, so `303 See Other` answers can be asserted on.
    pub client: Client,
}

pub async fn spawn_app() -> TestApp {
    // The first time `initialize` is invoked the code in `TRACING` is executed.
    // All other invocations will instead skip execution.
    Lazy::force(&TRACING);

    let listener = TcpListener::bind("127.0.0.1:0")
        .expect("Failed to bind random port");
    // Get port assigned by the OS
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    // Every test gets its own database file
    let mut configuration = get_config().expect("Failed to read configuration.");
    configuration.database.db_url = None;
    configuration.database.file_name = std::env::temp_dir()
        .join(format!("workout_tracker_test_{}.db", Uuid::new_v4()))
        .to_string_lossy()
        .into_owned();

    let connection_pool = configuration.database
        .create_pool()
        .expect("Failed to create SQLite connection pool");
    run_migrations(&connection_pool)
        .await
        .expect("Failed to migrate the database");

    let jwt_settings = get_jwt_settings(&configuration);
    let server = run(
        listener,
        connection_pool.clone(),
        jwt_settings,
        configuration.pagination,
    )
        .expect("Failed to bind address");
    // Launch the server as a background task
    let _ = tokio::spawn(server);

    let client = Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .expect("Failed to build HTTP client");

    TestApp {
        address,
        db_pool: connection_pool,
        client,
    }
}

pub async fn create_test_user_and_login(app_address: &str) -> (String, String) {
    let client = Client::new();
    let username = format!("testuser{}", Uuid::new_v4());
    let password = "password123";
    let email = format!("{}@example.com", username);

    let user_request = json!({
        "username": username,
        "password": password,
        "email": email
    });

    let register_response = client
        .post(&format!("{}/register_user", app_address))
        .json(&user_request)
        .send()
        .await
        .expect("Failed to register user.");
    assert_eq!(200, register_response.status().as_u16(), "Registration should succeed");

    let login_request = json!({
        "username": username,
        "password": password
    });

    let login_response = client
        .post(&format!("{}/login", app_address))
        .json(&login_request)
        .send()
        .await
        .expect("Failed to execute login request.");

    let login_response: Value = login_response.json().await.expect("Failed to parse login response");
    let token = login_response["token"].as_str().expect("No token in response");

    (username, token.to_string())
}

impl TestApp {
    pub async fn get(&self, token: &str, path: &str) -> Response {
        self.client
            .get(&format!("{}{}", self.address, path))
            .bearer_auth(token)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post(&self, token: &str, path: &str, body: &Value) -> Response {
        self.client
            .post(&format!("{}{}", self.address, path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn put(&self, token: &str, path: &str, body: &Value) -> Response {
        self.client
            .put(&format!("{}{}", self.address, path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn delete(&self, token: &str, path: &str) -> Response {
        self.client
            .delete(&format!("{}{}", self.address, path))
            .bearer_auth(token)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    /// Create an exercise through the API and return its id.
    pub async fn create_exercise(&self, token: &str, name: &str, exercise_type: i64, goal: &str) -> i64 {
        let response = self
            .post(token, "/exercises", &json!({ "name": name, "type": exercise_type, "goal": goal }))
            .await;
        assert_eq!(303, response.status().as_u16(), "Exercise creation should redirect");

        sqlx::query_scalar::<_, i64>("SELECT MAX(id) FROM exercises WHERE name = ?")
            .bind(name)
            .fetch_one(&self.db_pool)
            .await
            .expect("Failed to fetch created exercise.")
    }

    /// Create a workout starting with `exercise_id` and return its id.
    pub async fn create_workout(&self, token: &str, name: &str, exercise_id: i64) -> i64 {
        let response = self
            .post(token, "/workouts/add", &json!({
                "workout": { "name": name },
                "workout_exercise": { "exercise": exercise_id }
            }))
            .await;
        assert_eq!(303, response.status().as_u16(), "Workout creation should redirect");

        let location = location(&response);
        location
            .trim_start_matches("/workouts/")
            .trim_end_matches("/edit")
            .parse()
            .expect("Redirect should name the new workout")
    }

    /// Ids of the workout exercises of a workout, oldest first.
    pub async fn workout_exercise_ids(&self, workout_id: i64) -> Vec<i64> {
        sqlx::query_scalar::<_, i64>("SELECT id FROM workout_exercises WHERE workout_id = ? ORDER BY id")
            .bind(workout_id)
            .fetch_all(&self.db_pool)
            .await
            .expect("Failed to fetch workout exercises.")
    }

    pub async fn count(&self, table: &str) -> i64 {
        sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {}", table))
            .fetch_one(&self.db_pool)
            .await
            .expect("Failed to count rows.")
    }
}

pub fn location(response: &Response) -> String {
    response
        .headers()
        .get(reqwest::header::LOCATION)
        .expect("Response should carry a Location header")
        .to_str()
        .expect("Location should be valid text")
        .to_string()
}
