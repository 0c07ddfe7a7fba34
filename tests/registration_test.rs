use reqwest::Client;
use serde_json::json;

mod common;
use common::utils::spawn_app;

#[tokio::test]
async fn register_user_working() {
    let test_app = spawn_app().await;
    let client = Client::new();

    let username = format!("newuser{}", uuid::Uuid::new_v4());
    let password = "password123";
    let email = format!("{}@example.com", username);

    let user_request = json!({
        "username": username,
        "password": password,
        "email": email
    });

    let response = client
        .post(&format!("{}/register_user", &test_app.address))
        .json(&user_request)
        .send()
        .await
        .expect("Failed to execute request.");

    assert!(response.status().is_success());

    let (saved_username, saved_email, password_hash) = sqlx::query_as::<_, (String, String, String)>(
        "SELECT username, email, password_hash FROM users WHERE username = ?"
    )
    .bind(&username)
    .fetch_one(&test_app.db_pool)
    .await
    .expect("Failed to fetch saved user.");

    assert_eq!(saved_username, username);
    assert_eq!(saved_email, email);
    assert_ne!(password_hash, password, "Password must not be stored in clear text");
}

#[tokio::test]
async fn register_duplicate_username_returns_409() {
    let test_app = spawn_app().await;
    let client = Client::new();

    let user_request = json!({
        "username": "duplicate",
        "password": "password123",
        "email": "duplicate@example.com"
    });

    for expected in [200, 409] {
        let response = client
            .post(&format!("{}/register_user", &test_app.address))
            .json(&user_request)
            .send()
            .await
            .expect("Failed to execute request.");
        assert_eq!(expected, response.status().as_u16());
    }

    assert_eq!(1, test_app.count("users").await);
}

#[tokio::test]
async fn register_returns_400_for_invalid_data() {
    let test_app = spawn_app().await;
    let client = Client::new();

    let test_cases = vec![
        (json!({ "username": "someone", "email": "someone@example.com" }), "missing password"),
        (json!({ "password": "password123", "email": "someone@example.com" }), "missing username"),
        (json!({ "username": "  ", "password": "password123", "email": "x@example.com" }), "blank username"),
        (json!({ "username": "someone", "password": "", "email": "x@example.com" }), "empty password"),
    ];

    for (invalid_body, error_message) in test_cases {
        let response = client
            .post(&format!("{}/register_user", &test_app.address))
            .json(&invalid_body)
            .send()
            .await
            .expect("Failed to execute request.");

        assert_eq!(
            400,
            response.status().as_u16(),
            "The API did not fail with 400 Bad Request when the payload was {}.",
            error_message
        );
    }
    assert_eq!(0, test_app.count("users").await);
}

#[tokio::test]
async fn login_opens_a_session() {
    let test_app = spawn_app().await;
    let client = Client::new();

    let user_request = json!({
        "username": "sessionuser",
        "password": "password123",
        "email": "sessionuser@example.com"
    });
    client
        .post(&format!("{}/register_user", &test_app.address))
        .json(&user_request)
        .send()
        .await
        .expect("Failed to execute request.");

    let response = client
        .post(&format!("{}/login", &test_app.address))
        .json(&json!({ "username": "sessionuser", "password": "password123" }))
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(200, response.status().as_u16());
    let body: serde_json::Value = response.json().await.expect("Failed to parse login response");
    assert!(body["token"].as_str().is_some_and(|token| !token.is_empty()));
    assert_eq!(1, test_app.count("sessions").await);
}

#[tokio::test]
async fn login_with_wrong_password_returns_401() {
    let test_app = spawn_app().await;
    let client = Client::new();

    client
        .post(&format!("{}/register_user", &test_app.address))
        .json(&json!({
            "username": "wrongpass",
            "password": "password123",
            "email": "wrongpass@example.com"
        }))
        .send()
        .await
        .expect("Failed to execute request.");

    for login in [
        json!({ "username": "wrongpass", "password": "not-the-password" }),
        json!({ "username": "nobody", "password": "password123" }),
    ] {
        let response = client
            .post(&format!("{}/login", &test_app.address))
            .json(&login)
            .send()
            .await
            .expect("Failed to execute request.");
        assert_eq!(401, response.status().as_u16());
    }
    assert_eq!(0, test_app.count("sessions").await);
}
