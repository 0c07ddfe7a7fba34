use serde_json::{json, Value};

mod common;
use common::utils::{create_test_user_and_login, location, spawn_app, TestApp};

async fn set_rows(test_app: &TestApp, workout_exercise_id: i64) -> Vec<(i64, i64, i64, i64, f64)> {
    sqlx::query_as::<_, (i64, i64, i64, i64, f64)>(
        "SELECT id, reps, weight, time, distance FROM exercise_sets WHERE workout_exercise_id = ? ORDER BY id"
    )
    .bind(workout_exercise_id)
    .fetch_all(&test_app.db_pool)
    .await
    .expect("Failed to fetch exercise sets.")
}

#[tokio::test]
async fn add_exercise_set_logs_an_empty_set() {
    let test_app = spawn_app().await;
    let (_, token) = create_test_user_and_login(&test_app.address).await;
    let squat = test_app.create_exercise(&token, "Squat", 0, "").await;
    let workout_id = test_app.create_workout(&token, "Leg day", squat).await;
    let workout_exercise_id = test_app.workout_exercise_ids(workout_id).await[0];

    let response = test_app
        .post(&token, &format!("/workout_exercises/{}/sets", workout_exercise_id), &json!({}))
        .await;

    assert_eq!(303, response.status().as_u16());
    assert_eq!(format!("/workout_exercises/{}/edit", workout_exercise_id), location(&response));
    let rows = set_rows(&test_app, workout_exercise_id).await;
    assert_eq!(rows.len(), 1);
    let (_, reps, weight, time, distance) = rows[0];
    assert_eq!((reps, weight, time), (0, 0, 0));
    assert_eq!(distance, 0.0);
}

#[tokio::test]
async fn exercise_set_formset_updates_every_set() {
    let test_app = spawn_app().await;
    let (_, token) = create_test_user_and_login(&test_app.address).await;
    let squat = test_app.create_exercise(&token, "Squat", 0, "").await;
    let workout_id = test_app.create_workout(&token, "Leg day", squat).await;
    let workout_exercise_id = test_app.workout_exercise_ids(workout_id).await[0];
    let sets_path = format!("/workout_exercises/{}/sets", workout_exercise_id);
    test_app.post(&token, &sets_path, &json!({})).await;
    test_app.post(&token, &sets_path, &json!({})).await;
    let ids: Vec<i64> = set_rows(&test_app, workout_exercise_id).await.iter().map(|row| row.0).collect();

    let response = test_app
        .put(&token, &sets_path, &json!({
            "form": [
                { "id": ids[0], "reps": 10, "weight": 20, "time": "", "distance": "" },
                { "id": ids[1], "reps": "8", "weight": "25", "time": 0, "distance": 0 }
            ]
        }))
        .await;

    assert_eq!(303, response.status().as_u16());
    assert_eq!(
        set_rows(&test_app, workout_exercise_id).await,
        vec![(ids[0], 10, 20, 0, 0.0), (ids[1], 8, 25, 0, 0.0)]
    );
}

#[tokio::test]
async fn exercise_set_formset_with_negative_value_changes_nothing() {
    let test_app = spawn_app().await;
    let (_, token) = create_test_user_and_login(&test_app.address).await;
    let squat = test_app.create_exercise(&token, "Squat", 0, "").await;
    let workout_id = test_app.create_workout(&token, "Leg day", squat).await;
    let workout_exercise_id = test_app.workout_exercise_ids(workout_id).await[0];
    let sets_path = format!("/workout_exercises/{}/sets", workout_exercise_id);
    test_app.post(&token, &sets_path, &json!({})).await;
    let set_id = set_rows(&test_app, workout_exercise_id).await[0].0;

    let response = test_app
        .put(&token, &sets_path, &json!({
            "form": [ { "id": set_id, "reps": -1, "weight": 20 } ]
        }))
        .await;

    assert_eq!(422, response.status().as_u16());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["view"], "edit_workout_exercise_strength");
    assert_eq!(
        body["context"]["formset_errors"]["forms"][0]["reps"][0],
        "Ensure this value is greater than or equal to 0."
    );
    assert_eq!(set_rows(&test_app, workout_exercise_id).await, vec![(set_id, 0, 0, 0, 0.0)]);
}

#[tokio::test]
async fn logging_a_set_can_switch_the_exercise() {
    let test_app = spawn_app().await;
    let (_, token) = create_test_user_and_login(&test_app.address).await;
    let squat = test_app.create_exercise(&token, "Squat", 0, "").await;
    let lunge = test_app.create_exercise(&token, "Lunge", 0, "").await;
    let workout_id = test_app.create_workout(&token, "Leg day", squat).await;
    let workout_exercise_id = test_app.workout_exercise_ids(workout_id).await[0];

    let response = test_app
        .post(&token, &format!("/workout_exercises/{}/edit", workout_exercise_id), &json!({
            "workout_exercise": { "exercise": lunge },
            "exercise_set": { "reps": 12, "weight": 40 }
        }))
        .await;

    assert_eq!(303, response.status().as_u16());
    assert_eq!(format!("/workout_exercises/{}/edit", workout_exercise_id), location(&response));
    let exercise_id: i64 = sqlx::query_scalar("SELECT exercise_id FROM workout_exercises WHERE id = ?")
        .bind(workout_exercise_id)
        .fetch_one(&test_app.db_pool)
        .await
        .expect("Failed to fetch workout exercise.");
    assert_eq!(exercise_id, lunge);
    let rows = set_rows(&test_app, workout_exercise_id).await;
    assert_eq!(rows.len(), 1);
    assert_eq!((rows[0].1, rows[0].2), (12, 40));
}

#[tokio::test]
async fn logging_an_invalid_set_is_rejected() {
    let test_app = spawn_app().await;
    let (_, token) = create_test_user_and_login(&test_app.address).await;
    let squat = test_app.create_exercise(&token, "Squat", 0, "").await;
    let workout_id = test_app.create_workout(&token, "Leg day", squat).await;
    let workout_exercise_id = test_app.workout_exercise_ids(workout_id).await[0];

    let response = test_app
        .post(&token, &format!("/workout_exercises/{}/edit", workout_exercise_id), &json!({
            "workout_exercise": { "exercise": squat },
            "exercise_set": { "reps": "many" }
        }))
        .await;

    assert_eq!(422, response.status().as_u16());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["context"]["errors"]["exercise_set"]["reps"][0], "Enter a whole number.");
    assert_eq!(0, test_app.count("exercise_sets").await);
}

#[tokio::test]
async fn delete_exercise_set_removes_only_that_set() {
    let test_app = spawn_app().await;
    let (_, token) = create_test_user_and_login(&test_app.address).await;
    let squat = test_app.create_exercise(&token, "Squat", 0, "").await;
    let workout_id = test_app.create_workout(&token, "Leg day", squat).await;
    let workout_exercise_id = test_app.workout_exercise_ids(workout_id).await[0];
    let sets_path = format!("/workout_exercises/{}/sets", workout_exercise_id);
    test_app.post(&token, &sets_path, &json!({})).await;
    test_app.post(&token, &sets_path, &json!({})).await;
    let ids: Vec<i64> = set_rows(&test_app, workout_exercise_id).await.iter().map(|row| row.0).collect();

    let response = test_app.delete(&token, &format!("{}/{}", sets_path, ids[0])).await;

    assert_eq!(303, response.status().as_u16());
    let remaining: Vec<i64> = set_rows(&test_app, workout_exercise_id).await.iter().map(|row| row.0).collect();
    assert_eq!(remaining, vec![ids[1]]);

    let response = test_app.delete(&token, &format!("{}/{}", sets_path, ids[0])).await;
    assert_eq!(404, response.status().as_u16());
}

#[tokio::test]
async fn set_view_depends_on_the_exercise_kind() {
    let test_app = spawn_app().await;
    let (_, token) = create_test_user_and_login(&test_app.address).await;
    let cases = [
        ("Squat", 0, "", "edit_workout_exercise_strength"),
        ("Burpees", 1, "Repetitions", "edit_workout_exercise_repetitions"),
        ("Running", 1, "Distance", "edit_workout_exercise_distance"),
    ];

    for (name, exercise_type, goal, view) in cases {
        let exercise_id = test_app.create_exercise(&token, name, exercise_type, goal).await;
        let workout_id = test_app.create_workout(&token, name, exercise_id).await;
        let workout_exercise_id = test_app.workout_exercise_ids(workout_id).await[0];

        let response = test_app.get(&token, &format!("/workout_exercises/{}/edit", workout_exercise_id)).await;

        assert_eq!(200, response.status().as_u16());
        let body: Value = response.json().await.expect("Failed to parse response");
        assert_eq!(body["view"], view);
        assert_eq!(body["context"]["exercise"]["name"], name);
    }
}

#[tokio::test]
async fn sets_of_other_users_are_not_found() {
    let test_app = spawn_app().await;
    let (_, owner_token) = create_test_user_and_login(&test_app.address).await;
    let (_, other_token) = create_test_user_and_login(&test_app.address).await;
    let squat = test_app.create_exercise(&owner_token, "Squat", 0, "").await;
    let workout_id = test_app.create_workout(&owner_token, "Leg day", squat).await;
    let workout_exercise_id = test_app.workout_exercise_ids(workout_id).await[0];

    let response = test_app
        .post(&other_token, &format!("/workout_exercises/{}/sets", workout_exercise_id), &json!({}))
        .await;

    assert_eq!(404, response.status().as_u16());
    assert_eq!(0, test_app.count("exercise_sets").await);
}
