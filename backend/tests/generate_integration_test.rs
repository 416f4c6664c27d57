//! Integration tests for the program generation endpoint

mod common;

use axum::http::StatusCode;
use common::{TestApp, MOCK_PROGRAM};
use serde_json::json;

fn valid_payload() -> serde_json::Value {
    json!({
        "age": 30,
        "sex": "male",
        "height_cm": 180,
        "weight_kg": 90.0,
        "target_weight_kg": 80.0,
        "weeks": 10,
        "training_level": "intermediate",
        "activity_level": "moderate",
        "cardio_experience": "some",
        "cardio_modalities": ["running", "walking"],
        "gym_access": true,
        "days_per_week": 4,
        "minutes_per_session": 45,
        "injuries": "",
        "medical": "",
        "dietary": ""
    })
}

#[tokio::test]
async fn test_generate_returns_program_and_calculations() {
    let app = TestApp::new();

    let (status, body) = app
        .post("/api/generate", &valid_payload().to_string())
        .await;

    assert_eq!(status, StatusCode::OK);

    let response: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(response["success"], true);
    assert_eq!(response["program"], MOCK_PROGRAM);

    // The worked example: capped deficit, no floor override
    let calcs = &response["calculations"];
    assert_eq!(calcs["bmr"], 1880);
    assert_eq!(calcs["tdee"], 2914);
    assert_eq!(calcs["daily_calories"], 2164);
    assert_eq!(calcs["deficit"], 750);
    assert_eq!(calcs["protein_g"], 160);
    assert_eq!(calcs["fat_g"], 72);
    assert_eq!(calcs["carbs_g"], 219);
    assert!(calcs["warning"]
        .as_str()
        .unwrap()
        .contains("too aggressive"));
}

#[tokio::test]
async fn test_generate_hands_the_rendered_prompt_to_the_collaborator() {
    let app = TestApp::new();

    let (status, _) = app
        .post("/api/generate", &valid_payload().to_string())
        .await;
    assert_eq!(status, StatusCode::OK);

    let calls = app.generator.calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    let (system, user) = &calls[0];
    assert!(system.starts_with("You're an expert fitness coach"));
    assert!(user.starts_with("Generate a complete 12-week program for this user:"));
    assert!(user.contains("USER PROFILE:"));
    assert!(user.contains("PRE-CALCULATED (use these exact numbers):"));
    assert!(user.contains("- BMR: 1880 kcal"));
    assert!(user.contains("- Daily target: 2164 kcal (26% deficit)"));
}

#[tokio::test]
async fn test_inconsistent_target_weight_is_rejected() {
    let app = TestApp::new();
    let mut payload = valid_payload();
    payload["target_weight_kg"] = json!(95.0);

    let (status, body) = app.post("/api/generate", &payload.to_string()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let response: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(
        response["error"],
        "Target weight should be less than current weight"
    );

    // Rejected before the external call
    assert!(app.generator.calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_hostile_payload_is_sanitized_not_rejected() {
    let app = TestApp::new();

    // Garbage everywhere except the fields the validator compares
    let (status, body) = app
        .post(
            "/api/generate",
            &json!({
                "age": "junk",
                "sex": ["list"],
                "weight_kg": 90.0,
                "target_weight_kg": 80.0,
                "cardio_modalities": ["pogo"],
                "injuries": "<script>alert(1)</script>"
            })
            .to_string(),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    let response: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(response["success"], true);

    let calls = app.generator.calls.lock().unwrap();
    let (_, user) = &calls[0];
    assert!(user.contains("- Available cardio: walking"));
    assert!(!user.contains("<script>"));
}

#[tokio::test]
async fn test_malformed_json_returns_generic_400() {
    let app = TestApp::new();

    let (status, body) = app.post("/api/generate", "{not json").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let response: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(response["error"], "Invalid request body");
}

#[tokio::test]
async fn test_oversized_body_returns_generic_400() {
    let app = TestApp::new();

    // Well-formed JSON, but past the 10 KiB request body limit
    let mut payload = valid_payload();
    payload["injuries"] = serde_json::Value::String("a".repeat(11_000));

    let (status, body) = app.post("/api/generate", &payload.to_string()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let response: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(response["error"], "Invalid request body");

    // Rejected before the external call
    assert!(app.generator.calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_wrong_content_type_returns_generic_400() {
    let app = TestApp::new();

    let (status, body) = app
        .post_with_content_type("/api/generate", "text/plain", "age=30")
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let response: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(response["error"], "Invalid request body");
}

#[tokio::test]
async fn test_rate_limit_returns_429_with_retry_guidance() {
    let mut config = common::test_config();
    config.rate_limit.max_requests = 2;
    let app = TestApp::with_config(config);
    let payload = valid_payload().to_string();

    for _ in 0..2 {
        let (status, _) = app.post("/api/generate", &payload).await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, body) = app.post("/api/generate", &payload).await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);

    let response: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert!(response["error"]
        .as_str()
        .unwrap()
        .starts_with("Too many requests"));
    assert!(response["retry_after_secs"].as_u64().unwrap() >= 1);

    // Only the two allowed requests reached the collaborator
    assert_eq!(app.generator.calls.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn test_collaborator_failure_is_a_generic_500() {
    let app = TestApp::with_failing_generator();

    let (status, body) = app
        .post("/api/generate", &valid_payload().to_string())
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let response: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(response["error"], "Program generation failed. Please try again.");
    // Upstream detail never leaks
    assert!(!body.contains("mock failure"));
}

#[tokio::test]
async fn test_floor_warning_surfaces_in_response() {
    let app = TestApp::new();
    let payload = json!({
        "age": 60,
        "sex": "female",
        "height_cm": 150,
        "weight_kg": 45.0,
        "target_weight_kg": 44.0,
        "weeks": 4,
        "activity_level": "sedentary",
        "cardio_modalities": ["walking"],
        "days_per_week": 3,
        "minutes_per_session": 30
    });

    let (status, body) = app.post("/api/generate", &payload.to_string()).await;

    assert_eq!(status, StatusCode::OK);
    let response: serde_json::Value = serde_json::from_str(&body).unwrap();
    let calcs = &response["calculations"];
    assert_eq!(calcs["daily_calories"], 1200);
    assert_eq!(calcs["deficit"], 0);
    assert!(calcs["warning"]
        .as_str()
        .unwrap()
        .contains("minimum of 1200"));
}
