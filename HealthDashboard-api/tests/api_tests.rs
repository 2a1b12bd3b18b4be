use std::sync::{Arc, Once};

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use health_dashboard_api::api::{create_app, AppState};
use health_dashboard_api::config::AppConfig;
use health_dashboard_data::remote::tests::{MockSaveBehavior, MockSaveEndpoint};
use health_dashboard_domain::services::SharedSaveEndpoint;

// Ensure tracing is initialized only once
static INIT: Once = Once::new();

fn initialize() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    });
}

fn test_app(save_endpoint: Option<SharedSaveEndpoint>) -> Router {
    initialize();
    let config = AppConfig {
        save_endpoint_url: None,
        ..AppConfig::default()
    };
    let state = AppState::with_save_endpoint(&config, save_endpoint).unwrap();
    create_app(state)
}

async fn send(app: &Router, method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    (status, json)
}

async fn login(app: &Router, username: &str, password: &str) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/auth/login",
        None,
        Some(json!({ "username": username, "password": password })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {}", body);
    body["access_token"].as_str().unwrap().to_string()
}

fn reading() -> Value {
    json!({
        "weight": 70.0,
        "height": 175.0,
        "systolic": 118.0,
        "diastolic": 76.0,
        "heartrate": 72.0,
        "cholesterol": 170.0,
        "sugar": 90.0,
        "sleep": 8.0
    })
}

#[tokio::test]
async fn test_health_lists_components() {
    let app = test_app(None);

    let (status, body) = send(&app, Method::GET, "/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["components"]["credential_store"]["message"], "1 registered users");
    assert_eq!(body["components"]["save_endpoint"]["message"], "Remote saving disabled");
}

#[tokio::test]
async fn test_login_with_seeded_user() {
    let app = test_app(None);

    let (status, body) = send(
        &app,
        Method::POST,
        "/auth/login",
        None,
        Some(json!({ "username": "test", "password": "password123" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["token_type"], "Bearer");
    assert_eq!(body["greeting"], "Hello, TEST!");
    assert!(body["access_token"].as_str().is_some_and(|t| !t.is_empty()));
}

#[tokio::test]
async fn test_login_with_wrong_password_is_unauthorized() {
    let app = test_app(None);

    let (status, body) = send(
        &app,
        Method::POST,
        "/auth/login",
        None,
        Some(json!({ "username": "test", "password": "nope" })),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid username or password.");
}

#[tokio::test]
async fn test_login_with_empty_fields_is_bad_request() {
    let app = test_app(None);

    let (status, body) = send(
        &app,
        Method::POST,
        "/auth/login",
        None,
        Some(json!({ "username": "", "password": "" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");
}

#[tokio::test]
async fn test_register_then_login() {
    let app = test_app(None);

    let (status, body) = send(
        &app,
        Method::POST,
        "/auth/register",
        None,
        Some(json!({ "username": "alice", "password": "secret1" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Registration successful! Please login.");

    let token = login(&app, "alice", "secret1").await;
    let (status, body) = send(&app, Method::GET, "/auth/me", Some(&token), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], "alice");
    assert_eq!(body["greeting"], "Hello, ALICE!");
}

#[tokio::test]
async fn test_register_with_short_password_is_rejected() {
    let app = test_app(None);

    let (status, body) = send(
        &app,
        Method::POST,
        "/auth/register",
        None,
        Some(json!({ "username": "alice", "password": "123" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Username must be 3+ chars and Password 6+ chars.");
}

#[tokio::test]
async fn test_google_sign_in_is_not_implemented() {
    let app = test_app(None);

    let (status, body) = send(&app, Method::POST, "/auth/google", None, None).await;

    assert_eq!(status, StatusCode::NOT_IMPLEMENTED);
    assert!(body["message"].as_str().unwrap().contains("Google Sign-In"));
}

#[tokio::test]
async fn test_protected_routes_require_token() {
    let app = test_app(None);

    let (status, _) = send(&app, Method::POST, "/api/v1/readings", None, Some(reading())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, Method::GET, "/api/v1/readings/history", Some("not-a-token"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_submit_reading_returns_report() {
    let app = test_app(None);
    let token = login(&app, "test", "password123").await;

    let (status, body) = send(&app, Method::POST, "/api/v1/readings", Some(&token), Some(reading())).await;

    assert_eq!(status, StatusCode::OK, "unexpected body: {}", body);
    assert_eq!(body["username"], "test");
    assert_eq!(body["bmi"], 22.86);
    assert_eq!(body["status_lines"]["heart_rate"], "Heart Rate: 72 BPM (Normal)");
    assert_eq!(body["status_lines"]["blood_pressure"], "Blood Pressure: 118/76 mmHg (Normal)");
    assert_eq!(body["save_outcome"]["status"], "disabled");
    assert!(body["suggestions"].as_array().is_some_and(|s| !s.is_empty()));
}

#[tokio::test]
async fn test_submit_without_height_is_bad_request() {
    let app = test_app(None);
    let token = login(&app, "test", "password123").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/readings",
        Some(&token),
        Some(json!({ "weight": 70.0 })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("Height is required"));
}

#[tokio::test]
async fn test_unreachable_save_endpoint_still_returns_report() {
    let endpoint = Arc::new(MockSaveEndpoint::new(MockSaveBehavior::Unreachable));
    let app = test_app(Some(endpoint.clone()));
    let token = login(&app, "test", "password123").await;

    let (status, body) = send(&app, Method::POST, "/api/v1/readings", Some(&token), Some(reading())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["save_outcome"]["status"], "unavailable");
    assert_eq!(endpoint.received().len(), 1);
    assert_eq!(endpoint.received()[0].username, "test");
}

#[tokio::test]
async fn test_history_is_newest_first() {
    let app = test_app(None);
    let token = login(&app, "test", "password123").await;

    for weight in [70.0, 71.0] {
        let mut body = reading();
        body["weight"] = json!(weight);
        let (status, _) = send(&app, Method::POST, "/api/v1/readings", Some(&token), Some(body)).await;
        assert_eq!(status, StatusCode::OK);
        tokio::time::sleep(std::time::Duration::from_millis(2)).await;
    }

    let (status, body) = send(&app, Method::GET, "/api/v1/readings/history?limit=5", Some(&token), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 2);
    assert_eq!(body["readings"][0]["reading"]["weight_kg"], 71.0);
    assert_eq!(body["readings"][1]["reading"]["weight_kg"], 70.0);
}

#[tokio::test]
async fn test_logout_revokes_token() {
    let app = test_app(None);
    let token = login(&app, "test", "password123").await;

    let (status, body) = send(&app, Method::POST, "/auth/logout", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Logged out successfully");

    let (status, _) = send(&app, Method::GET, "/auth/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_responses_carry_security_headers() {
    let app = test_app(None);

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.headers()["x-content-type-options"], "nosniff");
    assert_eq!(response.headers()["x-frame-options"], "DENY");
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let app = test_app(None);

    let (status, body) = send(&app, Method::GET, "/api-docs/openapi.json", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/api/v1/readings"].is_object());
}
