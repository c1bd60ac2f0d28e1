// In-process API tests against the in-memory backend
// Run with: cargo test -p solbot-control-plane --test api_test

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use solbot_control_plane::api;
use solbot_control_plane::config::HealthProbeConfig;
use solbot_control_plane::storage::{InMemoryDatabase, StorageBackend};
use solbot_control_plane::HealthService;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;
use uuid::Uuid;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct TestApp {
    router: Router,
    memory: Arc<InMemoryDatabase>,
}

fn test_app_with_backend(backend_url: &str) -> TestApp {
    let memory = Arc::new(InMemoryDatabase::new());
    let db = Arc::new(StorageBackend::InMemory(memory.clone()));
    let health = HealthService::new(
        HealthProbeConfig {
            backend_url: backend_url.to_string(),
            timeout: Duration::from_millis(500),
            app_check_timeout: Duration::from_millis(500),
            warn_after: Duration::from_millis(100),
            retry_delay: Duration::from_millis(10),
        },
        "test",
    )
    .unwrap();
    TestApp {
        router: api::router(db, Arc::new(health)),
        memory,
    }
}

fn test_app() -> TestApp {
    test_app_with_backend("http://127.0.0.1:9")
}

async fn send(router: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

async fn send_raw(router: &Router, method: Method, uri: &str, body: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

fn open_body(session_id: Uuid) -> Value {
    json!({
        "session_id": session_id,
        "phase": "phase2",
        "component": "solbot-chat",
        "start_time": "2024-03-01T10:00:00Z"
    })
}

// ============================================
// Chat analytics
// ============================================

#[tokio::test]
async fn test_chat_entry_open_and_close() {
    let app = test_app();
    let user_id = Uuid::now_v7();
    let session = app.memory.seed_session(user_id);

    let (status, opened) = send(
        &app.router,
        Method::POST,
        "/api/analytics/chat",
        Some(open_body(session.id)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(opened["user_id"], json!(user_id));
    assert_eq!(opened["session_id"], json!(session.id));
    assert!(opened["chat_end_time"].is_null());

    let entry_id = opened["id"].as_str().unwrap().to_string();
    let (status, closed) = send(
        &app.router,
        Method::PUT,
        &format!("/api/analytics/chat/{}", entry_id),
        Some(json!({"end_time": "2024-03-01T10:02:05.500Z", "message_count": 7})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(closed["total_duration_seconds"], 126);
    assert_eq!(closed["message_count"], 7);
    assert_eq!(closed["id"], json!(entry_id));
}

#[tokio::test]
async fn test_second_close_overwrites_first() {
    let app = test_app();
    let session = app.memory.seed_session(Uuid::now_v7());
    let (_, opened) = send(
        &app.router,
        Method::POST,
        "/api/analytics/chat",
        Some(open_body(session.id)),
    )
    .await;
    let uri = format!("/api/analytics/chat/{}", opened["id"].as_str().unwrap());

    send(
        &app.router,
        Method::PUT,
        &uri,
        Some(json!({"end_time": "2024-03-01T10:00:10Z", "message_count": 1})),
    )
    .await;
    let (status, closed) = send(
        &app.router,
        Method::PUT,
        &uri,
        Some(json!({"end_time": "2024-03-01T10:01:00Z", "message_count": 3})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(closed["total_duration_seconds"], 60);
    assert_eq!(closed["message_count"], 3);
}

#[tokio::test]
async fn test_end_before_start_yields_negative_duration() {
    let app = test_app();
    let session = app.memory.seed_session(Uuid::now_v7());
    let (_, opened) = send(
        &app.router,
        Method::POST,
        "/api/analytics/chat",
        Some(open_body(session.id)),
    )
    .await;

    let (status, closed) = send(
        &app.router,
        Method::PUT,
        &format!("/api/analytics/chat/{}", opened["id"].as_str().unwrap()),
        Some(json!({"end_time": "2024-03-01T09:59:58.500Z", "message_count": 0})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(closed["total_duration_seconds"], -2);
}

#[tokio::test]
async fn test_open_unknown_session_is_404() {
    let app = test_app();
    let (status, body) = send(
        &app.router,
        Method::POST,
        "/api/analytics/chat",
        Some(open_body(Uuid::now_v7())),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Session not found");
    assert_eq!(app.memory.chat_analytics_count(), 0);
}

#[tokio::test]
async fn test_close_unknown_entry_is_404() {
    let app = test_app();
    let (status, body) = send(
        &app.router,
        Method::PUT,
        &format!("/api/analytics/chat/{}", Uuid::now_v7()),
        Some(json!({"end_time": "2024-03-01T10:00:00Z", "message_count": 1})),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Chat analytics entry not found");
}

#[tokio::test]
async fn test_invalid_chat_requests_are_400() {
    let app = test_app();
    let session = app.memory.seed_session(Uuid::now_v7());

    // Malformed JSON
    let (status, body) = send_raw(&app.router, Method::POST, "/api/analytics/chat", "{not json").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    // Missing start_time
    let (status, _) = send(
        &app.router,
        Method::POST,
        "/api/analytics/chat",
        Some(json!({"session_id": session.id, "phase": "p", "component": "c"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Empty phase
    let mut body = open_body(session.id);
    body["phase"] = json!("");
    let (status, _) = send(&app.router, Method::POST, "/api/analytics/chat", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Oversized component
    let mut body = open_body(session.id);
    body["component"] = json!("x".repeat(257));
    let (status, _) = send(&app.router, Method::POST, "/api/analytics/chat", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Unparsable entry id
    let (status, body) = send(
        &app.router,
        Method::PUT,
        "/api/analytics/chat/not-a-uuid",
        Some(json!({"end_time": "2024-03-01T10:00:00Z", "message_count": 1})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    // Negative message count
    let (status, _) = send(
        &app.router,
        Method::PUT,
        &format!("/api/analytics/chat/{}", Uuid::now_v7()),
        Some(json!({"end_time": "2024-03-01T10:00:00Z", "message_count": -1})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert_eq!(app.memory.chat_analytics_count(), 0);
}

#[tokio::test]
async fn test_open_with_non_uuid_session_is_404() {
    let app = test_app();
    let mut body = open_body(Uuid::now_v7());
    body["session_id"] = json!("sess_abc123");

    let (status, body) = send(&app.router, Method::POST, "/api/analytics/chat", Some(body)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Session not found");
    assert_eq!(app.memory.chat_analytics_count(), 0);
}

// ============================================
// Interaction events
// ============================================

#[tokio::test]
async fn test_events_chat_started_then_ended() {
    let app = test_app();
    let session = app.memory.seed_session(Uuid::now_v7());

    let (status, opened) = send(
        &app.router,
        Method::POST,
        "/api/events",
        Some(json!({
            "session_id": session.id,
            "event_type": "chat_started",
            "phase": "phase3",
            "component": "solbot-chat"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(opened["phase"], "phase3");
    assert!(opened["chat_end_time"].is_null());

    let (status, body) = send(
        &app.router,
        Method::POST,
        "/api/events",
        Some(json!({
            "session_id": session.id,
            "event_type": "chat_ended",
            "metadata": {"chat_analytics_id": opened["id"], "message_count": 5}
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true}));
    assert_eq!(app.memory.interaction_logs().len(), 2);
    assert_eq!(app.memory.chat_analytics_count(), 1);
}

#[tokio::test]
async fn test_events_chat_ended_without_entry_is_silent() {
    let app = test_app();
    let session = app.memory.seed_session(Uuid::now_v7());

    for metadata in [json!({}), json!({"chat_analytics_id": Uuid::now_v7(), "message_count": 1})] {
        let (status, body) = send(
            &app.router,
            Method::POST,
            "/api/events",
            Some(json!({
                "session_id": session.id,
                "event_type": "chat_ended",
                "metadata": metadata
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"success": true}));
    }

    assert_eq!(app.memory.chat_analytics_count(), 0);
    assert_eq!(app.memory.interaction_logs().len(), 2);
}

#[tokio::test]
async fn test_events_unknown_session_is_404() {
    let app = test_app();

    for session_id in [json!(Uuid::now_v7()), json!("sess_abc123")] {
        let (status, body) = send(
            &app.router,
            Method::POST,
            "/api/events",
            Some(json!({"session_id": session_id, "event_type": "phase_completed", "phase": "phase1"})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Session not found");
    }

    assert!(app.memory.interaction_logs().is_empty());
}

#[tokio::test]
async fn test_events_missing_fields_are_400() {
    let app = test_app();
    let (status, body) = send(
        &app.router,
        Method::POST,
        "/api/events",
        Some(json!({"event_type": "chat_started"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing required fields");
}

// ============================================
// User data
// ============================================

#[tokio::test]
async fn test_user_data_save_and_list() {
    let app = test_app();

    for (data_type, value) in [("event", "page_view"), ("event", "session_start"), ("note", "hi")] {
        let (status, saved) = send(
            &app.router,
            Method::POST,
            "/api/user-data",
            Some(json!({
                "userId": "student-7",
                "dataType": data_type,
                "value": value,
                "metadata": {"path": "/phase1"}
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(saved["value"], value);
    }

    let (status, listed) = send(
        &app.router,
        Method::GET,
        "/api/user-data?userId=student-7&dataType=event",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let data = listed["data"].as_array().unwrap();
    assert_eq!(data.len(), 2);
    assert!(data.iter().all(|r| r["data_type"] == "event"));

    let (_, all) = send(&app.router, Method::GET, "/api/user-data?userId=student-7", None).await;
    assert_eq!(all["data"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_user_data_maps_text_ids_deterministically() {
    let app = test_app();
    let body = json!({"userId": "anonymous", "dataType": "event", "value": "page_view"});

    let (_, first) = send(&app.router, Method::POST, "/api/user-data", Some(body.clone())).await;
    let (_, second) = send(&app.router, Method::POST, "/api/user-data", Some(body)).await;

    assert_eq!(first["user_id"], second["user_id"]);
    assert!(Uuid::parse_str(first["user_id"].as_str().unwrap()).is_ok());
}

#[tokio::test]
async fn test_user_data_missing_fields_are_400() {
    let app = test_app();

    let (status, body) = send(
        &app.router,
        Method::POST,
        "/api/user-data",
        Some(json!({"userId": "u", "dataType": "event"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "Missing required fields: userId, dataType, and value are required"
    );

    let (status, body) = send(&app.router, Method::GET, "/api/user-data", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "userId is required");
}

// ============================================
// Health
// ============================================

#[tokio::test]
async fn test_app_health_with_backend_up() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    let app = test_app_with_backend(&server.uri());

    let (status, body) = send(&app.router, Method::GET, "/api/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["environment"], "test");
    assert_eq!(body["backend"], "healthy");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_chat_health_backend_down_is_still_healthy() {
    let app = test_app();

    let (status, body) = send(&app.router, Method::GET, "/api/chat/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["backend"], "unavailable");
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_chat_health_backend_available() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/chat/health"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    let app = test_app_with_backend(&server.uri());

    let (status, body) = send(&app.router, Method::GET, "/api/chat/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["backend"], "available");
    assert_eq!(body["message"], "All systems operational");
}

#[tokio::test]
async fn test_chat_health_internal_fault_is_500() {
    let app = test_app_with_backend("not a url");

    let (status, body) = send(&app.router, Method::GET, "/api/chat/health", None).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"status": "error", "message": "Internal server error"}));
}
