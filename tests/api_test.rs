use std::{sync::Arc, time::Duration};

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use tomato_clock::{
    create_router,
    services::TerminalBell,
    timer::{MonotonicClock, TimerService, TimerSettings},
    AppState,
};

fn app() -> (Router, Arc<AppState>) {
    let timer = TimerService::new(
        TimerSettings::default(),
        Arc::new(MonotonicClock::new()),
        Arc::new(TerminalBell),
    );
    let state = Arc::new(AppState::new(20554, "127.0.0.1".to_string(), timer));
    (create_router(Arc::clone(&state)), state)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

#[tokio::test]
async fn test_health() {
    let (app, _) = app();
    let (status, body) = send(&app, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_configure_renders_display() {
    let (app, _) = app();

    let (status, body) = send(
        &app,
        "POST",
        "/timer/configure",
        Some(json!({"hours": 2, "minutes": 59, "seconds": 59})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["display"], "2:59:59");
    assert_eq!(body["timer"]["duration_seconds"], 10799);
    assert_eq!(body["timer"]["phase"], "idle");

    let (_, body) = send(&app, "POST", "/timer/configure", Some(json!({"minutes": 5, "seconds": 9}))).await;
    assert_eq!(body["display"], "5:09");
}

#[tokio::test]
async fn test_custom_minutes_split_into_hours() {
    let (app, _) = app();

    let (status, body) = send(&app, "POST", "/timer/custom", Some(json!({"minutes": 90}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["timer"]["duration_seconds"], 5400);
    assert_eq!(body["display"], "1:30:00");
}

#[tokio::test]
async fn test_presets() {
    let (app, _) = app();

    let (_, body) = send(&app, "POST", "/timer/preset/pomodoro", None).await;
    assert_eq!(body["display"], "25:00");

    let (_, body) = send(&app, "POST", "/timer/preset/short-break", None).await;
    assert_eq!(body["display"], "5:00");

    let (_, body) = send(&app, "POST", "/timer/preset/long-break", None).await;
    assert_eq!(body["display"], "15:00");

    let (status, _) = send(&app, "POST", "/timer/preset/lunch", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test(start_paused = true)]
async fn test_start_counts_down_and_stop_halts() {
    let (app, state) = app();
    send(&app, "POST", "/timer/custom", Some(json!({"minutes": 1}))).await;

    let (_, body) = send(&app, "POST", "/timer/start", None).await;
    assert_eq!(body["status"], "applied");
    assert_eq!(body["timer"]["phase"], "running");

    let (_, body) = send(&app, "POST", "/timer/start", None).await;
    assert_eq!(body["status"], "ignored");

    tokio::time::sleep(Duration::from_millis(2_050)).await;
    let (_, body) = send(&app, "GET", "/status", None).await;
    assert_eq!(body["display"], "0:58");
    assert_eq!(body["timer"]["remaining_seconds"], 58);
    assert_eq!(body["last_action"], "start");

    let (_, body) = send(&app, "POST", "/timer/stop", None).await;
    assert_eq!(body["message"], "Timer stopped");
    assert_eq!(body["timer"]["phase"], "idle");

    tokio::time::sleep(Duration::from_secs(3)).await;
    assert_eq!(state.display.text(), "0:58");

    let (_, body) = send(&app, "POST", "/timer/stop", None).await;
    assert_eq!(body["status"], "ignored");
}

#[tokio::test(start_paused = true)]
async fn test_stop_then_start_resumes() {
    let (app, _) = app();
    send(&app, "POST", "/timer/configure", Some(json!({"seconds": 30}))).await;
    send(&app, "POST", "/timer/start", None).await;
    tokio::time::sleep(Duration::from_millis(5_050)).await;
    send(&app, "POST", "/timer/stop", None).await;

    send(&app, "POST", "/timer/start", None).await;
    tokio::time::sleep(Duration::from_millis(1_050)).await;

    let (_, body) = send(&app, "GET", "/status", None).await;
    assert_eq!(body["display"], "0:24");
    assert_eq!(body["display_fields"]["seconds"], 24);
    assert_eq!(body["timer"]["duration_seconds"], 30);
}

#[tokio::test]
async fn test_oversized_configure_keeps_status_available() {
    let (app, _) = app();

    let (status, body) = send(
        &app,
        "POST",
        "/timer/configure",
        Some(json!({"hours": i64::MAX, "minutes": i64::MAX})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["timer"]["duration_seconds"], i64::MAX);

    let (status, _) = send(&app, "POST", "/timer/custom", Some(json!({"minutes": i64::MIN}))).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, "GET", "/status", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["timer"]["phase"], "idle");
}

#[tokio::test(start_paused = true)]
async fn test_expiry_then_acknowledge() {
    let (app, _) = app();
    send(&app, "POST", "/timer/configure", Some(json!({"seconds": 1}))).await;
    send(&app, "POST", "/timer/start", None).await;

    tokio::time::sleep(Duration::from_millis(1_100)).await;
    let (_, body) = send(&app, "GET", "/status", None).await;
    assert_eq!(body["timer"]["phase"], "alarming");
    assert_eq!(body["display"], "0:00");

    let (_, body) = send(&app, "POST", "/timer/stop", None).await;
    assert_eq!(body["message"], "Alarm acknowledged");
    assert_eq!(body["timer"]["phase"], "idle");
}
