//! Note log API integration tests
//!
//! Tests for `/add`, `/delete` and `/api/messages`, including the broadcast
//! each mutation produces.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::{next_frame, test_config, test_state, TestApp};

#[tokio::test]
async fn test_add_note_persists_and_broadcasts() {
    let app = TestApp::new().await;
    let (_conn, mut rx) = app.listen().await;

    let response = app.server.post("/add").form(&[("content", "  hello  ")]).await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["content"], json!("hello"));
    let time = body["time"].as_str().unwrap().to_string();

    let frame = next_frame(&mut rx).await;
    assert_eq!(frame["type"], json!("new_message"));
    assert_eq!(frame["data"]["time"], json!(time));
    assert_eq!(frame["data"]["content"], json!("hello"));
    assert_eq!(frame["data"]["action"], json!("add"));

    let listed: Value = app.server.get("/api/messages").await.json();
    assert_eq!(listed["messages"], json!([{ "time": time, "content": "hello" }]));
}

#[tokio::test]
async fn test_add_blank_note_is_rejected() {
    let app = TestApp::new().await;
    let (_conn, mut rx) = app.listen().await;

    let response = app.server.post("/add").form(&[("content", "   ")]).await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    crate::assert_error_body!(response.json::<Value>(), "Content cannot be empty");
    assert!(rx.try_recv().is_err(), "a rejected note must not be broadcast");
}

#[tokio::test]
async fn test_newest_note_listed_first() {
    let app = TestApp::new().await;
    for content in ["first", "second", "third"] {
        app.server
            .post("/add")
            .form(&[("content", content)])
            .await
            .assert_status_ok();
    }

    let listed: Value = app.server.get("/api/messages").await.json();
    let contents: Vec<&str> = listed["messages"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["content"].as_str().unwrap())
        .collect();
    assert_eq!(contents, vec!["third", "second", "first"]);
}

#[tokio::test]
async fn test_delete_note_broadcasts_removal() {
    let app = TestApp::new().await;
    let added: Value = app.server.post("/add").form(&[("content", "bye")]).await.json();
    let time = added["time"].as_str().unwrap().to_string();
    let (_conn, mut rx) = app.listen().await;

    let response = app.server.post("/delete").form(&[("time", time.as_str())]).await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>()["success"], json!(true));

    let frame = next_frame(&mut rx).await;
    assert_eq!(frame["type"], json!("message_deleted"));
    assert_eq!(frame["data"], json!({ "time": time, "action": "delete" }));

    let listed: Value = app.server.get("/api/messages").await.json();
    assert_eq!(listed["messages"], json!([]));
}

#[tokio::test]
async fn test_delete_without_time_is_bad_request() {
    let app = TestApp::new().await;

    let response = app.server.post("/delete").form(&[("time", "")]).await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    crate::assert_error_body!(response.json::<Value>(), "No timestamp provided");
}

#[tokio::test]
async fn test_delete_unknown_time_is_not_found() {
    let app = TestApp::new().await;
    let (_conn, mut rx) = app.listen().await;

    let response = app
        .server
        .post("/delete")
        .form(&[("time", "1999-01-01 00:00:00")])
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    crate::assert_error_body!(response.json::<Value>(), "Message not found");
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn test_log_survives_restart() {
    let app = TestApp::new().await;
    app.server
        .post("/add")
        .form(&[("content", "durable")])
        .await
        .assert_status_ok();

    // Fresh services over the same directory
    let state = test_state(test_config(app.dir.path()), true).await;
    let entries = state.hub.snapshot().await.unwrap();

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].content, "durable");
}

#[tokio::test]
async fn test_unwritable_log_fails_without_broadcast() {
    let app = TestApp::new().await;
    // A directory where the log file should be makes every write fail
    std::fs::create_dir(&app.state.config.data_file).unwrap();
    let (_conn, mut rx) = app.listen().await;

    let response = app.server.post("/add").form(&[("content", "lost")]).await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn test_health_reports_connections() {
    let app = TestApp::new().await;
    let (_a, _rx_a) = app.listen().await;
    let (_b, _rx_b) = app.listen().await;

    let body: Value = app.server.get("/health").await.json();

    assert_eq!(body, json!({ "status": "ok", "connections": 2 }));
}
