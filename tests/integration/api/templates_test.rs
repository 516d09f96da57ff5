//! Templates API integration tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::TestApp;

#[tokio::test]
async fn test_default_templates_are_served() {
    let app = TestApp::new().await;

    let body: Value = app.server.get("/api/templates").await.json();

    let categories = body["categories"].as_object().unwrap();
    assert!(categories.contains_key("home"));
    assert!(categories.contains_key("settings"));
}

#[tokio::test]
async fn test_add_template_detects_duplicates() {
    let app = TestApp::new().await;
    let template = json!({ "title": "", "content": "Back in five minutes" });

    let first: Value = app
        .server
        .post("/api/templates/category/presale")
        .json(&template)
        .await
        .json();
    assert_eq!(first["is_duplicate"], json!(false));

    let second: Value = app
        .server
        .post("/api/templates/category/presale")
        .json(&json!({ "title": "Again", "content": "  Back in five minutes " }))
        .await
        .json();
    assert_eq!(second["success"], json!(true));
    assert_eq!(second["is_duplicate"], json!(true));

    let body: Value = app.server.get("/api/templates").await.json();
    assert_eq!(
        body["categories"]["presale"]["templates"],
        json!([{ "title": "Untitled", "content": "Back in five minutes" }])
    );
}

#[tokio::test]
async fn test_add_template_errors() {
    let app = TestApp::new().await;

    let unknown = app
        .server
        .post("/api/templates/category/nope")
        .json(&json!({ "title": "t", "content": "c" }))
        .await;
    assert_eq!(unknown.status_code(), StatusCode::NOT_FOUND);

    let blank = app
        .server
        .post("/api/templates/category/home")
        .json(&json!({ "title": "t", "content": "   " }))
        .await;
    assert_eq!(blank.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_replace_templates() {
    let app = TestApp::new().await;
    let document = json!({
        "categories": {
            "only": { "icon": "*", "name": "Only", "templates": [] }
        }
    });

    app.server
        .post("/api/templates")
        .json(&document)
        .await
        .assert_status_ok();

    let body: Value = app.server.get("/api/templates").await.json();
    assert_eq!(body, document);
}

#[tokio::test]
async fn test_replace_templates_rejects_bad_body() {
    let app = TestApp::new().await;

    let response = app.server.post("/api/templates").text("not json").await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    crate::assert_error_body!(response.json::<Value>(), "Invalid data format");
}
