//! LAN detection API integration tests
//!
//! The fixture reports `192.168.1.10` as the server address, so every
//! expectation below is independent of the host running the tests.

use axum::http::{header, HeaderName, HeaderValue, StatusCode};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;

use lanshare::backend::locality::{AddressDiscovery, HttpProbe, LocalityService};

use crate::common::{serve_on, test_config, test_state, TestApp};

fn host(value: &'static str) -> (HeaderName, HeaderValue) {
    (header::HOST, HeaderValue::from_static(value))
}

fn forwarded(value: &'static str) -> (HeaderName, HeaderValue) {
    (
        HeaderName::from_static("x-forwarded-for"),
        HeaderValue::from_static(value),
    )
}

#[tokio::test]
async fn test_direct_access_never_prompts() {
    let app = TestApp::new().await;
    let (h, v) = host("192.168.1.10:9405");
    let (fh, fv) = forwarded("192.168.1.20");

    let response = app
        .server
        .get("/api/lan-check")
        .add_header(h, v)
        .add_header(fh, fv)
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["current_host"], json!("192.168.1.10:9405"));
    assert_eq!(body["client_ip"], json!("192.168.1.20"));
    assert_eq!(body["local_ip"], json!("192.168.1.10"));
    assert_eq!(body["is_ip_access"], json!(true));
    assert_eq!(body["is_client_in_lan"], json!(true));
    assert_eq!(body["need_switch_prompt"], json!(false));
    assert_eq!(body["lan_url"], json!("http://192.168.1.10:9405"));
    assert_eq!(body["headers"]["x_forwarded_for"], json!("192.168.1.20"));
}

#[tokio::test]
async fn test_named_access_from_lan_prompts() {
    let app = TestApp::new().await;
    let (h, v) = host("share.example.com");
    let (fh, fv) = forwarded("192.168.1.20");

    let body: Value = app
        .server
        .get("/api/lan-check")
        .add_header(h, v)
        .add_header(fh, fv)
        .await
        .json();

    assert_eq!(body["is_ip_access"], json!(false));
    assert_eq!(body["is_client_in_lan"], json!(true));
    assert_eq!(body["probe_reachable"], json!(true));
    assert_eq!(body["need_switch_prompt"], json!(true));
}

#[tokio::test]
async fn test_failed_probe_still_prompts_for_real_lan_address() {
    let app = TestApp::with_probe(false).await;
    let (h, v) = host("share.example.com");

    let body: Value = app.server.get("/api/lan-check").add_header(h, v).await.json();

    assert_eq!(body["probe_reachable"], json!(false));
    assert_eq!(body["need_switch_prompt"], json!(true));
}

#[tokio::test]
async fn test_cdn_hop_is_skipped_for_private_client() {
    let app = TestApp::new().await;
    let (h, v) = host("share.example.com");
    let (fh, fv) = forwarded("100.64.3.4, 10.1.2.3");

    let body: Value = app
        .server
        .get("/api/lan-check")
        .add_header(h, v)
        .add_header(fh, fv)
        .await
        .json();

    assert_eq!(body["client_ip"], json!("10.1.2.3"));
}

#[tokio::test]
async fn test_server_info_for_ip_access() {
    let app = TestApp::new().await;
    let (h, v) = host("192.168.1.10:9405");

    let body: Value = app.server.get("/api/server-info").add_header(h, v).await.json();

    assert_eq!(
        body,
        json!({
            "server_url": "http://192.168.1.10:9405",
            "network_type": "LAN",
            "is_ip_access": true,
            "lan_url": "http://192.168.1.10:9405",
        })
    );
}

#[tokio::test]
async fn test_server_info_for_named_access() {
    let app = TestApp::new().await;
    let (h, v) = host("share.example.com");

    let body: Value = app.server.get("/api/server-info").add_header(h, v).await.json();

    assert_eq!(body["server_url"], json!("https://share.example.com"));
    assert_eq!(body["network_type"], json!("WAN"));
    assert_eq!(body["is_ip_access"], json!(false));
    assert_eq!(body["lan_url"], json!("http://192.168.1.10:9405"));
}

#[tokio::test]
async fn test_loopback_fallback_never_prompts_on_live_server() {
    let dir = tempfile::tempdir().unwrap();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    // No discovery strategy succeeds, so the server address is loopback and
    // a probe would reach this very server
    let mut state = test_state(test_config(dir.path()), true).await;
    state.locality = LocalityService::new(
        AddressDiscovery::with_strategies(Vec::new()),
        Arc::new(HttpProbe::new(Duration::from_millis(500)).unwrap()),
        port,
    );
    let addr = serve_on(listener, state);

    let body: Value = reqwest::Client::new()
        .get(format!("http://{}/api/lan-check", addr))
        .header(header::HOST, "share.example.com")
        .header("x-forwarded-for", "203.0.113.9")
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["local_ip"], json!("127.0.0.1"));
    assert_eq!(body["probe_reachable"], json!(null));
    assert_eq!(body["need_switch_prompt"], json!(false));
}
