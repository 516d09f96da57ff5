//! Hub, session and registry integration tests
//!
//! Sessions are driven through in-memory frame streams; no socket involved.

use pretty_assertions::assert_eq;
use serde_json::json;
use std::convert::Infallible;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;

use lanshare::backend::realtime::{Connection, SessionState};
use lanshare::shared::LogEntry;

use crate::common::{next_frame, TestApp};

#[tokio::test]
async fn test_resync_answers_only_the_requester() {
    let app = TestApp::new().await;
    app.state.hub.append_note("kept").await.unwrap();

    let (requester, mut requester_rx) = Connection::new(None, 16);
    let (bystander, mut bystander_rx) = app.listen().await;

    let mut session = app.state.hub.session(Arc::clone(&requester));
    session.open().await.unwrap();
    assert_eq!(session.state(), SessionState::Open);
    assert_eq!(next_frame(&mut requester_rx).await["type"], json!("connected"));

    session.handle_text(r#"{"type":"request_sync"}"#).await.unwrap();

    let reply = next_frame(&mut requester_rx).await;
    assert_eq!(reply["type"], json!("sync_data"));
    assert_eq!(reply["data"]["messages"][0]["content"], json!("kept"));
    assert!(bystander_rx.try_recv().is_err());
    assert!(!bystander.is_closed());
}

#[tokio::test]
async fn test_unknown_frames_are_ignored() {
    let app = TestApp::new().await;
    let (connection, mut rx) = Connection::new(None, 16);
    let mut session = app.state.hub.session(Arc::clone(&connection));
    session.open().await.unwrap();
    let _ack = next_frame(&mut rx).await;

    session.handle_text("not json").await.unwrap();
    session.handle_text(r#"{"type":"typing"}"#).await.unwrap();

    assert!(rx.try_recv().is_err());
    assert_eq!(session.state(), SessionState::Open);
}

#[tokio::test]
async fn test_session_unregisters_when_stream_ends() {
    let app = TestApp::new().await;
    let (connection, mut rx) = Connection::new(None, 16);
    let (tx, inbound) = mpsc::unbounded_channel::<Result<String, Infallible>>();

    let session = app.state.hub.session(Arc::clone(&connection));
    let task = tokio::spawn(session.run(UnboundedReceiverStream::new(inbound)));

    assert_eq!(next_frame(&mut rx).await["type"], json!("connected"));
    assert!(app.state.hub.registry().contains(connection.id()).await);

    drop(tx);
    task.await.unwrap();

    assert!(!app.state.hub.registry().contains(connection.id()).await);
    assert!(connection.is_closed());
}

#[tokio::test]
async fn test_failed_connection_does_not_block_others() {
    let app = TestApp::new().await;
    let (dead, dead_rx) = app.listen().await;
    drop(dead_rx);
    let (_live, mut live_rx) = app.listen().await;

    let entry = app.state.hub.append_note("still delivered").await.unwrap();

    let frame = next_frame(&mut live_rx).await;
    assert_eq!(frame["data"]["time"], json!(entry.time));
    assert!(!app.state.hub.registry().contains(dead.id()).await);
    assert_eq!(app.state.hub.registry().len().await, 1);
}

#[tokio::test]
async fn test_concurrent_appends_all_survive_in_broadcast_order() {
    let app = TestApp::new().await;
    let (_conn, mut rx) = app.listen().await;

    let mut tasks = Vec::new();
    for i in 0..8 {
        let hub = Arc::clone(&app.state.hub);
        tasks.push(tokio::spawn(async move {
            hub.append_note(&format!("note {}", i)).await.unwrap()
        }));
    }
    for task in tasks {
        task.await.unwrap();
    }

    let mut broadcast = Vec::new();
    for _ in 0..8 {
        let frame = next_frame(&mut rx).await;
        broadcast.push(frame["data"]["content"].as_str().unwrap().to_string());
    }

    // Log is newest first, broadcasts oldest first
    let logged: Vec<String> = app
        .state
        .hub
        .snapshot()
        .await
        .unwrap()
        .into_iter()
        .rev()
        .map(|entry: LogEntry| entry.content)
        .collect();
    assert_eq!(logged, broadcast);
}
