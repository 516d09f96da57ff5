//! Application fixtures
//!
//! Every fixture owns a `TempDir` holding its note log and templates file,
//! so tests never share on-disk state. Locality uses a fixed server address
//! and a fixed probe outcome instead of touching the host network.

use axum_test::TestServer;
use std::net::{Ipv4Addr, SocketAddr};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tokio::sync::mpsc;

use lanshare::backend::locality::{AddressDiscovery, AddressStrategy, FixedProbe, LocalityService};
use lanshare::backend::realtime::{Connection, ConnectionRegistry, RealtimeHub};
use lanshare::backend::routes::create_router;
use lanshare::backend::server::AppState;
use lanshare::backend::store::{LogStore, TemplateStore};
use lanshare::shared::AppConfig;

/// LAN address every fixture reports for the server
pub const SERVER_IP: Ipv4Addr = Ipv4Addr::new(192, 168, 1, 10);

/// Upload cap used by fixtures (64 KiB)
pub const TEST_UPLOAD_CAP: u64 = 64 * 1024;

/// Discovery strategy that always answers with one address
pub struct StaticAddress(pub Ipv4Addr);

impl AddressStrategy for StaticAddress {
    fn name(&self) -> &'static str {
        "static"
    }

    fn discover(&self) -> Option<Ipv4Addr> {
        Some(self.0)
    }
}

/// Configuration rooted in `dir`
pub fn test_config(dir: &Path) -> AppConfig {
    AppConfig::builder()
        .data_file(dir.join("messages.json"))
        .templates_file(dir.join("templates_config.json"))
        .static_dir(dir.join("static"))
        .max_upload_bytes(TEST_UPLOAD_CAP)
        .connection_queue_capacity(16)
        .build()
        .expect("test config is valid")
}

/// Application state over `config`, with the probe answering `probe_reachable`
pub async fn test_state(config: AppConfig, probe_reachable: bool) -> AppState {
    let store = Arc::new(LogStore::new(&config.data_file));
    let hub = Arc::new(RealtimeHub::new(store, Arc::new(ConnectionRegistry::new())));
    let templates = Arc::new(TemplateStore::new(&config.templates_file));
    templates.ensure_default().await.expect("write default templates");

    let locality = LocalityService::new(
        AddressDiscovery::with_strategies(vec![Box::new(StaticAddress(SERVER_IP))]),
        Arc::new(FixedProbe(probe_reachable)),
        config.port,
    );

    AppState {
        config: Arc::new(config),
        hub,
        templates,
        locality,
    }
}

/// In-process server plus direct access to its state
pub struct TestApp {
    pub server: TestServer,
    pub state: AppState,
    pub dir: TempDir,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_probe(true).await
    }

    pub async fn with_probe(probe_reachable: bool) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let state = test_state(test_config(dir.path()), probe_reachable).await;
        let server = TestServer::new(create_router(state.clone())).expect("start test server");
        Self { server, state, dir }
    }

    /// Register a bare connection with the hub and return its outbound queue
    pub async fn listen(&self) -> (Arc<Connection>, mpsc::Receiver<Arc<str>>) {
        let (connection, rx) = Connection::new(None, 16);
        self.state.hub.registry().register(Arc::clone(&connection)).await;
        (connection, rx)
    }
}

/// Serve `state` on an ephemeral loopback port with connect info
pub async fn spawn_listener(state: AppState) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    serve_on(listener, state)
}

/// Serve `state` on an already bound `listener`
pub fn serve_on(listener: tokio::net::TcpListener, state: AppState) -> SocketAddr {
    let addr = listener.local_addr().expect("local addr");
    let app = create_router(state);
    tokio::spawn(async move {
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .expect("serve");
    });
    addr
}

/// Next queued frame, parsed as JSON
pub async fn next_frame(rx: &mut mpsc::Receiver<Arc<str>>) -> serde_json::Value {
    let frame = tokio::time::timeout(Duration::from_secs(2), rx.recv())
        .await
        .expect("frame within 2s")
        .expect("queue open");
    serde_json::from_str(&frame).expect("frame is JSON")
}
