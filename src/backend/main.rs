/**
 * LanShare Server Entry Point
 *
 * Installs logging, loads configuration, builds the Axum app and serves it
 * with connect info so handlers can see each client's transport address.
 */

use std::net::SocketAddr;

use lanshare::backend::locality::AddressDiscovery;
use lanshare::backend::server::config::{load_config, log_filter};
use lanshare::backend::server::create_app;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // .env may carry RUST_LOG, so read it before the subscriber
    dotenv::dotenv().ok();
    let directive = std::env::var("RUST_LOG").ok();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(directive.as_deref()))
        .init();

    let config = load_config()?;

    tracing::info!("[Server] Startup: bind {}:{}", config.bind_address, config.port);

    let discovery = AddressDiscovery::standard(config.discovery_target.clone());
    let server = tokio::task::spawn_blocking(move || discovery.discover()).await?;
    if server.degraded {
        tracing::warn!("[Locality] No LAN address found; falling back to {}", server.ip);
    }
    tracing::info!(
        "[Server] LAN address: http://{}:{} (via {})",
        server.ip,
        config.port,
        server.source
    );

    let addr: SocketAddr = format!("{}:{}", config.bind_address, config.port).parse()?;
    let app = create_app(config).await?;

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(
                "[Server] Cannot bind {}: {}. Is LanShare already running, or is the port busy?",
                addr,
                e
            );
            std::process::exit(1);
        }
    };
    tracing::info!("[Server] Listening on {}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
