/**
 * Server Initialization
 *
 * Builds the process-wide services from a validated `AppConfig` and wires
 * them into the router.
 *
 * # Initialization Process
 *
 * 1. Open the note log and create the connection registry
 * 2. Ensure the templates document exists
 * 3. Build the locality service (address discovery + HTTP probe)
 * 4. Create and configure the router
 */

use axum::Router;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::backend::locality::{AddressDiscovery, HttpProbe, LocalityService};
use crate::backend::realtime::{ConnectionRegistry, RealtimeHub};
use crate::backend::routes::router::create_router;
use crate::backend::server::state::AppState;
use crate::backend::store::{LogStore, StoreError, TemplateStore};
use crate::shared::AppConfig;

/// Startup failures
#[derive(Debug, Error)]
pub enum InitError {
    #[error("failed to prepare templates: {0}")]
    Templates(#[from] StoreError),
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Build the application state
///
/// # Errors
///
/// Fails when the default templates document cannot be written or the
/// probe's HTTP client cannot be constructed.
pub async fn build_state(config: AppConfig) -> Result<AppState, InitError> {
    let store = Arc::new(LogStore::new(&config.data_file));
    let registry = Arc::new(ConnectionRegistry::new());
    let hub = Arc::new(RealtimeHub::new(store, registry));

    let templates = Arc::new(TemplateStore::new(&config.templates_file));
    if templates.ensure_default().await? {
        tracing::info!(
            "[Templates] Created default templates at {}",
            config.templates_file.display()
        );
    }

    let probe = HttpProbe::new(Duration::from_millis(config.probe_timeout_ms))?;
    let locality = LocalityService::new(
        AddressDiscovery::standard(config.discovery_target.clone()),
        Arc::new(probe),
        config.port,
    );

    Ok(AppState {
        config: Arc::new(config),
        hub,
        templates,
        locality,
    })
}

/// Create and configure the Axum application
///
/// # Returns
///
/// Configured Axum Router ready to serve requests. Serve it with
/// `into_make_service_with_connect_info::<SocketAddr>()` so handlers can
/// see the transport peer.
pub async fn create_app(config: AppConfig) -> Result<Router<()>, InitError> {
    tracing::info!("[Server] Initializing LanShare backend");
    tracing::info!("[Store] Note log at {}", config.data_file.display());

    let app_state = build_state(config).await?;
    Ok(create_router(app_state))
}
