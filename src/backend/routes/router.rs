/**
 * Router Configuration
 *
 * Combines the WebSocket endpoint, the API routes and static file serving
 * into a single Axum router.
 *
 * # Route Order
 *
 * 1. `GET /ws` - realtime sync socket
 * 2. API routes (notes, files, LAN detection, templates, health)
 * 3. `/static` - files from the configured static directory
 * 4. Fallback - the same directory, so `/` serves `index.html`
 */

use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::backend::realtime::ws_handler;
use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::server::state::AppState;

/// Create the Axum router with all routes configured
///
/// # Arguments
///
/// * `app_state` - Application state holding the hub, stores and locality service
///
/// # Returns
///
/// Configured Axum Router ready to serve requests
pub fn create_router(app_state: AppState) -> Router<()> {
    let static_dir = app_state.config.static_dir.clone();
    let max_upload_bytes = app_state.config.max_upload_bytes;

    let router = Router::new().route("/ws", get(ws_handler));

    // Add API routes
    let router = configure_api_routes(router, max_upload_bytes);

    // Static assets, then the page itself for everything unmatched
    let router = router
        .nest_service("/static", ServeDir::new(&static_dir))
        .fallback_service(ServeDir::new(&static_dir));

    router
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
