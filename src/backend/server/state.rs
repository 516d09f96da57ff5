/**
 * Application State Management
 *
 * `AppState` is the single container of the process-wide services, built
 * once in `init::create_app` and cloned into every handler:
 *
 * - `config` - validated `AppConfig`
 * - `hub` - persist-then-broadcast service; owns the `LogStore` and the
 *   `ConnectionRegistry`
 * - `templates` - quick-reply templates document
 * - `locality` - LAN address discovery and reachability probe
 *
 * Every field is an `Arc` or cheap to clone. The `FromRef` impls let
 * handlers extract just the part they use.
 *
 * # Example
 *
 * ```rust,ignore
 * use axum::extract::State;
 * use std::sync::Arc;
 * use lanshare::backend::realtime::RealtimeHub;
 *
 * async fn handler(State(hub): State<Arc<RealtimeHub>>) {
 *     let count = hub.registry().len().await;
 * }
 * ```
 */

use axum::extract::FromRef;
use std::sync::Arc;

use crate::backend::locality::LocalityService;
use crate::backend::realtime::RealtimeHub;
use crate::backend::store::TemplateStore;
use crate::shared::AppConfig;

/// Process-wide services shared by all handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Effective configuration
    pub config: Arc<AppConfig>,

    /// Note log, connection registry and broadcast ordering
    pub hub: Arc<RealtimeHub>,

    /// Templates document
    pub templates: Arc<TemplateStore>,

    /// Locality classification
    pub locality: LocalityService,
}

impl FromRef<AppState> for Arc<AppConfig> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.config.clone()
    }
}

impl FromRef<AppState> for Arc<RealtimeHub> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.hub.clone()
    }
}

impl FromRef<AppState> for Arc<TemplateStore> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.templates.clone()
    }
}

impl FromRef<AppState> for LocalityService {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.locality.clone()
    }
}
