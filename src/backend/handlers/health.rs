/**
 * Health Check
 *
 * `GET /health` answers the locality reachability probe and external
 * monitors.
 */

use axum::{extract::State, response::Json};
use std::sync::Arc;

use crate::backend::handlers::types::HealthResponse;
use crate::backend::realtime::RealtimeHub;

pub async fn health(State(hub): State<Arc<RealtimeHub>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        connections: hub.registry().len().await,
    })
}
