/**
 * API Route Handlers
 *
 * # Routes
 *
 * ## Notes
 * - `POST /add` - Append a note (form field `content`)
 * - `POST /delete` - Remove a note by timestamp (form field `time`)
 * - `GET /api/messages` - Current note log, newest first
 *
 * ## Files
 * - `POST /upload` - Relay a file to every device
 * - `POST /file_received` - Broadcast a receipt
 *
 * ## LAN Detection
 * - `GET /api/lan-check` - Locality signal for the caller
 * - `GET /api/server-info` - Share-code URL
 *
 * ## Templates
 * - `GET /api/templates`, `POST /api/templates`
 * - `POST /api/templates/category/{key}`
 *
 * ## Health
 * - `GET /health`
 */

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::backend::handlers::{
    add_note, add_template, delete_note, file_received, get_templates, health, lan_check,
    list_notes, replace_templates, server_info, upload_file,
};
use crate::backend::server::state::AppState;

/// Multipart framing and the other form fields on top of the file itself
const UPLOAD_BODY_SLACK: usize = 1024 * 1024;

/// Configure API routes
///
/// # Arguments
///
/// * `router` - The router to add routes to
/// * `max_upload_bytes` - Upload cap; the `/upload` body limit sits a little
///   above it so a slightly oversized file gets a validation error instead of
///   a bare 413
///
/// # Returns
///
/// Router with API routes configured
pub fn configure_api_routes(router: Router<AppState>, max_upload_bytes: u64) -> Router<AppState> {
    let upload_limit = usize::try_from(max_upload_bytes)
        .unwrap_or(usize::MAX)
        .saturating_add(UPLOAD_BODY_SLACK);

    router
        // Note log
        .route("/add", post(add_note))
        .route("/delete", post(delete_note))
        .route("/api/messages", get(list_notes))
        // File relay
        .route(
            "/upload",
            post(upload_file).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/file_received", post(file_received))
        // LAN detection
        .route("/api/lan-check", get(lan_check))
        .route("/api/server-info", get(server_info))
        // Templates
        .route("/api/templates", get(get_templates).post(replace_templates))
        .route("/api/templates/category/{key}", post(add_template))
        .route("/health", get(health))
}
