/**
 * Error Conversion
 *
 * `IntoResponse` for [`BackendError`], so handlers can return it directly.
 *
 * # Response Format
 *
 * ```json
 * {
 *   "success": false,
 *   "error": "Error message",
 *   "status": 400
 * }
 * ```
 */

use axum::{
    response::{IntoResponse, Response},
    Json,
};

use crate::backend::error::types::BackendError;

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("[Server] {}", self);
        } else {
            tracing::debug!("[Server] Request rejected: {}", self);
        }

        let body = serde_json::json!({
            "success": false,
            "error": self.message(),
            "status": status.as_u16(),
        });
        (status, Json(body)).into_response()
    }
}
