/**
 * Note Handlers
 *
 * `POST /add`, `POST /delete` and `GET /api/messages`. Validation,
 * persistence and broadcasting all happen in `RealtimeHub`; these handlers
 * only decode the form and shape the reply.
 */

use axum::{extract::State, response::Json, Form};
use std::sync::Arc;

use crate::backend::error::BackendError;
use crate::backend::handlers::types::{
    AddNoteForm, AddNoteResponse, DeleteNoteForm, MessagesResponse, SuccessResponse,
};
use crate::backend::realtime::RealtimeHub;

/// Append a note
///
/// # Errors
///
/// * `400 Bad Request` - Content is empty or whitespace
/// * `500 Internal Server Error` - The log could not be written
///
/// # Example Request
///
/// ```http
/// POST /add HTTP/1.1
/// Content-Type: application/x-www-form-urlencoded
///
/// content=hello
/// ```
pub async fn add_note(
    State(hub): State<Arc<RealtimeHub>>,
    Form(form): Form<AddNoteForm>,
) -> Result<Json<AddNoteResponse>, BackendError> {
    let entry = hub.append_note(&form.content).await?;
    Ok(Json(AddNoteResponse {
        success: true,
        time: entry.time,
        content: entry.content,
    }))
}

/// Delete the note whose timestamp equals `time`
///
/// # Errors
///
/// * `400 Bad Request` - No timestamp given
/// * `404 Not Found` - No note has that timestamp
/// * `500 Internal Server Error` - The log could not be written
pub async fn delete_note(
    State(hub): State<Arc<RealtimeHub>>,
    Form(form): Form<DeleteNoteForm>,
) -> Result<Json<SuccessResponse>, BackendError> {
    hub.delete_note(&form.time).await?;
    Ok(Json(SuccessResponse::ok()))
}

/// Full log, most recent first
pub async fn list_notes(
    State(hub): State<Arc<RealtimeHub>>,
) -> Result<Json<MessagesResponse>, BackendError> {
    let messages = hub.snapshot().await?;
    Ok(Json(MessagesResponse {
        success: true,
        messages,
    }))
}
