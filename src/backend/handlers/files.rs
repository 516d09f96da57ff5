/**
 * File Relay Handlers
 *
 * `POST /upload` takes a multipart `file` field, checks its name, extension
 * and size, and hands it to the hub for broadcast as `file_incoming`. The
 * file is never written to disk.
 *
 * `POST /file_received` broadcasts that a device accepted a relayed file.
 */

use axum::{
    extract::{multipart::Field, rejection::JsonRejection, Multipart, State},
    http::StatusCode,
    response::Json,
};

use crate::backend::error::BackendError;
use crate::backend::handlers::types::{FileReceivedRequest, SuccessResponse, UploadResponse};
use crate::backend::middleware::ClientAddr;
use crate::backend::server::state::AppState;
use crate::shared::file::check_upload;
use crate::shared::FileInfo;

/// Field name the browser client uses for the upload
pub const UPLOAD_FIELD: &str = "file";

/// Relay an uploaded file to every connected device
///
/// # Errors
///
/// * `400 Bad Request` - No file, disallowed extension, or over the size cap
/// * `413 Payload Too Large` - Request body far beyond the cap
pub async fn upload_file(
    State(state): State<AppState>,
    client: ClientAddr,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, BackendError> {
    let mut upload = None;
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() == Some(UPLOAD_FIELD) {
            upload = Some(read_upload(&state, field).await?);
            break;
        }
    }
    let (filename, content_type, bytes) =
        upload.ok_or_else(|| BackendError::validation(UPLOAD_FIELD, "No file selected"))?;

    let info = FileInfo::incoming(filename, content_type, &bytes, client.ip);
    let response = UploadResponse {
        success: true,
        message: format!("File \"{}\" sent to every device on the network", info.filename),
        file_id: info.file_id.clone(),
        filename: info.filename.clone(),
        size: info.size,
    };
    state.hub.relay_file(info).await;
    Ok(Json(response))
}

async fn read_upload(
    state: &AppState,
    field: Field<'_>,
) -> Result<(String, String, axum::body::Bytes), BackendError> {
    let filename = field.file_name().unwrap_or_default().to_string();
    let content_type = field
        .content_type()
        .unwrap_or("application/octet-stream")
        .to_string();

    // Name and extension are checked before the body is buffered.
    check_upload(&state.config, &filename, 0)?;
    let bytes = field.bytes().await.map_err(multipart_error)?;
    check_upload(&state.config, &filename, bytes.len() as u64)?;

    Ok((filename, content_type, bytes))
}

fn multipart_error(e: axum::extract::multipart::MultipartError) -> BackendError {
    let status = e.status();
    let message = if status == StatusCode::PAYLOAD_TOO_LARGE {
        "File too large".to_string()
    } else {
        format!("Invalid upload: {}", e.body_text())
    };
    BackendError::handler(status, message)
}

/// Broadcast a receipt for a relayed file
///
/// # Errors
///
/// * `400 Bad Request` - Body is not JSON or `file_id` is missing
pub async fn file_received(
    State(state): State<AppState>,
    client: ClientAddr,
    body: Result<Json<FileReceivedRequest>, JsonRejection>,
) -> Result<Json<SuccessResponse>, BackendError> {
    let Json(request) = body.map_err(|e| {
        tracing::debug!("[Files] Bad receipt body: {}", e);
        BackendError::validation("body", "Invalid request data")
    })?;

    state
        .hub
        .acknowledge_file(&request.file_id, &client.ip, request.mode.as_deref())
        .await?;
    Ok(Json(SuccessResponse::with_message("Receipt sent")))
}
