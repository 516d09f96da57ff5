/**
 * Template Handlers
 *
 * Read, replace, and append to the quick-reply templates document.
 */

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::Json,
};
use std::sync::Arc;

use crate::backend::error::BackendError;
use crate::backend::handlers::types::{AddTemplateResponse, SuccessResponse};
use crate::backend::store::{AddOutcome, Template, TemplateStore, TemplatesConfig};

fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, BackendError> {
    body.map(|Json(value)| value).map_err(|e| {
        tracing::debug!("[Templates] Rejected body: {}", e);
        BackendError::validation("body", "Invalid data format")
    })
}

/// `GET /api/templates`
pub async fn get_templates(
    State(templates): State<Arc<TemplateStore>>,
) -> Result<Json<TemplatesConfig>, BackendError> {
    Ok(Json(templates.load().await?))
}

/// `POST /api/templates` - replace the whole document
pub async fn replace_templates(
    State(templates): State<Arc<TemplateStore>>,
    body: Result<Json<TemplatesConfig>, JsonRejection>,
) -> Result<Json<SuccessResponse>, BackendError> {
    let config = json_body(body)?;
    templates.replace(&config).await?;
    tracing::info!("[Templates] Replaced document ({} categories)", config.categories.len());
    Ok(Json(SuccessResponse::ok()))
}

/// `POST /api/templates/category/{key}` - append one template
///
/// # Errors
///
/// * `400 Bad Request` - Body is not JSON, or content is blank
/// * `404 Not Found` - No category with that key
pub async fn add_template(
    State(templates): State<Arc<TemplateStore>>,
    Path(key): Path<String>,
    body: Result<Json<Template>, JsonRejection>,
) -> Result<Json<AddTemplateResponse>, BackendError> {
    let template = json_body(body)?;
    let response = match templates.add_to_category(&key, template).await? {
        AddOutcome::Added => AddTemplateResponse {
            success: true,
            message: "Template added".to_string(),
            duplicate: false,
        },
        AddOutcome::Duplicate => AddTemplateResponse {
            success: true,
            message: "An identical template already exists".to_string(),
            duplicate: true,
        },
    };
    Ok(Json(response))
}
