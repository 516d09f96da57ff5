/**
 * Handler Request and Response Types
 *
 * Bodies accepted and returned by the HTTP handlers. Field names follow the
 * JSON the browser client already speaks (`success`, `file_id`, ...).
 */

use serde::{Deserialize, Serialize};

use crate::backend::locality::LocalitySignal;
use crate::shared::LogEntry;

/// `POST /add` form
#[derive(Deserialize, Debug, Default)]
pub struct AddNoteForm {
    #[serde(default)]
    pub content: String,
}

/// `POST /delete` form
#[derive(Deserialize, Debug, Default)]
pub struct DeleteNoteForm {
    #[serde(default)]
    pub time: String,
}

/// Reply to `POST /add`
#[derive(Serialize, Deserialize, Debug)]
pub struct AddNoteResponse {
    pub success: bool,
    pub time: String,
    pub content: String,
}

/// Generic success reply
#[derive(Serialize, Deserialize, Debug)]
pub struct SuccessResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub message: Option<String>,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
        }
    }
}

/// Reply to `GET /api/messages`
#[derive(Serialize, Deserialize, Debug)]
pub struct MessagesResponse {
    pub success: bool,
    pub messages: Vec<LogEntry>,
}

/// Reply to `POST /upload`
#[derive(Serialize, Deserialize, Debug)]
pub struct UploadResponse {
    pub success: bool,
    pub message: String,
    pub file_id: String,
    pub filename: String,
    pub size: u64,
}

/// `POST /file_received` body
#[derive(Deserialize, Debug, Default)]
pub struct FileReceivedRequest {
    #[serde(default)]
    pub file_id: String,
    #[serde(default)]
    pub mode: Option<String>,
}

/// Raw proxy headers echoed back by `GET /api/lan-check`
#[derive(Serialize, Deserialize, Debug, Default, PartialEq, Eq)]
pub struct HeaderEcho {
    pub x_forwarded_for: Option<String>,
    pub x_real_ip: Option<String>,
    pub cf_connecting_ip: Option<String>,
    pub true_client_ip: Option<String>,
}

/// Reply to `GET /api/lan-check`
#[derive(Serialize, Debug)]
pub struct LanCheckResponse {
    pub success: bool,
    pub current_host: String,
    #[serde(flatten)]
    pub signal: LocalitySignal,
    pub user_agent: String,
    pub referrer: String,
    pub headers: HeaderEcho,
}

/// Reply to `GET /api/server-info`
#[derive(Serialize, Deserialize, Debug)]
pub struct ServerInfoResponse {
    /// URL the current visitor used, as shown in the share code
    pub server_url: String,
    /// `LAN` for literal-IP access, `WAN` otherwise
    pub network_type: String,
    pub is_ip_access: bool,
    /// Direct LAN address of this server
    pub lan_url: String,
}

/// Reply to `POST /api/templates/category/{key}`
#[derive(Serialize, Deserialize, Debug)]
pub struct AddTemplateResponse {
    pub success: bool,
    pub message: String,
    #[serde(rename = "is_duplicate")]
    pub duplicate: bool,
}

/// Reply to `GET /health`
#[derive(Serialize, Deserialize, Debug)]
pub struct HealthResponse {
    pub status: String,
    pub connections: usize,
}
