/**
 * Realtime Frames
 *
 * This module defines the frames exchanged over the `/ws` channel.
 *
 * Server to client frames are `{"type": <kind>, "data": <payload>}` objects.
 * Every kind the server can emit is a variant of [`ServerEvent`], each with
 * its own typed payload, so a malformed broadcast cannot be constructed.
 *
 * Client to server frames share the `type` field; `request_sync` is the only
 * kind the server acts on.
 */
use serde::{Deserialize, Serialize};

use crate::shared::entry::LogEntry;
use crate::shared::error::SharedError;
use crate::shared::file::FileInfo;

/// A frame sent from the server to one or all connections
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum ServerEvent {
    /// Acknowledgement sent to a connection when it opens
    Connected { message: String },
    /// A note was appended to the log
    NewMessage {
        time: String,
        content: String,
        action: String,
    },
    /// A note was removed from the log
    MessageDeleted { time: String, action: String },
    /// A file is being relayed to every device
    FileIncoming(FileInfo),
    /// Some device acknowledged a relayed file
    FileReceivedNotification {
        file_id: String,
        receiver_ip: String,
        receive_time: String,
        mode: String,
        action: String,
    },
    /// Full log snapshot, sent only to the connection that asked for it
    SyncData { messages: Vec<LogEntry> },
    /// The snapshot could not be produced
    SyncError { error: String },
}

impl ServerEvent {
    /// Connection acknowledgement
    pub fn connected() -> Self {
        Self::Connected {
            message: "Connected to realtime sync".to_string(),
        }
    }

    /// Broadcast for an appended note
    pub fn new_message(entry: &LogEntry) -> Self {
        Self::NewMessage {
            time: entry.time.clone(),
            content: entry.content.clone(),
            action: "add".to_string(),
        }
    }

    /// Broadcast for a deleted note
    pub fn message_deleted(time: impl Into<String>) -> Self {
        Self::MessageDeleted {
            time: time.into(),
            action: "delete".to_string(),
        }
    }

    /// Broadcast for a file receipt
    pub fn file_received(
        file_id: impl Into<String>,
        receiver_ip: impl Into<String>,
        mode: impl Into<String>,
    ) -> Self {
        Self::FileReceivedNotification {
            file_id: file_id.into(),
            receiver_ip: receiver_ip.into(),
            receive_time: crate::shared::entry::now_display(),
            mode: mode.into(),
            action: "file_received".to_string(),
        }
    }

    /// Wire name of this frame's `type` field
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Connected { .. } => "connected",
            Self::NewMessage { .. } => "new_message",
            Self::MessageDeleted { .. } => "message_deleted",
            Self::FileIncoming(_) => "file_incoming",
            Self::FileReceivedNotification { .. } => "file_received_notification",
            Self::SyncData { .. } => "sync_data",
            Self::SyncError { .. } => "sync_error",
        }
    }

    /// Serialize to the JSON text sent over the socket
    pub fn to_frame(&self) -> Result<String, SharedError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// A request received from a client
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientRequest {
    /// Ask for the full log, answered only to the requester
    RequestSync,
    /// Any other well-formed frame; ignored by the server
    Other(String),
}

#[derive(Deserialize)]
struct InboundFrame {
    #[serde(rename = "type")]
    kind: String,
}

impl ClientRequest {
    /// Parse an inbound text frame
    ///
    /// Fails with a serialization error when the text is not a JSON object
    /// carrying a string `type` field.
    pub fn parse(text: &str) -> Result<Self, SharedError> {
        let frame: InboundFrame = serde_json::from_str(text)?;
        Ok(match frame.kind.as_str() {
            "request_sync" => Self::RequestSync,
            _ => Self::Other(frame.kind),
        })
    }
}
