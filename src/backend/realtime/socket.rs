/**
 * WebSocket Transport
 *
 * Glue between an axum WebSocket and a [`SyncSession`].
 *
 * The socket is split. A writer task drains the connection's outbound queue
 * into the sink and stops when the queue ends or the connection is closed.
 * The read half is mapped to a stream of text frames that the session
 * consumes; ping/pong frames are left to axum and a close frame ends the
 * stream.
 */

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
};
use futures_util::{future, stream::SplitSink, SinkExt, StreamExt};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;

use crate::backend::middleware::ClientAddr;
use crate::backend::realtime::connection::Connection;
use crate::backend::realtime::hub::RealtimeHub;
use crate::backend::server::state::AppState;

/// Handle `GET /ws`
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
    client: ClientAddr,
) -> impl IntoResponse {
    let hub = Arc::clone(&state.hub);
    let capacity = state.config.connection_queue_capacity;
    ws.on_upgrade(move |socket| serve_socket(socket, hub, client.peer, capacity))
}

/// Run one upgraded socket until either side closes it
pub async fn serve_socket(
    socket: WebSocket,
    hub: Arc<RealtimeHub>,
    peer: Option<SocketAddr>,
    capacity: usize,
) {
    let (connection, outbound) = Connection::new(peer, capacity);
    let (sink, stream) = socket.split();

    let writer = tokio::spawn(write_frames(sink, outbound, Arc::clone(&connection)));

    let inbound = stream
        .take_while(|frame| future::ready(!matches!(frame, Ok(Message::Close(_)))))
        .filter_map(|frame| {
            future::ready(match frame {
                Ok(Message::Text(text)) => Some(Ok(text.to_string())),
                Ok(Message::Binary(bytes)) => Some(Ok(String::from_utf8_lossy(&bytes).into_owned())),
                Ok(_) => None,
                Err(e) => Some(Err(e)),
            })
        });

    hub.session(Arc::clone(&connection)).run(Box::pin(inbound)).await;

    if let Err(e) = writer.await {
        tracing::warn!("[Realtime] Writer task for {} failed: {}", connection.id(), e);
    }
    tracing::info!("[Realtime] Connection {} finished", connection.id());
}

async fn write_frames(
    mut sink: SplitSink<WebSocket, Message>,
    outbound: mpsc::Receiver<Arc<str>>,
    connection: Arc<Connection>,
) {
    let mut outbound = ReceiverStream::new(outbound);
    loop {
        tokio::select! {
            biased;
            _ = connection.closed() => break,
            frame = outbound.next() => match frame {
                Some(frame) => {
                    if let Err(e) = sink.send(Message::Text(frame.to_string().into())).await {
                        tracing::info!("[Realtime] Write to {} failed: {}", connection.id(), e);
                        connection.close();
                        return;
                    }
                }
                None => break,
            },
        }
    }
    let _ = sink.send(Message::Close(None)).await;
    let _ = sink.close().await;
}
