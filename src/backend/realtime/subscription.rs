/**
 * Notification Subscription Handler
 *
 * WebSocket endpoint through which clients receive their notifications.
 *
 * # Handshake
 *
 * The caller's identity is resolved by the identity middleware from either
 * `Authorization: Bearer <token>` or `?token=<token>`. Anonymous callers get
 * `403 Forbidden` instead of an upgrade; nothing is registered for them.
 *
 * # Connection Task
 *
 * Each upgraded socket is served by one task that waits on two sources at
 * once:
 *
 * - inbound frames from the client (`{"message": ..}`, echoed back)
 * - outbound instructions from the registry (notifications, close requests)
 *
 * Whatever ends the loop (client close, transport error, server-requested
 * close), the connection leaves the registry before the task returns.
 */

use axum::{
    extract::{
        ws::{close_code, CloseFrame, Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::{IntoResponse, Response},
};
use futures_util::{stream::SplitSink, SinkExt, StreamExt};

use crate::backend::error::BackendError;
use crate::backend::middleware::Identity;
use crate::backend::realtime::connection::Connection;
use crate::backend::realtime::registry::{outbound_channel, NotificationRegistry, Outbound};
use crate::shared::ServerMessage;

/// Handle a notification subscription (GET /ws/notifications/)
///
/// # Errors
///
/// * `403 Forbidden` - The request carries no valid token
///
/// # Example Request
///
/// ```http
/// GET /ws/notifications/?token=eyJhbGciOi... HTTP/1.1
/// Connection: Upgrade
/// Upgrade: websocket
/// ```
///
/// # Example Frames
///
/// ```text
/// -> {"message": "hi"}
/// <- {"message": "hi"}
/// <- {"notification": {"type": "like", "user": "alice", "post": 3, ...}}
/// ```
pub async fn handle_notification_subscription(
    State(registry): State<NotificationRegistry>,
    identity: Identity,
    ws: WebSocketUpgrade,
) -> Response {
    let mut connection = Connection::pending(identity.user_id());

    if !connection.is_authenticated() {
        connection.reject();
        tracing::warn!("[Notifications] Refusing handshake without an authenticated identity");
        return BackendError::HandshakeRejected.into_response();
    }

    tracing::info!(
        connection_id = %connection.id(),
        user = identity.username().unwrap_or_default(),
        "[Notifications] Upgrading connection"
    );

    ws.on_failed_upgrade(|e| {
        tracing::warn!("[Notifications] WebSocket upgrade failed: {}", e);
    })
    .on_upgrade(move |socket| run_connection(socket, connection, registry))
}

/// Serve one upgraded socket until it closes
pub async fn run_connection(
    socket: WebSocket,
    mut connection: Connection,
    registry: NotificationRegistry,
) {
    let (mut sink, mut stream) = socket.split();
    let (tx, mut rx) = outbound_channel();

    let connected = connection.connect(&registry, tx).map(|_| ());
    if let Err(e) = connected {
        tracing::warn!(connection_id = %connection.id(), "[Notifications] Connect failed: {}", e);
        let _ = sink
            .send(Message::Close(Some(CloseFrame {
                code: close_code::POLICY,
                reason: "unauthenticated".into(),
            })))
            .await;
        return;
    }

    loop {
        tokio::select! {
            inbound = stream.next() => match inbound {
                Some(Ok(Message::Text(text))) => {
                    let Some(reply) = connection.receive(text.as_str()) else {
                        break;
                    };
                    if write_frame(&mut sink, &reply).await.is_err() {
                        break;
                    }
                }
                Some(Ok(Message::Binary(data))) => {
                    tracing::debug!(
                        connection_id = %connection.id(),
                        bytes = data.len(),
                        "[Notifications] Ignoring binary frame"
                    );
                }
                Some(Ok(Message::Close(frame))) => {
                    tracing::debug!(
                        connection_id = %connection.id(),
                        reason = ?frame,
                        "[Notifications] Client initiated close"
                    );
                    break;
                }
                // Ping/pong replies are handled by the WebSocket layer
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    tracing::warn!(
                        connection_id = %connection.id(),
                        error = %e,
                        "[Notifications] WebSocket receive error"
                    );
                    break;
                }
                None => break,
            },
            outbound = rx.recv() => match outbound {
                Some(Outbound::Frame(frame)) => {
                    let Some(frame) = connection.push(frame) else {
                        break;
                    };
                    if write_frame(&mut sink, &frame).await.is_err() {
                        break;
                    }
                }
                Some(Outbound::Close) | None => {
                    let _ = sink
                        .send(Message::Close(Some(CloseFrame {
                            code: close_code::AWAY,
                            reason: "server closing connection".into(),
                        })))
                        .await;
                    break;
                }
            },
        }
    }

    connection.disconnect(&registry);
}

/// Serialize a frame and write it as a text message
async fn write_frame(
    sink: &mut SplitSink<WebSocket, Message>,
    frame: &ServerMessage,
) -> Result<(), axum::Error> {
    let text = match serde_json::to_string(frame) {
        Ok(text) => text,
        Err(e) => {
            tracing::error!("[Notifications] Failed to serialize frame: {:?}", e);
            return Ok(());
        }
    };

    sink.send(Message::Text(text.into())).await
}
