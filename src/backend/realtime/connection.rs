/**
 * Notification Connection
 *
 * Per-connection state of the notification gateway and the lifecycle
 * operations that act on it:
 *
 * ```text
 *             connect (identity)        disconnect
 *   Pending ─────────────────────► Open ───────────► Closed
 *      │                                               ▲
 *      └──────── connect (anonymous) / disconnect ─────┘
 * ```
 *
 * A `Connection` is owned by the task serving its socket. Nothing about it
 * is shared except the registry entry created by `connect`.
 */

use uuid::Uuid;

use crate::backend::error::BackendError;
use crate::backend::realtime::registry::{ConnectionId, ConnectionSender, NotificationRegistry};
use crate::shared::{ClientMessage, ServerMessage, UserId};

/// Lifecycle state of a connection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// Handshake received, not yet registered
    Pending,
    /// Authenticated and registered in its user's group
    Open,
    /// Terminal
    Closed,
}

/// One client's notification connection
#[derive(Debug)]
pub struct Connection {
    id: ConnectionId,
    user_id: Option<UserId>,
    group: Option<String>,
    state: ConnectionState,
}

impl Connection {
    /// Start a handshake for a caller whose identity was resolved upstream
    pub fn pending(user_id: Option<UserId>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            group: None,
            state: ConnectionState::Pending,
        }
    }

    pub fn id(&self) -> ConnectionId {
        self.id
    }

    pub fn user_id(&self) -> Option<UserId> {
        self.user_id
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Group joined on connect, if the connection ever opened
    pub fn group(&self) -> Option<&str> {
        self.group.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user_id.is_some()
    }

    /// Complete the handshake
    ///
    /// An anonymous caller is refused: the connection goes straight to
    /// `Closed` and nothing is registered. Otherwise the connection joins the
    /// group of its user and becomes `Open`.
    pub fn connect(
        &mut self,
        registry: &NotificationRegistry,
        sender: ConnectionSender,
    ) -> Result<&str, BackendError> {
        if self.state != ConnectionState::Pending {
            return Err(BackendError::state(format!(
                "connection {} cannot connect from {:?}",
                self.id, self.state
            )));
        }

        let Some(user_id) = self.user_id else {
            self.state = ConnectionState::Closed;
            tracing::warn!(connection_id = %self.id, "Rejected unauthenticated notification handshake");
            return Err(BackendError::HandshakeRejected);
        };

        let group = registry.register(self.id, user_id, sender)?;
        self.state = ConnectionState::Open;

        tracing::info!(
            connection_id = %self.id,
            user_id = %user_id,
            group = %group,
            "Notification connection open"
        );

        Ok(self.group.insert(group).as_str())
    }

    /// Refuse the handshake without ever registering
    pub fn reject(&mut self) {
        if self.state == ConnectionState::Pending {
            self.state = ConnectionState::Closed;
        }
    }

    /// Handle an inbound text frame
    ///
    /// Returns the echo for the same connection, or `None` when the
    /// connection is not open.
    pub fn receive(&self, text: &str) -> Option<ServerMessage> {
        if self.state != ConnectionState::Open {
            return None;
        }

        let inbound = ClientMessage::parse(text);
        tracing::debug!(connection_id = %self.id, "Echoing inbound message");
        Some(inbound.into())
    }

    /// Handle a notification routed to this connection by the registry
    ///
    /// Returns the frame to write, or `None` when the connection is no
    /// longer open (the frame raced with a disconnect and is dropped).
    pub fn push(&self, frame: ServerMessage) -> Option<ServerMessage> {
        if self.state != ConnectionState::Open {
            tracing::debug!(connection_id = %self.id, "Dropping notification for closed connection");
            return None;
        }
        Some(frame)
    }

    /// Leave the registry and become `Closed`
    ///
    /// Idempotent; a connection that never opened has nothing to release.
    pub fn disconnect(&mut self, registry: &NotificationRegistry) {
        match self.state {
            ConnectionState::Open => {
                registry.unregister(self.id);
                self.state = ConnectionState::Closed;
                tracing::info!(
                    connection_id = %self.id,
                    group = self.group.as_deref().unwrap_or_default(),
                    "Notification connection closed"
                );
            }
            ConnectionState::Pending => self.state = ConnectionState::Closed,
            ConnectionState::Closed => {}
        }
    }
}
