/**
 * Notification Registry
 *
 * The process-wide registry of open notification connections, grouped by
 * the user they belong to. It is created once at start-up, held in
 * `AppState`, and cloned (cheaply, it is an `Arc`) into every handler and
 * connection task that needs it.
 *
 * # Layout
 *
 * - `connections` - connection table: `ConnectionId -> (group, sender)`. This
 *   owns the outbound handle of every open connection.
 * - `groups` - group index: `"user_{id}" -> {ConnectionId}`. Membership only;
 *   fan-out resolves ids through the connection table.
 *
 * Both are `DashMap`s, so group keys living in different shards never
 * contend.
 *
 * # Consistency
 *
 * - `register` inserts into the connection table before joining the group,
 *   so an id visible in a group always resolves to a live handle.
 * - `register` refuses an id that is already in the connection table, so
 *   every connection belongs to exactly one group.
 * - `unregister` leaves the group before dropping the handle.
 * - `notify` holds the read guard of the target group for the whole fan-out.
 *   A concurrent join/leave of that group waits for it, so once `unregister`
 *   returns no `notify` can still be delivering to that connection.
 *
 * No code path holds a guard on one map while taking a write guard on the
 * other.
 */

use std::collections::HashSet;
use std::sync::Arc;

use dashmap::{mapref::entry::Entry, DashMap};
use serde_json::Value;
use tokio::sync::mpsc::{
    self,
    error::{TryRecvError, TrySendError},
};
use uuid::Uuid;

use crate::backend::error::BackendError;
use crate::shared::{group_key, NotificationEvent, ServerMessage, UserId};

/// Unique identifier of one notification connection
pub type ConnectionId = Uuid;

/// Frames a connection may have queued before further notifications are dropped
pub const OUTBOUND_BUFFER: usize = 64;

/// Instruction delivered to a connection task
#[derive(Debug, Clone, PartialEq)]
pub enum Outbound {
    /// Write this frame to the socket
    Frame(ServerMessage),
    /// Close the socket and leave the registry
    Close,
}

/// Why a frame was not queued for a connection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueRejection {
    /// The connection has `OUTBOUND_BUFFER` frames waiting
    Full,
    /// The connection task has gone away
    Closed,
}

/// Sending half owned by the registry for one connection
///
/// Frames go through a bounded queue. Close requests use their own
/// single-slot queue so they still get through to a connection whose
/// frame queue is full.
#[derive(Debug, Clone)]
pub struct ConnectionSender {
    frames: mpsc::Sender<ServerMessage>,
    close: mpsc::Sender<()>,
}

/// Receiving half drained by the connection task
#[derive(Debug)]
pub struct ConnectionReceiver {
    frames: mpsc::Receiver<ServerMessage>,
    close: mpsc::Receiver<()>,
}

/// Create the outbound queue of one connection
pub fn outbound_channel() -> (ConnectionSender, ConnectionReceiver) {
    let (frames_tx, frames_rx) = mpsc::channel(OUTBOUND_BUFFER);
    let (close_tx, close_rx) = mpsc::channel(1);

    (
        ConnectionSender {
            frames: frames_tx,
            close: close_tx,
        },
        ConnectionReceiver {
            frames: frames_rx,
            close: close_rx,
        },
    )
}

impl ConnectionSender {
    /// Queue a frame without waiting
    pub fn send_frame(&self, frame: ServerMessage) -> Result<(), QueueRejection> {
        self.frames.try_send(frame).map_err(|e| match e {
            TrySendError::Full(_) => QueueRejection::Full,
            TrySendError::Closed(_) => QueueRejection::Closed,
        })
    }

    /// Ask the connection to close
    ///
    /// A close request that is already pending counts as accepted.
    pub fn request_close(&self) -> bool {
        match self.close.try_send(()) {
            Ok(()) | Err(TrySendError::Full(())) => true,
            Err(TrySendError::Closed(())) => false,
        }
    }
}

impl ConnectionReceiver {
    /// Wait for the next instruction
    ///
    /// A pending close wins over queued frames. Returns `None` once the
    /// registry has dropped the sending half.
    pub async fn recv(&mut self) -> Option<Outbound> {
        tokio::select! {
            biased;
            Some(()) = self.close.recv() => Some(Outbound::Close),
            frame = self.frames.recv() => frame.map(Outbound::Frame),
        }
    }

    /// Take the next instruction if one is ready
    pub fn try_recv(&mut self) -> Result<Outbound, TryRecvError> {
        if self.close.try_recv().is_ok() {
            return Ok(Outbound::Close);
        }
        self.frames.try_recv().map(Outbound::Frame)
    }
}

/// Entry of the connection table
#[derive(Debug)]
struct ConnectionEntry {
    group: String,
    sender: ConnectionSender,
}

#[derive(Debug, Default)]
struct RegistryInner {
    connections: DashMap<ConnectionId, ConnectionEntry>,
    groups: DashMap<String, HashSet<ConnectionId>>,
}

/// Shared registry of open connections grouped by user
///
/// # Example
///
/// ```rust
/// use social_media_api::backend::realtime::{outbound_channel, NotificationRegistry};
///
/// let registry = NotificationRegistry::new();
/// let (tx, mut rx) = outbound_channel();
/// let connection_id = uuid::Uuid::new_v4();
///
/// registry.register(connection_id, 42, tx).unwrap();
/// registry.notify(42, serde_json::json!({"x": 1}));
/// assert!(rx.try_recv().is_ok());
///
/// registry.unregister(connection_id);
/// assert_eq!(registry.group_size(42), 0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct NotificationRegistry {
    inner: Arc<RegistryInner>,
}

impl NotificationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a connection to the group of `user_id`
    ///
    /// Returns the group key the connection joined.
    ///
    /// # Errors
    ///
    /// Fails when `connection_id` is already registered; its existing entry
    /// and group membership are left untouched.
    pub fn register(
        &self,
        connection_id: ConnectionId,
        user_id: UserId,
        sender: ConnectionSender,
    ) -> Result<String, BackendError> {
        let group = group_key(user_id);

        match self.inner.connections.entry(connection_id) {
            Entry::Occupied(existing) => {
                tracing::warn!(
                    connection_id = %connection_id,
                    group = %existing.get().group,
                    "Connection id already registered"
                );
                return Err(BackendError::state(format!(
                    "connection {} is already registered",
                    connection_id
                )));
            }
            Entry::Vacant(slot) => {
                slot.insert(ConnectionEntry {
                    group: group.clone(),
                    sender,
                });
            }
        }

        let members = {
            let mut members = self.inner.groups.entry(group.clone()).or_default();
            members.insert(connection_id);
            members.len()
        };

        tracing::debug!(
            connection_id = %connection_id,
            group = %group,
            members,
            "Connection registered"
        );

        Ok(group)
    }

    /// Remove a connection from its group and from the connection table
    ///
    /// Idempotent: returns `false` when the connection was not registered.
    pub fn unregister(&self, connection_id: ConnectionId) -> bool {
        let group = match self.inner.connections.get(&connection_id) {
            Some(entry) => entry.group.clone(),
            None => return false,
        };

        if let Some(mut members) = self.inner.groups.get_mut(&group) {
            members.remove(&connection_id);
        }
        self.inner
            .groups
            .remove_if(&group, |_, members| members.is_empty());

        let removed = self.inner.connections.remove(&connection_id).is_some();

        if removed {
            tracing::debug!(
                connection_id = %connection_id,
                group = %group,
                "Connection unregistered"
            );
        }

        removed
    }

    /// Push `payload` to every open connection of `target_user_id`
    ///
    /// Fire-and-forget: nothing is queued when the user has no open
    /// connection, connections that vanish mid-delivery are skipped, and a
    /// connection whose queue is full misses this notification.
    pub fn notify(&self, target_user_id: UserId, payload: Value) {
        self.dispatch(NotificationEvent::new(target_user_id, payload));
    }

    /// Deliver a notification event to its target group
    pub fn dispatch(&self, event: NotificationEvent) {
        let group = event.group();
        let frame = event.into_message();

        let delivered = self.for_each_member(&group, |connection_id, sender| {
            match sender.send_frame(frame.clone()) {
                Ok(()) => true,
                Err(QueueRejection::Full) => {
                    tracing::warn!(
                        connection_id = %connection_id,
                        "Outbound queue full, notification dropped"
                    );
                    false
                }
                // The task is already tearing down.
                Err(QueueRejection::Closed) => {
                    tracing::debug!(connection_id = %connection_id, "Skipping closing connection");
                    false
                }
            }
        });

        if delivered == 0 {
            tracing::debug!(group = %group, "No notification delivered");
        } else {
            tracing::info!(group = %group, delivered, "Notification delivered");
        }
    }

    /// Ask one connection to close
    ///
    /// Returns `false` when the connection is not registered. The connection
    /// task leaves the registry itself once it has closed the socket.
    pub fn close_connection(&self, connection_id: ConnectionId) -> bool {
        match self.inner.connections.get(&connection_id) {
            Some(entry) => entry.sender.request_close(),
            None => false,
        }
    }

    /// Ask every open connection of `user_id` to close
    pub fn close_user(&self, user_id: UserId) -> usize {
        self.for_each_member(&group_key(user_id), |_, sender| sender.request_close())
    }

    /// Ask every open connection to close (server shutdown)
    pub fn close_all(&self) -> usize {
        let closed = self
            .inner
            .connections
            .iter()
            .filter(|entry| entry.sender.request_close())
            .count();

        tracing::info!(closed, "Closing all notification connections");
        closed
    }

    /// Number of connections currently in the group of `user_id`
    pub fn group_size(&self, user_id: UserId) -> usize {
        self.inner
            .groups
            .get(&group_key(user_id))
            .map(|members| members.len())
            .unwrap_or(0)
    }

    /// Number of open connections across all groups
    pub fn connection_count(&self) -> usize {
        self.inner.connections.len()
    }

    /// Number of non-empty groups
    pub fn group_count(&self) -> usize {
        self.inner.groups.len()
    }

    /// Whether `connection_id` is currently registered
    pub fn is_registered(&self, connection_id: ConnectionId) -> bool {
        self.inner.connections.contains_key(&connection_id)
    }

    /// Run `send` for every member of `group`, returning how many accepted
    fn for_each_member<F>(&self, group: &str, send: F) -> usize
    where
        F: Fn(&ConnectionId, &ConnectionSender) -> bool,
    {
        let Some(members) = self.inner.groups.get(group) else {
            return 0;
        };

        members
            .iter()
            .filter(|connection_id| {
                self.inner
                    .connections
                    .get(*connection_id)
                    .is_some_and(|entry| send(*connection_id, &entry.sender))
            })
            .count()
    }
}
