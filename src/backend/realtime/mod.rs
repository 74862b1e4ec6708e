//! Real-time Notification Module
//!
//! The notification gateway: persistent per-user WebSocket connections and
//! the fan-out of notification events to them.
//!
//! # Module Structure
//!
//! ```text
//! realtime/
//! ├── mod.rs          - Module exports and documentation
//! ├── registry.rs     - Connection table and per-user group index
//! ├── connection.rs   - Per-connection state machine
//! └── subscription.rs - WebSocket upgrade handler and connection task
//! ```
//!
//! # Delivery
//!
//! Best-effort and at-most-once. A notification for a user without open
//! connections is dropped; nothing is persisted or retried. Each connection
//! queues at most `OUTBOUND_BUFFER` frames; a connection that stops reading
//! misses notifications beyond that while the rest of its group still gets
//! them.
//!
//! # Example
//!
//! ```rust
//! use social_media_api::backend::realtime::NotificationRegistry;
//! use social_media_api::shared::NotificationEvent;
//!
//! let registry = NotificationRegistry::new();
//!
//! // Fire-and-forget, whether or not user 7 is online
//! registry.notify(7, serde_json::json!({"x": 1}));
//! registry.dispatch(NotificationEvent::like(7, "alice", 3));
//! ```

/// Connection registry
pub mod registry;

/// Connection lifecycle
pub mod connection;

/// WebSocket subscription handler
pub mod subscription;

// Re-export commonly used types and functions
pub use registry::{
    outbound_channel, ConnectionId, ConnectionReceiver, ConnectionSender, NotificationRegistry,
    Outbound, QueueRejection, OUTBOUND_BUFFER,
};
pub use connection::{Connection, ConnectionState};
pub use subscription::handle_notification_subscription;
