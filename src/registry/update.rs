use serde::{Deserialize, Serialize};

/// Lifecycle states an order moves through while it is being fulfilled.
///
/// Serialized in snake_case, so clients see e.g. `"in_progress"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Created,
    Confirmed,
    InProgress,
    Delivered,
    Failed,
}

/// A status change for a single order, as delivered to subscribers.
///
/// The record consists of the order identifier used for routing, the new
/// status, an opaque payload (usually a JSON-encoded string produced by the
/// system that recorded the change), and a timestamp.
///
/// The timestamp is milliseconds since the UNIX epoch and is stamped once by
/// the registry when the update is published, so every recipient of the same
/// update observes the same instant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub order_id: String,
    pub status: OrderStatus,
    pub payload: String,
    pub timestamp: i64,
}

/// A system-wide announcement sent to every connected client regardless of
/// subscription, e.g. "new order created" for an operations dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Announcement {
    pub payload: String,
    pub timestamp: i64,
}
