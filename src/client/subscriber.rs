//! Subscriber representation
//!
//! `Subscriber` models one connected client and holds the sending side of a
//! per-connection channel used by the registry to push updates. The receiving
//! side is drained by that connection's send loop in the transport layer.

use tokio::sync::mpsc::UnboundedSender;
use tungstenite::protocol::Message as WsMessage;
use uuid::Uuid;

use crate::registry::SubscriberId;

#[derive(Debug)]
pub struct Subscriber {
    pub id: SubscriberId,
    pub sender: UnboundedSender<WsMessage>,
}

impl Subscriber {
    /// Create a new subscriber with a sender channel. The `id` is a UUID
    /// used to identify the connection across registry operations.
    pub fn new(sender: UnboundedSender<WsMessage>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            sender,
        }
    }
}
