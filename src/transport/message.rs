use serde::Deserialize;

use crate::registry::OrderStatus;

/// Inbound protocol messages, tagged by `type`.
///
/// `subscribe`/`unsubscribe` manage the sending connection's interest in an
/// order. `publish` relays a status change for an order to its subscribers
/// and is expected from backend services after the change has been durably
/// recorded. `broadcast` reaches every connected client.
#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
pub enum ClientMessage {
    #[serde(rename = "subscribe")]
    Subscribe { order_id: String },

    #[serde(rename = "unsubscribe")]
    Unsubscribe { order_id: String },

    #[serde(rename = "publish")]
    Publish {
        order_id: String,
        status: OrderStatus,
        payload: String,
    },

    #[serde(rename = "broadcast")]
    Broadcast { payload: String },
}
