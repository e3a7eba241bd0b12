//! Registry engine
//!
//! This module contains the in-memory subscription registry responsible for:
//! - maintaining the forward (order -> subscribers) and reverse
//!   (subscriber -> orders) indices
//! - publishing status updates to every subscriber of an order
//! - broadcasting announcements to every live connection
//! - cleaning up all subscriptions when a connection goes away
//!
//! Concurrency and usage notes:
//! - The public API here is synchronous and designed to be held behind a
//!   lock (for example `Arc<Mutex<Registry>>`) by the transport layer.
//! - Delivery goes through each connection's unbounded channel, so a send
//!   never blocks on the network; the per-connection send loop owns the
//!   actual socket I/O. A slow client therefore cannot stall registry
//!   mutations for unrelated orders or connections.
//! - The two indices are private. Every mutation keeps them mutually
//!   consistent: a handle is in `orders[o]` if and only if `o` is in
//!   `subscriptions[handle]`.

use std::collections::{HashMap, HashSet};

use tracing::{debug, info, warn};
use tungstenite::protocol::Message as WsMessage;

use crate::client::Subscriber;
use crate::registry::update::{Announcement, OrderStatus, StatusUpdate};

/// Identifier of one live client connection, assigned by the transport layer.
pub type SubscriberId = String;

/// Order identifier used as the broadcast routing key. Opaque to the
/// registry; never validated against any order store.
pub type OrderId = String;

/// Tracks which connections are interested in which orders and delivers
/// updates to them.
///
/// The registry owns three maps: the forward index from order to subscriber
/// set, the reverse index from subscriber to order set (used solely to make
/// disconnect cleanup proportional to that handle's subscriptions), and the
/// table of live connections used for delivery. All state is process-lifetime
/// only; clients re-subscribe after reconnecting.
#[derive(Debug, Default)]
pub struct Registry {
    orders: HashMap<OrderId, HashSet<SubscriberId>>,
    subscriptions: HashMap<SubscriberId, HashSet<OrderId>>,
    connections: HashMap<SubscriberId, Subscriber>,
}

impl Registry {
    /// Creates a new, empty registry.
    pub fn new() -> Self {
        Self {
            orders: HashMap::new(),
            subscriptions: HashMap::new(),
            connections: HashMap::new(),
        }
    }

    /// Registers a newly connected subscriber so updates can be delivered to
    /// it. Called by the transport layer once per accepted connection.
    pub fn register(&mut self, subscriber: Subscriber) {
        self.connections.insert(subscriber.id.clone(), subscriber);
    }

    /// Subscribes a connection to an order. Idempotent; creates either index
    /// entry on first use and never fails.
    pub fn subscribe(&mut self, order_id: &str, handle: SubscriberId) {
        self.orders
            .entry(order_id.to_string())
            .or_default()
            .insert(handle.clone());
        self.subscriptions
            .entry(handle)
            .or_default()
            .insert(order_id.to_string());
    }

    /// Unsubscribes a connection from an order. Removing a pairing that does
    /// not exist is a no-op, not an error.
    ///
    /// Emptied index entries are dropped rather than kept as empty sets, so
    /// memory stays bounded under order churn.
    pub fn unsubscribe(&mut self, order_id: &str, handle: &SubscriberId) {
        if let Some(subscribers) = self.orders.get_mut(order_id) {
            subscribers.remove(handle);
            if subscribers.is_empty() {
                self.orders.remove(order_id);
            }
        }
        if let Some(orders) = self.subscriptions.get_mut(handle) {
            orders.remove(order_id);
            if orders.is_empty() {
                self.subscriptions.remove(handle);
            }
        }
    }

    /// Tears down everything the registry knows about a connection: its
    /// delivery handle and every subscription it held, pruning orders whose
    /// last subscriber just left.
    ///
    /// Safe to call for a handle that never subscribed to anything, and safe
    /// to call twice.
    pub fn disconnect(&mut self, handle: &SubscriberId) {
        self.connections.remove(handle);

        if let Some(orders) = self.subscriptions.remove(handle) {
            for order_id in &orders {
                if let Some(subscribers) = self.orders.get_mut(order_id) {
                    subscribers.remove(handle);
                    if subscribers.is_empty() {
                        self.orders.remove(order_id);
                    }
                }
                debug!("unsubscribed {handle} from order {order_id}");
            }
            info!("cleaned up subscriber {handle}");
        }
    }

    /// Number of connections currently subscribed to an order, zero if the
    /// order is unknown. Observability only; nothing routes on this.
    pub fn subscriber_count(&self, order_id: &str) -> usize {
        self.orders.get(order_id).map_or(0, HashSet::len)
    }

    /// Number of orders a connection is currently subscribed to.
    pub fn subscription_count(&self, handle: &SubscriberId) -> usize {
        self.subscriptions.get(handle).map_or(0, HashSet::len)
    }

    /// Whether the given pairing is present in the forward index.
    pub fn is_subscribed(&self, order_id: &str, handle: &SubscriberId) -> bool {
        self.orders
            .get(order_id)
            .is_some_and(|subscribers| subscribers.contains(handle))
    }

    /// Number of orders with at least one subscriber.
    pub fn order_count(&self) -> usize {
        self.orders.len()
    }

    /// Number of live connections.
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// Publishes a status update for an order to every subscribed connection.
    ///
    /// The timestamp is stamped here, once, so all recipients see the same
    /// instant, and the update is serialized once before fan-out. Failure to
    /// deliver to one connection is logged and does not affect delivery to
    /// the rest, nor the caller.
    pub fn publish(&self, order_id: &str, status: OrderStatus, payload: String) {
        let update = StatusUpdate {
            order_id: order_id.to_string(),
            status,
            payload,
            timestamp: chrono::Utc::now().timestamp_millis(),
        };

        let Some(subscribers) = self.orders.get(order_id) else {
            debug!("no subscribers for order '{order_id}'");
            return;
        };

        let text = match serde_json::to_string(&update) {
            Ok(json) => json,
            Err(e) => {
                warn!("failed to serialize update for order '{order_id}': {e}");
                return;
            }
        };
        let ws_msg = WsMessage::text(text);

        for handle in subscribers {
            self.deliver_to(handle, ws_msg.clone());
        }
    }

    /// Sends an announcement to every live connection, subscribed or not.
    ///
    /// This is the "all connections" channel; it iterates the connection
    /// table, not the order index.
    pub fn publish_broadcast(&self, payload: String) {
        let announcement = Announcement {
            payload,
            timestamp: chrono::Utc::now().timestamp_millis(),
        };

        let text = match serde_json::to_string(&announcement) {
            Ok(json) => json,
            Err(e) => {
                warn!("failed to serialize announcement: {e}");
                return;
            }
        };
        let ws_msg = WsMessage::text(text);

        for handle in self.connections.keys() {
            self.deliver_to(handle, ws_msg.clone());
        }
    }

    /// Pushes one message onto a connection's outbound channel. Fire and
    /// forget: failures are logged, never propagated.
    fn deliver_to(&self, handle: &SubscriberId, msg: WsMessage) {
        match self.connections.get(handle) {
            Some(subscriber) => {
                if let Err(e) = subscriber.sender.send(msg) {
                    warn!("failed to deliver to {handle}: {e}");
                }
            }
            None => warn!("no live connection for subscriber {handle}"),
        }
    }
}
