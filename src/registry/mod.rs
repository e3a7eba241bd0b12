//! The `registry` module is the core of the relay: it tracks which live
//! connections are interested in which orders and fans status updates out to
//! them.
//!
//! Both halves of the order/connection mapping live behind the single
//! [`Registry`] type so that callers can never update one index without the
//! other.

pub mod engine;
pub mod update;

pub use engine::{OrderId, Registry, SubscriberId};
pub use update::{Announcement, OrderStatus, StatusUpdate};
