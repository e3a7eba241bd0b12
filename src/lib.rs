//! # OrderCast
//!
//! `ordercast` is an in-memory order status notification relay built with Rust.
//! Delivery-lifecycle events (created, confirmed, in-progress, delivered,
//! failed) are fanned out over WebSockets to clients subscribed to the
//! affected order, plus an "all connections" announcement channel for
//! dashboard-style consumers.
//!
//! ## Core Modules
//!
//! The library is structured into several modules, each with a distinct responsibility:
//!
//! - `registry`: the subscription registry and broadcaster, a bidirectional
//!   order-to-connection index with broadcast-on-update and
//!   cleanup-on-disconnect semantics.
//! - `client`: represents one live subscriber connection.
//! - `config`: handles loading and merging server configuration.
//! - `transport`: manages the WebSocket server and communication with clients.
//! - `utils`: contains shared utilities, such as logging setup.

pub mod client;
pub mod config;
pub mod registry;
pub mod transport;
pub mod utils;
