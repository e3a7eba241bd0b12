//! The `client` module defines the representation of a subscriber in the
//! relay.
//!
//! It provides the `Subscriber` struct, which encapsulates the state of a
//! single connected client: its unique identifier and the channel used to
//! push updates to it.

pub mod subscriber;
pub use subscriber::Subscriber;
