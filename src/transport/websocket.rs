//! WebSocket transport
//!
//! This file implements a minimal WebSocket server that translates protocol
//! JSON messages into registry operations. Responsibilities:
//! - Accept TCP/WebSocket connections
//! - Create a `Subscriber` for each connection and register it with the
//!   `Registry`
//! - Serialize/deserialize JSON messages and forward them to the registry
//! - Run registry cleanup when a connection goes away, whether the socket
//!   closed or the send loop failed

use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpListener;
use tokio::spawn;
use tokio::sync::mpsc;
use tokio_tungstenite::accept_async;
use tungstenite::protocol::Message as WsMessage;
use tungstenite::protocol::frame::CloseFrame;
use tungstenite::protocol::frame::coding::CloseCode;

use std::sync::{Arc, Mutex};

use tracing::{error, info, warn};

use crate::client::Subscriber;
use crate::config::Settings;
use crate::registry::Registry;
use crate::transport::message::ClientMessage;

pub async fn start_websocket_server(
    addr: String,
    registry: Arc<Mutex<Registry>>,
    settings: Settings,
) {
    let listener = TcpListener::bind(addr.clone()).await.expect("Can't bind");

    info!("WebSocket server listening on ws://{addr}");

    while let Ok((stream, _)) = listener.accept().await {
        let registry = registry.clone();
        let settings = settings.clone();

        tokio::spawn(async move {
            let mut ws_stream = match accept_async(stream).await {
                Ok(ws) => ws,
                Err(e) => {
                    error!("WebSocket handshake error: {e}");
                    return;
                }
            };
            let (tx, mut rx) = mpsc::unbounded_channel::<WsMessage>();
            let subscriber = Subscriber::new(tx);
            let subscriber_id = subscriber.id.clone();

            // Admission and registration happen under one lock so the limit
            // cannot be overshot by concurrent handshakes.
            let accepted = {
                let mut registry = registry.lock().unwrap();
                if registry.connection_count() >= settings.relay.max_connections {
                    false
                } else {
                    registry.register(subscriber);
                    true
                }
            };

            if !accepted {
                warn!("connection limit reached, rejecting {subscriber_id}");
                let _ = ws_stream
                    .close(Some(CloseFrame {
                        code: CloseCode::Again,
                        reason: "connection limit reached".into(),
                    }))
                    .await;
                return;
            }

            let (mut ws_sender, mut ws_receiver) = ws_stream.split();

            // Disconnect is idempotent, so both loops call it unconditionally.
            // The send loop can fail while the receive loop is still reading a
            // half-closed socket; whichever side finishes last sweeps up any
            // subscriptions created in between.
            let do_cleanup = {
                let registry = registry.clone();
                let subscriber_id = subscriber_id.clone();

                move || {
                    let mut registry = registry.lock().unwrap();
                    registry.disconnect(&subscriber_id);
                }
            };

            {
                let subscriber_id = subscriber_id.clone();
                let do_cleanup = do_cleanup.clone();

                spawn(async move {
                    while let Some(msg) = rx.recv().await {
                        if let Err(e) = ws_sender.send(msg).await {
                            warn!("failed to send message to {subscriber_id}: {e}");
                            break;
                        }
                    }

                    do_cleanup();
                    info!("send loop closed for {subscriber_id}");
                });
            }

            while let Some(Ok(msg)) = ws_receiver.next().await {
                if msg.is_text() {
                    let text = msg.to_text().unwrap();

                    match serde_json::from_str::<ClientMessage>(text) {
                        Ok(ClientMessage::Subscribe { order_id }) => {
                            let mut registry = registry.lock().unwrap();
                            registry.subscribe(&order_id, subscriber_id.clone());
                            info!("{subscriber_id} subscribed to order {order_id}");
                        }

                        Ok(ClientMessage::Unsubscribe { order_id }) => {
                            let mut registry = registry.lock().unwrap();
                            registry.unsubscribe(&order_id, &subscriber_id);
                            info!("{subscriber_id} unsubscribed from order {order_id}");
                        }

                        Ok(ClientMessage::Publish {
                            order_id,
                            status,
                            payload,
                        }) => {
                            let registry = registry.lock().unwrap();
                            registry.publish(&order_id, status, payload);
                            info!("{subscriber_id} published update for order {order_id}");
                        }

                        Ok(ClientMessage::Broadcast { payload }) => {
                            let registry = registry.lock().unwrap();
                            registry.publish_broadcast(payload);
                            info!("{subscriber_id} broadcast an announcement");
                        }

                        Err(err) => {
                            warn!(
                                "invalid client message from {subscriber_id}: {err} | {}",
                                &text.chars().take(100).collect::<String>()
                            );
                        }
                    }
                }
            }

            do_cleanup();
            info!("{subscriber_id} disconnected");
        });
    }
}
