use serde::Deserialize;

/// Top-level configuration settings for the application.
///
/// Includes settings for both the server and the relay.
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub relay: RelaySettings,
}

/// Configuration settings for the server.
///
/// Defines the host and port the WebSocket server will bind to.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

/// Configuration settings for the relay.
///
/// Controls operational parameters like the maximum number of concurrent
/// connections.
#[derive(Debug, Deserialize, Clone)]
pub struct RelaySettings {
    pub max_connections: usize,
}

/// Partial configuration settings loaded from files or environment.
///
/// Allows partial specification of settings. Missing values can be filled
/// using defaults.
#[derive(Debug, Deserialize)]
pub struct PartialSettings {
    pub server: Option<PartialServerSettings>,
    pub relay: Option<PartialRelaySettings>,
}

/// Partial server settings.
///
/// Used when loading server configuration from external sources with optional values.
#[derive(Debug, Deserialize)]
pub struct PartialServerSettings {
    pub host: Option<String>,
    pub port: Option<u16>,
}

/// Partial relay settings.
#[derive(Debug, Deserialize)]
pub struct PartialRelaySettings {
    pub max_connections: Option<usize>,
}

/// Provides default values for `Settings`.
///
/// Ensures the application has sensible defaults if no configuration is provided.
impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerSettings {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            relay: RelaySettings {
                max_connections: 1000,
            },
        }
    }
}
