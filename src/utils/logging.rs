use std::str::FromStr;

use tracing::Level;

/// Initialize tracing/logging for the application.
///
/// `default_level` is parsed leniently; anything unrecognized falls back
/// to INFO.
pub fn init(default_level: &str) {
    let lvl = Level::from_str(default_level).unwrap_or(Level::INFO);

    // Use try_init so tests and libraries can call this multiple times without panicking
    let _ = tracing_subscriber::fmt()
        .with_max_level(lvl)
        .with_target(false)
        .try_init();
}
