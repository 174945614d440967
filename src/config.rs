//! Configuration types.

use crate::error::ConfigError;

/// Voice agent configuration.
#[derive(Debug, Clone)]
pub struct VoiceConfig {
    /// Port for the UI-facing WebSocket server.
    pub ws_port: u16,
    /// Per-session turn queue capacity (backpressure threshold).
    pub session_queue_capacity: usize,
    /// Broadcast fan-out capacity for the event publisher.
    pub broadcast_capacity: usize,
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            ws_port: 8080,
            session_queue_capacity: 64,
            broadcast_capacity: 256,
        }
    }
}

impl VoiceConfig {
    /// Build a config from `VOICE_ASSIST_*` environment variables, falling
    /// back to defaults for unset values.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Ok(port) = std::env::var("VOICE_ASSIST_WS_PORT") {
            config.ws_port = port.parse().map_err(|_| ConfigError::InvalidValue {
                key: "VOICE_ASSIST_WS_PORT".into(),
                message: format!("not a valid port: {port}"),
            })?;
        }
        if let Ok(capacity) = std::env::var("VOICE_ASSIST_QUEUE_CAPACITY") {
            config.session_queue_capacity =
                capacity.parse().map_err(|_| ConfigError::InvalidValue {
                    key: "VOICE_ASSIST_QUEUE_CAPACITY".into(),
                    message: format!("not a valid capacity: {capacity}"),
                })?;
        }
        Ok(config)
    }
}
