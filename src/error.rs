//! Error types for Voice Assist.
//!
//! There is no fatal error class inside the core: every failure degrades to
//! one missing signal rather than aborting the session.

/// Top-level error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("Publish error: {0}")]
    Publish(#[from] PublishError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Session worker errors.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Session queue is closed")]
    QueueClosed,
}

/// Event publishing errors. Callers log these and move on — publishing is
/// at-most-once with no retry.
#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    #[error("Failed to serialize event: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Sink error: {0}")]
    Sink(String),
}

/// Result type alias for the crate.
pub type Result<T> = std::result::Result<T, Error>;
