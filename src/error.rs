//! Error types for Fin Assist.
//!
//! Scripted "errors" (a missing required form field) are in-band chat
//! messages, never `Err`. These types cover real programmatic failures:
//! unroutable triggers, bad configuration, storage problems.

/// Top-level error type for the crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Journey error: {0}")]
    Journey(#[from] JourneyError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),
}

/// Trigger-dispatch errors.
#[derive(Debug, thiserror::Error)]
pub enum JourneyError {
    #[error("No handler registered for action id {id:?}")]
    UnknownAction { id: String },

    #[error("Unknown journey id {id:?}")]
    UnknownJourney { id: String },

    #[error("Action id {id:?} is already registered to journey {journey}")]
    DuplicateAction { id: String, journey: String },
}

/// Storage-port errors.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Backend error: {0}")]
    Backend(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for the crate.
pub type Result<T> = std::result::Result<T, Error>;
