//! Bridge error types

use thiserror::Error;

/// Errors raised while wiring intents between the host and native code
#[derive(Error, Debug)]
pub enum BridgeError {
    /// Configuration could not be parsed
    #[error("Invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// Configuration could not be serialized
    #[error("Failed to serialize configuration: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    /// Reading or writing a file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The activity already holds a live receiver registration
    #[error("Receiver already registered")]
    AlreadyRegistered,

    /// The bus does not know the given subscription
    #[error("Unknown subscription")]
    UnknownSubscription,

    /// The host platform rejected a call
    #[error("Host platform error: {0}")]
    Host(String),

    /// Operation not available on this platform
    #[error("Not supported: {0}")]
    Unsupported(String),
}

/// Result type for bridge operations
pub type Result<T> = std::result::Result<T, BridgeError>;
