//! # Error Types
//!
//! Custom error types for Pad Bridge using `thiserror`.

use thiserror::Error;

use crate::device::PlayerId;

/// Main error type for Pad Bridge
#[derive(Debug, Error)]
pub enum PadBridgeError {
    /// Line is not a well-formed command (bad JSON, bad field types, missing player id)
    #[error("malformed command: {0}")]
    MalformedCommand(String),

    /// Button name has no entry in the translation table
    #[error("unknown button: {0}")]
    UnknownButton(String),

    /// Command carries an action this bridge does not handle
    #[error("unknown action: {0}")]
    UnknownAction(String),

    /// The OS device for one player could not be created or written
    #[error("device backend unavailable for {player}: {source}")]
    DeviceBackendUnavailable {
        player: PlayerId,
        #[source]
        source: std::io::Error,
    },

    /// A new player would exceed the configured device limit
    #[error("cannot create device for {player}: limit of {limit} players reached")]
    PlayerLimitReached { player: PlayerId, limit: usize },

    /// The inbound command stream itself failed
    #[error("failed to read command stream: {0}")]
    StreamReadFailure(#[source] std::io::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for Pad Bridge
pub type Result<T> = std::result::Result<T, PadBridgeError>;
