//! Error types for the PitchView store abstraction.

use thiserror::Error;

/// Errors that can occur while talking to a pitch record store.
#[derive(Debug, Error)]
pub enum EnvError {
    /// The store rejected or failed the query
    #[error("Store error: {0}")]
    Store(String),

    /// Reading the backing file failed
    #[error("IO error: {0}")]
    Io(String),

    /// Records could not be decoded from the store's wire format
    #[error("Decode error: {0}")]
    Decode(String),

    /// The process-wide store handle was installed twice
    #[error("Store handle already initialized")]
    AlreadyInitialized,

    /// The process-wide store handle was read before installation
    #[error("Store handle not initialized")]
    NotInitialized,
}

impl EnvError {
    /// Creates a store error.
    pub fn store(msg: impl Into<String>) -> Self {
        Self::Store(msg.into())
    }

    /// Creates a decode error.
    pub fn decode(msg: impl std::fmt::Display) -> Self {
        Self::Decode(msg.to_string())
    }
}

impl From<std::io::Error> for EnvError {
    fn from(e: std::io::Error) -> Self {
        EnvError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for EnvError {
    fn from(e: serde_json::Error) -> Self {
        EnvError::Decode(e.to_string())
    }
}
