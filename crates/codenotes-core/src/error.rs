//! Error types for codenotes-core

use thiserror::Error;

/// Result type alias using codenotes-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in codenotes-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Key/value store error
    #[error("Store error: {0}")]
    Store(String),

    /// Document could not be opened
    #[error("File not found: {0}")]
    NotFound(String),

    /// A `goToLine` request without a usable file or line
    #[error("Invalid navigation target: {0}")]
    InvalidNavigation(String),

    /// Command id that was never registered
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    /// Operation needs an open panel
    #[error("Notes panel is not open")]
    PanelClosed,
}
