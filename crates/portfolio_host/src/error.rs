//! Error type shared by every host service.

use thiserror::Error;

/// Errors surfaced by host adapters and the typed JSON storage helpers.
#[derive(Debug, Error)]
pub enum HostError {
    /// The browser API backing a service does not exist in the current environment.
    #[error("host api unavailable: {0}")]
    Unavailable(&'static str),
    /// The browser API rejected a read, write, or navigation.
    #[error("host api failure: {0}")]
    Backend(String),
    /// A stored blob could not be converted to or from JSON.
    #[error("storage payload is not valid json: {0}")]
    Json(#[from] serde_json::Error),
}
