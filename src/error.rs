//! Error types for simbridge.
//!
//! All failures are strongly typed with thiserror so callers can match on
//! the specific condition instead of string-splitting messages.

use thiserror::Error;

/// Failures reported by the host game's own capabilities.
#[derive(Debug, Error)]
pub enum HostError {
    #[error("host failed to serialize the live game: {reason}")]
    Serialize { reason: String },

    #[error("host does not know gamemode '{id}'")]
    UnknownGamemode { id: String },
}

/// Crate-wide error taxonomy.
#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Host(#[from] HostError),

    #[error("malformed save envelope: {reason}")]
    MalformedSave { reason: String },

    #[error("failed to decode canonical save (format v{version}): {source}")]
    Decode {
        version: u32,
        source: serde_json::Error,
    },

    #[error("failed to fetch static rule data: {reason}")]
    Rules { reason: String },

    #[error("content section '{section}' in package '{namespace}' is invalid: {source}")]
    Content {
        section: String,
        namespace: String,
        source: serde_json::Error,
    },

    #[error("failed to serialize settings: {0}")]
    Settings(#[from] serde_json::Error),
}
