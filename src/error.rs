//! Error types for link building
//!
//! Builders and the primary-link resolver return these; the public generation
//! functions never do. The selector layer turns them into the fallback URI
//! (single link) or drops the client (bulk links):
//! - **MissingCredential**: the protocol's required credential is absent or empty.
//! - **UnsupportedProtocol**: no builder exists for the inbound's protocol.
//! - **JsonError**: the vmess payload could not be serialized.

use std::fmt;

/// Result type for link building operations
pub type Result<T> = std::result::Result<T, LinkError>;

/// Errors that can occur while rendering a share link
#[derive(Debug, Clone, PartialEq)]
pub enum LinkError {
    /// Required credential (id or password) is missing
    MissingCredential(String),
    /// No builder for this protocol
    UnsupportedProtocol(String),
    /// JSON serialization error (vmess payload)
    JsonError(String),
}

impl fmt::Display for LinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkError::MissingCredential(msg) => write!(f, "Missing credential: {}", msg),
            LinkError::UnsupportedProtocol(msg) => write!(f, "Unsupported protocol: {}", msg),
            LinkError::JsonError(msg) => write!(f, "JSON error: {}", msg),
        }
    }
}

impl std::error::Error for LinkError {}

impl From<serde_json::Error> for LinkError {
    fn from(err: serde_json::Error) -> Self {
        LinkError::JsonError(err.to_string())
    }
}
