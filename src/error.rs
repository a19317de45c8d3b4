//! Error types for the Jira client.
//!
//! Every public operation surfaces one of these variants as a `Result`;
//! nothing is caught and logged away. All error types use `thiserror` for
//! ergonomic error handling.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when interacting with the Jira API.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid construction arguments (empty root URL or credential).
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Network, DNS, or TLS failure before any response was received.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a non-2xx status.
    #[error("Jira returned HTTP {status}: {body}")]
    Remote {
        /// The HTTP status code.
        status: u16,
        /// The response body, if any.
        body: String,
    },

    /// A 2xx response was missing an expected field.
    #[error("Malformed Jira response: {0}")]
    MalformedResponse(String),

    /// A local attachment file could not be read.
    #[error("Cannot read attachment {path}: {source}")]
    AttachmentIo {
        /// The file that could not be read.
        path: PathBuf,
        /// The underlying IO error.
        source: std::io::Error,
    },
}

/// Result type for Jira client operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// The HTTP status code, if this error came from a service response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether this error was reported by the remote service (as opposed to
    /// failing locally or on the wire).
    pub fn is_remote(&self) -> bool {
        matches!(self, Error::Remote { .. })
    }
}
