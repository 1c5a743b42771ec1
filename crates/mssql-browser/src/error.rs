//! Client error types.

use std::time::Duration;

use thiserror::Error;

/// Errors that can occur during a Browser service query.
#[derive(Debug, Error)]
pub enum Error {
    /// Socket or transport-level failure (creation, resolution, send).
    #[error("network error: {0}")]
    Network(#[from] std::io::Error),

    /// No reply received within the configured window.
    #[error("no reply from the Browser service within {0:?}")]
    Timeout(Duration),

    /// Reply received but malformed.
    #[error("protocol error: {0}")]
    Protocol(#[from] ssrp_protocol::ProtocolError),
}

impl Error {
    /// Check if this error is transient and may succeed on retry.
    ///
    /// The client itself never retries; this classification is for callers
    /// that choose to issue another query.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Timeout(_) | Self::Network(_))
    }

    /// Check if this error indicates a malformed server reply.
    #[must_use]
    pub fn is_protocol_error(&self) -> bool {
        matches!(self, Self::Protocol(_))
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, Error>;
