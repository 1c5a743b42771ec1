//! SSRP protocol error types.

use thiserror::Error;

/// Errors that can occur while encoding requests or decoding responses.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// Reply ended before the 3-byte SVR_RESP header.
    #[error("incomplete response: expected at least {expected} bytes, got {actual}")]
    IncompleteResponse {
        /// Minimum number of bytes required.
        expected: usize,
        /// Number of bytes actually available.
        actual: usize,
    },

    /// Response body was not valid text for the protocol's encoding.
    #[error("response body is not valid text")]
    InvalidText,

    /// Instance name cannot be carried in a CLNT_UCAST_INST request.
    #[error("invalid instance name: {reason}")]
    InvalidInstanceName {
        /// Why the name was rejected.
        reason: &'static str,
    },
}
