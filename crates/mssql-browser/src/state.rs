//! Query exchange state.
//!
//! A Browser query is a fixed three-state exchange with no retries and no
//! re-entry:
//!
//! ```text
//! Idle -> AwaitingReply (via send)
//! AwaitingReply -> Done (reply received and decoded)
//! AwaitingReply -> Failed (timeout, socket error, or decode error)
//! ```
//!
//! The state is tracked at runtime on [`QueryExchange`](crate::QueryExchange)
//! so the timeout and cleanup paths can be observed and tested independently
//! of the happy path.

/// State of a single request/response exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryState {
    /// Request not yet sent.
    Idle,
    /// Request sent, waiting for the reply datagram.
    AwaitingReply,
    /// Reply received and decoded.
    Done,
    /// Exchange aborted by timeout, socket error, or decode error.
    Failed,
}

impl Default for QueryState {
    fn default() -> Self {
        Self::Idle
    }
}

impl QueryState {
    /// Check if the exchange is waiting on the server.
    #[must_use]
    pub fn is_awaiting_reply(&self) -> bool {
        matches!(self, Self::AwaitingReply)
    }

    /// Check if the exchange has finished, successfully or not.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predicates() {
        assert!(!QueryState::Idle.is_terminal());
        assert!(QueryState::AwaitingReply.is_awaiting_reply());
        assert!(QueryState::Done.is_terminal());
        assert!(QueryState::Failed.is_terminal());
    }

    #[test]
    fn test_default_is_idle() {
        assert_eq!(QueryState::default(), QueryState::Idle);
    }
}
