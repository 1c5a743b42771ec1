//! Client configuration.

use std::time::Duration;

/// Default SQL Browser service port.
pub const SQL_BROWSER_PORT: u16 = 1434;

/// Default upper bound on the reply datagram size, in bytes.
pub const DEFAULT_BUFFER_SIZE: usize = 4096;

/// Default receive timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(4);

/// Configuration for one Browser service query.
///
/// Only the target host is required; the remaining fields default to the
/// conventional Browser service parameters.
#[derive(Debug, Clone)]
pub struct BrowserConfig {
    /// Hostname or IP literal of the machine to query.
    pub host: String,
    /// Browser service UDP port (default: 1434).
    pub port: u16,
    /// Maximum number of reply bytes read from the socket (default: 4096).
    ///
    /// A reply longer than this is silently truncated by the receive call;
    /// that is a protocol limitation, not an error.
    pub buffer_size: usize,
    /// How long to wait for the reply datagram (default: 4s).
    pub timeout: Duration,
}

impl BrowserConfig {
    /// Create a configuration for the given host with default parameters.
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: SQL_BROWSER_PORT,
            buffer_size: DEFAULT_BUFFER_SIZE,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set the Browser service port.
    #[must_use]
    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set the maximum reply size read from the socket.
    #[must_use]
    pub fn buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size;
        self
    }

    /// Set the receive timeout.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
