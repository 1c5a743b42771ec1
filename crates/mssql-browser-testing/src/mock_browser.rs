//! Mock SQL Browser service for unit testing.
//!
//! This module provides a mock Browser service implementation that can be
//! used for unit testing without a reachable SQL Server host.
//!
//! ## Features
//!
//! - Canned replies for all-instances and per-instance queries
//! - Raw-bytes replies for malformed-response testing
//! - A silent mode that never replies, for timeout testing
//! - Capture of the last received request datagram
//!
//! ## Example
//!
//! ```rust,ignore
//! use mssql_browser_testing::MockBrowserServer;
//! use ssrp_protocol::InstanceRecord;
//!
//! #[tokio::test]
//! async fn test_discovery() {
//!     let mut record = InstanceRecord::new();
//!     record.insert("ServerName", "HOST1");
//!     record.insert("InstanceName", "SQLEXPRESS");
//!
//!     let server = MockBrowserServer::builder()
//!         .with_all_instances_reply(&[record])
//!         .build()
//!         .await
//!         .unwrap();
//!
//!     let addr = server.addr();
//!     // Point your client at addr...
//! }
//! ```

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

use bytes::{BufMut, Bytes, BytesMut};
use ssrp_protocol::{CLNT_UCAST_EX, CLNT_UCAST_INST, InstanceRecord, RESPONSE_HEADER_SIZE, SVR_RESP};
use thiserror::Error;
use tokio::net::UdpSocket;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

/// Error type for mock server operations.
#[derive(Debug, Error)]
pub enum MockServerError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for mock server operations.
pub type Result<T> = std::result::Result<T, MockServerError>;

/// Encode instance records into a complete SVR_RESP datagram.
///
/// Each record is rendered as `key;value` tokens joined by `;` and
/// terminated with `;;`, matching the Browser service's wire output.
#[must_use]
pub fn encode_reply(records: &[InstanceRecord]) -> Bytes {
    let mut body = String::new();
    for record in records {
        for (i, (key, value)) in record.iter().enumerate() {
            if i > 0 {
                body.push(';');
            }
            body.push_str(key);
            body.push(';');
            body.push_str(value);
        }
        body.push_str(";;");
    }

    let mut buf = BytesMut::with_capacity(RESPONSE_HEADER_SIZE + body.len());
    buf.put_u8(SVR_RESP);
    buf.put_u16_le(body.len() as u16);
    buf.put_slice(body.as_bytes());
    buf.freeze()
}

/// Mock Browser service builder.
#[derive(Debug, Default)]
pub struct MockBrowserBuilder {
    all_instances: Option<Bytes>,
    instances: HashMap<String, Bytes>,
    raw: Option<Bytes>,
    silent: bool,
}

impl MockBrowserBuilder {
    /// Set the reply for CLNT_UCAST_EX (all-instances) requests.
    #[must_use]
    pub fn with_all_instances_reply(mut self, records: &[InstanceRecord]) -> Self {
        self.all_instances = Some(encode_reply(records));
        self
    }

    /// Set the reply for a CLNT_UCAST_INST request naming `instance`.
    ///
    /// Requests for unconfigured names get no reply, like the real service.
    #[must_use]
    pub fn with_instance_reply(mut self, instance: &str, records: &[InstanceRecord]) -> Self {
        self.instances
            .insert(instance.to_string(), encode_reply(records));
        self
    }

    /// Reply to every request with these exact bytes.
    ///
    /// Takes precedence over the canned replies; useful for malformed or
    /// truncated responses.
    #[must_use]
    pub fn with_raw_reply(mut self, bytes: impl Into<Bytes>) -> Self {
        self.raw = Some(bytes.into());
        self
    }

    /// Never reply, for timeout testing.
    #[must_use]
    pub fn silent(mut self) -> Self {
        self.silent = true;
        self
    }

    /// Bind the server on an ephemeral localhost port and start serving.
    pub async fn build(self) -> Result<MockBrowserServer> {
        let socket = UdpSocket::bind("127.0.0.1:0").await?;
        let addr = socket.local_addr()?;
        let last_request = Arc::new(Mutex::new(None));

        let handle = tokio::spawn(serve(socket, self, Arc::clone(&last_request)));

        Ok(MockBrowserServer {
            addr,
            last_request,
            handle,
        })
    }
}

/// A running mock Browser service.
///
/// The server answers requests until it is stopped or dropped. It serves
/// any number of requests, so a single instance can back several queries
/// in one test.
#[derive(Debug)]
pub struct MockBrowserServer {
    addr: SocketAddr,
    last_request: Arc<Mutex<Option<Bytes>>>,
    handle: JoinHandle<()>,
}

impl MockBrowserServer {
    /// Create a builder for a mock server.
    #[must_use]
    pub fn builder() -> MockBrowserBuilder {
        MockBrowserBuilder::default()
    }

    /// The address the server is listening on.
    #[must_use]
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// The most recently received request datagram, if any.
    pub async fn last_request(&self) -> Option<Bytes> {
        self.last_request.lock().await.clone()
    }

    /// Stop serving.
    pub fn stop(&self) {
        self.handle.abort();
    }
}

impl Drop for MockBrowserServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn serve(socket: UdpSocket, config: MockBrowserBuilder, last_request: Arc<Mutex<Option<Bytes>>>) {
    let mut buf = vec![0u8; 1024];

    loop {
        let (len, peer) = match socket.recv_from(&mut buf).await {
            Ok(received) => received,
            Err(e) => {
                tracing::warn!(error = %e, "mock Browser receive failed");
                continue;
            }
        };

        let request = Bytes::copy_from_slice(&buf[..len]);
        *last_request.lock().await = Some(request.clone());

        let reply = match &config.raw {
            _ if config.silent => None,
            Some(raw) => Some(raw.clone()),
            None => select_reply(&config, &request),
        };

        if let Some(reply) = reply {
            if let Err(e) = socket.send_to(&reply, peer).await {
                tracing::warn!(error = %e, peer = %peer, "mock Browser send failed");
            }
        }
    }
}

fn select_reply(config: &MockBrowserBuilder, request: &Bytes) -> Option<Bytes> {
    match request.first() {
        Some(&CLNT_UCAST_EX) => config.all_instances.clone(),
        Some(&CLNT_UCAST_INST) => {
            // type byte + name + NUL terminator
            let name = request.get(1..request.len().checked_sub(1)?)?;
            let name = std::str::from_utf8(name).ok()?;
            config.instances.get(name).cloned()
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_reply_layout() {
        let mut record = InstanceRecord::new();
        record.insert("ServerName", "HOST1");
        record.insert("tcp", "1433");

        let reply = encode_reply(&[record]);
        let body = b"ServerName;HOST1;tcp;1433;;";

        assert_eq!(reply[0], SVR_RESP);
        assert_eq!(u16::from_le_bytes([reply[1], reply[2]]), body.len() as u16);
        assert_eq!(&reply[RESPONSE_HEADER_SIZE..], body);
    }

    #[test]
    fn test_encode_reply_empty() {
        let reply = encode_reply(&[]);
        assert_eq!(reply.len(), RESPONSE_HEADER_SIZE);
        assert_eq!(u16::from_le_bytes([reply[1], reply[2]]), 0);
    }
}
