//! Browser service query client.

use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;

use bytes::BytesMut;
use ssrp_protocol::{BrowserRequest, InstanceRecord, decode_response};
use tokio::net::{UdpSocket, lookup_host};
use tokio::time::timeout;

use crate::config::BrowserConfig;
use crate::error::{Error, Result};
use crate::state::QueryState;

/// Client for the SQL Browser discovery service.
///
/// Each query is an independent exchange: a fresh socket is bound for the
/// call and released when the call returns, on every path. The client holds
/// no connection state and may be shared freely.
#[derive(Debug, Clone)]
pub struct BrowserClient {
    config: BrowserConfig,
}

impl BrowserClient {
    /// Create a client for the configured host.
    #[must_use]
    pub fn new(config: BrowserConfig) -> Self {
        Self { config }
    }

    /// The configuration this client queries with.
    #[must_use]
    pub fn config(&self) -> &BrowserConfig {
        &self.config
    }

    /// Query metadata for every instance advertised on the host.
    ///
    /// Returns records in the order the server emitted them. An empty
    /// sequence means the server replied with no valid instance segments,
    /// never that the exchange itself failed.
    pub async fn query_all(&self) -> Result<Vec<InstanceRecord>> {
        self.run_query(BrowserRequest::AllInstances).await
    }

    /// Query metadata for one named instance.
    ///
    /// The Browser service does not answer for unknown instance names, so a
    /// missing instance surfaces as [`Error::Timeout`] rather than an empty
    /// sequence.
    pub async fn query_instance(&self, name: &str) -> Result<Vec<InstanceRecord>> {
        self.run_query(BrowserRequest::instance(name)?).await
    }

    async fn run_query(&self, request: BrowserRequest) -> Result<Vec<InstanceRecord>> {
        tracing::info!(
            host = %self.config.host,
            port = self.config.port,
            message_type = request.message_type(),
            "querying SQL Browser service"
        );

        let target = resolve(&self.config.host, self.config.port).await?;

        let mut exchange = QueryExchange::bind(target, self.config.buffer_size).await?;
        exchange.send(&request).await?;
        let records = exchange.receive(self.config.timeout).await?;

        tracing::debug!(instances = records.len(), "Browser query complete");
        Ok(records)
    }
}

/// Resolve the target host to a single socket address.
async fn resolve(host: &str, port: u16) -> Result<SocketAddr> {
    let mut addrs = lookup_host((host, port)).await?;
    addrs.next().ok_or_else(|| {
        Error::Network(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("no addresses resolved for {host}"),
        ))
    })
}

/// One request/response exchange with the Browser service.
///
/// Drives the fixed state machine described in [`QueryState`]: `send` moves
/// `Idle -> AwaitingReply`, `receive` moves to `Done` or `Failed`. Exactly
/// one receive attempt is made; the socket is released when the exchange is
/// dropped, whichever state it ended in.
#[derive(Debug)]
pub struct QueryExchange {
    socket: UdpSocket,
    target: SocketAddr,
    buffer_size: usize,
    state: QueryState,
}

impl QueryExchange {
    /// Bind a fresh unconnected socket for one exchange with `target`.
    ///
    /// The local bind address matches the target's address family.
    pub async fn bind(target: SocketAddr, buffer_size: usize) -> Result<Self> {
        let bind_addr: SocketAddr = if target.is_ipv4() {
            (Ipv4Addr::UNSPECIFIED, 0).into()
        } else {
            (Ipv6Addr::UNSPECIFIED, 0).into()
        };
        let socket = UdpSocket::bind(bind_addr).await?;

        Ok(Self {
            socket,
            target,
            buffer_size,
            state: QueryState::Idle,
        })
    }

    /// Current exchange state.
    #[must_use]
    pub fn state(&self) -> QueryState {
        self.state
    }

    /// Send the request datagram.
    pub async fn send(&mut self, request: &BrowserRequest) -> Result<()> {
        let datagram = request.encode_to_bytes();
        match self.socket.send_to(&datagram, self.target).await {
            Ok(sent) => {
                tracing::debug!(bytes = sent, target = %self.target, "sent Browser request");
                self.state = QueryState::AwaitingReply;
                Ok(())
            }
            Err(e) => {
                self.state = QueryState::Failed;
                Err(e.into())
            }
        }
    }

    /// Wait up to `wait` for the reply datagram and decode it.
    ///
    /// Reads at most the configured buffer size; a longer reply is silently
    /// truncated by the receive call.
    pub async fn receive(&mut self, wait: Duration) -> Result<Vec<InstanceRecord>> {
        let mut buf = BytesMut::zeroed(self.buffer_size);

        let received = match timeout(wait, self.socket.recv_from(&mut buf)).await {
            Err(_elapsed) => {
                self.state = QueryState::Failed;
                return Err(Error::Timeout(wait));
            }
            Ok(Err(e)) => {
                self.state = QueryState::Failed;
                return Err(e.into());
            }
            Ok(Ok((len, from))) => {
                tracing::debug!(bytes = len, from = %from, "received Browser reply");
                len
            }
        };

        let mut datagram = buf.freeze();
        datagram.truncate(received);

        match decode_response(&mut datagram) {
            Ok(records) => {
                self.state = QueryState::Done;
                Ok(records)
            }
            Err(e) => {
                self.state = QueryState::Failed;
                Err(e.into())
            }
        }
    }
}
