//! # mssql-browser
//!
//! Async discovery of Microsoft SQL Server instances via the SQL Browser
//! service.
//!
//! This is the primary public API surface for the rust-mssql-browser
//! project. It performs a single SSRP request/response exchange over UDP
//! (default port 1434) and decodes the reply into ordered instance metadata
//! records.
//!
//! ## Features
//!
//! - **One datagram in, one datagram out**: no retries, no reassembly, no
//!   connection state
//! - **Async/await**: built on Tokio, with the receive wait bounded by a
//!   configurable timeout
//! - **Schema-free decoding**: attribute key/value pairs are preserved
//!   generically, in server emission order
//! - **Typed failures**: network, timeout, and protocol errors are distinct
//!
//! ## Example
//!
//! ```rust,ignore
//! use mssql_browser::{BrowserClient, BrowserConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = BrowserClient::new(BrowserConfig::new("db-host.example.com"));
//!
//!     for record in client.query_all().await? {
//!         println!(
//!             "{}\\{} tcp={:?}",
//!             record.server_name().unwrap_or("?"),
//!             record.instance_name().unwrap_or("?"),
//!             record.tcp_port(),
//!         );
//!     }
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod client;
pub mod config;
pub mod error;
pub mod state;

// Re-export commonly used types
pub use client::{BrowserClient, QueryExchange};
pub use config::{BrowserConfig, DEFAULT_BUFFER_SIZE, DEFAULT_TIMEOUT, SQL_BROWSER_PORT};
pub use error::{Error, Result};
pub use ssrp_protocol::{BrowserRequest, InstanceName, InstanceRecord, ProtocolError};
pub use state::QueryState;
