//! # mssql-browser-testing
//!
//! Test infrastructure for SQL Browser discovery development.
//!
//! Provides a mock SQL Browser service over UDP for fast, deterministic
//! testing without a real SQL Server host on the network.

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod mock_browser;

pub use mock_browser::{MockBrowserBuilder, MockBrowserServer, MockServerError, encode_reply};
