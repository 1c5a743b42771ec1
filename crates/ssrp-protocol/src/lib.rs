//! # ssrp-protocol
//!
//! Pure implementation of the SSRP (SQL Server Resolution Protocol, MC-SQLR)
//! messages used to discover Microsoft SQL Server instances via the SQL
//! Server Browser service.
//!
//! This crate provides `no_std` compatible request encoding and response
//! decoding for the two client unicast messages (CLNT_UCAST_EX and
//! CLNT_UCAST_INST) and the SVR_RESP reply they elicit.
//!
//! ## Features
//!
//! - `std` (default): Enable standard library support
//! - `alloc`: Enable allocation without full std (requires `alloc` crate)
//!
//! ## Design Philosophy
//!
//! This crate is intentionally IO-agnostic. It contains no networking logic
//! and makes no assumptions about the async runtime. Higher-level crates
//! build upon this foundation to perform the actual UDP exchange.
//!
//! ## Example
//!
//! ```rust,ignore
//! use ssrp_protocol::{decode_response, BrowserRequest};
//!
//! let request = BrowserRequest::AllInstances;
//! let datagram = request.encode_to_bytes();
//! // send datagram, receive reply...
//! let mut reply = reply_bytes;
//! let records = decode_response(&mut reply)?;
//! for record in &records {
//!     println!("{:?} -> {:?}", record.instance_name(), record.tcp_port());
//! }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![deny(unsafe_code)]

#[cfg(feature = "alloc")]
extern crate alloc;

pub mod error;
pub mod instance;
mod prelude;
pub mod request;
pub mod response;

pub use error::ProtocolError;
pub use instance::InstanceRecord;
pub use request::{BrowserRequest, InstanceName, CLNT_UCAST_EX, CLNT_UCAST_INST};
pub use response::{decode_response, parse_body, ResponseHeader, RESPONSE_HEADER_SIZE, SVR_RESP};
