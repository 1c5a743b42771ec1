//! SSRP client request messages.
//!
//! The Browser service understands two unicast discovery requests. Both are
//! single datagrams with no follow-up traffic:
//!
//! - CLNT_UCAST_EX (`0x03`): a single type byte asking for every instance
//!   on the host.
//! - CLNT_UCAST_INST (`0x04`): the type byte followed by the ASCII instance
//!   name and a terminating NUL, asking for one named instance.

use bytes::{BufMut, Bytes, BytesMut};

use crate::error::ProtocolError;
use crate::prelude::*;

/// CLNT_UCAST_EX message type: enumerate all instances.
pub const CLNT_UCAST_EX: u8 = 0x03;

/// CLNT_UCAST_INST message type: query a single named instance.
pub const CLNT_UCAST_INST: u8 = 0x04;

/// A validated SQL Server instance name.
///
/// The wire format carries the name as NUL-terminated ASCII, so names must
/// be non-empty, ASCII-only, and free of embedded NUL bytes. Validation
/// happens at construction; encoding is infallible afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InstanceName(String);

impl InstanceName {
    /// Create a validated instance name.
    pub fn new(name: impl Into<String>) -> Result<Self, ProtocolError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ProtocolError::InvalidInstanceName {
                reason: "name is empty",
            });
        }
        if !name.is_ascii() {
            return Err(ProtocolError::InvalidInstanceName {
                reason: "name contains non-ASCII characters",
            });
        }
        if name.bytes().any(|b| b == 0) {
            return Err(ProtocolError::InvalidInstanceName {
                reason: "name contains a NUL byte",
            });
        }
        Ok(Self(name))
    }

    /// Get the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for InstanceName {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A Browser service discovery request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowserRequest {
    /// CLNT_UCAST_EX: request metadata for every instance on the host.
    AllInstances,
    /// CLNT_UCAST_INST: request metadata for one named instance.
    Instance(InstanceName),
}

impl BrowserRequest {
    /// Create a single-instance request, validating the name.
    pub fn instance(name: impl Into<String>) -> Result<Self, ProtocolError> {
        Ok(Self::Instance(InstanceName::new(name)?))
    }

    /// The SSRP message type byte for this request.
    #[must_use]
    pub const fn message_type(&self) -> u8 {
        match self {
            Self::AllInstances => CLNT_UCAST_EX,
            Self::Instance(_) => CLNT_UCAST_INST,
        }
    }

    /// Encoded datagram length in bytes.
    #[must_use]
    pub fn encoded_len(&self) -> usize {
        match self {
            Self::AllInstances => 1,
            // type byte + name + NUL terminator
            Self::Instance(name) => 1 + name.as_str().len() + 1,
        }
    }

    /// Encode the request datagram.
    pub fn encode(&self, dst: &mut impl BufMut) {
        dst.put_u8(self.message_type());
        if let Self::Instance(name) = self {
            dst.put_slice(name.as_str().as_bytes());
            dst.put_u8(0);
        }
    }

    /// Encode the request to a new `Bytes` buffer.
    #[must_use]
    pub fn encode_to_bytes(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(self.encoded_len());
        self.encode(&mut buf);
        buf.freeze()
    }
}
