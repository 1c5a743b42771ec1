//! SSRP server response decoding.
//!
//! The Browser service answers a discovery request with a single SVR_RESP
//! datagram: a 3-byte header followed by a text body listing instance
//! attributes as `;`-separated key/value tokens, instances separated by
//! `;;`. The body grammar, informally:
//!
//! ```text
//! body      := segment (";;" segment)*
//! segment   := (key ";" value ";")* key ";" value | ""
//! ```
//!
//! The attribute key set is open-ended; decoding is schema-free and
//! preserves the server's emission order.

use bytes::Buf;

use crate::error::ProtocolError;
use crate::instance::InstanceRecord;
use crate::prelude::*;

/// SVR_RESP header size in bytes: message type plus 2-byte length.
pub const RESPONSE_HEADER_SIZE: usize = 3;

/// SVR_RESP message type byte.
pub const SVR_RESP: u8 = 0x05;

/// SVR_RESP response header.
///
/// Carried for completeness; neither field is interpreted during decoding.
/// The length field in particular is not trusted: the body is whatever
/// arrived after the header, which also covers replies truncated by the
/// receiver's buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseHeader {
    /// Message type, `0x05` for SVR_RESP.
    pub message_type: u8,
    /// Advertised body length (little-endian on the wire).
    pub length: u16,
}

impl ResponseHeader {
    /// Parse a response header from bytes.
    pub fn decode(src: &mut impl Buf) -> Result<Self, ProtocolError> {
        if src.remaining() < RESPONSE_HEADER_SIZE {
            return Err(ProtocolError::IncompleteResponse {
                expected: RESPONSE_HEADER_SIZE,
                actual: src.remaining(),
            });
        }

        let message_type = src.get_u8();
        let length = src.get_u16_le();

        Ok(Self {
            message_type,
            length,
        })
    }
}

/// Decode a complete SVR_RESP datagram into instance records.
///
/// Consumes the 3-byte header, decodes the remainder as text, and returns
/// one record per valid instance segment, in emission order. A reply with a
/// well-formed header and no valid segments decodes to an empty sequence.
///
/// Decoding is pure: the same input always yields the same records.
pub fn decode_response(src: &mut impl Buf) -> Result<Vec<InstanceRecord>, ProtocolError> {
    let _header = ResponseHeader::decode(src)?;

    let body = src.copy_to_bytes(src.remaining());
    let text = core::str::from_utf8(&body).map_err(|_| ProtocolError::InvalidText)?;

    Ok(parse_body(text))
}

/// Parse the text body of an SVR_RESP message.
///
/// Each `;;`-separated segment becomes one record from its complete
/// key/value token pairs. A segment with fewer than two tokens yields no
/// record (this also drops the empty segment after the final `";;"`), and
/// an unpaired trailing token is discarded rather than given a synthetic
/// value.
#[must_use]
pub fn parse_body(text: &str) -> Vec<InstanceRecord> {
    let mut records = Vec::new();

    for segment in text.split(";;") {
        let tokens: Vec<&str> = segment.split(';').collect();
        if tokens.len() < 2 {
            continue;
        }

        let mut record = InstanceRecord::new();
        for pair in tokens.chunks_exact(2) {
            record.insert(pair[0], pair[1]);
        }
        records.push(record);
    }

    records
}
