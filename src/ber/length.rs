//! BER length octets (X.690 8.1.3).
//!
//! Short form for lengths up to 127, long form up to four length octets.
//! The indefinite form is rejected.

use std::net::SocketAddr;

use crate::error::internal::DecodeErrorKind;
use crate::error::{Error, Result, UNKNOWN_TARGET};

/// Largest content length accepted by the decoder.
pub const MAX_LENGTH: usize = 0x20_0000;

/// Encode `len` as length octets in wire order.
pub fn encode_length(len: usize) -> Vec<u8> {
    if len <= 0x7F {
        return vec![len as u8];
    }
    let bytes = (len as u32).to_be_bytes();
    let skip = bytes.iter().take_while(|&&b| b == 0).count();
    let mut out = Vec::with_capacity(1 + 4 - skip);
    out.push(0x80 | (4 - skip) as u8);
    out.extend_from_slice(&bytes[skip..]);
    out
}

/// Decode length octets at the start of `data`, returning `(length, consumed)`.
///
/// `base_offset` is only used for log context.
pub fn decode_length(
    data: &[u8],
    base_offset: usize,
    target: Option<SocketAddr>,
) -> Result<(usize, usize)> {
    let fail = |kind: DecodeErrorKind| {
        tracing::debug!(target: "snmp_device::ber", { snmp.offset = base_offset, kind = %kind }, "bad length");
        Error::MalformedResponse {
            target: target.unwrap_or(UNKNOWN_TARGET),
        }
        .boxed()
    };

    let first = *data.first().ok_or_else(|| fail(DecodeErrorKind::TruncatedData))?;
    if first & 0x80 == 0 {
        return Ok((first as usize, 1));
    }
    if first == 0x80 {
        return Err(fail(DecodeErrorKind::IndefiniteLength));
    }

    let octets = (first & 0x7F) as usize;
    if octets > 4 {
        return Err(fail(DecodeErrorKind::LengthTooLong { octets }));
    }
    let body = data
        .get(1..=octets)
        .ok_or_else(|| fail(DecodeErrorKind::TruncatedData))?;
    let len = body.iter().fold(0usize, |acc, &b| (acc << 8) | b as usize);
    if len > MAX_LENGTH {
        return Err(fail(DecodeErrorKind::LengthExceedsMax {
            length: len,
            max: MAX_LENGTH,
        }));
    }
    Ok((len, 1 + octets))
}
