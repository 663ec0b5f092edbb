//! Community-based SNMP message format (v1/v2c).
//!
//! `SEQUENCE { version INTEGER, community OCTET STRING, pdu PDU }`

use std::net::SocketAddr;

use bytes::Bytes;

use crate::ber::{Decoder, EncodeBuf};
use crate::error::internal::DecodeErrorKind;
use crate::error::{Error, Result, UNKNOWN_TARGET};
use crate::pdu::Pdu;
use crate::version::Version;

/// Community-based SNMP message.
#[derive(Debug, Clone)]
pub struct CommunityMessage {
    pub version: Version,
    pub community: Bytes,
    pub pdu: Pdu,
}

impl CommunityMessage {
    pub fn new(version: Version, community: impl Into<Bytes>, pdu: Pdu) -> Self {
        Self {
            version,
            community: community.into(),
            pdu,
        }
    }

    pub fn encode(&self) -> Bytes {
        let mut buf = EncodeBuf::new();
        buf.push_sequence(|buf| {
            buf.push_integer(self.version.as_i32());
            buf.push_octet_string(&self.community);
            self.pdu.encode(buf);
        });
        buf.finish()
    }

    /// Decode exactly one message.
    pub fn decode(data: Bytes) -> Result<Self> {
        Self::decode_from(&mut Decoder::new(data))
    }

    /// Decode the next message from `decoder`, leaving any trailing data.
    pub(crate) fn decode_from(decoder: &mut Decoder) -> Result<Self> {
        let mut seq = decoder.read_sequence()?;

        let raw_version = seq.read_integer()?;
        let version = Version::from_i32(raw_version).ok_or_else(|| {
            tracing::debug!(target: "snmp_device::ber", { snmp.offset = seq.offset(), kind = %DecodeErrorKind::UnknownVersion(raw_version) }, "decode error");
            Error::MalformedResponse {
                target: UNKNOWN_TARGET,
            }
            .boxed()
        })?;
        let community = seq.read_octet_string()?;
        let pdu = Pdu::decode(&mut seq)?;

        Ok(CommunityMessage {
            version,
            community,
            pdu,
        })
    }

    /// Decode every message in a datagram.
    ///
    /// Some agents answer a broadcast with several messages back to back in
    /// one datagram. Messages are returned in wire order; the first
    /// undecodable one fails the whole datagram.
    pub fn decode_all(data: Bytes, source: SocketAddr) -> Result<Vec<Self>> {
        let mut decoder = Decoder::with_target(data, source);
        let mut messages = Vec::new();
        while !decoder.is_empty() {
            messages.push(Self::decode_from(&mut decoder)?);
        }
        if messages.is_empty() {
            tracing::debug!(target: "snmp_device::ber", { snmp.source = %source, kind = %DecodeErrorKind::TruncatedData }, "empty datagram");
            return Err(Error::MalformedResponse { target: source }.boxed());
        }
        Ok(messages)
    }
}
