//! Detailed decode failure kinds.
//!
//! These are logged at debug level and never returned; callers see
//! [`Error::MalformedResponse`](super::Error::MalformedResponse).

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DecodeErrorKind {
    TruncatedData,
    InsufficientData { needed: usize, available: usize },
    UnexpectedTag { expected: u8, actual: u8 },
    ZeroLengthInteger,
    Integer64TooLong { length: usize },
    InvalidNull,
    InvalidIpAddressLength { length: usize },
    IndefiniteLength,
    LengthTooLong { octets: usize },
    LengthExceedsMax { length: usize, max: usize },
    TlvOverflow,
    InvalidOid,
    UnknownVersion(i32),
    UnknownPduType(u8),
    EmptyResponse,
}

impl fmt::Display for DecodeErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TruncatedData => write!(f, "truncated data"),
            Self::InsufficientData { needed, available } => {
                write!(f, "need {} bytes, have {}", needed, available)
            }
            Self::UnexpectedTag { expected, actual } => {
                write!(f, "expected tag 0x{:02X}, got 0x{:02X}", expected, actual)
            }
            Self::ZeroLengthInteger => write!(f, "zero-length integer"),
            Self::Integer64TooLong { length } => write!(f, "integer64 of {} bytes", length),
            Self::InvalidNull => write!(f, "NULL with content"),
            Self::InvalidIpAddressLength { length } => {
                write!(f, "IpAddress of {} bytes", length)
            }
            Self::IndefiniteLength => write!(f, "indefinite length"),
            Self::LengthTooLong { octets } => write!(f, "length uses {} octets", octets),
            Self::LengthExceedsMax { length, max } => {
                write!(f, "length {} exceeds maximum {}", length, max)
            }
            Self::TlvOverflow => write!(f, "TLV extends past end of data"),
            Self::InvalidOid => write!(f, "invalid OID encoding"),
            Self::UnknownVersion(v) => write!(f, "unknown version {}", v),
            Self::UnknownPduType(t) => write!(f, "unknown PDU type 0x{:02X}", t),
            Self::EmptyResponse => write!(f, "response without varbinds"),
        }
    }
}
