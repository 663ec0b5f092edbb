//! Error types for snmp-device.
//!
//! - [`Error`] - the crate error type
//! - [`ErrorStatus`] - SNMP protocol errors returned by agents (RFC 3416)
//!
//! Errors are boxed: `Result<T> = Result<T, Box<Error>>`.
//!
//! The adapter operations ([`Client::scalar_get`](crate::Client::scalar_get),
//! [`Client::table_walk`](crate::Client::table_walk)) log and absorb
//! [`Error::Snmp`]; only transport and framing failures reach the caller of
//! a poll.
//!
//! ```rust
//! use snmp_device::{Error, Result};
//!
//! fn device_unavailable(result: &Result<()>) -> bool {
//!     matches!(
//!         result.as_ref().map_err(|e| &**e),
//!         Err(Error::Timeout { .. } | Error::Network { .. })
//!     )
//! }
//! ```

pub(crate) mod internal;

use std::net::SocketAddr;
use std::time::Duration;

use crate::oid::Oid;

/// Placeholder target address used when no target is known (0.0.0.0:0).
pub(crate) const UNKNOWN_TARGET: SocketAddr =
    SocketAddr::new(std::net::IpAddr::V4(std::net::Ipv4Addr::new(0, 0, 0, 0)), 0);

/// Result type alias using the crate's boxed Error type.
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// The error type for all snmp-device operations.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Socket failure (bind, send, connection refused).
    #[error("network error communicating with {target}: {source}")]
    Network {
        target: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    /// No response within the request timeout. Requests are sent once.
    #[error("timeout after {elapsed:?} waiting for {target}")]
    Timeout {
        target: SocketAddr,
        elapsed: Duration,
    },

    /// SNMP error-status returned by the agent.
    #[error("SNMP error from {target}: {status} at index {index}")]
    Snmp {
        target: SocketAddr,
        status: ErrorStatus,
        index: u32,
        oid: Option<Oid>,
    },

    /// Response could not be decoded or did not match the request.
    #[error("malformed response from {target}")]
    MalformedResponse { target: SocketAddr },

    /// Invalid endpoint, version or discovery configuration.
    #[error("configuration error: {0}")]
    Config(Box<str>),

    /// Invalid OID format.
    #[error("invalid OID: {0}")]
    InvalidOid(Box<str>),
}

impl Error {
    /// Box this error.
    pub fn boxed(self) -> Box<Self> {
        Box::new(self)
    }

    /// True for failures that mean the device could not be reached.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Network { .. } | Self::Timeout { .. })
    }
}

/// SNMP protocol error status codes (RFC 3416).
///
/// Only GET and GETNEXT are issued, so in practice agents answer with
/// `noSuchName`, `tooBig` or `genErr`; the SET-related codes are kept so
/// that any status a device sends is reported by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorStatus {
    NoError,
    TooBig,
    /// OID not found. SNMPv1 only; v2c agents use exception values.
    NoSuchName,
    BadValue,
    ReadOnly,
    GenErr,
    NoAccess,
    WrongType,
    WrongLength,
    WrongEncoding,
    WrongValue,
    NoCreation,
    InconsistentValue,
    ResourceUnavailable,
    CommitFailed,
    UndoFailed,
    AuthorizationError,
    NotWritable,
    InconsistentName,
    /// Unknown or future error status code.
    Unknown(i32),
}

impl ErrorStatus {
    const NAMED: [(ErrorStatus, &'static str); 19] = [
        (Self::NoError, "noError"),
        (Self::TooBig, "tooBig"),
        (Self::NoSuchName, "noSuchName"),
        (Self::BadValue, "badValue"),
        (Self::ReadOnly, "readOnly"),
        (Self::GenErr, "genErr"),
        (Self::NoAccess, "noAccess"),
        (Self::WrongType, "wrongType"),
        (Self::WrongLength, "wrongLength"),
        (Self::WrongEncoding, "wrongEncoding"),
        (Self::WrongValue, "wrongValue"),
        (Self::NoCreation, "noCreation"),
        (Self::InconsistentValue, "inconsistentValue"),
        (Self::ResourceUnavailable, "resourceUnavailable"),
        (Self::CommitFailed, "commitFailed"),
        (Self::UndoFailed, "undoFailed"),
        (Self::AuthorizationError, "authorizationError"),
        (Self::NotWritable, "notWritable"),
        (Self::InconsistentName, "inconsistentName"),
    ];

    /// Create from raw status code.
    pub fn from_i32(value: i32) -> Self {
        match usize::try_from(value).ok().and_then(|i| Self::NAMED.get(i)) {
            Some((status, _)) => *status,
            None => {
                tracing::warn!(target: "snmp_device::error", { snmp.error_status = value }, "unknown SNMP error status");
                Self::Unknown(value)
            }
        }
    }

    /// Convert to raw status code.
    pub fn as_i32(&self) -> i32 {
        match self {
            Self::Unknown(code) => *code,
            known => Self::NAMED
                .iter()
                .position(|(status, _)| status == known)
                .map_or(-1, |i| i as i32),
        }
    }
}

impl std::fmt::Display for ErrorStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unknown(code) => write!(f, "unknown({})", code),
            known => {
                let name = Self::NAMED
                    .iter()
                    .find(|(status, _)| status == known)
                    .map_or("unknown", |(_, name)| name);
                f.write_str(name)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_size_budget() {
        assert!(
            std::mem::size_of::<Error>() <= 128,
            "Error size {} exceeds 128-byte budget",
            std::mem::size_of::<Error>()
        );
        assert_eq!(
            std::mem::size_of::<Result<()>>(),
            std::mem::size_of::<*const ()>(),
            "Result<()> should be pointer-sized"
        );
    }

    #[test]
    fn status_codes_round_trip() {
        for code in 0..=18 {
            assert_eq!(ErrorStatus::from_i32(code).as_i32(), code);
        }
        assert_eq!(ErrorStatus::from_i32(2), ErrorStatus::NoSuchName);
        assert_eq!(ErrorStatus::from_i32(99), ErrorStatus::Unknown(99));
        assert_eq!(ErrorStatus::Unknown(99).as_i32(), 99);
    }

    #[test]
    fn status_display_is_mib_name() {
        assert_eq!(ErrorStatus::NoSuchName.to_string(), "noSuchName");
        assert_eq!(ErrorStatus::GenErr.to_string(), "genErr");
        assert_eq!(ErrorStatus::Unknown(42).to_string(), "unknown(42)");
    }

    #[test]
    fn transport_classification() {
        let timeout = Error::Timeout {
            target: UNKNOWN_TARGET,
            elapsed: Duration::from_secs(1),
        };
        assert!(timeout.is_transport());
        assert!(!Error::Config("bad".into()).is_transport());
    }
}
