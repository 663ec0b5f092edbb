//! Transport layer abstraction.
//!
//! A [`Transport`] carries encoded request datagrams to one agent and hands
//! back raw response datagrams. Decoding and request-id validation happen
//! in the [`Client`](crate::Client).

mod udp;

#[cfg(any(test, feature = "testing"))]
mod mock;

pub use udp::*;

#[cfg(any(test, feature = "testing"))]
pub use mock::*;

use std::future::Future;
use std::net::SocketAddr;
use std::time::Duration;

use bytes::Bytes;

use crate::error::Result;

/// Client-side transport to a single agent.
///
/// Implementations are cheap to clone (`Arc` inside). Each request is sent
/// exactly once; a missing answer surfaces as
/// [`Error::Timeout`](crate::Error::Timeout).
pub trait Transport: Send + Sync + Clone {
    /// Send one encoded request.
    fn send(&self, data: &[u8]) -> impl Future<Output = Result<()>> + Send;

    /// Wait up to `timeout` for the next datagram from the agent.
    ///
    /// `request_id` is informational; stale responses are discarded by the
    /// caller after decoding.
    fn recv(
        &self,
        request_id: i32,
        timeout: Duration,
    ) -> impl Future<Output = Result<(Bytes, SocketAddr)>> + Send;

    /// Remote agent address.
    fn peer_addr(&self) -> SocketAddr;

    /// Local bind address.
    fn local_addr(&self) -> SocketAddr;
}
