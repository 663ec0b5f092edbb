//! SNMP client: request dispatch and the two adapter operations.
//!
//! [`Client::scalar_get`] fetches a scalar group with one GET;
//! [`Client::table_walk`] fetches an indexed table with a column-aligned
//! GETNEXT walk. Each request is sent once. Agent error-status responses
//! are logged and absorbed by those two operations; transport failures are
//! returned.

mod scalar;
mod walk;

pub use walk::INDEX_FIELD;

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicI32, Ordering};
use std::time::{Duration, Instant};

use bytes::Bytes;
use tracing::{Span, instrument};

use crate::endpoint::DeviceEndpoint;
use crate::error::internal::DecodeErrorKind;
use crate::error::{Error, Result};
use crate::message::CommunityMessage;
use crate::oid::Oid;
use crate::pdu::{Pdu, PduType};
use crate::transport::{Transport, UdpTransport};
use crate::varbind::VarBind;
use crate::version::Version;

/// Default cap on rows collected by one table walk.
pub const DEFAULT_MAX_ROWS: usize = 4096;

/// SNMP client.
///
/// Generic over transport type, with [`UdpTransport`] as default.
#[derive(Clone)]
pub struct Client<T: Transport = UdpTransport> {
    inner: Arc<ClientInner<T>>,
}

struct ClientInner<T: Transport> {
    transport: T,
    config: ClientConfig,
    next_request_id: AtomicI32,
}

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// SNMP version (default: V2c)
    pub version: Version,
    /// Community string (default: "public")
    pub community: Bytes,
    /// Time to wait for each response (default: 1 second)
    pub timeout: Duration,
    /// Rows after which a table walk stops (default: 4096)
    pub max_rows: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            version: Version::V2c,
            community: Bytes::from_static(b"public"),
            timeout: crate::endpoint::DEFAULT_TIMEOUT,
            max_rows: DEFAULT_MAX_ROWS,
        }
    }
}

impl From<&DeviceEndpoint> for ClientConfig {
    fn from(endpoint: &DeviceEndpoint) -> Self {
        Self {
            version: endpoint.version,
            community: Bytes::from(endpoint.community.clone().into_bytes()),
            timeout: endpoint.timeout,
            ..Self::default()
        }
    }
}

impl Client<UdpTransport> {
    /// Resolve `endpoint` and open a UDP socket to it.
    ///
    /// ```rust,no_run
    /// use snmp_device::{Client, DeviceEndpoint};
    ///
    /// # async fn example() -> snmp_device::Result<()> {
    /// let client = Client::connect(&DeviceEndpoint::new("192.168.1.20")).await?;
    /// println!("polling {}", client.peer_addr());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn connect(endpoint: &DeviceEndpoint) -> Result<Self> {
        let target = endpoint.resolve().await?;
        let transport = UdpTransport::connect(target).await?;
        Ok(Self::new(transport, ClientConfig::from(endpoint)))
    }
}

impl<T: Transport> Client<T> {
    pub fn new(transport: T, config: ClientConfig) -> Self {
        Self {
            inner: Arc::new(ClientInner {
                transport,
                config,
                next_request_id: AtomicI32::new(1),
            }),
        }
    }

    pub fn peer_addr(&self) -> SocketAddr {
        self.inner.transport.peer_addr()
    }

    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// Next request id, always positive.
    fn next_request_id(&self) -> i32 {
        let id = self.inner.next_request_id.fetch_add(1, Ordering::Relaxed) & i32::MAX;
        id.max(1)
    }

    fn malformed(&self) -> Box<Error> {
        Error::MalformedResponse {
            target: self.peer_addr(),
        }
        .boxed()
    }

    /// Send one request and wait for the matching response.
    ///
    /// Datagrams carrying another request id are discarded until the
    /// timeout runs out.
    #[instrument(
        level = "debug",
        skip(self, data),
        fields(
            snmp.target = %self.peer_addr(),
            snmp.request_id = request_id,
            snmp.elapsed_ms = tracing::field::Empty,
        )
    )]
    async fn send_and_recv(&self, request_id: i32, data: &[u8]) -> Result<Pdu> {
        let start = Instant::now();
        let timeout = self.inner.config.timeout;

        tracing::trace!(target: "snmp_device::client", { snmp.bytes = data.len() }, "sending request");
        self.inner.transport.send(data).await?;

        loop {
            let remaining = timeout.saturating_sub(start.elapsed());
            if remaining.is_zero() {
                tracing::debug!(target: "snmp_device::client", { snmp.request_id = request_id, peer = %self.peer_addr() }, "request timed out");
                return Err(Error::Timeout {
                    target: self.peer_addr(),
                    elapsed: start.elapsed(),
                }
                .boxed());
            }

            let (response_data, _source) =
                self.inner.transport.recv(request_id, remaining).await?;
            tracing::trace!(target: "snmp_device::client", { snmp.bytes = response_data.len() }, "received response");

            let response = CommunityMessage::decode(response_data)?;
            let expected_version = self.inner.config.version;
            if response.version != expected_version {
                tracing::warn!(target: "snmp_device::client", { ?expected_version, response_version = ?response.version, peer = %self.peer_addr() }, "version mismatch in response");
                return Err(self.malformed());
            }

            let pdu = response.pdu;
            if pdu.request_id != request_id {
                tracing::debug!(target: "snmp_device::client", { expected_request_id = request_id, actual_request_id = pdu.request_id }, "discarding stale response");
                continue;
            }
            if pdu.pdu_type != PduType::Response {
                tracing::warn!(target: "snmp_device::client", { snmp.pdu_type = %pdu.pdu_type, peer = %self.peer_addr() }, "unexpected PDU type in response");
                return Err(self.malformed());
            }

            Span::current().record("snmp.elapsed_ms", start.elapsed().as_millis() as u64);

            if pdu.is_error() {
                return Err(Error::Snmp {
                    target: self.peer_addr(),
                    status: pdu.error_status_enum(),
                    index: pdu.error_index.max(0) as u32,
                    oid: pdu.error_varbind().map(|vb| vb.oid.clone()),
                }
                .boxed());
            }
            return Ok(pdu);
        }
    }

    async fn send_request(&self, pdu: Pdu) -> Result<Pdu> {
        tracing::debug!(target: "snmp_device::client", { snmp.pdu_type = %pdu.pdu_type, snmp.varbind_count = pdu.varbinds.len() }, "sending {} request", pdu.pdu_type);

        let request_id = pdu.request_id;
        let message = CommunityMessage::new(
            self.inner.config.version,
            self.inner.config.community.clone(),
            pdu,
        );
        let response = self.send_and_recv(request_id, &message.encode()).await?;

        tracing::debug!(target: "snmp_device::client", { snmp.varbind_count = response.varbinds.len() }, "received {} response", response.pdu_type);
        Ok(response)
    }

    /// GET several OIDs in one request. Bindings come back in request order.
    #[instrument(skip(self, oids), err, fields(snmp.target = %self.peer_addr(), snmp.oid_count = oids.len()))]
    pub async fn get_many(&self, oids: &[Oid]) -> Result<Vec<VarBind>> {
        if oids.is_empty() {
            return Ok(Vec::new());
        }
        let pdu = Pdu::get_request(self.next_request_id(), oids);
        let response = self.send_request(pdu).await?;
        self.check_width(oids.len(), response.varbinds)
    }

    /// GETNEXT several OIDs in one request; binding `i` follows `oids[i]`.
    #[instrument(skip(self, oids), err, fields(snmp.target = %self.peer_addr(), snmp.oid_count = oids.len()))]
    pub async fn get_next_many(&self, oids: &[Oid]) -> Result<Vec<VarBind>> {
        if oids.is_empty() {
            return Ok(Vec::new());
        }
        let pdu = Pdu::get_next_request(self.next_request_id(), oids);
        let response = self.send_request(pdu).await?;
        self.check_width(oids.len(), response.varbinds)
    }

    /// GET one OID.
    pub async fn get(&self, oid: &Oid) -> Result<VarBind> {
        let mut varbinds = self.get_many(std::slice::from_ref(oid)).await?;
        varbinds.pop().ok_or_else(|| self.malformed())
    }

    /// Responses must carry one binding per requested OID.
    fn check_width(&self, expected: usize, varbinds: Vec<VarBind>) -> Result<Vec<VarBind>> {
        if varbinds.len() != expected {
            tracing::debug!(target: "snmp_device::client", { peer = %self.peer_addr(), expected, actual = varbinds.len(), kind = %DecodeErrorKind::EmptyResponse }, "response binding count mismatch");
            return Err(self.malformed());
        }
        Ok(varbinds)
    }
}
