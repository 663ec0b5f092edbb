//! UDP transport implementation.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use tokio::net::UdpSocket;
use tokio::time::timeout;

use super::Transport;
use crate::error::{Error, Result};
use crate::util::bind_ephemeral_udp_socket;

/// Largest datagram accepted from an agent.
const MAX_DATAGRAM: usize = 65535;

/// UDP transport owning one connected socket to a single agent.
#[derive(Clone)]
pub struct UdpTransport {
    inner: Arc<UdpTransportInner>,
}

struct UdpTransportInner {
    socket: UdpSocket,
    target: SocketAddr,
    local_addr: SocketAddr,
}

impl UdpTransport {
    /// Bind an ephemeral socket of the target's address family and connect it.
    pub async fn connect(target: SocketAddr) -> Result<Self> {
        tracing::debug!(target: "snmp_device::transport", { snmp.target = %target }, "connecting UDP transport");

        let network = |source| Error::Network { target, source }.boxed();
        let socket = bind_ephemeral_udp_socket(target).await.map_err(network)?;
        socket.connect(target).await.map_err(network)?;
        let local_addr = socket.local_addr().map_err(network)?;

        tracing::debug!(target: "snmp_device::transport", { snmp.target = %target, snmp.local_addr = %local_addr }, "UDP transport connected");

        Ok(Self {
            inner: Arc::new(UdpTransportInner {
                socket,
                target,
                local_addr,
            }),
        })
    }
}

impl Transport for UdpTransport {
    async fn send(&self, data: &[u8]) -> Result<()> {
        tracing::trace!(target: "snmp_device::transport", { snmp.target = %self.inner.target, snmp.bytes = data.len() }, "UDP send");
        self.inner.socket.send(data).await.map_err(|source| {
            Error::Network {
                target: self.inner.target,
                source,
            }
            .boxed()
        })?;
        Ok(())
    }

    async fn recv(&self, request_id: i32, recv_timeout: Duration) -> Result<(Bytes, SocketAddr)> {
        let mut buf = vec![0u8; MAX_DATAGRAM];

        match timeout(recv_timeout, self.inner.socket.recv(&mut buf)).await {
            Ok(Ok(len)) => {
                buf.truncate(len);
                tracing::trace!(target: "snmp_device::transport", { snmp.target = %self.inner.target, snmp.bytes = len }, "UDP recv complete");
                Ok((Bytes::from(buf), self.inner.target))
            }
            // A connected UDP socket reports ICMP port-unreachable here.
            Ok(Err(source)) => Err(Error::Network {
                target: self.inner.target,
                source,
            }
            .boxed()),
            Err(_) => {
                tracing::trace!(target: "snmp_device::transport", { snmp.target = %self.inner.target, snmp.request_id = request_id }, "UDP recv timeout");
                Err(Error::Timeout {
                    target: self.inner.target,
                    elapsed: recv_timeout,
                }
                .boxed())
            }
        }
    }

    fn peer_addr(&self) -> SocketAddr {
        self.inner.target
    }

    fn local_addr(&self) -> SocketAddr {
        self.inner.local_addr
    }
}
