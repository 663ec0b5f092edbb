//! Socket helpers.

use std::io;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};

use socket2::{Domain, Protocol, Socket, Type};
use tokio::net::UdpSocket;

/// Socket options applied before bind.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct SocketOptions {
    /// `SO_BROADCAST`, required to send to a broadcast address.
    pub broadcast: bool,
}

/// Create and bind a non-blocking UDP socket.
///
/// IPv6 sockets are `IPV6_V6ONLY`.
pub(crate) fn bind_udp_socket(addr: SocketAddr, options: SocketOptions) -> io::Result<UdpSocket> {
    let domain = if addr.is_ipv6() {
        Domain::IPV6
    } else {
        Domain::IPV4
    };

    let socket = Socket::new(domain, Type::DGRAM, Some(Protocol::UDP))?;
    if addr.is_ipv6() {
        socket.set_only_v6(true)?;
    }
    if options.broadcast {
        socket.set_broadcast(true)?;
    }
    socket.set_reuse_address(true)?;
    socket.set_nonblocking(true)?;
    socket.bind(&addr.into())?;

    UdpSocket::from_std(socket.into())
}

/// Unspecified address of the same family as `target`, port 0.
pub(crate) fn ephemeral_bind_addr(target: SocketAddr) -> SocketAddr {
    if target.is_ipv6() {
        SocketAddr::from((Ipv6Addr::UNSPECIFIED, 0))
    } else {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, 0))
    }
}

/// Ephemeral socket for talking to a single agent.
pub(crate) async fn bind_ephemeral_udp_socket(target: SocketAddr) -> io::Result<UdpSocket> {
    bind_udp_socket(ephemeral_bind_addr(target), SocketOptions::default())
}

/// Ephemeral socket that may send to `broadcast`.
pub(crate) fn bind_broadcast_socket(broadcast: SocketAddr) -> io::Result<UdpSocket> {
    bind_udp_socket(
        ephemeral_bind_addr(broadcast),
        SocketOptions { broadcast: true },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn binds_ipv4_loopback() {
        let socket = bind_udp_socket("127.0.0.1:0".parse().unwrap(), SocketOptions::default())
            .unwrap();
        let local = socket.local_addr().unwrap();
        assert!(local.is_ipv4());
        assert_ne!(local.port(), 0);
    }

    #[tokio::test]
    async fn ephemeral_follows_target_family() {
        let socket = bind_ephemeral_udp_socket("192.0.2.1:161".parse().unwrap())
            .await
            .unwrap();
        assert!(socket.local_addr().unwrap().is_ipv4());
    }

    #[tokio::test]
    async fn broadcast_socket_has_option_set() {
        let socket = bind_broadcast_socket("255.255.255.255:161".parse().unwrap()).unwrap();
        assert!(socket.broadcast().unwrap());
    }
}
