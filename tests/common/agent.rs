//! In-process SNMP agents for integration tests.

use bytes::Bytes;
use snmp_device::message::CommunityMessage;
use snmp_device::pdu::{Pdu, PduType};
use snmp_device::{Oid, Value, VarBind, Version};
use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::ops::Bound;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::net::UdpSocket;
use tokio::task::JoinHandle;

/// v1/v2c agent answering GET and GETNEXT from a fixed MIB view.
///
/// Answers in the version of each request. Requests carrying another
/// community are dropped without reply, like a real agent.
pub struct TestAgent {
    addr: SocketAddr,
    requests: Arc<AtomicUsize>,
    task: JoinHandle<()>,
}

impl TestAgent {
    /// Agent with community "public".
    pub async fn with_data(data: BTreeMap<Oid, Value>) -> Self {
        Self::start(data, "public").await
    }

    pub async fn start(data: BTreeMap<Oid, Value>, community: &str) -> Self {
        let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let addr = socket.local_addr().unwrap();
        let requests = Arc::new(AtomicUsize::new(0));
        let community = Bytes::copy_from_slice(community.as_bytes());

        let counter = requests.clone();
        let task = tokio::spawn(async move {
            let mut buf = vec![0u8; 65535];
            loop {
                let Ok((len, source)) = socket.recv_from(&mut buf).await else {
                    return;
                };
                let Ok(request) = CommunityMessage::decode(Bytes::copy_from_slice(&buf[..len]))
                else {
                    continue;
                };
                if request.community != community {
                    continue;
                }
                counter.fetch_add(1, Ordering::SeqCst);
                let response = respond(&data, request);
                let _ = socket.send_to(&response.encode(), source).await;
            }
        });

        Self {
            addr,
            requests,
            task,
        }
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Number of requests answered so far.
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

impl Drop for TestAgent {
    fn drop(&mut self) {
        self.task.abort();
    }
}

fn respond(data: &BTreeMap<Oid, Value>, request: CommunityMessage) -> CommunityMessage {
    let version = request.version;
    let pdu = request.pdu;
    let is_next = pdu.pdu_type == PduType::GetNextRequest;

    let mut varbinds = Vec::with_capacity(pdu.varbinds.len());
    let mut failed = None;
    for (position, vb) in pdu.varbinds.iter().enumerate() {
        let found = if is_next {
            data.range((Bound::Excluded(vb.oid.clone()), Bound::Unbounded))
                .next()
                .map(|(oid, value)| VarBind::new(oid.clone(), value.clone()))
        } else {
            data.get(&vb.oid)
                .map(|value| VarBind::new(vb.oid.clone(), value.clone()))
        };
        match found {
            Some(found) => varbinds.push(found),
            None if version == Version::V1 => {
                failed.get_or_insert(position);
                varbinds.push(vb.clone());
            }
            None if is_next => varbinds.push(VarBind::new(vb.oid.clone(), Value::EndOfMibView)),
            None => varbinds.push(VarBind::new(vb.oid.clone(), Value::NoSuchInstance)),
        }
    }

    let mut response = Pdu::response(pdu.request_id, varbinds);
    if let Some(position) = failed {
        // v1 noSuchName echoes the request bindings
        response.error_status = 2;
        response.error_index = position as i32 + 1;
        response.varbinds = pdu.varbinds;
    }
    CommunityMessage::new(version, request.community, response)
}

/// Stands in for a broadcast domain: receives the discovery request on one
/// socket and answers it from several device sockets, one per simulated
/// agent, `spacing` apart.
pub struct DiscoveryResponder {
    addr: SocketAddr,
    task: JoinHandle<Vec<SocketAddr>>,
}

impl DiscoveryResponder {
    pub async fn start(descriptions: Vec<String>, spacing: Duration) -> Self {
        let listener = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let mut devices = Vec::with_capacity(descriptions.len());
        for _ in &descriptions {
            devices.push(UdpSocket::bind("127.0.0.1:0").await.unwrap());
        }

        let task = tokio::spawn(async move {
            let mut buf = vec![0u8; 65535];
            let (len, source) = listener.recv_from(&mut buf).await.unwrap();
            let request = CommunityMessage::decode(Bytes::copy_from_slice(&buf[..len])).unwrap();
            let sys_descr = request.pdu.varbinds[0].oid.clone();

            let mut answered = Vec::new();
            for (device, description) in devices.iter().zip(descriptions) {
                tokio::time::sleep(spacing).await;
                let pdu = Pdu::response(
                    request.pdu.request_id,
                    vec![VarBind::new(sys_descr.clone(), Value::from(description))],
                );
                let response =
                    CommunityMessage::new(request.version, request.community.clone(), pdu);
                if device.send_to(&response.encode(), source).await.is_ok() {
                    answered.push(device.local_addr().unwrap());
                }
            }
            answered
        });

        Self { addr, task }
    }

    /// Address to use as the "broadcast" address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Source addresses of the devices that answered.
    pub async fn finish(self) -> Vec<SocketAddr> {
        self.task.await.unwrap()
    }
}
