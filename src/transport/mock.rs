//! Mock transport for testing.
//!
//! Responses are queued in advance and handed out in order. Queued
//! responses have their request-id patched to match the request that was
//! just sent, so tests never need to predict request ids.

use std::collections::VecDeque;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use bytes::Bytes;

use super::Transport;
use crate::error::{Error, Result};
use crate::message::CommunityMessage;
use crate::oid::Oid;
use crate::pdu::Pdu;
use crate::value::Value;
use crate::varbind::VarBind;
use crate::version::Version;

/// A programmed reaction to one request.
#[derive(Clone, Debug)]
pub enum MockResponse {
    /// Return this message, request-id patched to match the request.
    Data(Bytes),
    /// Return these bytes untouched.
    RawData(Bytes),
    /// Let the request time out.
    Timeout,
    /// Fail with an IO error.
    IoError(String),
}

/// A request seen by the mock.
#[derive(Clone, Debug)]
pub struct RecordedRequest {
    pub data: Bytes,
    /// Decoded request, when the bytes were a valid message.
    pub message: Option<CommunityMessage>,
}

impl RecordedRequest {
    /// OIDs named in the request PDU.
    pub fn oids(&self) -> Vec<Oid> {
        self.message
            .as_ref()
            .map(|m| m.pdu.varbinds.iter().map(|vb| vb.oid.clone()).collect())
            .unwrap_or_default()
    }
}

struct MockTransportInner {
    target: SocketAddr,
    responses: VecDeque<MockResponse>,
    requests: Vec<RecordedRequest>,
    default_response: Option<MockResponse>,
    last_request_id: Option<i32>,
}

/// Programmable in-memory transport.
#[derive(Clone)]
pub struct MockTransport {
    inner: Arc<Mutex<MockTransportInner>>,
}

impl MockTransport {
    pub fn new(target: SocketAddr) -> Self {
        Self {
            inner: Arc::new(Mutex::new(MockTransportInner {
                target,
                responses: VecDeque::new(),
                requests: Vec::new(),
                default_response: None,
                last_request_id: None,
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, MockTransportInner> {
        // A panicking test thread must not hide the recorded state from others.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Queue a response message; its request-id is patched on delivery.
    pub fn queue_response(&mut self, data: impl Into<Bytes>) {
        self.lock().responses.push_back(MockResponse::Data(data.into()));
    }

    /// Queue raw bytes, delivered without patching.
    pub fn queue_raw_response(&mut self, data: impl Into<Bytes>) {
        self.lock()
            .responses
            .push_back(MockResponse::RawData(data.into()));
    }

    pub fn queue_timeout(&mut self) {
        self.lock().responses.push_back(MockResponse::Timeout);
    }

    pub fn queue_io_error(&mut self, msg: impl Into<String>) {
        self.lock()
            .responses
            .push_back(MockResponse::IoError(msg.into()));
    }

    /// Response used once the queue is empty.
    pub fn set_default_response(&mut self, response: MockResponse) {
        self.lock().default_response = Some(response);
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.lock().requests.clone()
    }

    pub fn queued_response_count(&self) -> usize {
        self.lock().responses.len()
    }

    fn patch_request_id(data: Bytes, request_id: i32) -> Bytes {
        match CommunityMessage::decode(data.clone()) {
            Ok(mut message) => {
                message.pdu.request_id = request_id;
                message.encode()
            }
            Err(_) => data,
        }
    }
}

impl Transport for MockTransport {
    fn send(&self, data: &[u8]) -> impl Future<Output = Result<()>> + Send {
        let data = Bytes::copy_from_slice(data);
        let message = CommunityMessage::decode(data.clone()).ok();

        let mut inner = self.lock();
        inner.last_request_id = message.as_ref().map(|m| m.pdu.request_id);
        inner.requests.push(RecordedRequest { data, message });

        async { Ok(()) }
    }

    fn recv(
        &self,
        _request_id: i32,
        timeout: Duration,
    ) -> impl Future<Output = Result<(Bytes, SocketAddr)>> + Send {
        let (response, target, last_request_id) = {
            let mut inner = self.lock();
            let response = inner
                .responses
                .pop_front()
                .or_else(|| inner.default_response.clone());
            (response, inner.target, inner.last_request_id)
        };

        async move {
            match response {
                Some(MockResponse::Data(data)) => {
                    let data = match last_request_id {
                        Some(id) => Self::patch_request_id(data, id),
                        None => data,
                    };
                    Ok((data, target))
                }
                Some(MockResponse::RawData(data)) => Ok((data, target)),
                Some(MockResponse::IoError(msg)) => Err(Error::Network {
                    target,
                    source: std::io::Error::other(msg),
                }
                .boxed()),
                Some(MockResponse::Timeout) | None => Err(Error::Timeout {
                    target,
                    elapsed: timeout,
                }
                .boxed()),
            }
        }
    }

    fn peer_addr(&self) -> SocketAddr {
        self.lock().target
    }

    fn local_addr(&self) -> SocketAddr {
        SocketAddr::from(([127, 0, 0, 1], 0))
    }
}

/// Builds encoded response messages for tests.
pub struct ResponseBuilder {
    request_id: i32,
    varbinds: Vec<VarBind>,
    error_status: i32,
    error_index: i32,
}

impl ResponseBuilder {
    pub fn new(request_id: i32) -> Self {
        Self {
            request_id,
            varbinds: Vec::new(),
            error_status: 0,
            error_index: 0,
        }
    }

    pub fn varbind(mut self, oid: Oid, value: Value) -> Self {
        self.varbinds.push(VarBind::new(oid, value));
        self
    }

    pub fn error_status(mut self, status: i32) -> Self {
        self.error_status = status;
        self
    }

    pub fn error_index(mut self, index: i32) -> Self {
        self.error_index = index;
        self
    }

    fn build(self, version: Version, community: &[u8]) -> Bytes {
        let mut pdu = Pdu::response(self.request_id, self.varbinds);
        pdu.error_status = self.error_status;
        pdu.error_index = self.error_index;
        CommunityMessage::new(version, Bytes::copy_from_slice(community), pdu).encode()
    }

    pub fn build_v2c(self, community: &[u8]) -> Bytes {
        self.build(Version::V2c, community)
    }

    pub fn build_v1(self, community: &[u8]) -> Bytes {
        self.build(Version::V1, community)
    }
}
