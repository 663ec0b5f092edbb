//! Broadcast discovery.
//!
//! One GetRequest for sysDescr is broadcast and every agent that answers
//! is recorded as `address -> sysDescr`. The session ends on its own:
//!
//! - [`TerminationReason::Silence`]: nobody answered within the timeout;
//! - [`TerminationReason::Quiet`]: no new answer for one timeout after the
//!   last one;
//! - [`TerminationReason::Capped`]: `max_responses` agents answered.
//!
//! ```rust,no_run
//! use snmp_device::discovery::{DiscoveryConfig, discover, discovered_label};
//!
//! # async fn example() -> snmp_device::Result<()> {
//! let outcome = discover(DiscoveryConfig::default()).await?;
//! for (addr, description) in &outcome.results {
//!     println!("{}", discovered_label(*addr, description));
//! }
//! # Ok(())
//! # }
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use bytes::Bytes;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::instrument;

use crate::endpoint::{DEFAULT_COMMUNITY, DEFAULT_PORT};
use crate::error::{Error, Result};
use crate::message::CommunityMessage;
use crate::oid;
use crate::pdu::Pdu;
use crate::schema::DeviceType;
use crate::util::bind_broadcast_socket;
use crate::version::Version;

/// Default quiet period.
pub const DEFAULT_DISCOVERY_TIMEOUT: Duration = Duration::from_secs(2);
/// Default cap on recorded agents.
pub const DEFAULT_MAX_RESPONSES: usize = 10;
/// Default broadcast address.
pub const DEFAULT_BROADCAST: IpAddr = IpAddr::V4(Ipv4Addr::BROADCAST);

/// Datagrams larger than this are truncated.
const MAX_DATAGRAM: usize = 65535;

/// Discovered agents: sender address to sysDescr.
pub type DiscoveryResult = BTreeMap<SocketAddr, String>;

/// Discovery settings.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DiscoveryConfig {
    pub version: Version,
    pub community: String,
    pub port: u16,
    /// Silence and quiet period.
    pub timeout: Duration,
    pub max_responses: usize,
    pub broadcast: IpAddr,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            version: Version::V2c,
            community: DEFAULT_COMMUNITY.to_owned(),
            port: DEFAULT_PORT,
            timeout: DEFAULT_DISCOVERY_TIMEOUT,
            max_responses: DEFAULT_MAX_RESPONSES,
            broadcast: DEFAULT_BROADCAST,
        }
    }
}

impl DiscoveryConfig {
    pub fn version(mut self, version: Version) -> Self {
        self.version = version;
        self
    }

    pub fn community(mut self, community: impl Into<String>) -> Self {
        self.community = community.into();
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn max_responses(mut self, max_responses: usize) -> Self {
        self.max_responses = max_responses;
        self
    }

    pub fn broadcast(mut self, broadcast: IpAddr) -> Self {
        self.broadcast = broadcast;
        self
    }

    /// Address the request is sent to.
    pub fn target(&self) -> SocketAddr {
        SocketAddr::new(self.broadcast, self.port)
    }

    /// Reject a zero timeout or a zero response cap.
    pub fn validate(&self) -> Result<()> {
        if self.timeout.is_zero() {
            return Err(Error::Config("discovery timeout must be positive".into()).boxed());
        }
        if self.max_responses == 0 {
            return Err(Error::Config("max_responses must be at least 1".into()).boxed());
        }
        Ok(())
    }
}

/// Why a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationReason {
    /// Nothing answered within the timeout.
    Silence,
    /// No new answer within the timeout after the last one.
    Quiet,
    /// `max_responses` agents answered.
    Capped,
}

impl fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TerminationReason::Silence => f.write_str("silence"),
            TerminationReason::Quiet => f.write_str("quiet"),
            TerminationReason::Capped => f.write_str("capped"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    /// Request sent, nothing recorded yet.
    Listening,
    /// At least one agent recorded.
    Collecting,
    Terminated(TerminationReason),
}

/// What a finished session found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryOutcome {
    pub results: DiscoveryResult,
    pub reason: TerminationReason,
}

/// One discovery run. The session owns its socket for the duration of
/// [`run`](Self::run).
#[derive(Debug)]
pub struct DiscoverySession {
    config: DiscoveryConfig,
    request_id: i32,
    state: SessionState,
    started_at: Instant,
    last_found_at: Option<Instant>,
    results: DiscoveryResult,
}

impl DiscoverySession {
    pub fn new(config: DiscoveryConfig) -> Self {
        Self {
            config,
            request_id: session_request_id(),
            state: SessionState::Idle,
            started_at: Instant::now(),
            last_found_at: None,
            results: DiscoveryResult::new(),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn request_id(&self) -> i32 {
        self.request_id
    }

    /// Agents recorded so far.
    pub fn results(&self) -> &DiscoveryResult {
        &self.results
    }

    fn request(&self) -> Bytes {
        let pdu = Pdu::get_request(self.request_id, &[oid!(1, 3, 6, 1, 2, 1, 1, 1, 0)]);
        CommunityMessage::new(
            self.config.version,
            Bytes::from(self.config.community.clone().into_bytes()),
            pdu,
        )
        .encode()
    }

    /// Broadcast the request and collect answers until a termination rule
    /// fires. Only socket setup and the initial send can fail.
    #[instrument(skip(self), err, fields(snmp.target = %self.config.target(), snmp.request_id = self.request_id))]
    pub async fn run(mut self) -> Result<DiscoveryOutcome> {
        self.config.validate()?;
        let target = self.config.target();
        let network = |source| Error::Network { target, source }.boxed();

        let socket = bind_broadcast_socket(target).map_err(network)?;
        socket
            .send_to(&self.request(), target)
            .await
            .map_err(network)?;

        self.started_at = Instant::now();
        self.state = SessionState::Listening;
        tracing::debug!(target: "snmp_device::discovery", { snmp.target = %target, timeout_ms = self.config.timeout.as_millis() as u64 }, "discovery request sent");

        let mut ticker = tokio::time::interval(tick_period(self.config.timeout));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut buf = vec![0u8; MAX_DATAGRAM];

        let reason = loop {
            tokio::select! {
                received = socket.recv_from(&mut buf) => match received {
                    Ok((len, source)) => {
                        let data = Bytes::copy_from_slice(&buf[..len]);
                        if let Some(reason) = self.on_datagram(data, source, Instant::now()) {
                            break reason;
                        }
                    }
                    Err(e) => {
                        tracing::debug!(target: "snmp_device::discovery", { error = %e }, "receive failed");
                    }
                },
                _ = ticker.tick() => {
                    if let Some(reason) = self.check(Instant::now()) {
                        break reason;
                    }
                }
            }
        };
        drop(socket);

        self.state = SessionState::Terminated(reason);
        tracing::info!(target: "snmp_device::discovery", { found = self.results.len(), reason = %reason, elapsed_ms = self.started_at.elapsed().as_millis() as u64 }, "discovery finished");
        Ok(DiscoveryOutcome {
            results: self.results,
            reason,
        })
    }

    /// Record every matching answer in one datagram.
    ///
    /// Returns [`TerminationReason::Capped`] as soon as the cap is reached.
    fn on_datagram(
        &mut self,
        data: Bytes,
        source: SocketAddr,
        now: Instant,
    ) -> Option<TerminationReason> {
        let messages = match CommunityMessage::decode_all(data, source) {
            Ok(messages) => messages,
            Err(e) => {
                tracing::debug!(target: "snmp_device::discovery", { snmp.source = %source, error = %e }, "ignoring undecodable datagram");
                return None;
            }
        };

        for message in messages {
            let pdu = message.pdu;
            if pdu.request_id != self.request_id {
                tracing::trace!(target: "snmp_device::discovery", { snmp.source = %source, snmp.request_id = pdu.request_id }, "ignoring unrelated response");
                continue;
            }
            if pdu.is_error() {
                tracing::warn!(target: "snmp_device::discovery", { snmp.source = %source, snmp.error_status = %pdu.error_status_enum() }, "agent answered with an error");
                continue;
            }
            let Some(vb) = pdu.varbinds.first().filter(|vb| !vb.value.is_exception()) else {
                continue;
            };

            let description = match vb.value.as_bytes() {
                Some(bytes) => String::from_utf8_lossy(bytes).into_owned(),
                None => vb.value.to_string(),
            };
            tracing::debug!(target: "snmp_device::discovery", { snmp.source = %source, description = %description }, "discovered agent");
            self.results.insert(source, description);
            self.last_found_at = Some(now);
            self.state = SessionState::Collecting;

            if self.results.len() >= self.config.max_responses {
                return Some(TerminationReason::Capped);
            }
        }
        None
    }

    /// Timer rules.
    fn check(&self, now: Instant) -> Option<TerminationReason> {
        let timeout = self.config.timeout;
        match self.last_found_at {
            Some(last) if now.saturating_duration_since(last) > timeout => {
                Some(TerminationReason::Quiet)
            }
            Some(_) => None,
            None if now.saturating_duration_since(self.started_at) > timeout => {
                Some(TerminationReason::Silence)
            }
            None => None,
        }
    }
}

/// Run one discovery session.
pub async fn discover(config: DiscoveryConfig) -> Result<DiscoveryOutcome> {
    DiscoverySession::new(config).run().await
}

/// Timer granularity: a tenth of the timeout, between 10 and 250 ms.
fn tick_period(timeout: Duration) -> Duration {
    (timeout / 10).clamp(Duration::from_millis(10), Duration::from_millis(250))
}

/// Positive request id that differs between sessions.
fn session_request_id() -> i32 {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos())
        .unwrap_or(0);
    let id = (nanos ^ std::process::id().rotate_left(16)) & 0x7fff_ffff;
    (id as i32).max(1)
}

/// Guess the device type from a sysDescr.
pub fn classify(description: &str) -> Option<DeviceType> {
    let lower = description.to_lowercase();
    if ["linux", "windows"].iter().any(|m| lower.contains(m)) {
        Some(DeviceType::Computer)
    } else if lower.contains("print") {
        Some(DeviceType::Printer)
    } else {
        None
    }
}

/// Default display name for a discovered agent.
///
/// Printers and unknown devices keep their sysDescr; other types use the
/// capitalised type name.
pub fn suggested_name(description: &str) -> String {
    match classify(description) {
        Some(device_type) if !device_type.has_rich_name() => capitalise(device_type.as_str()),
        _ => description.to_owned(),
    }
}

/// Label for a discovered agent, e.g. `"Computer (10.0.0.7)"`.
pub fn discovered_label(addr: SocketAddr, description: &str) -> String {
    format!("{} ({})", suggested_name(description), addr.ip())
}

fn capitalise(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
