//! Device endpoint configuration.

use std::net::SocketAddr;
use std::time::Duration;

use crate::error::{Error, Result};
use crate::version::Version;

/// Default community string.
pub const DEFAULT_COMMUNITY: &str = "public";
/// Default agent port.
pub const DEFAULT_PORT: u16 = 161;
/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(1);

/// Where and how to reach one agent.
///
/// ```
/// use snmp_device::{DeviceEndpoint, Version};
/// use std::time::Duration;
///
/// let endpoint = DeviceEndpoint::new("printer.lan")
///     .version(Version::V1)
///     .timeout(Duration::from_secs(3));
/// assert_eq!(endpoint.port, 161);
/// assert_eq!(endpoint.community, "public");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DeviceEndpoint {
    /// Hostname or IP literal.
    pub host: String,
    pub port: u16,
    pub community: String,
    pub version: Version,
    pub timeout: Duration,
}

impl DeviceEndpoint {
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: DEFAULT_PORT,
            community: DEFAULT_COMMUNITY.to_owned(),
            version: Version::default(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn community(mut self, community: impl Into<String>) -> Self {
        self.community = community.into();
        self
    }

    pub fn version(mut self, version: Version) -> Self {
        self.version = version;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Resolve `host:port` to the first address returned.
    pub async fn resolve(&self) -> Result<SocketAddr> {
        if self.host.is_empty() {
            return Err(Error::Config("empty host".into()).boxed());
        }
        let mut addrs = tokio::net::lookup_host((self.host.as_str(), self.port))
            .await
            .map_err(|e| {
                tracing::debug!(target: "snmp_device::endpoint", { snmp.host = %self.host, error = %e }, "resolution failed");
                Error::Config(format!("cannot resolve {}: {}", self.host, e).into()).boxed()
            })?;
        addrs.next().ok_or_else(|| {
            Error::Config(format!("no address for {}", self.host).into()).boxed()
        })
    }
}

impl Default for DeviceEndpoint {
    fn default() -> Self {
        Self::new("localhost")
    }
}
