//! Command-line argument structures for the snmp-device CLI tools.
//!
//! This module provides reusable clap argument structures for `snmp-poll`
//! and `snmp-discover`.

use clap::{Parser, ValueEnum};
use std::net::IpAddr;
use std::time::Duration;

use crate::Version;
use crate::discovery::{DEFAULT_BROADCAST, DiscoveryConfig};
use crate::endpoint::DeviceEndpoint;
use crate::schema::DeviceType;

/// SNMP version for CLI argument parsing.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum SnmpVersion {
    /// SNMPv1
    #[value(name = "1")]
    V1,
    /// SNMPv2c (default)
    #[default]
    #[value(name = "2c")]
    V2c,
}

impl From<SnmpVersion> for Version {
    fn from(v: SnmpVersion) -> Self {
        match v {
            SnmpVersion::V1 => Version::V1,
            SnmpVersion::V2c => Version::V2c,
        }
    }
}

/// Device type for CLI argument parsing.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum DeviceTypeArg {
    #[default]
    Printer,
    Computer,
}

impl From<DeviceTypeArg> for DeviceType {
    fn from(t: DeviceTypeArg) -> Self {
        match t {
            DeviceTypeArg::Printer => DeviceType::Printer,
            DeviceTypeArg::Computer => DeviceType::Computer,
        }
    }
}

/// Output format for CLI tools.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary followed by every group.
    #[default]
    Human,
    /// Tab-separated `group<TAB>row<TAB>field<TAB>value` lines for scripting.
    Raw,
}

/// Community and timing arguments shared by both tools.
#[derive(Debug, Parser)]
pub struct CommonArgs {
    /// SNMP version: 1 or 2c.
    #[arg(short = 'v', long = "snmp-version", default_value = "2c")]
    pub snmp_version: SnmpVersion,

    /// Community string.
    #[arg(short = 'c', long = "community", default_value = "public")]
    pub community: String,

    /// Agent UDP port.
    #[arg(short = 'p', long = "port", default_value = "161")]
    pub port: u16,

    /// Timeout in seconds (default 1 for polling, 2 for discovery).
    #[arg(short = 't', long = "timeout")]
    pub timeout: Option<f64>,
}

impl CommonArgs {
    /// Get the timeout as a Duration, if one was given.
    ///
    /// Negative or non-finite values are rejected.
    pub fn timeout_duration(&self) -> Result<Option<Duration>, String> {
        self.timeout
            .map(|secs| {
                Duration::try_from_secs_f64(secs)
                    .map_err(|e| format!("invalid timeout '{}': {}", secs, e))
            })
            .transpose()
    }

    /// Build an endpoint for `host` from these arguments.
    pub fn endpoint(&self, host: &str) -> Result<DeviceEndpoint, String> {
        let mut endpoint = DeviceEndpoint::new(host)
            .port(self.port)
            .community(self.community.clone())
            .version(self.snmp_version.into());
        if let Some(timeout) = self.timeout_duration()? {
            endpoint = endpoint.timeout(timeout);
        }
        Ok(endpoint)
    }
}

/// Discovery-specific arguments.
#[derive(Debug, Parser)]
pub struct DiscoverArgs {
    /// Broadcast address to probe.
    #[arg(short = 'b', long = "broadcast", default_value_t = DEFAULT_BROADCAST)]
    pub broadcast: IpAddr,

    /// Stop after this many agents have answered.
    #[arg(short = 'm', long = "max-responses", default_value = "10")]
    pub max_responses: usize,
}

impl DiscoverArgs {
    /// Build a discovery configuration; the timeout is the quiet period.
    pub fn config(&self, common: &CommonArgs) -> Result<DiscoveryConfig, String> {
        let mut config = DiscoveryConfig::default()
            .version(common.snmp_version.into())
            .community(common.community.clone())
            .port(common.port)
            .max_responses(self.max_responses)
            .broadcast(self.broadcast);
        if let Some(timeout) = common.timeout_duration()? {
            config = config.timeout(timeout);
        }
        config.validate().map_err(|e| e.to_string())?;
        Ok(config)
    }
}

/// Output control arguments.
#[derive(Debug, Parser)]
pub struct OutputArgs {
    /// Output format: human or raw.
    #[arg(short = 'O', long = "output", default_value = "human")]
    pub format: OutputFormat,

    /// Show elapsed time.
    #[arg(long = "timing")]
    pub timing: bool,

    /// Enable debug logging (snmp_device=debug).
    #[arg(short = 'd', long = "debug")]
    pub debug: bool,

    /// Enable trace logging (snmp_device=trace).
    #[arg(short = 'D', long = "trace")]
    pub trace: bool,
}

impl OutputArgs {
    /// Initialize tracing based on debug/trace flags.
    ///
    /// `RUST_LOG` is ignored; the flags alone pick the level.
    pub fn init_tracing(&self) {
        use tracing_subscriber::EnvFilter;

        let filter = if self.trace {
            "snmp_device=trace"
        } else if self.debug {
            "snmp_device=debug"
        } else {
            "snmp_device=warn"
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new(filter))
            .with_writer(std::io::stderr)
            .try_init();
    }
}
