//! Shared test infrastructure for snmp-device.
//!
//! Provides TestAgent (in-process SNMP agent), device fixtures and a
//! discovery responder.

// Not every test binary uses every helper
#![allow(dead_code)]
#![allow(unused_imports)]

pub mod agent;
pub mod fixtures;

pub use agent::{DiscoveryResponder, TestAgent};
pub use fixtures::{host_mib, printer_mib};

use snmp_device::{Client, DeviceEndpoint, Version};
use std::time::Duration;

/// Endpoint for an agent running on loopback.
pub fn endpoint(agent: &TestAgent, version: Version) -> DeviceEndpoint {
    DeviceEndpoint::new("127.0.0.1")
        .port(agent.addr().port())
        .version(version)
        .timeout(Duration::from_millis(500))
}

/// Connected UDP client for `agent`.
pub async fn client(agent: &TestAgent, version: Version) -> Client {
    Client::connect(&endpoint(agent, version)).await.unwrap()
}
