//! # snmp-device
//!
//! Async SNMP poller for printers and hosts.
//!
//! ## Features
//!
//! - SNMPv1 and v2c over UDP, built on Tokio
//! - Declarative device schemas: scalar groups, indexed tables and
//!   vendor-specific lookups
//! - Typed snapshots with Printer-MIB and IF-MIB vocabularies
//! - Broadcast discovery of agents on the local network
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use snmp_device::{DeviceEndpoint, DeviceType, poll, presentation};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> snmp_device::Result<()> {
//!     let endpoint = DeviceEndpoint::new("192.168.1.20")
//!         .community("public")
//!         .timeout(Duration::from_secs(2));
//!
//!     let snapshot = poll(&endpoint, DeviceType::Printer).await?;
//!     println!("status: {:?}", presentation::printer_status(&snapshot));
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Discovery
//!
//! ```rust,no_run
//! use snmp_device::discovery::{DiscoveryConfig, discover, discovered_label};
//!
//! #[tokio::main]
//! async fn main() -> snmp_device::Result<()> {
//!     let outcome = discover(DiscoveryConfig::default()).await?;
//!     for (addr, description) in &outcome.results {
//!         println!("{}", discovered_label(*addr, description));
//!     }
//!     Ok(())
//! }
//! ```

pub mod ber;
pub mod client;
pub mod discovery;
pub mod endpoint;
pub mod error;
pub mod message;
pub mod oid;
pub mod pdu;
pub mod presentation;
pub mod registry;
pub mod retriever;
pub mod schema;
pub mod snapshot;
pub mod transport;
pub mod value;
pub mod varbind;
pub mod version;

pub(crate) mod util;

#[cfg(feature = "cli")]
pub mod cli;

// Re-exports for convenience
pub use client::{Client, ClientConfig};
pub use discovery::{DiscoveryConfig, DiscoveryOutcome, TerminationReason, discover};
pub use endpoint::DeviceEndpoint;
pub use error::{Error, ErrorStatus, Result};
pub use oid::Oid;
pub use retriever::{poll, retrieve};
pub use schema::{DeviceSchema, DeviceType, FieldDecoder, FieldSpec, GroupSpec, schema_for};
pub use snapshot::{FieldValue, GroupResult, Record, RowIndex, Snapshot};
pub use transport::{Transport, UdpTransport};
pub use value::Value;
pub use varbind::VarBind;
pub use version::Version;

/// Type alias for a client using a dedicated UDP socket.
pub type UdpClient = Client<UdpTransport>;
