//! Shared plumbing for the `snmp-poll` and `snmp-discover` binaries.

pub mod args;
pub mod output;
