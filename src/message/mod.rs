//! SNMP message wrapper.
//!
//! Only the community-based formats (v1 and v2c) are supported.

mod community;

pub use community::CommunityMessage;
