//! SNMP protocol version.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Community-based SNMP versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Version {
    #[cfg_attr(feature = "serde", serde(rename = "1"))]
    V1,
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "2c"))]
    V2c,
}

impl Version {
    /// Wire value of the message `version` field.
    pub fn as_i32(self) -> i32 {
        match self {
            Version::V1 => 0,
            Version::V2c => 1,
        }
    }

    pub fn from_i32(value: i32) -> Option<Self> {
        match value {
            0 => Some(Version::V1),
            1 => Some(Version::V2c),
            _ => None,
        }
    }
}

impl FromStr for Version {
    type Err = Box<Error>;

    /// Accepts the configuration spellings `"1"` and `"2c"`.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "v1" => Ok(Version::V1),
            "2c" | "v2c" => Ok(Version::V2c),
            other => Err(Error::Config(format!("unsupported SNMP version {:?}", other).into()).boxed()),
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Version::V1 => f.write_str("1"),
            Version::V2c => f.write_str("2c"),
        }
    }
}
