//! Declarative field mapping.
//!
//! A [`DeviceSchema`] lists the groups polled for one kind of device. Each
//! [`GroupSpec`] is either a scalar group (one GET) or an indexed table
//! (one column-aligned walk), and each [`FieldSpec`] names an OID and the
//! [`FieldDecoder`] that turns the returned [`Value`] into a
//! [`FieldValue`].
//!
//! ```
//! use snmp_device::schema::{DeviceType, schema_for};
//!
//! let printer = schema_for(DeviceType::Printer);
//! assert!(printer.group("supplies").is_some());
//! assert!(printer.group("storage").is_none());
//! ```

mod host;
mod printer;

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::oid::Oid;
use crate::registry::{CapacityLevel, DomainEnum, EnumKind};
use crate::snapshot::{FieldValue, Record, Snapshot};
use crate::value::{Value, hex};

/// Kind of device a schema describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DeviceType {
    Printer,
    Computer,
}

impl DeviceType {
    pub const ALL: [DeviceType; 2] = [DeviceType::Printer, DeviceType::Computer];

    pub fn as_str(self) -> &'static str {
        match self {
            DeviceType::Printer => "printer",
            DeviceType::Computer => "computer",
        }
    }

    /// Whether the device's own sysDescr is a better display name than the
    /// generic type name.
    pub fn has_rich_name(self) -> bool {
        matches!(self, DeviceType::Printer)
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeviceType {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "printer" => Ok(DeviceType::Printer),
            "computer" => Ok(DeviceType::Computer),
            other => Err(Error::Config(format!("unsupported device type: {other}").into()).boxed()),
        }
    }
}

/// How a raw value becomes a [`FieldValue`].
///
/// Decoding is total. A value of the wrong shape is kept as
/// [`FieldValue::Raw`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldDecoder {
    Text,
    /// Text with surrounding whitespace removed.
    TrimmedText,
    Integer,
    Unsigned,
    Ticks,
    Enum(EnumKind),
    /// Flag octet string, bit 0 first.
    Bitfield(EnumKind),
    /// Octets rendered as `aa:bb:cc:dd:ee:ff`.
    Mac,
    /// A count or a [`CapacityLevel`] sentinel.
    Level,
}

impl FieldDecoder {
    pub fn decode(self, value: &Value) -> FieldValue {
        let decoded = match self {
            FieldDecoder::Text => value.as_bytes().map(|b| FieldValue::Text(text(b))),
            FieldDecoder::TrimmedText => value
                .as_bytes()
                .map(|b| FieldValue::Text(text(b).trim().to_owned())),
            FieldDecoder::Integer => value.as_i64().map(FieldValue::Integer),
            FieldDecoder::Unsigned => match value {
                Value::Counter64(v) => Some(FieldValue::Counter64(*v)),
                other => other.as_u64().map(FieldValue::Unsigned),
            },
            FieldDecoder::Ticks => match value {
                Value::TimeTicks(v) => Some(FieldValue::Ticks(*v)),
                _ => None,
            },
            FieldDecoder::Enum(kind) => value.as_i64().map(|raw| FieldValue::Enum(kind.decode(raw))),
            FieldDecoder::Bitfield(kind) => value
                .as_bytes()
                .map(|b| FieldValue::Flags(kind.decode_bitfield(b))),
            FieldDecoder::Mac => value.as_bytes().map(|b| FieldValue::Mac(mac(b))),
            FieldDecoder::Level => value
                .as_i64()
                .map(|raw| FieldValue::Level(CapacityLevel::decode(raw))),
        };
        decoded.unwrap_or_else(|| FieldValue::Raw(value.to_string()))
    }
}

/// Octets as text; agents often pad with NULs.
fn text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes)
        .trim_end_matches('\0')
        .to_owned()
}

fn mac(bytes: &[u8]) -> String {
    bytes
        .chunks(1)
        .map(hex)
        .collect::<Vec<_>>()
        .join(":")
}

/// One named field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub name: &'static str,
    /// Instance OID for scalars; column OID for tables.
    pub oid: Oid,
    pub decode: FieldDecoder,
}

impl FieldSpec {
    pub fn new(name: &'static str, oid: Oid, decode: FieldDecoder) -> Self {
        Self { name, oid, decode }
    }

    pub fn text(name: &'static str, oid: Oid) -> Self {
        Self::new(name, oid, FieldDecoder::Text)
    }

    pub fn integer(name: &'static str, oid: Oid) -> Self {
        Self::new(name, oid, FieldDecoder::Integer)
    }

    pub fn enumeration(name: &'static str, oid: Oid, kind: EnumKind) -> Self {
        Self::new(name, oid, FieldDecoder::Enum(kind))
    }
}

/// How a group is fetched.
#[derive(Debug, Clone, PartialEq)]
pub enum GroupMode {
    /// One GET of every field.
    Scalar,
    /// A walk of every column. `index` is walked as a leading column and
    /// its value keys the rows.
    IndexedTable { index: Option<FieldSpec> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct GroupSpec {
    pub name: &'static str,
    pub mode: GroupMode,
    pub fields: Vec<FieldSpec>,
}

impl GroupSpec {
    pub fn scalar(name: &'static str, fields: Vec<FieldSpec>) -> Self {
        Self {
            name,
            mode: GroupMode::Scalar,
            fields,
        }
    }

    pub fn table(name: &'static str, index: Option<FieldSpec>, fields: Vec<FieldSpec>) -> Self {
        Self {
            name,
            mode: GroupMode::IndexedTable { index },
            fields,
        }
    }
}

/// Extra fields to fetch once the groups are known, plus values the
/// vendor step could already derive. Fetched values win over `base`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VendorLookup {
    pub fields: Vec<FieldSpec>,
    pub base: Record,
}

/// Vendor-conditional step run after the groups are fetched.
pub type VendorStep = fn(&Snapshot) -> VendorLookup;

/// Everything polled for one [`DeviceType`].
#[derive(Debug, Clone)]
pub struct DeviceSchema {
    pub device_type: DeviceType,
    pub groups: Vec<GroupSpec>,
    pub vendor_step: Option<VendorStep>,
}

impl DeviceSchema {
    pub fn group(&self, name: &str) -> Option<&GroupSpec> {
        self.groups.iter().find(|g| g.name == name)
    }
}

/// Schema for a device type.
pub fn schema_for(device_type: DeviceType) -> DeviceSchema {
    match device_type {
        DeviceType::Printer => printer::schema(),
        DeviceType::Computer => host::schema(),
    }
}

/// `entry.column.tail..`, the usual shape of a table column OID.
fn column(entry: &Oid, column: u32, tail: &[u32]) -> Oid {
    tail.iter()
        .fold(entry.child(column), |oid, &arc| oid.child(arc))
}
