//! Typed device snapshot.
//!
//! A [`Snapshot`] is what one poll produces: every group of the device
//! schema, keyed by group name, plus the vendor-specific
//! `additional_info` record. Scalar groups hold one [`Record`]; table
//! groups hold records keyed by [`RowIndex`].

use std::collections::BTreeMap;
use std::collections::btree_map;
use std::fmt;

use crate::registry::{CapacityLevel, Decoded, DomainEnum, EnumValue};
use crate::schema::DeviceType;
use crate::value::Value;

/// A decoded field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
    Unsigned(u64),
    Counter64(u64),
    /// sysUpTime style hundredths of a second.
    Ticks(u32),
    Enum(EnumValue),
    /// Flags set in a bit string, in bit order.
    Flags(Vec<EnumValue>),
    /// Hardware address as `aa:bb:cc:dd:ee:ff`.
    Mac(String),
    /// A supply or tray level: a count or a sentinel.
    Level(Decoded<CapacityLevel>),
    /// A value that did not have the shape its decoder expected.
    Raw(String),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) | FieldValue::Mac(s) => Some(s),
            _ => None,
        }
    }

    /// Integer view; enums and levels give their raw code.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(v) => Some(*v),
            FieldValue::Unsigned(v) | FieldValue::Counter64(v) => i64::try_from(*v).ok(),
            FieldValue::Ticks(v) => Some(i64::from(*v)),
            FieldValue::Enum(e) => Some(e.raw),
            FieldValue::Level(level) => Some(level.raw()),
            _ => None,
        }
    }

    pub fn as_enum(&self) -> Option<&EnumValue> {
        match self {
            FieldValue::Enum(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_flags(&self) -> Option<&[EnumValue]> {
        match self {
            FieldValue::Flags(flags) => Some(flags),
            _ => None,
        }
    }

    pub fn as_level(&self) -> Option<Decoded<CapacityLevel>> {
        match self {
            FieldValue::Level(level) => Some(*level),
            FieldValue::Integer(v) => Some(CapacityLevel::decode(*v)),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) | FieldValue::Mac(s) | FieldValue::Raw(s) => f.write_str(s),
            FieldValue::Integer(v) => write!(f, "{}", v),
            FieldValue::Unsigned(v) | FieldValue::Counter64(v) => write!(f, "{}", v),
            FieldValue::Ticks(v) => write!(f, "{}", Value::TimeTicks(*v)),
            FieldValue::Enum(e) => write!(f, "{}", e),
            FieldValue::Flags(flags) => {
                for (i, flag) in flags.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", flag)?;
                }
                Ok(())
            }
            FieldValue::Level(level) => write!(f, "{}", level),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_owned())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        FieldValue::Integer(v)
    }
}

/// Key of a table row.
///
/// Numbers sort before text.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RowIndex {
    Number(i64),
    Text(String),
}

impl RowIndex {
    /// Row key taken from a decoded index field.
    pub fn from_field(value: &FieldValue) -> Self {
        match value.as_i64() {
            Some(n) if !matches!(value, FieldValue::Text(_)) => RowIndex::Number(n),
            _ => RowIndex::Text(value.to_string()),
        }
    }
}

impl fmt::Display for RowIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowIndex::Number(n) => write!(f, "{}", n),
            RowIndex::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for RowIndex {
    fn from(n: i64) -> Self {
        RowIndex::Number(n)
    }
}

impl From<&str> for RowIndex {
    fn from(s: &str) -> Self {
        RowIndex::Text(s.to_owned())
    }
}

/// Named fields of one scalar group or one table row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: BTreeMap<String, FieldValue>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Text of `name`, if present and textual.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.field(name).and_then(FieldValue::as_text)
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(name.into(), value.into());
    }

    pub fn remove(&mut self, name: &str) -> Option<FieldValue> {
        self.fields.remove(name)
    }

    /// Copy every field of `other` over this record; `other` wins.
    pub fn merge(&mut self, other: Record) {
        self.fields.extend(other.fields);
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, FieldValue> {
        self.fields.iter()
    }
}

impl<K: Into<String>> FromIterator<(K, FieldValue)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, FieldValue)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

impl IntoIterator for Record {
    type Item = (String, FieldValue);
    type IntoIter = btree_map::IntoIter<String, FieldValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

impl<'a> IntoIterator for &'a Record {
    type Item = (&'a String, &'a FieldValue);
    type IntoIter = btree_map::Iter<'a, String, FieldValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

/// Rows of a table group.
pub type Table = BTreeMap<RowIndex, Record>;

/// Result of fetching one group.
#[derive(Debug, Clone, PartialEq)]
pub enum GroupResult {
    Scalar(Record),
    Table(Table),
}

/// Everything one poll learned about a device.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub device_type: DeviceType,
    pub groups: BTreeMap<String, GroupResult>,
    /// Vendor metadata: manufacturer, model, sw_version.
    pub additional_info: Record,
}

impl Snapshot {
    pub fn new(device_type: DeviceType) -> Self {
        Self {
            device_type,
            groups: BTreeMap::new(),
            additional_info: Record::new(),
        }
    }

    pub fn group(&self, name: &str) -> Option<&GroupResult> {
        self.groups.get(name)
    }

    /// Record of a scalar group.
    pub fn scalar(&self, name: &str) -> Option<&Record> {
        match self.group(name)? {
            GroupResult::Scalar(record) => Some(record),
            GroupResult::Table(_) => None,
        }
    }

    /// Rows of a table group.
    pub fn table(&self, name: &str) -> Option<&Table> {
        match self.group(name)? {
            GroupResult::Table(rows) => Some(rows),
            GroupResult::Scalar(_) => None,
        }
    }

    /// Field of a scalar group.
    pub fn field(&self, group: &str, name: &str) -> Option<&FieldValue> {
        self.scalar(group)?.field(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::EnumKind;

    #[test]
    fn row_index_orders_numbers_first() {
        let mut keys = vec![
            RowIndex::from("eth0"),
            RowIndex::from(3),
            RowIndex::from(1),
            RowIndex::from("at0"),
        ];
        keys.sort();
        assert_eq!(
            keys,
            vec![
                RowIndex::Number(1),
                RowIndex::Number(3),
                RowIndex::Text("at0".into()),
                RowIndex::Text("eth0".into()),
            ]
        );
    }

    #[test]
    fn row_index_from_fields() {
        assert_eq!(RowIndex::from_field(&FieldValue::Integer(7)), RowIndex::Number(7));
        assert_eq!(
            RowIndex::from_field(&FieldValue::Text("lo".into())),
            RowIndex::Text("lo".into())
        );
    }

    #[test]
    fn merge_prefers_incoming() {
        let mut base: Record = [
            ("manufacturer", FieldValue::from("Panasonic")),
            ("model", FieldValue::from("old")),
        ]
        .into_iter()
        .collect();
        base.merge([("model", FieldValue::from("new"))].into_iter().collect());

        assert_eq!(base.text("manufacturer"), Some("Panasonic"));
        assert_eq!(base.text("model"), Some("new"));
        assert_eq!(base.len(), 2);
    }

    #[test]
    fn display_of_flags_and_ticks() {
        let flags = FieldValue::Flags(vec![
            EnumKind::PrinterDetectedErrorState.decode(8),
            EnumKind::PrinterDetectedErrorState.decode(16),
        ]);
        assert_eq!(flags.to_string(), "no toner, door open");
        assert_eq!(FieldValue::Ticks(8_640_000).to_string(), "1d 0h 0m 0s");
    }

    #[test]
    fn snapshot_accessors() {
        let mut snapshot = Snapshot::new(DeviceType::Printer);
        let mut info = Record::new();
        info.insert("model", "LaserJet");
        snapshot.groups.insert("info".into(), GroupResult::Scalar(info));
        snapshot
            .groups
            .insert("supplies".into(), GroupResult::Table(Table::new()));

        assert_eq!(
            snapshot.field("info", "model").and_then(FieldValue::as_text),
            Some("LaserJet")
        );
        assert!(snapshot.table("info").is_none());
        assert!(snapshot.table("supplies").unwrap().is_empty());
        assert!(snapshot.scalar("missing").is_none());
    }
}
