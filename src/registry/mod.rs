//! Domain vocabulary: status codes, consumable types and classes, paper
//! inputs, capacity units and error-state flags.
//!
//! Every enumeration implements [`DomainEnum`]. Decoding is total: a raw
//! integer that matches a member yields [`Decoded::Member`], anything else
//! is passed through as [`Decoded::Raw`].
//!
//! ```
//! use snmp_device::registry::{Decoded, DomainEnum, SuppliesType};
//!
//! assert_eq!(SuppliesType::decode(3), Decoded::Member(SuppliesType::Toner));
//! assert_eq!(SuppliesType::decode(900), Decoded::Raw(900));
//! assert_eq!(SuppliesType::WasteToner.friendly_name(), "waste toner");
//! ```

/// Declare a registry enumeration.
///
/// Each member is `Variant = raw value => "symbol"`. The symbol is the
/// lowercase, underscore-separated name; [`DomainEnum::friendly_name`]
/// derives the display label from it.
macro_rules! domain_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident: $kind:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $value:expr => $symbol:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        $vis enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $crate::registry::DomainEnum for $name {
            const KIND: $crate::registry::EnumKind = $crate::registry::EnumKind::$kind;
            const MEMBERS: &'static [Self] = &[$(Self::$variant),+];

            fn as_raw(self) -> i64 {
                match self {
                    $(Self::$variant => $value),+
                }
            }

            fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $symbol),+
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(&$crate::registry::DomainEnum::friendly_name(*self))
            }
        }
    };
}

mod network;
mod printer;

pub use network::{InterfaceStatus, InterfaceType};
pub use printer::{
    CapacityLevel, CapacityUnit, PaperInputType, PrinterActionStatus, PrinterDetectedErrorState,
    PrinterDeviceStatus, SuppliesClass, SuppliesType, DEFAULT_SUPPLY_ICON, icon_for,
};

use std::fmt;

/// A closed vocabulary of integer codes.
pub trait DomainEnum: Copy + Eq + fmt::Debug + 'static {
    /// Registry entry this enumeration is filed under.
    const KIND: EnumKind;
    /// All members in declaration order.
    const MEMBERS: &'static [Self];

    fn as_raw(self) -> i64;

    /// Symbolic name, e.g. `"waste_toner"`.
    fn name(self) -> &'static str;

    fn from_raw(raw: i64) -> Option<Self> {
        Self::MEMBERS.iter().copied().find(|m| m.as_raw() == raw)
    }

    /// Member for `raw`, or `raw` itself when it is not a known code.
    fn decode(raw: i64) -> Decoded<Self> {
        Decoded::from_raw(raw)
    }

    /// Lowercase name with underscores replaced by spaces.
    fn friendly_name(self) -> String {
        friendly(self.name())
    }
}

fn friendly(symbol: &str) -> String {
    symbol.to_lowercase().replace('_', " ")
}

/// Result of decoding a raw integer against an enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decoded<E> {
    Member(E),
    Raw(i64),
}

impl<E: DomainEnum> Decoded<E> {
    pub fn from_raw(raw: i64) -> Self {
        E::from_raw(raw).map_or(Decoded::Raw(raw), Decoded::Member)
    }

    pub fn member(self) -> Option<E> {
        match self {
            Decoded::Member(m) => Some(m),
            Decoded::Raw(_) => None,
        }
    }

    pub fn raw(self) -> i64 {
        match self {
            Decoded::Member(m) => m.as_raw(),
            Decoded::Raw(raw) => raw,
        }
    }
}

impl<E: DomainEnum> fmt::Display for Decoded<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decoded::Member(m) => f.write_str(&m.friendly_name()),
            Decoded::Raw(raw) => write!(f, "{}", raw),
        }
    }
}

/// Registry entries, used where the enumeration is chosen at runtime
/// (field decoders in a schema).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnumKind {
    SuppliesClass,
    SuppliesType,
    CapacityLevel,
    CapacityUnit,
    PaperInputType,
    PrinterActionStatus,
    PrinterDeviceStatus,
    PrinterDetectedErrorState,
    InterfaceType,
    InterfaceStatus,
}

impl EnumKind {
    fn symbol_for<E: DomainEnum>(raw: i64) -> Option<&'static str> {
        E::from_raw(raw).map(E::name)
    }

    /// Symbolic name of `raw` in this enumeration.
    pub fn lookup(self, raw: i64) -> Option<&'static str> {
        match self {
            EnumKind::SuppliesClass => Self::symbol_for::<SuppliesClass>(raw),
            EnumKind::SuppliesType => Self::symbol_for::<SuppliesType>(raw),
            EnumKind::CapacityLevel => Self::symbol_for::<CapacityLevel>(raw),
            EnumKind::CapacityUnit => Self::symbol_for::<CapacityUnit>(raw),
            EnumKind::PaperInputType => Self::symbol_for::<PaperInputType>(raw),
            EnumKind::PrinterActionStatus => Self::symbol_for::<PrinterActionStatus>(raw),
            EnumKind::PrinterDeviceStatus => Self::symbol_for::<PrinterDeviceStatus>(raw),
            EnumKind::PrinterDetectedErrorState => {
                Self::symbol_for::<PrinterDetectedErrorState>(raw)
            }
            EnumKind::InterfaceType => Self::symbol_for::<InterfaceType>(raw),
            EnumKind::InterfaceStatus => Self::symbol_for::<InterfaceStatus>(raw),
        }
    }

    /// Decode `raw` into a type-erased value; unknown codes keep no name.
    pub fn decode(self, raw: i64) -> EnumValue {
        EnumValue {
            kind: self,
            raw,
            symbol: self.lookup(raw),
        }
    }

    /// Decode a flag octet string; see [`bitfield_values`].
    pub fn decode_bitfield(self, bytes: &[u8]) -> Vec<EnumValue> {
        bitfield_values(bytes).map(|raw| self.decode(raw)).collect()
    }
}

/// An enumeration value whose type is only known at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnumValue {
    pub kind: EnumKind,
    pub raw: i64,
    symbol: Option<&'static str>,
}

impl EnumValue {
    /// Symbolic name, `None` for a passed-through raw code.
    pub fn name(&self) -> Option<&'static str> {
        self.symbol
    }

    pub fn friendly_name(&self) -> Option<String> {
        self.symbol.map(friendly)
    }

    pub fn is_known(&self) -> bool {
        self.symbol.is_some()
    }

    /// Typed view, if this value belongs to `E`.
    pub fn decoded<E: DomainEnum>(&self) -> Option<Decoded<E>> {
        (self.kind == E::KIND).then(|| Decoded::from_raw(self.raw))
    }
}

impl fmt::Display for EnumValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.friendly_name() {
            Some(name) => f.write_str(&name),
            None => write!(f, "{}", self.raw),
        }
    }
}

/// Flag values set in an RFC 3805 style bit string.
///
/// Bit 0 is the most significant bit of the first octet; a set bit `n`
/// yields the flag value `1 << n`. Bits past 62 are ignored.
pub fn bitfield_values(bytes: &[u8]) -> impl Iterator<Item = i64> + '_ {
    bytes.iter().enumerate().flat_map(|(octet, &byte)| {
        (0..8usize).filter_map(move |bit| {
            let position = octet * 8 + bit;
            (byte & (0x80 >> bit) != 0 && position < 63).then(|| 1i64 << position)
        })
    })
}

/// Decode a flag octet string into the members of `E` it sets.
///
/// Set bits without a matching member are dropped.
pub fn decode_bitfield<E: DomainEnum>(bytes: &[u8]) -> Vec<E> {
    bitfield_values(bytes).filter_map(E::from_raw).collect()
}

/// Encode flags as the octet string [`decode_bitfield`] reads.
pub fn encode_bitfield<E: DomainEnum>(flags: &[E]) -> Vec<u8> {
    let positions: Vec<u32> = flags
        .iter()
        .filter_map(|f| {
            let raw = f.as_raw();
            (raw > 0 && raw.count_ones() == 1).then(|| raw.trailing_zeros())
        })
        .collect();
    let octets = positions.iter().max().map_or(1, |&p| p as usize / 8 + 1);
    let mut out = vec![0u8; octets];
    for p in positions {
        out[p as usize / 8] |= 0x80 >> (p % 8);
    }
    out
}

/// A level or capacity ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Amount {
    /// Friendly name of a sentinel such as "available".
    Named(String),
    Count(i64),
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Amount::Named(name) => f.write_str(name),
            Amount::Count(n) => write!(f, "{}", n),
        }
    }
}

impl From<Decoded<CapacityLevel>> for Amount {
    fn from(value: Decoded<CapacityLevel>) -> Self {
        match value {
            Decoded::Member(m) => Amount::Named(m.friendly_name()),
            Decoded::Raw(n) => Amount::Count(n),
        }
    }
}

/// Display form of a supply or tray `(level, unit, capacity)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelCapacity {
    pub level: Amount,
    /// `Some("sheets")` when the level is a count, `None` for a sentinel.
    pub unit: Option<&'static str>,
    pub capacity: Amount,
}

/// Pair a level with its capacity for display.
pub fn level_capacity(
    level: Decoded<CapacityLevel>,
    capacity: Decoded<CapacityLevel>,
) -> LevelCapacity {
    let unit = match level {
        Decoded::Member(_) => None,
        Decoded::Raw(_) => Some("sheets"),
    };
    LevelCapacity {
        level: level.into(),
        unit,
        capacity: capacity.into(),
    }
}
