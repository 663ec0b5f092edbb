//! Object Identifier (OID) type.
//!
//! OIDs are stored as `SmallVec<[u32; 16]>`, so the MIB-2 and Printer-MIB
//! OIDs used by the device schemas never touch the heap.

use std::fmt;
use std::str::FromStr;

use smallvec::SmallVec;

use crate::error::{Error, Result};

/// Maximum number of sub-identifiers (RFC 2578 Section 3.5).
pub const MAX_OID_LEN: usize = 128;

/// Object Identifier.
///
/// Ordering is lexicographic over the arcs, which is the order agents use
/// to answer GETNEXT.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Oid {
    arcs: SmallVec<[u32; 16]>,
}

impl Oid {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(arcs: impl IntoIterator<Item = u32>) -> Self {
        Self {
            arcs: arcs.into_iter().collect(),
        }
    }

    pub fn from_slice(arcs: &[u32]) -> Self {
        Self {
            arcs: SmallVec::from_slice(arcs),
        }
    }

    /// Parse dotted notation, e.g. `"1.3.6.1.2.1.1.1.0"`.
    ///
    /// A leading dot is accepted.
    ///
    /// ```
    /// use snmp_device::Oid;
    ///
    /// let oid = Oid::parse(".1.3.6.1.2.1.1.5.0").unwrap();
    /// assert_eq!(oid.to_string(), "1.3.6.1.2.1.1.5.0");
    /// assert!(Oid::parse("1.3.x").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        let trimmed = s.strip_prefix('.').unwrap_or(s);
        if trimmed.is_empty() {
            return Ok(Self::empty());
        }
        trimmed
            .split('.')
            .map(|part| part.parse::<u32>())
            .collect::<std::result::Result<SmallVec<[u32; 16]>, _>>()
            .map(|arcs| Self { arcs })
            .map_err(|_| Error::InvalidOid(s.into()).boxed())
    }

    pub fn arcs(&self) -> &[u32] {
        &self.arcs
    }

    pub fn len(&self) -> usize {
        self.arcs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arcs.is_empty()
    }

    /// True when `self` lies in the subtree rooted at `prefix` (or equals it).
    pub fn starts_with(&self, prefix: &Oid) -> bool {
        self.arcs.starts_with(&prefix.arcs)
    }

    /// Append one arc.
    pub fn child(&self, arc: u32) -> Oid {
        let mut arcs = self.arcs.clone();
        arcs.push(arc);
        Oid { arcs }
    }

    /// The last sub-identifier, which for single-index tables is the row index.
    pub fn last_arc(&self) -> Option<u32> {
        self.arcs.last().copied()
    }

    /// Arcs after `prefix`, if `self` lies under it.
    pub fn suffix_after(&self, prefix: &Oid) -> Option<&[u32]> {
        self.starts_with(prefix).then(|| &self.arcs[prefix.len()..])
    }

    /// BER content octets (X.690 8.19): first two arcs folded as `a*40+b`,
    /// then base-128 sub-identifiers.
    pub fn to_ber(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.arcs.len() + 4);
        let (first, rest) = match self.arcs.as_slice() {
            [] => return out,
            [a] => (a.saturating_mul(40), &[][..]),
            [a, b, rest @ ..] => (a.saturating_mul(40).saturating_add(*b), rest),
        };
        push_subidentifier(&mut out, first);
        for &arc in rest {
            push_subidentifier(&mut out, arc);
        }
        out
    }

    /// Decode BER content octets.
    pub fn from_ber(data: &[u8]) -> Result<Self> {
        let mut arcs = SmallVec::new();
        let mut value: u32 = 0;
        let mut pending = false;
        for &byte in data {
            if value > (u32::MAX >> 7) {
                return Err(Error::InvalidOid("sub-identifier overflow".into()).boxed());
            }
            value = (value << 7) | u32::from(byte & 0x7F);
            pending = byte & 0x80 != 0;
            if pending {
                continue;
            }
            if arcs.is_empty() {
                let first = value.min(80) / 40;
                arcs.push(first);
                arcs.push(value - first * 40);
            } else {
                arcs.push(value);
            }
            if arcs.len() > MAX_OID_LEN {
                return Err(Error::InvalidOid("too many sub-identifiers".into()).boxed());
            }
            value = 0;
        }
        if pending {
            return Err(Error::InvalidOid("truncated sub-identifier".into()).boxed());
        }
        Ok(Self { arcs })
    }
}

fn push_subidentifier(out: &mut Vec<u8>, value: u32) {
    let mut groups = [0u8; 5];
    let mut n = 0;
    let mut v = value;
    loop {
        groups[n] = (v & 0x7F) as u8;
        n += 1;
        v >>= 7;
        if v == 0 {
            break;
        }
    }
    for i in (0..n).rev() {
        let more = if i > 0 { 0x80 } else { 0 };
        out.push(groups[i] | more);
    }
}

impl fmt::Display for Oid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for arc in &self.arcs {
            if !first {
                f.write_str(".")?;
            }
            write!(f, "{}", arc)?;
            first = false;
        }
        Ok(())
    }
}

impl fmt::Debug for Oid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Oid({})", self)
    }
}

impl FromStr for Oid {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl From<&[u32]> for Oid {
    fn from(arcs: &[u32]) -> Self {
        Self::from_slice(arcs)
    }
}

/// Build an [`Oid`] from literal arcs.
///
/// ```
/// use snmp_device::oid;
///
/// let sys_descr = oid!(1, 3, 6, 1, 2, 1, 1, 1, 0);
/// assert_eq!(sys_descr.len(), 9);
/// ```
#[macro_export]
macro_rules! oid {
    ($($arc:expr),* $(,)?) => {
        $crate::oid::Oid::from_slice(&[$($arc),*])
    };
}
