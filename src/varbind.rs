//! Variable binding (VarBind) type.

use crate::ber::{Decoder, EncodeBuf};
use crate::error::Result;
use crate::oid::Oid;
use crate::value::Value;

/// One `(OID, value)` pair.
#[derive(Debug, Clone, PartialEq)]
pub struct VarBind {
    pub oid: Oid,
    pub value: Value,
}

impl VarBind {
    pub fn new(oid: Oid, value: Value) -> Self {
        Self { oid, value }
    }

    /// Binding with a NULL value, as sent in GET and GETNEXT requests.
    pub fn null(oid: Oid) -> Self {
        Self {
            oid,
            value: Value::Null,
        }
    }
}

/// Encode `SEQUENCE OF VarBind`.
pub fn encode_varbind_list(buf: &mut EncodeBuf, varbinds: &[VarBind]) {
    buf.push_sequence(|buf| {
        for vb in varbinds {
            buf.push_sequence(|buf| {
                buf.push_oid(&vb.oid);
                vb.value.encode(buf);
            });
        }
    });
}

/// Decode `SEQUENCE OF VarBind`.
pub fn decode_varbind_list(decoder: &mut Decoder) -> Result<Vec<VarBind>> {
    let mut list = decoder.read_sequence()?;
    let mut varbinds = Vec::new();
    while !list.is_empty() {
        let mut pair = list.read_sequence()?;
        let oid = pair.read_oid()?;
        let value = Value::decode(&mut pair)?;
        varbinds.push(VarBind { oid, value });
    }
    Ok(varbinds)
}
