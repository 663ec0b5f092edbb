//! BER encoding.

use bytes::Bytes;

use super::length::encode_length;
use super::tag;
use crate::oid::Oid;

/// Forward-building BER buffer.
///
/// Constructed values are written through closures; the content is encoded
/// into a scratch buffer first so its length is known before the header.
#[derive(Default)]
pub struct EncodeBuf {
    buf: Vec<u8>,
}

impl EncodeBuf {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write one complete TLV.
    pub fn push_tlv(&mut self, tag: u8, content: &[u8]) {
        self.buf.push(tag);
        self.buf.extend_from_slice(&encode_length(content.len()));
        self.buf.extend_from_slice(content);
    }

    /// Write a constructed value with `tag`, filled in by `f`.
    pub fn push_constructed<F>(&mut self, tag: u8, f: F)
    where
        F: FnOnce(&mut EncodeBuf),
    {
        let mut inner = EncodeBuf::new();
        f(&mut inner);
        self.push_tlv(tag, &inner.buf);
    }

    /// Write a SEQUENCE filled in by `f`.
    pub fn push_sequence<F>(&mut self, f: F)
    where
        F: FnOnce(&mut EncodeBuf),
    {
        self.push_constructed(tag::universal::SEQUENCE, f);
    }

    pub fn push_integer(&mut self, value: i32) {
        let bytes = value.to_be_bytes();
        // Minimal two's complement: drop leading octets that only repeat the sign.
        let mut start = 0;
        while start < 3 {
            let redundant = (bytes[start] == 0x00 && bytes[start + 1] & 0x80 == 0)
                || (bytes[start] == 0xFF && bytes[start + 1] & 0x80 != 0);
            if !redundant {
                break;
            }
            start += 1;
        }
        self.push_tlv(tag::universal::INTEGER, &bytes[start..]);
    }

    /// Write an unsigned value under an application tag (Counter32, Gauge32, TimeTicks, Counter64).
    pub fn push_unsigned(&mut self, tag: u8, value: u64) {
        let bytes = value.to_be_bytes();
        let skip = bytes.iter().take_while(|&&b| b == 0).count().min(7);
        let mut content = Vec::with_capacity(9);
        if bytes[skip] & 0x80 != 0 {
            content.push(0);
        }
        content.extend_from_slice(&bytes[skip..]);
        self.push_tlv(tag, &content);
    }

    pub fn push_octet_string(&mut self, data: &[u8]) {
        self.push_tlv(tag::universal::OCTET_STRING, data);
    }

    pub fn push_null(&mut self) {
        self.push_tlv(tag::universal::NULL, &[]);
    }

    pub fn push_oid(&mut self, oid: &Oid) {
        self.push_tlv(tag::universal::OBJECT_IDENTIFIER, &oid.to_ber());
    }

    pub fn push_ip_address(&mut self, addr: [u8; 4]) {
        self.push_tlv(tag::application::IP_ADDRESS, &addr);
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn finish(self) -> Bytes {
        Bytes::from(self.buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoded(f: impl FnOnce(&mut EncodeBuf)) -> Vec<u8> {
        let mut buf = EncodeBuf::new();
        f(&mut buf);
        buf.finish().to_vec()
    }

    #[test]
    fn integers_are_minimal() {
        assert_eq!(encoded(|b| b.push_integer(0)), vec![0x02, 0x01, 0x00]);
        assert_eq!(encoded(|b| b.push_integer(127)), vec![0x02, 0x01, 0x7F]);
        assert_eq!(encoded(|b| b.push_integer(128)), vec![0x02, 0x02, 0x00, 0x80]);
        assert_eq!(encoded(|b| b.push_integer(-1)), vec![0x02, 0x01, 0xFF]);
        assert_eq!(encoded(|b| b.push_integer(-129)), vec![0x02, 0x02, 0xFF, 0x7F]);
    }

    #[test]
    fn unsigned_gets_sign_pad() {
        assert_eq!(
            encoded(|b| b.push_unsigned(tag::application::COUNTER32, 0x80)),
            vec![0x41, 0x02, 0x00, 0x80]
        );
        assert_eq!(
            encoded(|b| b.push_unsigned(tag::application::GAUGE32, 0)),
            vec![0x42, 0x01, 0x00]
        );
    }

    #[test]
    fn nested_sequence() {
        let bytes = encoded(|b| {
            b.push_sequence(|b| {
                b.push_integer(1);
                b.push_null();
            })
        });
        assert_eq!(bytes, vec![0x30, 0x05, 0x02, 0x01, 0x01, 0x05, 0x00]);
    }
}
