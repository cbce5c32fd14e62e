//! Serializing the few constants a transaction needs to emit.

use crate::constant::{COLL_BYTE_PREFIX, INT_PREFIX, LONG_PREFIX};
use crate::vlq::{encode_varint, encode_vlq, encode_zigzag};

/// `Coll[Byte]` constant holding `bytes`.
pub fn encode_collection_of_bytes(bytes: &[u8]) -> String {
    format!(
        "{COLL_BYTE_PREFIX}{}{}",
        encode_varint(bytes.len() as u64),
        hex::encode(bytes)
    )
}

/// `Int` constant.
pub fn encode_int_constant(value: i32) -> String {
    format!("{INT_PREFIX}{}", encode_vlq(encode_zigzag(i64::from(value))))
}

/// `Long` constant.
pub fn encode_long_constant(value: i64) -> String {
    format!("{LONG_PREFIX}{}", encode_vlq(encode_zigzag(value)))
}
