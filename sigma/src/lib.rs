//! Sigma constant codec for the Nautilus wallet core.
//!
//! Every operation here is a pure function over a hex string. Malformed input
//! never panics and never errors: decoders degrade to "no value" (`None`, an
//! empty list, or the `(position, 0)` varint sentinel) and callers check for
//! it explicitly.

pub mod constant;
pub mod encode;
pub mod ergo_tree;
pub mod public_key;
pub mod span;
pub mod vlq;

pub use constant::{
    decode_collection_of_bytes, decode_int_constant, decode_long_constant,
    decode_tuple_of_collections, decode_typed_tuple, is_collection_of_bytes, is_eip29_attachment,
    is_tuple, parse_constant, parse_typed_tuple, type_code, FieldKind, SigmaConstant,
    TextEncoding, TypedField, COLL_BYTE_PREFIX, EIP29_MAGIC, INT_PREFIX, LONG_PREFIX,
    MIN_COLL_LENGTH, MIN_TUPLE_LENGTH, TUPLE_PREFIX,
};
pub use encode::{encode_collection_of_bytes, encode_int_constant, encode_long_constant};
pub use ergo_tree::tree_constants;
pub use public_key::{
    extract_public_keys, p2pk_public_key, public_key_from_constant, public_keys_from_ergo_tree,
    public_keys_from_registers,
};
pub use span::span_of;
pub use vlq::{
    decode_varint, decode_vlq, decode_zigzag, encode_varint, encode_vlq, encode_zigzag,
    is_hex_stream,
};
