//! Enumerating the segregated constants of an ErgoTree.
//!
//! Trees whose header has the constant-segregation flag carry a constants
//! table before the root expression:
//!
//! ```text
//! header [size, if header & 0x08] count constant_0 .. constant_{count-1} root
//! ```
//!
//! Each constant is a type code followed by its value. Lengths, counts and
//! numeric values are little-endian VLQs. Only types whose
//! value length can be found without evaluating the tree are walked; the
//! walk stops at the first unsupported type and keeps what it has.

use crate::vlq::{decode_vlq, is_hex_stream, read_byte};

const HEADER_CONSTANT_SEGREGATION: u8 = 0x10;
const HEADER_HAS_SIZE: u8 = 0x08;

const TYPE_BOOLEAN: u8 = 0x01;
const TYPE_BYTE: u8 = 0x02;
const TYPE_SHORT: u8 = 0x03;
const TYPE_INT: u8 = 0x04;
const TYPE_LONG: u8 = 0x05;
const TYPE_BIG_INT: u8 = 0x06;
const TYPE_GROUP_ELEMENT: u8 = 0x07;
const TYPE_SIGMA_PROP: u8 = 0x08;

const COLL_BASE: u8 = 0x0c;
const NESTED_COLL_BASE: u8 = 0x18;

const PROVE_DLOG: u8 = 0xcd;
const PROVE_DH_TUPLE: u8 = 0xce;

/// Hex width of a compressed group element.
const GROUP_ELEMENT_HEX: usize = 66;

fn advance(stream: &str, position: usize, hex_len: usize) -> Option<usize> {
    let end = position.checked_add(hex_len)?;
    (end <= stream.len()).then_some(end)
}

fn sigma_prop_end(stream: &str, position: usize) -> Option<usize> {
    match read_byte(stream, position)? {
        PROVE_DLOG => advance(stream, position + 2, GROUP_ELEMENT_HEX),
        PROVE_DH_TUPLE => advance(stream, position + 2, 4 * GROUP_ELEMENT_HEX),
        _ => None,
    }
}

/// End of a value of primitive type `code` starting at `position`.
fn primitive_end(stream: &str, position: usize, code: u8) -> Option<usize> {
    match code {
        TYPE_BOOLEAN | TYPE_BYTE => advance(stream, position, 2),
        TYPE_SHORT | TYPE_INT | TYPE_LONG => decode_vlq(stream, position).map(|(end, _)| end),
        TYPE_BIG_INT => {
            let (start, len) = decode_vlq(stream, position)?;
            advance(stream, start, usize::try_from(len).ok()?.checked_mul(2)?)
        }
        TYPE_GROUP_ELEMENT => advance(stream, position, GROUP_ELEMENT_HEX),
        TYPE_SIGMA_PROP => sigma_prop_end(stream, position),
        _ => None,
    }
}

/// End of a `Coll[code]` value starting at `position`.
fn collection_end(stream: &str, position: usize, code: u8) -> Option<usize> {
    let (mut cursor, count) = decode_vlq(stream, position)?;
    let count = usize::try_from(count).ok()?;
    match code {
        TYPE_BOOLEAN => advance(stream, cursor, count.div_ceil(8) * 2),
        TYPE_BYTE => advance(stream, cursor, count.checked_mul(2)?),
        _ => {
            for _ in 0..count {
                cursor = primitive_end(stream, cursor, code)?;
            }
            Some(cursor)
        }
    }
}

fn is_primitive(code: u8) -> bool {
    (TYPE_BOOLEAN..=TYPE_SIGMA_PROP).contains(&code)
}

/// End of the constant (type code + value) starting at `position`.
fn constant_end(stream: &str, position: usize) -> Option<usize> {
    let type_code = read_byte(stream, position)?;
    let value_start = position + 2;

    if is_primitive(type_code) {
        return primitive_end(stream, value_start, type_code);
    }
    if type_code > COLL_BASE && is_primitive(type_code - COLL_BASE) {
        return collection_end(stream, value_start, type_code - COLL_BASE);
    }
    if type_code > NESTED_COLL_BASE && is_primitive(type_code - NESTED_COLL_BASE) {
        let inner = type_code - NESTED_COLL_BASE;
        let (mut cursor, count) = decode_vlq(stream, value_start)?;
        for _ in 0..count {
            cursor = collection_end(stream, cursor, inner)?;
        }
        return Some(cursor);
    }
    None
}

/// Hex encodings of the constants segregated in `tree`, in table order.
///
/// Empty when the tree does not segregate constants or is not a hex stream.
pub fn tree_constants(tree: &str) -> Vec<String> {
    if !is_hex_stream(tree) {
        return Vec::new();
    }
    let tree = tree.to_ascii_lowercase();
    let Some(header) = read_byte(&tree, 0) else {
        return Vec::new();
    };
    if header & HEADER_CONSTANT_SEGREGATION == 0 {
        return Vec::new();
    }

    let mut cursor = 2;
    if header & HEADER_HAS_SIZE != 0 {
        match decode_vlq(&tree, cursor) {
            Some((next, _)) => cursor = next,
            None => return Vec::new(),
        }
    }
    let Some((next, count)) = decode_vlq(&tree, cursor) else {
        return Vec::new();
    };
    cursor = next;

    let mut constants = Vec::new();
    for index in 0..count {
        match constant_end(&tree, cursor) {
            Some(end) => {
                constants.push(tree[cursor..end].to_string());
                cursor = end;
            }
            None => {
                tracing::trace!(index, cursor, "stopping at unsupported constant");
                break;
            }
        }
    }
    constants
}
