//! Recognising and decoding serialized sigma constants.
//!
//! Three shapes are understood:
//! - a collection of bytes (`0e` + length + bytes)
//! - a pair whose elements are collections of bytes (`3c 0e 0e` + spans)
//! - a pair with declared field kinds (`3c` + one type slot per field + values)

use std::fmt;
use std::str::FromStr;

use crate::span::span_of;
use crate::vlq::{decode_varint, decode_vlq, decode_zigzag, is_hex_stream, read_byte};

/// Type prefix of a `Coll[Byte]` constant.
pub const COLL_BYTE_PREFIX: &str = "0e";
/// Type prefix of a pair constant.
pub const TUPLE_PREFIX: &str = "3c";
/// Type prefix of an `Int` constant.
pub const INT_PREFIX: &str = "04";
/// Type prefix of a `Long` constant.
pub const LONG_PREFIX: &str = "05";

pub const MIN_COLL_LENGTH: usize = 4;
pub const MIN_TUPLE_LENGTH: usize = 4;

/// Element types a pair can declare; markers beyond this are data.
const PAIR_ARITY: usize = 2;

pub const EIP29_MAGIC: &str = "3c0e400e03505250";

/// How a decoded byte span is rendered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextEncoding {
    #[default]
    Utf8,
    Hex,
}

/// Declared kind of a typed tuple field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Int,
    Utf8,
    Hex,
}

impl FromStr for FieldKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "int" => Ok(Self::Int),
            "utf-8" | "utf8" => Ok(Self::Utf8),
            "hex" => Ok(Self::Hex),
            other => Err(format!("unknown field kind: {other}")),
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Int => "int",
            Self::Utf8 => "utf-8",
            Self::Hex => "hex",
        })
    }
}

/// One decoded field of a typed tuple.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypedField {
    pub kind: FieldKind,
    pub value: String,
}

/// A decoded constant, tagged by shape.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SigmaConstant {
    Bytes(Vec<u8>),
    Tuple(Vec<SigmaConstant>),
    TypedTuple(Vec<TypedField>),
}

pub fn is_collection_of_bytes(s: &str) -> bool {
    !s.is_empty() && s.starts_with(COLL_BYTE_PREFIX) && s.len() >= MIN_COLL_LENGTH
}

pub fn is_tuple(s: &str) -> bool {
    !s.is_empty() && s.starts_with(TUPLE_PREFIX) && s.len() >= MIN_TUPLE_LENGTH
}

/// True iff the register holds an EIP-29 attachment.
pub fn is_eip29_attachment(register: &str) -> bool {
    !register.is_empty() && register.starts_with(EIP29_MAGIC)
}

fn render(stream: &str, start: usize, hex_len: usize, encoding: TextEncoding) -> Option<String> {
    let raw = stream.get(start..start + hex_len)?;
    match encoding {
        TextEncoding::Hex => Some(raw.to_lowercase()),
        TextEncoding::Utf8 => {
            let bytes = hex::decode(raw).ok()?;
            Some(String::from_utf8_lossy(&bytes).into_owned())
        }
    }
}

fn decode_span_at(stream: &str, position: usize, encoding: TextEncoding) -> Option<String> {
    let (start, hex_len) = span_of(stream, position);
    if hex_len == 0 {
        return None;
    }
    render(stream, start, hex_len, encoding)
}

/// Decode a `Coll[Byte]` constant; `None` when it is not one or is empty.
pub fn decode_collection_of_bytes(s: &str, encoding: TextEncoding) -> Option<String> {
    if !is_collection_of_bytes(s) || !is_hex_stream(s) {
        return None;
    }
    decode_span_at(s, COLL_BYTE_PREFIX.len(), encoding)
}

/// Decode a pair of `Coll[Byte]` elements.
///
/// Returns an empty vector when `s` is not a tuple or has no decodable
/// element. Element type markers directly after the tuple prefix are skipped;
/// if there are none, data starts right after the prefix.
///
/// At most two markers are skipped, one per pair element. A third `0e`
/// is the first element's length (14 bytes), not another marker.
pub fn decode_tuple_of_collections(s: &str, encoding: TextEncoding) -> Vec<Option<String>> {
    if !is_tuple(s) || !is_hex_stream(s) {
        return Vec::new();
    }

    let mut cursor = TUPLE_PREFIX.len();
    let mut markers = 0;
    while markers < PAIR_ARITY && s[cursor..].starts_with(COLL_BYTE_PREFIX) {
        cursor += COLL_BYTE_PREFIX.len();
        markers += 1;
    }

    let mut output = Vec::new();
    loop {
        let (start, hex_len) = span_of(s, cursor);
        if hex_len == 0 {
            break;
        }
        output.push(render(s, start, hex_len, encoding));
        cursor = start + hex_len;
    }
    output
}

/// Decode a tuple whose field kinds are declared by the caller.
///
/// The cursor starts after the prefix plus one two-character type slot per
/// declared kind. Decoding stops at the first field that yields no data;
/// declared kinds past the encoded fields are never reached.
pub fn decode_typed_tuple(s: &str, kinds: &[FieldKind]) -> Vec<String> {
    if !is_tuple(s) || !is_hex_stream(s) {
        return Vec::new();
    }

    let mut output = Vec::new();
    let mut cursor = TUPLE_PREFIX.len() + 2 * kinds.len();

    for kind in kinds {
        match kind {
            FieldKind::Int => {
                let (next, value) = decode_varint(s, cursor);
                if next == cursor {
                    break;
                }
                output.push(decode_zigzag(value).to_string());
                cursor = next;
            }
            FieldKind::Utf8 | FieldKind::Hex => {
                let (start, hex_len) = span_of(s, cursor);
                if hex_len == 0 {
                    break;
                }
                let encoding = if *kind == FieldKind::Hex {
                    TextEncoding::Hex
                } else {
                    TextEncoding::Utf8
                };
                match render(s, start, hex_len, encoding) {
                    Some(value) => output.push(value),
                    None => break,
                }
                cursor = start + hex_len;
            }
        }
    }
    output
}

/// Parse a constant into [`SigmaConstant::Bytes`] or [`SigmaConstant::Tuple`].
pub fn parse_constant(s: &str) -> Option<SigmaConstant> {
    if is_collection_of_bytes(s) {
        let raw = decode_collection_of_bytes(s, TextEncoding::Hex)?;
        return hex::decode(raw).ok().map(SigmaConstant::Bytes);
    }
    if is_tuple(s) {
        let elements = decode_tuple_of_collections(s, TextEncoding::Hex)
            .into_iter()
            .flatten()
            .filter_map(|raw| hex::decode(raw).ok())
            .map(SigmaConstant::Bytes)
            .collect();
        return Some(SigmaConstant::Tuple(elements));
    }
    None
}

/// Parse a typed tuple into [`SigmaConstant::TypedTuple`].
pub fn parse_typed_tuple(s: &str, kinds: &[FieldKind]) -> Option<SigmaConstant> {
    if !is_tuple(s) {
        return None;
    }
    let fields = decode_typed_tuple(s, kinds)
        .into_iter()
        .zip(kinds)
        .map(|(value, kind)| TypedField { kind: *kind, value })
        .collect();
    Some(SigmaConstant::TypedTuple(fields))
}

fn decode_integer(s: &str, prefix: &str) -> Option<i64> {
    if !s.starts_with(prefix) || !is_hex_stream(s) {
        return None;
    }
    let (_, value) = decode_vlq(s, prefix.len())?;
    Some(decode_zigzag(value))
}

/// Decode an `Int` constant (`04` + zig-zag VLQ).
pub fn decode_int_constant(s: &str) -> Option<i32> {
    decode_integer(s, INT_PREFIX).and_then(|v| i32::try_from(v).ok())
}

/// Decode a `Long` constant (`05` + zig-zag VLQ).
pub fn decode_long_constant(s: &str) -> Option<i64> {
    decode_integer(s, LONG_PREFIX)
}

/// First byte of a constant, i.e. its type code.
pub fn type_code(s: &str) -> Option<u8> {
    read_byte(s, 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const NFT: &str = "0e034e4654";

    #[test]
    fn recognises_shapes() {
        assert!(is_collection_of_bytes(NFT));
        assert!(!is_collection_of_bytes("0e0"));
        assert!(!is_collection_of_bytes(""));
        assert!(is_tuple("3c0e0e00"));
        assert!(!is_tuple("3c0"));
        assert!(!is_tuple(NFT));
    }

    #[test]
    fn decodes_collection_as_text_and_hex() {
        assert_eq!(
            decode_collection_of_bytes(NFT, TextEncoding::Utf8).as_deref(),
            Some("NFT")
        );
        assert_eq!(
            decode_collection_of_bytes(NFT, TextEncoding::Hex).as_deref(),
            Some("4e4654")
        );
    }

    #[test]
    fn empty_collection_is_none() {
        assert_eq!(decode_collection_of_bytes("0e00", TextEncoding::Utf8), None);
    }

    #[test]
    fn odd_or_non_hex_is_none() {
        assert_eq!(decode_collection_of_bytes("0e034e465", TextEncoding::Utf8), None);
        assert_eq!(decode_collection_of_bytes("0e03zz4654", TextEncoding::Utf8), None);
    }

    #[test]
    fn tuple_of_two_collections() {
        // (Coll[Byte] "ab", Coll[Byte] "cd")
        let s = "3c0e0e026162026364";
        assert_eq!(
            decode_tuple_of_collections(s, TextEncoding::Utf8),
            vec![Some("ab".to_string()), Some("cd".to_string())]
        );
    }

    #[test]
    fn tuple_without_markers_starts_after_prefix() {
        assert_eq!(
            decode_tuple_of_collections("3c026162", TextEncoding::Utf8),
            vec![Some("ab".to_string())]
        );
    }

    #[test]
    fn tuple_length_byte_equal_to_marker_is_data() {
        // Second element is 14 bytes long: its length byte is 0x0e.
        let second = "41".repeat(14);
        let s = format!("3c0e0e0e{second}");
        assert_eq!(
            decode_tuple_of_collections(&s, TextEncoding::Utf8),
            vec![Some("A".repeat(14))]
        );
    }

    #[test]
    fn tuple_with_no_elements_is_empty() {
        assert!(decode_tuple_of_collections("3c0e0e00", TextEncoding::Utf8).is_empty());
        assert!(decode_tuple_of_collections(NFT, TextEncoding::Utf8).is_empty());
    }

    #[test]
    fn typed_tuple_int_and_text() {
        // (Int 1, Coll[Byte] "ab")
        assert_eq!(
            decode_typed_tuple("3c040e02026162", &[FieldKind::Int, FieldKind::Utf8]),
            vec!["1".to_string(), "ab".to_string()]
        );
    }

    #[test]
    fn typed_tuple_negative_int_and_hex() {
        // (Int -3, Coll[Byte] 0xbeef)
        assert_eq!(
            decode_typed_tuple("3c040e0502beef", &[FieldKind::Int, FieldKind::Hex]),
            vec!["-3".to_string(), "beef".to_string()]
        );
    }

    #[test]
    fn typed_tuple_stops_at_end_of_data() {
        // Three kinds declared, stream ends after the first field.
        assert_eq!(
            decode_typed_tuple(
                "3c040e0e02",
                &[FieldKind::Int, FieldKind::Utf8, FieldKind::Utf8]
            ),
            vec!["1".to_string()]
        );
    }

    #[test]
    fn parse_constant_shapes() {
        assert_eq!(
            parse_constant(NFT),
            Some(SigmaConstant::Bytes(b"NFT".to_vec()))
        );
        assert_eq!(
            parse_constant("3c0e0e026162026364"),
            Some(SigmaConstant::Tuple(vec![
                SigmaConstant::Bytes(b"ab".to_vec()),
                SigmaConstant::Bytes(b"cd".to_vec()),
            ]))
        );
        assert_eq!(parse_constant("0402"), None);
    }

    #[test]
    fn parse_typed_tuple_tags_fields() {
        let parsed = parse_typed_tuple("3c040e02026162", &[FieldKind::Int, FieldKind::Utf8]);
        assert_eq!(
            parsed,
            Some(SigmaConstant::TypedTuple(vec![
                TypedField {
                    kind: FieldKind::Int,
                    value: "1".into()
                },
                TypedField {
                    kind: FieldKind::Utf8,
                    value: "ab".into()
                },
            ]))
        );
    }

    #[test]
    fn integer_constants() {
        assert_eq!(decode_int_constant("0402"), Some(1));
        assert_eq!(decode_long_constant("0501"), Some(-1));
        assert_eq!(decode_long_constant("05"), None);
        assert_eq!(decode_long_constant("0402"), None);
    }

    #[test]
    fn multibyte_integer_constants_read_low_group_first() {
        // Fee-box rate register holding 1_000_000 as serialized on chain.
        assert_eq!(decode_long_constant("0580897a"), Some(1_000_000));
        assert_eq!(decode_long_constant("05ff897a"), Some(-1_000_064));
        assert_eq!(decode_int_constant("048002"), Some(128));
        assert_eq!(decode_int_constant("0480"), None);
        // Out of Int range.
        assert_eq!(decode_int_constant("0480808080808001"), None);
    }

    #[test]
    fn eip29_magic() {
        assert!(is_eip29_attachment("3c0e400e035052500a"));
        assert!(!is_eip29_attachment("3c0e0e"));
        assert!(!is_eip29_attachment(""));
    }

    #[test]
    fn field_kind_parsing() {
        assert_eq!("utf-8".parse::<FieldKind>(), Ok(FieldKind::Utf8));
        assert_eq!("INT".parse::<FieldKind>(), Ok(FieldKind::Int));
        assert!("bool".parse::<FieldKind>().is_err());
    }
}
