//! Byte spans of length-prefixed collections.

use crate::vlq::decode_varint;

/// Locate the data of a length-prefixed collection at `position`.
///
/// Returns `(data_start, hex_len)`, where `hex_len` is twice the encoded
/// element count (two hex characters per byte). A zero `hex_len` is the
/// end-of-data sentinel: the length was zero, undecodable, or the span would
/// run past the end of the stream. Iterating callers stop there.
pub fn span_of(stream: &str, position: usize) -> (usize, usize) {
    let (start, count) = decode_varint(stream, position);
    let hex_len = usize::try_from(count)
        .ok()
        .and_then(|c| c.checked_mul(2))
        .unwrap_or(0);

    match start.checked_add(hex_len) {
        Some(end) if hex_len > 0 && end <= stream.len() => (start, hex_len),
        _ => (start, 0),
    }
}
