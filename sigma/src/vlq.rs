//! Variable-length and zig-zag integers over a hex stream.
//!
//! Cursors are offsets in hex characters, so one byte advances the cursor by
//! two. Groups of 7 bits accumulate most-significant first and a set high bit
//! means another byte follows.
//!
//! Decoding never fails: when a byte cannot be read (end of stream, non-hex
//! characters, or a value wider than 64 bits) the result is
//! `(position, 0)`, the position that was passed in. A legitimately encoded
//! zero is indistinguishable from that sentinel by value alone; callers
//! detect "no data" by checking whether the cursor moved or by span length.
//!
//! Typed numeric constants and ErgoTree lengths use the other group order:
//! [`decode_vlq`] and [`encode_vlq`] read and write 7-bit groups least
//! significant first, as serialized on chain.

/// Read the byte at hex offset `position`.
pub(crate) fn read_byte(stream: &str, position: usize) -> Option<u8> {
    let end = position.checked_add(2)?;
    let chunk = stream.get(position..end)?;
    if !chunk.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u8::from_str_radix(chunk, 16).ok()
}

/// True iff `s` is an even-length string of hex digits.
pub fn is_hex_stream(s: &str) -> bool {
    s.len() % 2 == 0 && s.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Decode an unsigned varint at `position`; returns `(next_position, value)`.
pub fn decode_varint(stream: &str, position: usize) -> (usize, u64) {
    let mut cursor = position;
    let mut value: u64 = 0;

    loop {
        let Some(byte) = read_byte(stream, cursor) else {
            return (position, 0);
        };
        cursor += 2;

        let Some(next) = value
            .checked_mul(128)
            .and_then(|v| v.checked_add(u64::from(byte & 0x7f)))
        else {
            return (position, 0);
        };
        value = next;

        if byte & 0x80 == 0 {
            return (cursor, value);
        }
    }
}

/// Decode a little-endian VLQ at `position`; returns `(next_position, value)`.
///
/// `None` when the stream ends mid-value, holds non-hex characters, or the
/// value does not fit in 64 bits.
pub fn decode_vlq(stream: &str, position: usize) -> Option<(usize, u64)> {
    let mut cursor = position;
    let mut value: u64 = 0;
    let mut shift = 0u32;

    loop {
        let byte = read_byte(stream, cursor)?;
        cursor += 2;

        let group = u64::from(byte & 0x7f);
        if shift >= 64 || (shift > 0 && group >> (64 - shift) != 0) {
            return None;
        }
        value |= group << shift;

        if byte & 0x80 == 0 {
            return Some((cursor, value));
        }
        shift += 7;
    }
}

/// Encode an unsigned value as a little-endian VLQ.
pub fn encode_vlq(mut value: u64) -> String {
    let mut bytes = Vec::new();
    loop {
        let group = (value & 0x7f) as u8;
        value >>= 7;
        if value == 0 {
            bytes.push(group);
            return hex::encode(bytes);
        }
        bytes.push(group | 0x80);
    }
}

/// Fold a zig-zag encoded integer back into its signed value.
pub fn decode_zigzag(n: u64) -> i64 {
    ((n >> 1) as i64) ^ -((n & 1) as i64)
}

/// Encode an unsigned value in the same layout [`decode_varint`] reads.
pub fn encode_varint(mut value: u64) -> String {
    let mut groups = vec![(value & 0x7f) as u8];
    value >>= 7;
    while value > 0 {
        groups.push((value & 0x7f) as u8 | 0x80);
        value >>= 7;
    }
    groups.reverse();
    hex::encode(groups)
}

/// Zig-zag encode a signed value (64-bit convention).
pub fn encode_zigzag(value: i64) -> u64 {
    ((value << 1) ^ (value >> 63)) as u64
}
