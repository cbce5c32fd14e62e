//! Blake2b-256 digests used for address checksums and script hashes.

use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};

type Blake2b256 = Blake2b<U32>;

/// Number of digest bytes appended to an encoded address.
pub const CHECKSUM_LEN: usize = 4;

pub fn blake2b_256(data: &[u8]) -> [u8; 32] {
    blake2b_256_multi(&[data])
}

/// Digest of the concatenation of `parts`, without building the concatenation.
pub fn blake2b_256_multi(parts: &[&[u8]]) -> [u8; 32] {
    parts
        .iter()
        .fold(Blake2b256::new(), |hasher, part| hasher.chain_update(part))
        .finalize()
        .into()
}

/// Leading [`CHECKSUM_LEN`] bytes of the digest over `parts`.
pub fn checksum(parts: &[&[u8]]) -> [u8; CHECKSUM_LEN] {
    let digest = blake2b_256_multi(parts);
    let mut out = [0u8; CHECKSUM_LEN];
    out.copy_from_slice(&digest[..CHECKSUM_LEN]);
    out
}
