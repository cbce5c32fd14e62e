//! Hashing and address encoding for the Nautilus wallet core.
//!
//! - **Blake2b-256** for address checksums and script hashes
//! - **base58check** addresses qualified by network and kind (P2PK, P2SH, P2S)
//! - [`AddressResolver`] for network-bound conversions between addresses,
//!   public keys and ErgoTrees

pub mod address;
pub mod error;
pub mod hash;
pub mod resolver;

pub use address::{Address, AddressKind};
pub use error::AddressError;
pub use hash::{blake2b_256, blake2b_256_multi, checksum};
pub use resolver::AddressResolver;
