use nautilus_types::Network;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AddressError {
    #[error("invalid base58: {0}")]
    InvalidBase58(String),

    #[error("address too short: {0} bytes")]
    TooShort(usize),

    #[error("address checksum mismatch")]
    ChecksumMismatch,

    #[error("unknown network prefix {0:#04x}")]
    UnknownNetwork(u8),

    #[error("address belongs to {actual}, expected {expected}")]
    WrongNetwork { expected: Network, actual: Network },

    #[error("unknown address type {0:#04x}")]
    UnknownKind(u8),

    #[error("invalid P2PK payload: {0}")]
    InvalidPublicKey(String),

    #[error("invalid P2SH payload: expected 24 bytes, got {0}")]
    InvalidScriptHash(usize),

    #[error("invalid script hex: {0}")]
    InvalidScript(String),
}
