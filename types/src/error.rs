//! Error type for parsing fundamental values.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypesError {
    #[error("unknown network: {0}")]
    UnknownNetwork(String),

    #[error("invalid hex: {0}")]
    InvalidHex(String),

    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("invalid identifier: expected {expected} hex chars, got {actual}")]
    InvalidId { expected: usize, actual: usize },

    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("amount has more than {decimals} decimal places")]
    TooManyDecimals { decimals: u8 },

    #[error("amount overflow")]
    Overflow,
}
