use nautilus_types::{BoxId, TokenId};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransactionError {
    #[error("transaction has no inputs")]
    NoInputs,

    #[error("no change address was set")]
    MissingChangeAddress,

    #[error("creation height is not set")]
    MissingHeight,

    #[error("output value {value} is below the minimum box value {min}")]
    BelowMinimumBoxValue { value: u64, min: u64 },

    #[error("insufficient funds: need {required} nanoErg, inputs hold {available}")]
    InsufficientFunds { required: u64, available: u64 },

    #[error("insufficient {token_id}: need {required}, inputs hold {available}")]
    InsufficientTokens {
        token_id: TokenId,
        required: u64,
        available: u64,
    },

    #[error("fee box {box_id} cannot release {units} units and keep the minimum box value")]
    FeeBoxExhausted { box_id: BoxId, units: u64 },

    #[error("fee box {box_id} is malformed: {reason}")]
    InvalidFeeBox { box_id: BoxId, reason: String },

    #[error("arithmetic overflow while balancing")]
    Overflow,

    #[error("value conservation violated: {0}")]
    ConservationViolated(String),
}
