use nautilus_crypto::AddressError;
use nautilus_transactions::TransactionError;
use nautilus_types::TypesError;
use thiserror::Error;

/// Failure reported by a chain collaborator.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ChainError {
    #[error("request failed: {0}")]
    Request(String),

    #[error("unexpected response: {0}")]
    Response(String),
}

#[derive(Debug, Error)]
pub enum WalletError {
    #[error("unable to fetch inputs, please check your connection")]
    UnableToFetchInputs,

    #[error("unable to fetch current height, please check your connection")]
    UnableToFetchHeight,

    #[error("unable to fetch fee boxes: {0}")]
    UnableToFetchFeeBoxes(ChainError),

    #[error("insufficient liquidity in the selected price range")]
    InsufficientLiquidity,

    #[error("native currency not selected or less than the minimum required")]
    BelowMinimumValue,

    #[error("invalid address: {0}")]
    InvalidAddress(#[from] AddressError),

    #[error("invalid fee: {0}")]
    InvalidFee(String),

    #[error("invalid amount: {0}")]
    InvalidAmount(#[from] TypesError),

    #[error("transaction building error: {0}")]
    TransactionBuild(#[from] TransactionError),

    #[error("address book error: {0}")]
    AddressBook(String),

    #[error("config error: {0}")]
    Config(String),
}
