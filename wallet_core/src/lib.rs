//! Wallet core for Nautilus.
//!
//! Turns a payment intent into an unsigned transaction:
//! - [`send`]: the assembler (gather inputs and height, balance, finalize)
//! - [`change_address`]: change destination under the reuse policy
//! - [`chain`]: the chain collaborator and the pagination loop
//! - [`explorer`]: indexer box mapping
//! - [`ownership`]: which wallet addresses inputs and outputs belong to
//! - [`asset_metadata`]: EIP-4 token metadata
//! - [`config`]: TOML wallet configuration

pub mod asset_metadata;
pub mod chain;
pub mod change_address;
pub mod config;
pub mod error;
pub mod explorer;
pub mod ownership;
pub mod send;

pub use asset_metadata::{parse_eip4_asset, AssetMetadata, AssetStandard, AssetType, TokenInfo};
pub use chain::{paginate, ChainSource, Page, PageParams};
pub use change_address::{
    resolve_change_address, AddressBook, AddressState, ChangePolicy, DerivedAddress,
};
pub use config::WalletConfig;
pub use error::{ChainError, WalletError};
pub use explorer::{fetch_spendable_boxes, spendable_boxes, ExplorerBox};
pub use ownership::{change_address_from_outputs, extract_addresses_from_inputs};
pub use send::{FeeSettings, PaymentRequest, TransactionAssembler};
