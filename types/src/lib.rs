//! Fundamental types for the Nautilus wallet core.
//!
//! This crate defines the types shared across every other crate in the workspace:
//! networks, public keys, box and token identifiers, boxes, amounts and protocol
//! parameters.

pub mod amount;
pub mod ergo_box;
pub mod error;
pub mod ids;
pub mod keys;
pub mod network;
pub mod params;

pub use amount::{decimalize, undecimalize, AssetAmount};
pub use ergo_box::{ErgoBox, Registers, Token, P2PK_TREE_PREFIX};
pub use error::TypesError;
pub use ids::{BoxId, TokenId, NATIVE_ASSET_ID};
pub use keys::{PublicKey, PUBLIC_KEY_HEX_LEN, PUBLIC_KEY_LEN};
pub use network::Network;
pub use params::{ProtocolParams, MIN_BOX_VALUE, NATIVE_DECIMALS};
