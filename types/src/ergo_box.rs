//! Boxes: the unit of spendable state.
//!
//! Field names and amount encoding follow the EIP-12 dApp connector JSON
//! shape, so boxes coming from an indexer or a connector deserialize as-is.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::ids::{BoxId, TokenId};

/// ErgoTree prefix of a pay-to-public-key script; the 33-byte key follows.
pub const P2PK_TREE_PREFIX: &str = "0008cd";

/// Non-mandatory registers (`R4`..`R9`) as register name → hex-encoded constant.
///
/// Iteration is in register order because the names sort lexicographically.
pub type Registers = BTreeMap<String, String>;

/// A token amount held in a box.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    pub token_id: TokenId,
    #[serde(with = "amount_string")]
    pub amount: u64,
}

impl Token {
    pub fn new(token_id: TokenId, amount: u64) -> Self {
        Self { token_id, amount }
    }
}

/// An unspent box with everything needed for fee and asset accounting.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErgoBox {
    pub box_id: BoxId,
    pub transaction_id: String,
    pub index: u16,
    pub ergo_tree: String,
    pub creation_height: u32,
    #[serde(with = "amount_string")]
    pub value: u64,
    #[serde(default)]
    pub assets: Vec<Token>,
    #[serde(default)]
    pub additional_registers: Registers,
}

impl ErgoBox {
    /// Amount of `token_id` held by this box (0 when absent).
    pub fn token_amount(&self, token_id: &TokenId) -> u64 {
        self.assets
            .iter()
            .filter(|t| &t.token_id == token_id)
            .map(|t| t.amount)
            .sum()
    }

    pub fn register(&self, name: &str) -> Option<&str> {
        self.additional_registers.get(name).map(String::as_str)
    }
}

/// Serializes `u64` amounts as decimal strings and accepts strings or numbers.
pub mod amount_string {
    use serde::{de, Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Str(String),
        Num(u64),
    }

    pub fn serialize<S: Serializer>(value: &u64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
        match Raw::deserialize(deserializer)? {
            Raw::Num(n) => Ok(n),
            Raw::Str(s) => s.parse().map_err(de::Error::custom),
        }
    }
}
