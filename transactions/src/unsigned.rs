//! The unsigned transaction handed to an external signer.
//!
//! Field names follow the EIP-12 connector shape: inputs carry their full box
//! plus a context extension, outputs are box candidates without ids.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use nautilus_types::ergo_box::amount_string;
use nautilus_types::{BoxId, ErgoBox, Registers, Token, TokenId};

use crate::error::TransactionError;

/// Context variables attached to an input: variable id → hex-encoded constant.
pub type ContextExtension = BTreeMap<u8, String>;

/// A box being spent, with the context it is spent under.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnsignedInput {
    #[serde(flatten)]
    pub ergo_box: ErgoBox,
    #[serde(default)]
    pub extension: ContextExtension,
}

impl UnsignedInput {
    pub fn new(ergo_box: ErgoBox) -> Self {
        Self {
            ergo_box,
            extension: ContextExtension::new(),
        }
    }

    pub fn with_context_var(mut self, id: u8, constant: impl Into<String>) -> Self {
        self.extension.insert(id, constant.into());
        self
    }

    pub fn box_id(&self) -> &BoxId {
        &self.ergo_box.box_id
    }

    pub fn value(&self) -> u64 {
        self.ergo_box.value
    }
}

/// A box to be created by the transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputCandidate {
    #[serde(with = "amount_string")]
    pub value: u64,
    pub ergo_tree: String,
    pub creation_height: u32,
    #[serde(default)]
    pub assets: Vec<Token>,
    #[serde(default)]
    pub additional_registers: Registers,
}

impl OutputCandidate {
    /// An output guarded by `ergo_tree`; the height is stamped at build time.
    pub fn new(value: u64, ergo_tree: impl Into<String>) -> Self {
        Self {
            value,
            ergo_tree: ergo_tree.into(),
            creation_height: 0,
            assets: Vec::new(),
            additional_registers: Registers::new(),
        }
    }

    /// Add `amount` of `token_id`, merging with an existing entry.
    ///
    /// Zero amounts are dropped; a merged amount past `u64::MAX` is an error.
    pub fn add_token(mut self, token_id: TokenId, amount: u64) -> Result<Self, TransactionError> {
        if amount == 0 {
            return Ok(self);
        }
        match self.assets.iter_mut().find(|t| t.token_id == token_id) {
            Some(existing) => {
                existing.amount = existing
                    .amount
                    .checked_add(amount)
                    .ok_or(TransactionError::Overflow)?;
            }
            None => self.assets.push(Token::new(token_id, amount)),
        }
        Ok(self)
    }

    pub fn add_tokens(
        self,
        tokens: impl IntoIterator<Item = Token>,
    ) -> Result<Self, TransactionError> {
        tokens
            .into_iter()
            .try_fold(self, |output, token| output.add_token(token.token_id, token.amount))
    }

    pub fn set_register(mut self, name: &str, constant: impl Into<String>) -> Self {
        self.additional_registers
            .insert(name.to_string(), constant.into());
        self
    }

    pub fn token_amount(&self, token_id: &TokenId) -> u64 {
        self.assets
            .iter()
            .filter(|t| &t.token_id == token_id)
            .map(|t| t.amount)
            .sum()
    }
}

/// A fully balanced transaction awaiting signatures.
///
/// The miner fee is carried as a value rather than as an output; the signer
/// materialises it. The last output is the change output when one exists.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnsignedTransaction {
    pub inputs: Vec<UnsignedInput>,
    pub outputs: Vec<OutputCandidate>,
    #[serde(with = "amount_string")]
    pub fee: u64,
    pub height: u32,
}

impl UnsignedTransaction {
    pub fn input_value(&self) -> Option<u64> {
        self.inputs
            .iter()
            .try_fold(0u64, |acc, i| acc.checked_add(i.value()))
    }

    pub fn output_value(&self) -> Option<u64> {
        self.outputs
            .iter()
            .try_fold(0u64, |acc, o| acc.checked_add(o.value))
    }

    pub fn input_tokens(&self) -> Option<BTreeMap<TokenId, u64>> {
        sum_tokens(self.inputs.iter().flat_map(|i| i.ergo_box.assets.iter()))
    }

    pub fn output_tokens(&self) -> Option<BTreeMap<TokenId, u64>> {
        sum_tokens(self.outputs.iter().flat_map(|o| o.assets.iter()))
    }

    /// The last output, conventionally the change.
    pub fn change_output(&self) -> Option<&OutputCandidate> {
        self.outputs.last()
    }

    pub fn input(&self, box_id: &BoxId) -> Option<&UnsignedInput> {
        self.inputs.iter().find(|i| i.box_id() == box_id)
    }
}

/// Per-token totals; `None` on overflow.
pub(crate) fn sum_tokens<'a>(
    tokens: impl IntoIterator<Item = &'a Token>,
) -> Option<BTreeMap<TokenId, u64>> {
    let mut totals = BTreeMap::new();
    for token in tokens {
        let entry = totals.entry(token.token_id.clone()).or_insert(0u64);
        *entry = entry.checked_add(token.amount)?;
    }
    Some(totals)
}
