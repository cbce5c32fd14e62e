//! Deterministic assembly of an unsigned transaction.
//!
//! The builder spends every input it is given. Payment outputs come first in
//! the order they were added, then the fee-box successor when a fee swap is
//! configured, then the change output. The fee-box input is always last.

use nautilus_sigma::{encode_collection_of_bytes, encode_int_constant};
use nautilus_types::{ErgoBox, ProtocolParams};

use crate::error::TransactionError;
use crate::fee_box::{
    FeeBox, LINKAGE_REGISTER, RATE_REGISTER, SUCCESSOR_INDEX_VAR, TOKEN_ID_REGISTER,
};
use crate::unsigned::{sum_tokens, OutputCandidate, UnsignedInput, UnsignedTransaction};
use crate::validation::verify_conservation;

struct FeeSwap {
    fee_box: FeeBox,
    units: u64,
}

pub struct TransactionBuilder {
    height: u32,
    params: ProtocolParams,
    inputs: Vec<ErgoBox>,
    outputs: Vec<OutputCandidate>,
    fee: u64,
    change_tree: Option<String>,
    fee_swap: Option<FeeSwap>,
}

impl TransactionBuilder {
    pub fn new(height: u32, params: ProtocolParams) -> Self {
        Self {
            height,
            params,
            inputs: Vec::new(),
            outputs: Vec::new(),
            fee: 0,
            change_tree: None,
            fee_swap: None,
        }
    }

    pub fn from(mut self, boxes: impl IntoIterator<Item = ErgoBox>) -> Self {
        self.inputs.extend(boxes);
        self
    }

    pub fn to(mut self, output: OutputCandidate) -> Self {
        self.outputs.push(output);
        self
    }

    /// Miner fee in nanoErg.
    pub fn pay_fee(mut self, fee: u64) -> Self {
        self.fee = fee;
        self
    }

    pub fn send_change_to(mut self, ergo_tree: impl Into<String>) -> Self {
        self.change_tree = Some(ergo_tree.into());
        self
    }

    /// Trade `units` of the fee box's token for native value from `fee_box`.
    pub fn swap_fee_with(mut self, fee_box: FeeBox, units: u64) -> Self {
        self.fee_swap = Some(FeeSwap { fee_box, units });
        self
    }

    pub fn build(self) -> Result<UnsignedTransaction, TransactionError> {
        if self.height == 0 {
            return Err(TransactionError::MissingHeight);
        }
        if self.inputs.is_empty() {
            return Err(TransactionError::NoInputs);
        }
        let change_tree = self
            .change_tree
            .ok_or(TransactionError::MissingChangeAddress)?;
        let height = self.height;
        let min = self.params.min_box_value;

        let mut outputs: Vec<OutputCandidate> = self
            .outputs
            .into_iter()
            .map(|mut output| {
                output.creation_height = height;
                output
            })
            .collect();
        if let Some(low) = outputs.iter().find(|o| o.value < min) {
            return Err(TransactionError::BelowMinimumBoxValue {
                value: low.value,
                min,
            });
        }

        let mut inputs: Vec<UnsignedInput> =
            self.inputs.into_iter().map(UnsignedInput::new).collect();

        if let Some(FeeSwap { fee_box, units }) = self.fee_swap {
            let (input, successor) = fee_box_pair(fee_box, units, outputs.len(), height, min)?;
            inputs.push(input);
            outputs.push(successor);
        }

        let available = inputs
            .iter()
            .try_fold(0u64, |acc, i| acc.checked_add(i.value()))
            .ok_or(TransactionError::Overflow)?;
        let committed = outputs
            .iter()
            .try_fold(self.fee, |acc, o| acc.checked_add(o.value))
            .ok_or(TransactionError::Overflow)?;
        let change_value =
            available
                .checked_sub(committed)
                .ok_or(TransactionError::InsufficientFunds {
                    required: committed,
                    available,
                })?;

        let held = sum_tokens(inputs.iter().flat_map(|i| i.ergo_box.assets.iter()))
            .ok_or(TransactionError::Overflow)?;
        let sent = sum_tokens(outputs.iter().flat_map(|o| o.assets.iter()))
            .ok_or(TransactionError::Overflow)?;

        let mut change = OutputCandidate::new(change_value, change_tree);
        change.creation_height = height;
        for (token_id, required) in &sent {
            let available = held.get(token_id).copied().unwrap_or(0);
            if *required > available {
                return Err(TransactionError::InsufficientTokens {
                    token_id: token_id.clone(),
                    required: *required,
                    available,
                });
            }
        }
        for (token_id, amount) in held {
            let leftover = amount - sent.get(&token_id).copied().unwrap_or(0);
            change = change.add_token(token_id, leftover)?;
        }

        if change_value > 0 || !change.assets.is_empty() {
            if change_value < min {
                return Err(TransactionError::InsufficientFunds {
                    required: committed.saturating_add(min),
                    available,
                });
            }
            outputs.push(change);
        }

        let tx = UnsignedTransaction {
            inputs,
            outputs,
            fee: self.fee,
            height,
        };
        verify_conservation(&tx)?;

        tracing::debug!(
            height,
            inputs = tx.inputs.len(),
            outputs = tx.outputs.len(),
            fee = tx.fee,
            "built unsigned transaction"
        );
        Ok(tx)
    }
}

/// The fee-box input and its successor output.
fn fee_box_pair(
    fee_box: FeeBox,
    units: u64,
    successor_index: usize,
    height: u32,
    min_box_value: u64,
) -> Result<(UnsignedInput, OutputCandidate), TransactionError> {
    let change = fee_box
        .change_value(units)
        .filter(|value| *value >= min_box_value)
        .ok_or_else(|| TransactionError::FeeBoxExhausted {
            box_id: fee_box.box_id().clone(),
            units,
        })?;
    let index = i32::try_from(successor_index).map_err(|_| TransactionError::Overflow)?;

    let source = &fee_box.ergo_box;
    let mut successor = OutputCandidate::new(change, source.ergo_tree.clone())
        .add_tokens(source.assets.iter().cloned())?
        .add_token(fee_box.token_id.clone(), units)?;
    for name in [TOKEN_ID_REGISTER, RATE_REGISTER] {
        if let Some(value) = source.register(name) {
            successor = successor.set_register(name, value);
        }
    }
    successor = successor.set_register(
        LINKAGE_REGISTER,
        encode_collection_of_bytes(&source.box_id.to_bytes()),
    );
    successor.creation_height = height;

    let input = UnsignedInput::new(fee_box.ergo_box)
        .with_context_var(SUCCESSOR_INDEX_VAR, encode_int_constant(index));
    Ok((input, successor))
}
