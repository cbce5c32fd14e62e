//! Fee boxes: liquidity reserves that swap a token for the miner fee.
//!
//! A fee box holds native currency and advertises, in its registers, which
//! token it accepts and at what price:
//!
//! | Register | Constant     | Meaning                               |
//! |----------|--------------|---------------------------------------|
//! | `R4`     | `Coll[Byte]` | accepted token id                     |
//! | `R5`     | `Long`       | nanoErg released per token unit       |
//!
//! Spending it yields a successor box under the same script that keeps
//! `R4`/`R5`, gains the paid tokens and records the spent box id in `R6`.

use nautilus_sigma::{decode_collection_of_bytes, decode_long_constant, TextEncoding};
use nautilus_types::{BoxId, ErgoBox, TokenId};

use crate::error::TransactionError;

pub const TOKEN_ID_REGISTER: &str = "R4";
pub const RATE_REGISTER: &str = "R5";
/// Register of the successor box holding the spent fee box id.
pub const LINKAGE_REGISTER: &str = "R6";
/// Context variable holding the index of the successor output.
pub const SUCCESSOR_INDEX_VAR: u8 = 0;

/// A candidate fee box with its decoded terms.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeeBox {
    pub ergo_box: ErgoBox,
    pub token_id: TokenId,
    /// nanoErg per token unit.
    pub rate: u64,
}

impl FeeBox {
    pub fn from_box(ergo_box: ErgoBox) -> Result<Self, TransactionError> {
        let invalid = |reason: &str| TransactionError::InvalidFeeBox {
            box_id: ergo_box.box_id.clone(),
            reason: reason.to_string(),
        };

        let token_hex = ergo_box
            .register(TOKEN_ID_REGISTER)
            .and_then(|r| decode_collection_of_bytes(r, TextEncoding::Hex))
            .ok_or_else(|| invalid("R4 is not a token id collection"))?;
        let token_id = TokenId::new(token_hex).map_err(|e| invalid(&e.to_string()))?;

        let rate = ergo_box
            .register(RATE_REGISTER)
            .and_then(decode_long_constant)
            .ok_or_else(|| invalid("R5 is not a Long"))?;
        let rate = u64::try_from(rate)
            .ok()
            .filter(|r| *r > 0)
            .ok_or_else(|| invalid("rate must be positive"))?;

        Ok(Self {
            ergo_box,
            token_id,
            rate,
        })
    }

    pub fn box_id(&self) -> &BoxId {
        &self.ergo_box.box_id
    }

    /// nanoErg released for `units` tokens.
    pub fn released_value(&self, units: u64) -> Option<u64> {
        units.checked_mul(self.rate)
    }

    /// Native value left in the successor box after releasing `units`.
    pub fn change_value(&self, units: u64) -> Option<u64> {
        self.ergo_box.value.checked_sub(self.released_value(units)?)
    }

    /// Whether the box can release `units` and still hold `min_box_value`.
    pub fn can_cover(&self, units: u64, min_box_value: u64) -> bool {
        self.change_value(units)
            .is_some_and(|change| change >= min_box_value)
    }
}

/// Decode every candidate, skipping malformed boxes.
pub fn parse_fee_boxes(boxes: impl IntoIterator<Item = ErgoBox>) -> Vec<FeeBox> {
    boxes
        .into_iter()
        .filter_map(|b| match FeeBox::from_box(b) {
            Ok(fee_box) => Some(fee_box),
            Err(err) => {
                tracing::debug!(%err, "skipping fee box");
                None
            }
        })
        .collect()
}

/// Pick the best-priced candidate able to cover `required_units`.
///
/// The best price for the payer is the highest rate (fewest tokens per
/// nanoErg). Among equal rates the first candidate wins.
pub fn select_best_fee_box(
    candidates: &[FeeBox],
    required_units: u64,
    min_box_value: u64,
) -> Option<&FeeBox> {
    let mut best: Option<&FeeBox> = None;
    for candidate in candidates
        .iter()
        .filter(|c| c.can_cover(required_units, min_box_value))
    {
        match best {
            Some(current) if current.rate >= candidate.rate => {}
            _ => best = Some(candidate),
        }
    }
    best
}
