//! Asset amounts in indivisible base units.
//!
//! Amounts are integers in the asset's smallest unit. User-facing decimal
//! strings are converted with [`undecimalize`]; floating point is never used.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::TypesError;
use crate::ids::TokenId;

/// An amount of one asset (token or native currency).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetAmount {
    pub asset_id: TokenId,
    /// Base units.
    pub amount: u64,
    pub decimals: u8,
}

impl AssetAmount {
    pub fn new(asset_id: TokenId, amount: u64, decimals: u8) -> Self {
        Self {
            asset_id,
            amount,
            decimals,
        }
    }

    /// Build from a user-facing decimal string such as `"1.25"`.
    pub fn from_decimal(asset_id: TokenId, value: &str, decimals: u8) -> Result<Self, TypesError> {
        Ok(Self::new(asset_id, undecimalize(value, decimals)?, decimals))
    }

    pub fn is_zero(&self) -> bool {
        self.amount == 0
    }
}

impl fmt::Display for AssetAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", decimalize(self.amount, self.decimals), self.asset_id)
    }
}

/// Convert a decimal string to base units: `undecimalize("1.5", 2) == 150`.
pub fn undecimalize(value: &str, decimals: u8) -> Result<u64, TypesError> {
    let value = value.trim();
    let (int_part, frac_part) = match value.split_once('.') {
        Some((i, f)) => (i, f),
        None => (value, ""),
    };
    if int_part.is_empty() && frac_part.is_empty() {
        return Err(TypesError::InvalidAmount(value.to_string()));
    }
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(int_part) || !all_digits(frac_part) {
        return Err(TypesError::InvalidAmount(value.to_string()));
    }

    let frac_trimmed = frac_part.trim_end_matches('0');
    if frac_trimmed.len() > decimals as usize {
        return Err(TypesError::TooManyDecimals { decimals });
    }

    let scale = 10u64
        .checked_pow(decimals as u32)
        .ok_or(TypesError::Overflow)?;
    let int_value: u64 = if int_part.is_empty() {
        0
    } else {
        int_part.parse().map_err(|_| TypesError::Overflow)?
    };
    let frac_value: u64 = if frac_trimmed.is_empty() {
        0
    } else {
        let padded = format!("{frac_trimmed:0<width$}", width = decimals as usize);
        padded.parse().map_err(|_| TypesError::Overflow)?
    };

    int_value
        .checked_mul(scale)
        .and_then(|v| v.checked_add(frac_value))
        .ok_or(TypesError::Overflow)
}

/// Render base units as a decimal string without trailing zeros.
pub fn decimalize(amount: u64, decimals: u8) -> String {
    if decimals == 0 {
        return amount.to_string();
    }
    let digits = format!("{amount:0>width$}", width = decimals as usize + 1);
    let (int_part, frac_part) = digits.split_at(digits.len() - decimals as usize);
    let frac_part = frac_part.trim_end_matches('0');
    if frac_part.is_empty() {
        int_part.to_string()
    } else {
        format!("{int_part}.{frac_part}")
    }
}
