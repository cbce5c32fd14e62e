//! Protocol parameters consumed by transaction construction.

use serde::{Deserialize, Serialize};

/// Protocol floor for the native value of any output, in nanoErg.
pub const MIN_BOX_VALUE: u64 = 1_000_000;

/// Decimal places of the native currency.
pub const NATIVE_DECIMALS: u8 = 9;

/// Parameters that shape transaction balancing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtocolParams {
    /// Minimum native value an output may carry.
    pub min_box_value: u64,
    /// Decimal places of the native currency.
    pub native_decimals: u8,
}

impl Default for ProtocolParams {
    fn default() -> Self {
        Self {
            min_box_value: MIN_BOX_VALUE,
            native_decimals: NATIVE_DECIMALS,
        }
    }
}
