//! Hex-encoded 32-byte identifiers for boxes and tokens.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::TypesError;

/// Length of a box or token id in hex characters.
pub const ID_HEX_LEN: usize = 64;

/// Pseudo asset id used for the native currency in payment requests.
///
/// Never appears inside a box's token list.
pub const NATIVE_ASSET_ID: &str = "ERG";

fn check_id(s: &str) -> Result<(), TypesError> {
    if s.len() != ID_HEX_LEN {
        return Err(TypesError::InvalidId {
            expected: ID_HEX_LEN,
            actual: s.len(),
        });
    }
    if !s.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(TypesError::InvalidHex(s.to_string()));
    }
    Ok(())
}

/// Identifier of a box (unspent output).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BoxId(String);

impl BoxId {
    pub fn new(hex_id: impl Into<String>) -> Result<Self, TypesError> {
        let s = hex_id.into().to_lowercase();
        check_id(&s)?;
        Ok(Self(s))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        // Validated on construction.
        hex::decode(&self.0).unwrap_or_default()
    }
}

impl TryFrom<String> for BoxId {
    type Error = TypesError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<BoxId> for String {
    fn from(id: BoxId) -> Self {
        id.0
    }
}

impl fmt::Display for BoxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of an asset: either a token id or the native currency.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TokenId(String);

impl TokenId {
    pub fn new(hex_id: impl Into<String>) -> Result<Self, TypesError> {
        let s = hex_id.into();
        if s == NATIVE_ASSET_ID {
            return Ok(Self(s));
        }
        let s = s.to_lowercase();
        check_id(&s)?;
        Ok(Self(s))
    }

    /// The native currency pseudo id.
    pub fn native() -> Self {
        Self(NATIVE_ASSET_ID.to_string())
    }

    pub fn is_native(&self) -> bool {
        self.0 == NATIVE_ASSET_ID
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TokenId {
    type Error = TypesError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<TokenId> for String {
    fn from(id: TokenId) -> Self {
        id.0
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
