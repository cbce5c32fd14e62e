//! Choosing where change goes.

use serde::{Deserialize, Serialize};

use crate::error::WalletError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressState {
    Used,
    Unused,
}

/// An address derived from the wallet's extended public key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedAddress {
    pub index: u32,
    pub address: String,
    pub state: AddressState,
}

impl DerivedAddress {
    pub fn is_unused(&self) -> bool {
        self.state == AddressState::Unused
    }
}

/// The wallet's derived addresses.
#[allow(async_fn_in_trait)]
pub trait AddressBook {
    /// Known addresses in derivation order.
    async fn addresses(&self) -> Result<Vec<DerivedAddress>, WalletError>;

    /// Derive and remember the next address.
    async fn derive_next(&self) -> Result<DerivedAddress, WalletError>;

    /// The address at derivation `index`.
    async fn address_at(&self, index: u32) -> Result<String, WalletError>;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ChangePolicy {
    pub avoid_address_reuse: bool,
    pub default_change_index: u32,
}

fn first_unused<'a>(addresses: &'a [DerivedAddress], recipient: &str) -> Option<&'a DerivedAddress> {
    addresses
        .iter()
        .find(|a| a.is_unused() && a.address != recipient)
}

/// Resolve the change address for a payment to `recipient`.
///
/// With `avoid_address_reuse` the first unused address that is not the
/// recipient is taken, deriving a new one when none exists; if that still
/// yields nothing the default index is used. Otherwise the default index is
/// used. The recipient's own address is never returned while the book holds
/// another candidate.
pub async fn resolve_change_address<B: AddressBook>(
    book: &B,
    policy: &ChangePolicy,
    recipient: &str,
) -> Result<String, WalletError> {
    if policy.avoid_address_reuse {
        let mut addresses = book.addresses().await?;
        if first_unused(&addresses, recipient).is_none() {
            let derived = book.derive_next().await?;
            tracing::debug!(index = derived.index, "derived new change address");
            addresses = book.addresses().await?;
        }
        if let Some(unused) = first_unused(&addresses, recipient) {
            return Ok(unused.address.clone());
        }
    }

    let address = book.address_at(policy.default_change_index).await?;
    if address != recipient {
        return Ok(address);
    }

    let fallback = book
        .addresses()
        .await?
        .into_iter()
        .find(|a| a.address != recipient)
        .map(|a| a.address);
    Ok(fallback.unwrap_or(address))
}
