//! Address resolution bound to one network.
//!
//! An [`AddressResolver`] is constructed once from the wallet's configured
//! network and passed to whatever needs address conversions, so both
//! networks can be exercised side by side in one process.

use nautilus_types::{Network, PublicKey};

use crate::address::Address;
use crate::error::AddressError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AddressResolver {
    network: Network,
}

impl AddressResolver {
    pub fn new(network: Network) -> Self {
        Self { network }
    }

    pub fn network(&self) -> Network {
        self.network
    }

    pub fn address_from_public_key(&self, public_key: &PublicKey) -> String {
        Address::p2pk(self.network, public_key).encode()
    }

    /// Encode a hex ErgoTree as an address.
    ///
    /// Lossy for non-P2PK trees: the result decodes back to an equivalent
    /// script, not necessarily to the original bytes.
    pub fn address_from_script(&self, ergo_tree: &str) -> Result<String, AddressError> {
        Address::from_ergo_tree(self.network, ergo_tree).map(|a| a.encode())
    }

    /// The hex ErgoTree an address pays to. The address network is not checked.
    pub fn script_from_address(&self, address: &str) -> Result<String, AddressError> {
        Address::decode(address).map(|a| a.ergo_tree())
    }

    /// Decode and require the configured network.
    pub fn decode(&self, address: &str) -> Result<Address, AddressError> {
        let decoded = Address::decode(address)?;
        if decoded.network() != self.network {
            return Err(AddressError::WrongNetwork {
                expected: self.network,
                actual: decoded.network(),
            });
        }
        Ok(decoded)
    }

    /// True iff the address decodes and belongs to the configured network.
    pub fn is_valid_address(&self, address: &str) -> bool {
        self.decode(address).is_ok()
    }
}
