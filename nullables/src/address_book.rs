//! Nullable address book: a fixed list of derived addresses.

use std::cell::RefCell;
use std::collections::VecDeque;

use nautilus_wallet_core::{AddressBook, AddressState, DerivedAddress, WalletError};

/// An in-memory address book.
///
/// Derivation pops the next address from a programmed queue, so tests
/// decide up front which address a "new" derivation yields.
pub struct NullAddressBook {
    addresses: RefCell<Vec<DerivedAddress>>,
    derivable: RefCell<VecDeque<String>>,
    derivations: RefCell<Vec<u32>>,
}

impl NullAddressBook {
    pub fn new() -> Self {
        Self {
            addresses: RefCell::new(Vec::new()),
            derivable: RefCell::new(VecDeque::new()),
            derivations: RefCell::new(Vec::new()),
        }
    }

    /// Add a known address at the next index.
    pub fn with_address(self, address: impl Into<String>, state: AddressState) -> Self {
        {
            let mut addresses = self.addresses.borrow_mut();
            let index = addresses.len() as u32;
            addresses.push(DerivedAddress {
                index,
                address: address.into(),
                state,
            });
        }
        self
    }

    /// Queue an address for the next derivation.
    pub fn with_derivable(self, address: impl Into<String>) -> Self {
        self.derivable.borrow_mut().push_back(address.into());
        self
    }

    /// Indices produced by `derive_next`, in call order.
    pub fn derivations(&self) -> Vec<u32> {
        self.derivations.borrow().clone()
    }
}

impl Default for NullAddressBook {
    fn default() -> Self {
        Self::new()
    }
}

impl AddressBook for NullAddressBook {
    async fn addresses(&self) -> Result<Vec<DerivedAddress>, WalletError> {
        Ok(self.addresses.borrow().clone())
    }

    async fn derive_next(&self) -> Result<DerivedAddress, WalletError> {
        let address = self
            .derivable
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| WalletError::AddressBook("no address left to derive".into()))?;
        let mut addresses = self.addresses.borrow_mut();
        let derived = DerivedAddress {
            index: addresses.len() as u32,
            address,
            state: AddressState::Unused,
        };
        addresses.push(derived.clone());
        self.derivations.borrow_mut().push(derived.index);
        Ok(derived)
    }

    async fn address_at(&self, index: u32) -> Result<String, WalletError> {
        self.addresses
            .borrow()
            .iter()
            .find(|a| a.index == index)
            .map(|a| a.address.clone())
            .ok_or_else(|| WalletError::AddressBook(format!("no address at index {index}")))
    }
}
