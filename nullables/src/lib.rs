//! Nullable infrastructure for deterministic testing.
//!
//! The wallet core reaches the outside world only through the
//! [`ChainSource`](nautilus_wallet_core::ChainSource) and
//! [`AddressBook`](nautilus_wallet_core::AddressBook) traits. The types here
//! implement them in memory:
//! - Return programmed values
//! - Record how often they were called
//! - Never touch the network
//!
//! Usage: hand them to a `TransactionAssembler` in tests.

pub mod address_book;
pub mod chain;

pub use address_book::NullAddressBook;
pub use chain::NullChain;
