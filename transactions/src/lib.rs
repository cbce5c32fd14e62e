//! Unsigned transactions for the Nautilus wallet core.
//!
//! - [`unsigned`]: inputs, output candidates and the transaction handed to a signer
//! - [`fee_box`]: fee boxes and best-price selection
//! - [`builder`]: deterministic balancing with change and optional fee swap
//! - [`validation`]: value-conservation checks

pub mod builder;
pub mod error;
pub mod fee_box;
pub mod unsigned;
pub mod validation;

pub use builder::TransactionBuilder;
pub use error::TransactionError;
pub use fee_box::{parse_fee_boxes, select_best_fee_box, FeeBox};
pub use unsigned::{ContextExtension, OutputCandidate, UnsignedInput, UnsignedTransaction};
pub use validation::verify_conservation;
