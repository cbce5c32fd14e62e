//! Shared utilities for the Nautilus wallet core.

pub mod logging;

pub use logging::{init_tracing, LogFormat};
