//! Adapter implementations of ledger ports.

pub mod memory;
