//! Ledger-state transition engine.
//!
//! Registries of typed assets and participants, read and written inside
//! atomic transactions that commit with optimistic read validation. The
//! module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Transactions and registries in [`services`]

pub mod adapters;
mod config;
pub mod domain;
pub mod ports;
pub mod services;

pub use config::LedgerConfig;

#[cfg(test)]
mod tests;
