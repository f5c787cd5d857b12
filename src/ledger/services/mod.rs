//! Transactions and typed registries over world state.

mod registry;
mod transaction;

pub use registry::Registry;
pub use transaction::{CommitReceipt, Ledger, LedgerError, LedgerResult, Transaction};
