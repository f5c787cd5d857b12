//! Port contracts for ledger world state.
//!
//! Ports define infrastructure-agnostic interfaces used by ledger services.

pub mod state_store;

pub use state_store::{
    ChangeSet, StateStore, StateStoreError, StateStoreResult, Version, VersionedRecord,
};
