//! In-memory world state for tests and embedded use.

mod state_store;

pub use state_store::InMemoryStateStore;
