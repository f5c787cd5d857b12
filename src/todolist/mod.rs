//! Todo-list transactions on the ledger.
//!
//! Admins, superheroes and tasks live in ledger registries. Three handlers
//! mutate them: a one-time bootstrap that seeds sample data, assign and
//! execute, each a single state-machine guarded change. A create-task
//! handler and read-only queries round out the surface.
//!
//! - Domain types in [`domain`]
//! - Transaction handlers in [`services`]

pub mod domain;
pub mod services;

#[cfg(test)]
mod tests;
