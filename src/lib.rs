//! Todo-list ledger: transaction handlers over typed ledger registries.
//!
//! This crate provides a ledger-state transition engine and the todo-list
//! transactions that run on it: registries of assets and participants with
//! atomic add, update and lookup, weak relationships between entities, and a
//! guarded task state machine.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain**: Pure entity types and state machines
//! - **Ports**: Abstract world-state interface provided by the host ledger
//! - **Adapters**: Concrete implementations of ports (in-memory world state)
//!
//! # Modules
//!
//! - [`ledger`]: Registries, transactions and world-state ports
//! - [`todolist`]: Admin, superhero and task entities and their handlers

pub mod ledger;
pub mod todolist;
