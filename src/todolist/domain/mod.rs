//! Domain model for the todo-list ledger.
//!
//! Admins create tasks, superheroes are assigned them, and a task moves from
//! `ACTIVE` to `COMPLETED` exactly once.

mod bootstrap;
mod error;
mod participant;
mod task;

pub use bootstrap::{
    BOOTSTRAP_MARKER_KEY, BootstrapMarker, SAMPLE_ADMIN_EMAIL, SeedData, sample_data,
};
pub use error::{ParseTaskStateError, TodoDomainError};
pub use participant::{Admin, Superhero};
pub use task::{Task, TaskState};

use crate::ledger::{
    LedgerConfig,
    domain::{LedgerDomainError, Namespace},
};

/// Namespace of every todo-list type.
pub const ROOT_NAMESPACE: &str = "org.example.todolist.hlfv1";

/// Returns the validated [`ROOT_NAMESPACE`].
///
/// # Errors
///
/// Returns [`LedgerDomainError::InvalidNamespace`] if the constant is not a
/// valid namespace.
pub fn root_namespace() -> Result<Namespace, LedgerDomainError> {
    Namespace::new(ROOT_NAMESPACE)
}

/// Returns the default ledger configuration for the todo-list namespace.
///
/// # Errors
///
/// Returns [`LedgerDomainError::InvalidNamespace`] if the namespace is
/// invalid.
pub fn ledger_config() -> Result<LedgerConfig, LedgerDomainError> {
    Ok(LedgerConfig::new(root_namespace()?))
}
