//! Error types for todo-list domain validation and parsing.

use super::TaskState;
use crate::ledger::domain::{EntityKey, LedgerDomainError};
use thiserror::Error;

/// Errors returned while constructing or mutating todo-list entities.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TodoDomainError {
    /// The task is no longer active.
    #[error("Task has already been executed")]
    InvalidState {
        /// Task that rejected the transition.
        task: EntityKey,
        /// State the task was in.
        state: TaskState,
    },

    /// The email address is malformed.
    #[error("invalid email address '{0}'")]
    InvalidEmail(String),

    /// The task code is empty or contains whitespace.
    #[error("invalid task code '{0}', expected a non-empty code without whitespace")]
    InvalidTaskCode(String),

    /// The task description is empty after trimming.
    #[error("task description must not be empty")]
    EmptyDescription,

    /// A participant name field is empty after trimming.
    #[error("{0} must not be empty")]
    EmptyName(&'static str),

    /// Ledger identifier validation failed.
    #[error(transparent)]
    Ledger(#[from] LedgerDomainError),
}

/// Error returned while parsing task states.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task state: {0}")]
pub struct ParseTaskStateError(pub String);
