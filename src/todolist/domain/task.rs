//! Task asset and its lifecycle state machine.

use super::{Admin, ParseTaskStateError, Superhero, TodoDomainError};
use crate::ledger::domain::{EntityKey, Relationship, Resource, ResourceCategory};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskState {
    /// Task is open and may be assigned or executed.
    Active,
    /// Task has been executed. Terminal.
    Completed,
}

impl TaskState {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Completed => "COMPLETED",
        }
    }

    /// Reports whether moving from `self` to `next` is permitted.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!((self, next), (Self::Active, Self::Completed))
    }

    /// Reports whether no transition leaves this state.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed)
    }
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskState {
    type Error = ParseTaskStateError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_uppercase();
        match normalized.as_str() {
            "ACTIVE" => Ok(Self::Active),
            "COMPLETED" => Ok(Self::Completed),
            _ => Err(ParseTaskStateError(value.to_owned())),
        }
    }
}

/// Task asset created by an admin and assignable to a superhero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    task_id: EntityKey,
    description: String,
    state: TaskState,
    creator: Relationship<Admin>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    assignee: Option<Relationship<Superhero>>,
}

impl Task {
    /// Creates an active, unassigned task.
    ///
    /// # Errors
    ///
    /// Returns [`TodoDomainError::InvalidTaskCode`] when the code is empty or
    /// contains whitespace, and [`TodoDomainError::EmptyDescription`] when
    /// the description is blank.
    pub fn new(
        code: impl Into<String>,
        description: impl Into<String>,
        creator: Relationship<Admin>,
    ) -> Result<Self, TodoDomainError> {
        let raw_code = code.into();
        let code_is_valid = !raw_code.is_empty() && !raw_code.chars().any(char::is_whitespace);
        if !code_is_valid {
            return Err(TodoDomainError::InvalidTaskCode(raw_code));
        }

        let description = description.into();
        if description.trim().is_empty() {
            return Err(TodoDomainError::EmptyDescription);
        }

        Ok(Self {
            task_id: EntityKey::new(raw_code)?,
            description,
            state: TaskState::Active,
            creator,
            assignee: None,
        })
    }

    /// Returns the task code.
    #[must_use]
    pub const fn task_id(&self) -> &EntityKey {
        &self.task_id
    }

    /// Returns the task description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the lifecycle state.
    #[must_use]
    pub const fn state(&self) -> TaskState {
        self.state
    }

    /// Returns the admin who created the task.
    #[must_use]
    pub const fn creator(&self) -> &Relationship<Admin> {
        &self.creator
    }

    /// Returns the assigned superhero, if any.
    #[must_use]
    pub const fn assignee(&self) -> Option<&Relationship<Superhero>> {
        self.assignee.as_ref()
    }

    /// Assigns the task, replacing any previous assignee.
    ///
    /// # Errors
    ///
    /// Returns [`TodoDomainError::InvalidState`] unless the task is active.
    pub fn assign(&mut self, assignee: Relationship<Superhero>) -> Result<(), TodoDomainError> {
        self.ensure_active()?;
        self.assignee = Some(assignee);
        Ok(())
    }

    /// Marks the task completed.
    ///
    /// # Errors
    ///
    /// Returns [`TodoDomainError::InvalidState`] unless the task is active.
    pub fn execute(&mut self) -> Result<(), TodoDomainError> {
        self.transition_to(TaskState::Completed)
    }

    /// Moves the task to `next` if the state machine permits it.
    ///
    /// # Errors
    ///
    /// Returns [`TodoDomainError::InvalidState`] for a forbidden transition.
    pub fn transition_to(&mut self, next: TaskState) -> Result<(), TodoDomainError> {
        if !self.state.can_transition_to(next) {
            return Err(self.invalid_state());
        }
        self.state = next;
        Ok(())
    }

    fn ensure_active(&self) -> Result<(), TodoDomainError> {
        if self.state == TaskState::Active {
            Ok(())
        } else {
            Err(self.invalid_state())
        }
    }

    fn invalid_state(&self) -> TodoDomainError {
        TodoDomainError::InvalidState {
            task: self.task_id.clone(),
            state: self.state,
        }
    }
}

impl Resource for Task {
    const TYPE_NAME: &'static str = "Task";
    const CATEGORY: ResourceCategory = ResourceCategory::Asset;

    fn key(&self) -> &EntityKey {
        &self.task_id
    }
}
