//! Request payloads for todo-list transactions.

use crate::ledger::domain::Relationship;
use crate::todolist::domain::{Admin, Superhero, Task};

/// Request to assign a task to a superhero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignRequest {
    task: Relationship<Task>,
    assignee: Relationship<Superhero>,
}

impl AssignRequest {
    /// Creates an assign request.
    #[must_use]
    pub const fn new(task: Relationship<Task>, assignee: Relationship<Superhero>) -> Self {
        Self { task, assignee }
    }

    /// Returns the task to assign.
    #[must_use]
    pub const fn task(&self) -> &Relationship<Task> {
        &self.task
    }

    /// Returns the superhero to assign the task to.
    #[must_use]
    pub const fn assignee(&self) -> &Relationship<Superhero> {
        &self.assignee
    }
}

/// Request to mark a task completed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecuteRequest {
    task: Relationship<Task>,
}

impl ExecuteRequest {
    /// Creates an execute request.
    #[must_use]
    pub const fn new(task: Relationship<Task>) -> Self {
        Self { task }
    }

    /// Returns the task to execute.
    #[must_use]
    pub const fn task(&self) -> &Relationship<Task> {
        &self.task
    }
}

/// Request to create a new active task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    code: String,
    description: String,
    creator: Relationship<Admin>,
}

impl CreateTaskRequest {
    /// Creates a create-task request.
    #[must_use]
    pub fn new(
        code: impl Into<String>,
        description: impl Into<String>,
        creator: Relationship<Admin>,
    ) -> Self {
        Self {
            code: code.into(),
            description: description.into(),
            creator,
        }
    }

    pub(super) fn into_parts(self) -> (String, String, Relationship<Admin>) {
        (self.code, self.description, self.creator)
    }
}
