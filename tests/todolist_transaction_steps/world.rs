//! Shared world state for todo-list transaction BDD scenarios.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use todo_ledger::{
    ledger::{adapters::memory::InMemoryStateStore, services::Ledger},
    todolist::{
        domain::{Superhero, Task, ledger_config},
        services::{TodoListError, TodoListService},
    },
};

/// Service type used by the BDD world.
pub type TestTodoListService = TodoListService<InMemoryStateStore, DefaultClock>;

/// Scenario world for todo-list behaviour tests.
pub struct TodoListWorld {
    pub service: TestTodoListService,
    pub last_error: Option<TodoListError>,
}

impl TodoListWorld {
    /// Creates a world over an empty ledger.
    ///
    /// # Panics
    ///
    /// Panics if the todo-list namespace is invalid.
    #[must_use]
    pub fn new() -> Self {
        let config = ledger_config().expect("valid ledger config");
        let ledger = Ledger::new(
            Arc::new(InMemoryStateStore::new()),
            Arc::new(DefaultClock),
            config,
        );
        Self {
            service: TodoListService::new(ledger),
            last_error: None,
        }
    }

    /// Builds an execute or assign target for `code`.
    ///
    /// # Errors
    ///
    /// Returns an error if `code` is not a valid key.
    pub fn task_ref(
        &self,
        code: &str,
    ) -> Result<todo_ledger::ledger::domain::Relationship<Task>, eyre::Report> {
        Ok(self
            .service
            .ledger()
            .factory()
            .new_relationship::<Task>(code)?)
    }

    /// Builds an assignee for `email`.
    ///
    /// # Errors
    ///
    /// Returns an error if `email` is not a valid key.
    pub fn hero_ref(
        &self,
        email: &str,
    ) -> Result<todo_ledger::ledger::domain::Relationship<Superhero>, eyre::Report> {
        Ok(self
            .service
            .ledger()
            .factory()
            .new_relationship::<Superhero>(email)?)
    }
}

impl Default for TodoListWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TodoListWorld {
    TodoListWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
