//! Transaction handlers for the todo-list ledger.

mod handlers;
mod requests;

pub use handlers::{
    ASSIGN_TRANSACTION, BOOTSTRAP_TRANSACTION, CREATE_TASK_TRANSACTION, EXECUTE_TRANSACTION,
    TodoListError, TodoListResult, TodoListService,
};
pub use requests::{AssignRequest, CreateTaskRequest, ExecuteRequest};
