//! Unit tests for the todo-list domain and transaction handlers.
