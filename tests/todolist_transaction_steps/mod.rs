//! Step definitions for todo-list transaction scenarios.

mod then;
mod when;
pub mod world;
