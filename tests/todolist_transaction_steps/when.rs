//! When steps for todo-list transaction BDD scenarios.

use super::world::{TodoListWorld, run_async};
use rstest_bdd_macros::when;
use todo_ledger::todolist::services::{AssignRequest, ExecuteRequest};

#[when("the ledger is bootstrapped")]
fn ledger_is_bootstrapped(world: &mut TodoListWorld) {
    world.last_error = run_async(world.service.bootstrap()).err();
}

#[when(r#"task "{code}" is assigned to "{email}""#)]
fn task_is_assigned(
    world: &mut TodoListWorld,
    code: String,
    email: String,
) -> Result<(), eyre::Report> {
    let request = AssignRequest::new(world.task_ref(&code)?, world.hero_ref(&email)?);
    world.last_error = run_async(world.service.assign(request)).err();
    Ok(())
}

#[when(r#"task "{code}" is executed"#)]
fn task_is_executed(world: &mut TodoListWorld, code: String) -> Result<(), eyre::Report> {
    let request = ExecuteRequest::new(world.task_ref(&code)?);
    world.last_error = run_async(world.service.execute(request)).err();
    Ok(())
}
