//! Then steps for todo-list transaction BDD scenarios.

use super::world::{TodoListWorld, run_async};
use rstest_bdd_macros::then;
use todo_ledger::todolist::domain::TaskState;

fn parse_state(state: &str) -> Result<TaskState, eyre::Report> {
    TaskState::try_from(state).map_err(|err| eyre::eyre!("invalid expected state in scenario: {err}"))
}

#[then("the ledger holds {admins:usize} admins, {heroes:usize} superheroes and {tasks:usize} tasks")]
fn ledger_holds(
    world: &TodoListWorld,
    admins: usize,
    heroes: usize,
    tasks: usize,
) -> Result<(), eyre::Report> {
    if let Some(err) = &world.last_error {
        return Err(eyre::eyre!("bootstrap failed: {err}"));
    }
    let found = (
        run_async(world.service.list_admins())?.len(),
        run_async(world.service.list_superheroes())?.len(),
        run_async(world.service.list_tasks())?.len(),
    );
    eyre::ensure!(
        found == (admins, heroes, tasks),
        "expected {admins}/{heroes}/{tasks} entities, found {found:?}"
    );
    Ok(())
}

#[then(r#"every task is "{state}""#)]
fn every_task_is(world: &TodoListWorld, state: String) -> Result<(), eyre::Report> {
    let expected = parse_state(&state)?;
    let tasks = run_async(world.service.list_tasks())?;
    eyre::ensure!(
        tasks.iter().all(|task| task.state() == expected),
        "expected every task to be {expected}"
    );
    Ok(())
}

#[then(r#"the transaction fails with "{message}""#)]
fn transaction_fails_with(world: &TodoListWorld, message: String) -> Result<(), eyre::Report> {
    let err = world
        .last_error
        .as_ref()
        .ok_or_else(|| eyre::eyre!("expected the transaction to fail"))?;
    eyre::ensure!(
        err.to_string() == message,
        "expected error '{message}', got '{err}'"
    );
    Ok(())
}

#[then(r#"task "{code}" is assigned to "{email}""#)]
fn task_is_assigned_to(
    world: &TodoListWorld,
    code: String,
    email: String,
) -> Result<(), eyre::Report> {
    let task = run_async(world.service.get_task(&code))?;
    let assignee = task.assignee().map(|hero| hero.key().as_str());
    eyre::ensure!(
        assignee == Some(email.as_str()),
        "expected {code} assigned to {email}, found {assignee:?}"
    );
    Ok(())
}

#[then(r#"task "{code}" is "{state}""#)]
fn task_is_in_state(world: &TodoListWorld, code: String, state: String) -> Result<(), eyre::Report> {
    let expected = parse_state(&state)?;
    let task = run_async(world.service.get_task(&code))?;
    eyre::ensure!(
        task.state() == expected,
        "expected {code} to be {expected}, found {}",
        task.state()
    );
    Ok(())
}

#[then(r#"task "{code}" has no assignee"#)]
fn task_has_no_assignee(world: &TodoListWorld, code: String) -> Result<(), eyre::Report> {
    let task = run_async(world.service.get_task(&code))?;
    eyre::ensure!(task.assignee().is_none(), "expected {code} to be unassigned");
    Ok(())
}
