//! Integration tests for the assign, execute and create-task handlers.

use super::helpers::{admin_ref, bootstrapped, hero_ref, service_over, store, task_ref};
use rstest::rstest;
use todo_ledger::{
    ledger::{adapters::memory::InMemoryStateStore, services::LedgerError},
    todolist::{
        domain::{SAMPLE_ADMIN_EMAIL, TaskState, TodoDomainError},
        services::{AssignRequest, CreateTaskRequest, ExecuteRequest, TodoListError},
    },
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn assign_then_execute_completes_assigned_task(
    store: InMemoryStateStore,
) -> Result<(), eyre::Report> {
    let service = bootstrapped(store).await?;

    service
        .assign(AssignRequest::new(
            task_ref(&service, "T1")?,
            hero_ref(&service, "batman@example.com")?,
        ))
        .await?;
    service
        .execute(ExecuteRequest::new(task_ref(&service, "T1")?))
        .await?;

    let task = service.get_task("T1").await?;
    eyre::ensure!(task.state() == TaskState::Completed, "task must be completed");
    eyre::ensure!(
        task.assignee().map(|hero| hero.key().as_str()) == Some("batman@example.com"),
        "assignee must survive execution"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reassigning_active_task_replaces_assignee(
    store: InMemoryStateStore,
) -> Result<(), eyre::Report> {
    let service = bootstrapped(store).await?;

    for email in ["catwoman@example.com", "superman@example.com"] {
        service
            .assign(AssignRequest::new(
                task_ref(&service, "T2")?,
                hero_ref(&service, email)?,
            ))
            .await?;
    }

    let task = service.get_task("T2").await?;
    eyre::ensure!(
        task.assignee().map(|hero| hero.key().as_str()) == Some("superman@example.com"),
        "latest assignment must win"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn executed_task_reports_already_executed(
    store: InMemoryStateStore,
) -> Result<(), eyre::Report> {
    let service = bootstrapped(store).await?;
    service
        .execute(ExecuteRequest::new(task_ref(&service, "T5")?))
        .await?;

    let result = service
        .execute(ExecuteRequest::new(task_ref(&service, "T5")?))
        .await;

    let err = result
        .err()
        .ok_or_else(|| eyre::eyre!("second execution must fail"))?;
    eyre::ensure!(
        matches!(err, TodoListError::Domain(TodoDomainError::InvalidState { .. })),
        "expected InvalidState, got {err:?}"
    );
    eyre::ensure!(
        err.to_string() == "Task has already been executed",
        "unexpected message {err}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn created_task_can_be_assigned_and_executed(
    store: InMemoryStateStore,
) -> Result<(), eyre::Report> {
    let service = bootstrapped(store).await?;
    service
        .create_task(CreateTaskRequest::new(
            "T6",
            "Stop the Riddler",
            admin_ref(&service, SAMPLE_ADMIN_EMAIL)?,
        ))
        .await?;

    service
        .assign(AssignRequest::new(
            task_ref(&service, "T6")?,
            hero_ref(&service, "spiderman@example.com")?,
        ))
        .await?;
    let executed = service
        .execute(ExecuteRequest::new(task_ref(&service, "T6")?))
        .await?;

    eyre::ensure!(executed.state() == TaskState::Completed, "task must complete");
    eyre::ensure!(service.list_tasks().await?.len() == 6, "expected six tasks");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn handlers_before_bootstrap_find_nothing(
    store: InMemoryStateStore,
) -> Result<(), eyre::Report> {
    let service = service_over(store);

    let result = service
        .execute(ExecuteRequest::new(task_ref(&service, "T1")?))
        .await;

    eyre::ensure!(
        matches!(result, Err(TodoListError::Ledger(LedgerError::NotFound { .. }))),
        "expected NotFound, got {result:?}"
    );
    Ok(())
}
