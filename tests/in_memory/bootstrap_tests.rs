//! Integration tests for the one-time bootstrap transaction.

use super::helpers::{FailingCommitStore, bootstrapped, service_over, store};
use rstest::rstest;
use todo_ledger::{
    ledger::{adapters::memory::InMemoryStateStore, ports::StateStoreError, services::LedgerError},
    todolist::{domain::TaskState, services::TodoListError},
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn bootstrap_seeds_admin_superheroes_and_tasks(
    store: InMemoryStateStore,
) -> Result<(), eyre::Report> {
    let service = bootstrapped(store).await?;

    let admins = service.list_admins().await?;
    eyre::ensure!(admins.len() == 1, "expected one admin, found {}", admins.len());
    let heroes: Vec<_> = service
        .list_superheroes()
        .await?
        .iter()
        .map(|hero| hero.email().as_str().to_owned())
        .collect();
    eyre::ensure!(
        heroes
            == [
                "batman@example.com",
                "catwoman@example.com",
                "spiderman@example.com",
                "superman@example.com",
            ],
        "unexpected superheroes {heroes:?}"
    );
    let tasks = service.list_tasks().await?;
    eyre::ensure!(tasks.len() == 5, "expected five tasks, found {}", tasks.len());
    eyre::ensure!(
        tasks
            .iter()
            .all(|task| task.state() == TaskState::Active && task.assignee().is_none()),
        "seeded tasks must be active and unassigned"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn bootstrap_twice_is_rejected(store: InMemoryStateStore) -> Result<(), eyre::Report> {
    let service = bootstrapped(store.clone()).await?;
    let height = store.height()?;

    let result = service.bootstrap().await;

    eyre::ensure!(
        matches!(result, Err(TodoListError::AlreadyBootstrapped)),
        "expected AlreadyBootstrapped, got {result:?}"
    );
    eyre::ensure!(store.height()? == height, "rejected bootstrap must not commit");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn failed_bootstrap_can_be_retried(store: InMemoryStateStore) -> Result<(), eyre::Report> {
    let failing = FailingCommitStore::new(store.clone());
    let service = service_over(failing.clone());
    failing.fail_next_commit();

    let first = service.bootstrap().await;

    eyre::ensure!(
        matches!(
            first,
            Err(TodoListError::Ledger(LedgerError::Store(
                StateStoreError::Persistence(_)
            )))
        ),
        "expected injected persistence failure, got {first:?}"
    );
    eyre::ensure!(!service.is_bootstrapped().await?, "marker must not persist");
    eyre::ensure!(store.record_count()? == 0, "no seed data may persist");

    service.bootstrap().await?;

    eyre::ensure!(service.is_bootstrapped().await?, "retry must bootstrap");
    eyre::ensure!(service.list_tasks().await?.len() == 5, "retry seeds tasks");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn bootstrap_is_recorded_in_history(store: InMemoryStateStore) -> Result<(), eyre::Report> {
    let service = bootstrapped(store).await?;

    let history = service.history().await?;

    eyre::ensure!(history.len() == 1, "expected one record, found {}", history.len());
    let record = history
        .first()
        .ok_or_else(|| eyre::eyre!("missing historian record"))?;
    eyre::ensure!(
        record.transaction_type().to_string() == "org.example.todolist.hlfv1.Bootstrap",
        "unexpected transaction type {}",
        record.transaction_type()
    );
    Ok(())
}
