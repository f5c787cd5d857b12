//! Shared test helpers for in-memory ledger integration tests.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use async_trait::async_trait;
use mockable::DefaultClock;
use rstest::fixture;
use todo_ledger::{
    ledger::{
        adapters::memory::InMemoryStateStore,
        domain::{EntityKey, QualifiedType, Relationship, StateKey},
        ports::{ChangeSet, StateStore, StateStoreError, StateStoreResult, Version, VersionedRecord},
        services::Ledger,
    },
    todolist::{
        domain::{Admin, Superhero, Task, ledger_config},
        services::TodoListService,
    },
};

/// Service over the plain in-memory store.
pub type TestService = TodoListService<InMemoryStateStore, DefaultClock>;

/// Provides a fresh in-memory world state for each test.
#[fixture]
pub fn store() -> InMemoryStateStore {
    InMemoryStateStore::new()
}

/// Builds a todo-list service over `store`.
///
/// # Panics
///
/// Panics if the todo-list namespace is invalid.
pub fn service_over<S: StateStore>(store: S) -> TodoListService<S, DefaultClock> {
    let config = ledger_config().expect("valid ledger config");
    TodoListService::new(Ledger::new(Arc::new(store), Arc::new(DefaultClock), config))
}

/// Builds a service over `store` and runs the bootstrap transaction.
///
/// # Errors
///
/// Returns an error if bootstrapping fails.
pub async fn bootstrapped(store: InMemoryStateStore) -> Result<TestService, eyre::Report> {
    let service = service_over(store);
    service.bootstrap().await?;
    Ok(service)
}

/// Relationship to the task with `code`.
///
/// # Errors
///
/// Returns an error if the code is not a valid key.
pub fn task_ref<S: StateStore>(
    service: &TodoListService<S, DefaultClock>,
    code: &str,
) -> Result<Relationship<Task>, eyre::Report> {
    Ok(service.ledger().factory().new_relationship::<Task>(code)?)
}

/// Relationship to the superhero with `email`.
///
/// # Errors
///
/// Returns an error if the email is not a valid key.
pub fn hero_ref<S: StateStore>(
    service: &TodoListService<S, DefaultClock>,
    email: &str,
) -> Result<Relationship<Superhero>, eyre::Report> {
    Ok(service
        .ledger()
        .factory()
        .new_relationship::<Superhero>(email)?)
}

/// Relationship to the admin with `email`.
///
/// # Errors
///
/// Returns an error if the email is not a valid key.
pub fn admin_ref<S: StateStore>(
    service: &TodoListService<S, DefaultClock>,
    email: &str,
) -> Result<Relationship<Admin>, eyre::Report> {
    Ok(service.ledger().factory().new_relationship::<Admin>(email)?)
}

/// In-memory store whose next commit can be made to fail.
#[derive(Debug, Clone, Default)]
pub struct FailingCommitStore {
    inner: InMemoryStateStore,
    fail_next_commit: Arc<AtomicBool>,
}

impl FailingCommitStore {
    /// Wraps `inner`.
    #[must_use]
    pub fn new(inner: InMemoryStateStore) -> Self {
        Self {
            inner,
            fail_next_commit: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Makes the next commit fail with a persistence error.
    pub fn fail_next_commit(&self) {
        self.fail_next_commit.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl StateStore for FailingCommitStore {
    async fn read(&self, key: &StateKey) -> StateStoreResult<Option<VersionedRecord>> {
        self.inner.read(key).await
    }

    async fn scan(
        &self,
        qualified_type: &QualifiedType,
    ) -> StateStoreResult<Vec<(EntityKey, VersionedRecord)>> {
        self.inner.scan(qualified_type).await
    }

    async fn commit(&self, change_set: ChangeSet) -> StateStoreResult<Version> {
        if self.fail_next_commit.swap(false, Ordering::SeqCst) {
            return Err(StateStoreError::persistence(std::io::Error::other(
                "injected commit failure",
            )));
        }
        self.inner.commit(change_set).await
    }
}
