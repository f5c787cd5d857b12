//! Bootstrap, assign, execute and create-task transaction handlers.
//!
//! Every handler opens one ledger transaction, resolves the entities it needs
//! from the registries inside that transaction, applies the state-machine
//! guarded mutation and commits. Any failure drops the transaction, so no
//! handler leaves partial writes.

use super::{AssignRequest, CreateTaskRequest, ExecuteRequest};
use crate::ledger::{
    domain::{HistorianRecord, Resource},
    ports::StateStore,
    services::{CommitReceipt, Ledger, LedgerError, Transaction},
};
use crate::todolist::domain::{
    Admin, BootstrapMarker, Superhero, Task, TodoDomainError, sample_data,
};
use mockable::Clock;
use thiserror::Error;
use tracing::{error, info, warn};

/// Transaction type of the seeding transaction.
pub const BOOTSTRAP_TRANSACTION: &str = "Bootstrap";
/// Transaction type of task assignment.
pub const ASSIGN_TRANSACTION: &str = "Assign";
/// Transaction type of task execution.
pub const EXECUTE_TRANSACTION: &str = "Execute";
/// Transaction type of task creation.
pub const CREATE_TASK_TRANSACTION: &str = "CreateTask";
const QUERY_TRANSACTION: &str = "Query";

/// Service-level errors for todo-list transactions.
#[derive(Debug, Clone, Error)]
pub enum TodoListError {
    /// The ledger has already been seeded.
    #[error("Already bootstrapped")]
    AlreadyBootstrapped,
    /// A task names a creator that is not a registered admin.
    #[error("task creator {0} is not a registered admin")]
    CreatorNotFound(String),
    /// Domain validation or a state-machine guard failed.
    #[error(transparent)]
    Domain(#[from] TodoDomainError),
    /// Registry or transaction operation failed.
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

/// Result type for todo-list transactions.
pub type TodoListResult<T> = Result<T, TodoListError>;

/// Todo-list transaction handlers over one ledger.
#[derive(Clone)]
pub struct TodoListService<S, C>
where
    S: StateStore,
    C: Clock + Send + Sync,
{
    ledger: Ledger<S, C>,
}

impl<S, C> TodoListService<S, C>
where
    S: StateStore,
    C: Clock + Send + Sync,
{
    /// Creates the service over `ledger`.
    #[must_use]
    pub const fn new(ledger: Ledger<S, C>) -> Self {
        Self { ledger }
    }

    /// Returns the underlying ledger.
    #[must_use]
    pub const fn ledger(&self) -> &Ledger<S, C> {
        &self.ledger
    }

    /// Seeds the sample admin, superheroes and tasks exactly once.
    ///
    /// The bootstrap marker is checked and written in the same transaction as
    /// the seed inserts, so a failed bootstrap can be retried.
    ///
    /// # Errors
    ///
    /// Returns [`TodoListError::AlreadyBootstrapped`] when the marker exists,
    /// or the registry error that aborted seeding.
    pub async fn bootstrap(&self) -> TodoListResult<CommitReceipt> {
        self.seed()
            .await
            .inspect_err(|err| error!(error = %err, "bootstrap failed"))
    }

    async fn seed(&self) -> TodoListResult<CommitReceipt> {
        let transaction = self.ledger.begin(BOOTSTRAP_TRANSACTION)?;
        let markers = transaction.system_registry::<BootstrapMarker>()?;
        let marker = BootstrapMarker::new(transaction.id(), transaction.timestamp())?;
        if markers.exists(marker.key()).await? {
            return Err(TodoListError::AlreadyBootstrapped);
        }
        markers.add(&marker).await?;

        let seed = sample_data(transaction.factory())?;
        transaction
            .participant_registry::<Superhero>()?
            .add_all(&seed.superheroes)
            .await?;
        transaction
            .participant_registry::<Admin>()?
            .add_all(&seed.admins)
            .await?;
        add_tasks(&transaction, &seed.tasks).await?;

        let receipt = transaction.commit().await?;
        info!(
            transaction_id = %receipt.transaction_id,
            admins = seed.admins.len(),
            superheroes = seed.superheroes.len(),
            tasks = seed.tasks.len(),
            "ledger bootstrapped"
        );
        Ok(receipt)
    }

    /// Assigns a task to a superhero.
    ///
    /// # Errors
    ///
    /// Returns [`TodoDomainError::InvalidState`] when the task has been
    /// executed, and [`LedgerError::NotFound`] when the task or superhero
    /// does not exist.
    pub async fn assign(&self, request: AssignRequest) -> TodoListResult<Task> {
        let transaction = self.ledger.begin(ASSIGN_TRANSACTION)?;
        let outcome = assign_task(&transaction, &request).await;
        finish(transaction, outcome).await
    }

    /// Marks a task completed.
    ///
    /// # Errors
    ///
    /// Returns [`TodoDomainError::InvalidState`] when the task has already
    /// been executed, and [`LedgerError::NotFound`] when it does not exist.
    pub async fn execute(&self, request: ExecuteRequest) -> TodoListResult<Task> {
        let transaction = self.ledger.begin(EXECUTE_TRANSACTION)?;
        let outcome = execute_task(&transaction, &request).await;
        finish(transaction, outcome).await
    }

    /// Creates a new active task.
    ///
    /// # Errors
    ///
    /// Returns [`TodoListError::CreatorNotFound`] when the creator is not a
    /// registered admin, [`LedgerError::DuplicateKey`] when the code is
    /// taken, or [`TodoDomainError`] for invalid fields.
    pub async fn create_task(&self, request: CreateTaskRequest) -> TodoListResult<Task> {
        let transaction = self.ledger.begin(CREATE_TASK_TRANSACTION)?;
        let outcome = create_task(&transaction, request).await;
        finish(transaction, outcome).await
    }

    /// Returns the task with `code`.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::NotFound`] when no task has the code.
    pub async fn get_task(&self, code: &str) -> TodoListResult<Task> {
        let transaction = self.ledger.begin(QUERY_TRANSACTION)?;
        let reference = transaction
            .factory()
            .new_relationship::<Task>(code)
            .map_err(TodoDomainError::from)?;
        Ok(transaction
            .asset_registry::<Task>()?
            .resolve(&reference)
            .await?)
    }

    /// Returns every task, ordered by code.
    ///
    /// # Errors
    ///
    /// Returns [`TodoListError::Ledger`] when world state cannot be read.
    pub async fn list_tasks(&self) -> TodoListResult<Vec<Task>> {
        let transaction = self.ledger.begin(QUERY_TRANSACTION)?;
        Ok(transaction.asset_registry::<Task>()?.get_all().await?)
    }

    /// Returns every superhero, ordered by email.
    ///
    /// # Errors
    ///
    /// Returns [`TodoListError::Ledger`] when world state cannot be read.
    pub async fn list_superheroes(&self) -> TodoListResult<Vec<Superhero>> {
        let transaction = self.ledger.begin(QUERY_TRANSACTION)?;
        Ok(transaction
            .participant_registry::<Superhero>()?
            .get_all()
            .await?)
    }

    /// Returns every admin, ordered by email.
    ///
    /// # Errors
    ///
    /// Returns [`TodoListError::Ledger`] when world state cannot be read.
    pub async fn list_admins(&self) -> TodoListResult<Vec<Admin>> {
        let transaction = self.ledger.begin(QUERY_TRANSACTION)?;
        Ok(transaction.participant_registry::<Admin>()?.get_all().await?)
    }

    /// Reports whether the bootstrap transaction has committed.
    ///
    /// # Errors
    ///
    /// Returns [`TodoListError::Ledger`] when world state cannot be read.
    pub async fn is_bootstrapped(&self) -> TodoListResult<bool> {
        let transaction = self.ledger.begin(QUERY_TRANSACTION)?;
        let key = BootstrapMarker::marker_key()?;
        Ok(transaction
            .system_registry::<BootstrapMarker>()?
            .exists(&key)
            .await?)
    }

    /// Returns the historian records of committed transactions, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`TodoListError::Ledger`] when world state cannot be read.
    pub async fn history(&self) -> TodoListResult<Vec<HistorianRecord>> {
        Ok(self.ledger.history().await?)
    }
}

async fn assign_task<S: StateStore>(
    transaction: &Transaction<S>,
    request: &AssignRequest,
) -> TodoListResult<Task> {
    let tasks = transaction.asset_registry::<Task>()?;
    let mut task = tasks.resolve(request.task()).await?;
    task.assign(request.assignee().clone())?;
    transaction
        .participant_registry::<Superhero>()?
        .resolve(request.assignee())
        .await?;
    tasks.update(&task).await?;
    Ok(task)
}

async fn execute_task<S: StateStore>(
    transaction: &Transaction<S>,
    request: &ExecuteRequest,
) -> TodoListResult<Task> {
    let tasks = transaction.asset_registry::<Task>()?;
    let mut task = tasks.resolve(request.task()).await?;
    task.execute()?;
    tasks.update(&task).await?;
    Ok(task)
}

async fn create_task<S: StateStore>(
    transaction: &Transaction<S>,
    request: CreateTaskRequest,
) -> TodoListResult<Task> {
    let (code, description, creator) = request.into_parts();
    let task = Task::new(code, description, creator)?;
    add_tasks(transaction, std::slice::from_ref(&task)).await?;
    Ok(task)
}

/// Inserts tasks after checking each creator is a registered admin, staged
/// writes of the same transaction included.
async fn add_tasks<S: StateStore>(
    transaction: &Transaction<S>,
    tasks: &[Task],
) -> TodoListResult<()> {
    let admins = transaction.participant_registry::<Admin>()?;
    for task in tasks {
        match admins.resolve(task.creator()).await {
            Ok(_) => {}
            Err(LedgerError::NotFound { .. }) => {
                return Err(TodoListError::CreatorNotFound(task.creator().to_string()));
            }
            Err(err) => return Err(err.into()),
        }
    }
    transaction.asset_registry::<Task>()?.add_all(tasks).await?;
    Ok(())
}

/// Commits on success; drops the transaction and logs on failure.
async fn finish<S: StateStore, T>(
    transaction: Transaction<S>,
    outcome: TodoListResult<T>,
) -> TodoListResult<T> {
    match outcome {
        Ok(value) => {
            transaction.commit().await?;
            Ok(value)
        }
        Err(err) => {
            warn!(
                transaction_id = %transaction.id(),
                transaction_type = %transaction.transaction_type(),
                error = %err,
                "transaction rolled back"
            );
            Err(err)
        }
    }
}
