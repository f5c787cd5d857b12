//! Ledger transactions: the atomic unit every handler runs in.
//!
//! A [`Transaction`] records the version of every record it reads and stages
//! every write locally. Nothing reaches world state until
//! [`Transaction::commit`], which hands both sets to the [`StateStore`] for
//! validation and atomic application. Dropping a transaction discards it.

use super::Registry;
use crate::ledger::{
    LedgerConfig,
    domain::{
        EntityKey, Factory, HistorianRecord, LedgerDomainError, QualifiedType, Resource,
        ResourceCategory, StateKey, TransactionId,
    },
    ports::{ChangeSet, StateStore, StateStoreError, Version},
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Transaction type used for read-only queries that never commit.
const QUERY_TRANSACTION: &str = "Query";

/// Errors returned by registry and transaction operations.
#[derive(Debug, Clone, Error)]
pub enum LedgerError {
    /// An entity with the same key already exists in the registry.
    #[error("duplicate key '{key}' in registry {qualified_type}")]
    DuplicateKey {
        /// Registry type.
        qualified_type: QualifiedType,
        /// Conflicting key.
        key: EntityKey,
    },

    /// No entity with the key exists in the registry.
    #[error("{qualified_type} with key '{key}' not found")]
    NotFound {
        /// Registry type.
        qualified_type: QualifiedType,
        /// Missing key.
        key: EntityKey,
    },

    /// The registry was requested through the wrong category accessor.
    #[error("{qualified_type} is a {actual} registry, not a {requested} registry")]
    CategoryMismatch {
        /// Registry type.
        qualified_type: QualifiedType,
        /// Category of the accessor used.
        requested: ResourceCategory,
        /// Category declared by the type.
        actual: ResourceCategory,
    },

    /// A relationship was resolved against a registry of another type.
    #[error("relationship {relationship} does not target registry {qualified_type}")]
    RelationshipTypeMismatch {
        /// Relationship URI.
        relationship: String,
        /// Registry type.
        qualified_type: QualifiedType,
    },

    /// An entity could not be converted to or from its stored record.
    #[error("record serialisation failed: {0}")]
    Serialization(Arc<serde_json::Error>),

    /// Identifier validation failed.
    #[error(transparent)]
    Domain(#[from] LedgerDomainError),

    /// World-state operation failed.
    #[error(transparent)]
    Store(#[from] StateStoreError),
}

impl LedgerError {
    /// Wraps a record serialisation error.
    #[must_use]
    pub fn serialization(err: serde_json::Error) -> Self {
        Self::Serialization(Arc::new(err))
    }
}

/// Result type for ledger operations.
pub type LedgerResult<T> = Result<T, LedgerError>;

/// Outcome of a successful commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommitReceipt {
    /// Identifier of the committed transaction.
    pub transaction_id: TransactionId,
    /// Height the change set was committed at.
    pub version: Version,
}

/// Entry point for opening transactions against one world state.
#[derive(Clone)]
pub struct Ledger<S, C>
where
    S: StateStore,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    clock: Arc<C>,
    config: LedgerConfig,
    factory: Factory,
}

impl<S, C> Ledger<S, C>
where
    S: StateStore,
    C: Clock + Send + Sync,
{
    /// Creates a ledger over `store`.
    #[must_use]
    pub fn new(store: Arc<S>, clock: Arc<C>, config: LedgerConfig) -> Self {
        let factory = Factory::new(config.namespace.clone());
        Self {
            store,
            clock,
            config,
            factory,
        }
    }

    /// Returns the ledger configuration.
    #[must_use]
    pub const fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// Returns the factory for this ledger's namespace.
    #[must_use]
    pub const fn factory(&self) -> &Factory {
        &self.factory
    }

    /// Opens a transaction of type `transaction_type` (unqualified, e.g.
    /// `Assign`).
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Domain`] when the type name is invalid.
    pub fn begin(&self, transaction_type: &str) -> LedgerResult<Transaction<S>> {
        let qualified = QualifiedType::new(self.config.namespace.clone(), transaction_type)?;
        let transaction = Transaction {
            store: Arc::clone(&self.store),
            factory: self.factory.clone(),
            id: TransactionId::new(),
            transaction_type: qualified,
            timestamp: self.clock.utc(),
            record_history: self.config.record_history,
            working: Mutex::new(WorkingSet::default()),
        };
        debug!(
            transaction_id = %transaction.id,
            transaction_type = %transaction.transaction_type,
            "transaction started"
        );
        Ok(transaction)
    }

    /// Returns the historian records of all committed transactions, oldest
    /// first.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError`] when world state cannot be read or a record
    /// cannot be decoded.
    pub async fn history(&self) -> LedgerResult<Vec<HistorianRecord>> {
        let transaction = self.begin(QUERY_TRANSACTION)?;
        let mut records = transaction
            .system_registry::<HistorianRecord>()?
            .get_all()
            .await?;
        records.sort_by_key(HistorianRecord::timestamp);
        Ok(records)
    }
}

#[derive(Debug, Default)]
struct WorkingSet {
    reads: BTreeMap<StateKey, Option<Version>>,
    writes: BTreeMap<StateKey, Value>,
}

/// One atomic unit of ledger work.
pub struct Transaction<S: StateStore> {
    store: Arc<S>,
    factory: Factory,
    id: TransactionId,
    transaction_type: QualifiedType,
    timestamp: DateTime<Utc>,
    record_history: bool,
    working: Mutex<WorkingSet>,
}

impl<S: StateStore> Transaction<S> {
    /// Returns the transaction identifier.
    #[must_use]
    pub const fn id(&self) -> TransactionId {
        self.id
    }

    /// Returns the qualified transaction type.
    #[must_use]
    pub const fn transaction_type(&self) -> &QualifiedType {
        &self.transaction_type
    }

    /// Returns the timestamp taken when the transaction began.
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Returns the factory for this transaction's namespace.
    #[must_use]
    pub const fn factory(&self) -> &Factory {
        &self.factory
    }

    /// Returns the registry of asset type `T`.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::CategoryMismatch`] when `T` is not an asset.
    pub fn asset_registry<T: Resource>(&self) -> LedgerResult<Registry<'_, S, T>> {
        self.registry(ResourceCategory::Asset)
    }

    /// Returns the registry of participant type `T`.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::CategoryMismatch`] when `T` is not a
    /// participant.
    pub fn participant_registry<T: Resource>(&self) -> LedgerResult<Registry<'_, S, T>> {
        self.registry(ResourceCategory::Participant)
    }

    /// Returns the registry of system type `T`.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::CategoryMismatch`] when `T` is not a system
    /// record.
    pub fn system_registry<T: Resource>(&self) -> LedgerResult<Registry<'_, S, T>> {
        self.registry(ResourceCategory::System)
    }

    fn registry<T: Resource>(
        &self,
        requested: ResourceCategory,
    ) -> LedgerResult<Registry<'_, S, T>> {
        let qualified_type = self.factory.qualified_type::<T>()?;
        if T::CATEGORY != requested {
            return Err(LedgerError::CategoryMismatch {
                qualified_type,
                requested,
                actual: T::CATEGORY,
            });
        }
        Ok(Registry::new(self, qualified_type))
    }

    /// Reads a record, preferring this transaction's staged write.
    ///
    /// The first version observed for a key is kept for commit validation.
    pub(crate) async fn read(&self, key: &StateKey) -> LedgerResult<Option<Value>> {
        let staged = self.lock_working()?.writes.get(key).cloned();
        if staged.is_some() {
            return Ok(staged);
        }

        let record = self.store.read(key).await?;
        self.lock_working()?
            .reads
            .entry(key.clone())
            .or_insert_with(|| record.as_ref().map(|found| found.version));
        Ok(record.map(|found| found.value))
    }

    /// Returns every record of `qualified_type`, staged writes overlaid on
    /// committed ones, ordered by key.
    pub(crate) async fn scan(
        &self,
        qualified_type: &QualifiedType,
    ) -> LedgerResult<Vec<(EntityKey, Value)>> {
        let committed = self.store.scan(qualified_type).await?;
        let mut guard = self.lock_working()?;
        let working = &mut *guard;

        let mut merged = BTreeMap::new();
        for (key, record) in committed {
            working
                .reads
                .entry(StateKey::new(qualified_type.clone(), key.clone()))
                .or_insert(Some(record.version));
            merged.insert(key, record.value);
        }
        for (state_key, value) in &working.writes {
            if state_key.qualified_type() == qualified_type {
                merged.insert(state_key.key().clone(), value.clone());
            }
        }
        Ok(merged.into_iter().collect())
    }

    /// Stages writes; they become visible to other transactions on commit.
    pub(crate) fn stage(&self, writes: BTreeMap<StateKey, Value>) -> LedgerResult<()> {
        self.lock_working()?.writes.extend(writes);
        Ok(())
    }

    /// Commits every staged write atomically.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Store`] with [`StateStoreError::Conflict`] when
    /// a record read by this transaction changed since it was read, or when
    /// world state rejects the commit. Nothing is applied on error.
    pub async fn commit(self) -> LedgerResult<CommitReceipt> {
        if self.record_history {
            let record =
                HistorianRecord::new(self.id, self.transaction_type.clone(), self.timestamp)?;
            self.system_registry::<HistorianRecord>()?
                .add(&record)
                .await?;
        }

        let working = self.working.into_inner().map_err(|err| {
            StateStoreError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let writes = working.writes.len();
        let change_set = ChangeSet {
            reads: working.reads,
            writes: working.writes,
        };

        let version = self.store.commit(change_set).await.inspect_err(|err| {
            warn!(
                transaction_id = %self.id,
                transaction_type = %self.transaction_type,
                error = %err,
                "commit rejected"
            );
        })?;
        info!(
            transaction_id = %self.id,
            transaction_type = %self.transaction_type,
            %version,
            writes,
            "transaction committed"
        );
        Ok(CommitReceipt {
            transaction_id: self.id,
            version,
        })
    }

    fn lock_working(&self) -> LedgerResult<MutexGuard<'_, WorkingSet>> {
        self.working.lock().map_err(|err| {
            StateStoreError::persistence(std::io::Error::other(err.to_string())).into()
        })
    }
}
