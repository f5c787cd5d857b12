//! World-state port consumed by ledger transactions.

use crate::ledger::domain::{EntityKey, QualifiedType, StateKey};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Result type for world-state operations.
pub type StateStoreResult<T> = Result<T, StateStoreError>;

/// Commit height at which a record was last written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Version(u64);

impl Version {
    /// Wraps a raw commit height.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw commit height.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Returns the height following this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A committed record and the height it was written at.
#[derive(Debug, Clone, PartialEq)]
pub struct VersionedRecord {
    /// Height of the commit that wrote the record.
    pub version: Version,
    /// Serialised entity.
    pub value: Value,
}

/// Read set and write set handed to [`StateStore::commit`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChangeSet {
    /// Version observed for every key read, `None` when the key was absent.
    pub reads: BTreeMap<StateKey, Option<Version>>,
    /// Records to write.
    pub writes: BTreeMap<StateKey, Value>,
}

/// World-state contract provided by the host ledger.
#[async_trait]
pub trait StateStore: Send + Sync {
    /// Reads the committed record at `key`.
    ///
    /// Returns `None` when no record exists.
    async fn read(&self, key: &StateKey) -> StateStoreResult<Option<VersionedRecord>>;

    /// Returns every committed record of `qualified_type`, ordered by key.
    async fn scan(
        &self,
        qualified_type: &QualifiedType,
    ) -> StateStoreResult<Vec<(EntityKey, VersionedRecord)>>;

    /// Validates the read set and applies the write set atomically.
    ///
    /// Returns the height the writes were committed at. A change set with no
    /// writes commits nothing and returns the current height.
    ///
    /// # Errors
    ///
    /// Returns [`StateStoreError::Conflict`] when any read version is no
    /// longer current; no write is applied in that case.
    async fn commit(&self, change_set: ChangeSet) -> StateStoreResult<Version>;
}

/// Errors returned by world-state implementations.
#[derive(Debug, Clone, Error)]
pub enum StateStoreError {
    /// A record read by the transaction changed before commit.
    #[error("read conflict on {key}: observed {}, current {}", describe(.observed), describe(.current))]
    Conflict {
        /// Conflicting record address.
        key: StateKey,
        /// Version the transaction read.
        observed: Option<Version>,
        /// Version found at commit time.
        current: Option<Version>,
    },

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl StateStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

fn describe(version: &Option<Version>) -> String {
    version.map_or_else(|| "absent".to_owned(), |found| format!("v{found}"))
}
