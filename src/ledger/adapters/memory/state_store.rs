//! Thread-safe in-memory world state with optimistic commit validation.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use crate::ledger::{
    domain::{EntityKey, QualifiedType, StateKey},
    ports::{ChangeSet, StateStore, StateStoreError, StateStoreResult, Version, VersionedRecord},
};

/// Thread-safe in-memory world state.
///
/// Clones share the same underlying state, so a clone can play the part of a
/// second peer submitting competing transactions.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStateStore {
    state: Arc<RwLock<InMemoryWorldState>>,
}

#[derive(Debug, Default)]
struct InMemoryWorldState {
    records: BTreeMap<StateKey, VersionedRecord>,
    height: Version,
}

impl InMemoryStateStore {
    /// Creates an empty world state at height zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the height of the latest commit.
    ///
    /// # Errors
    ///
    /// Returns [`StateStoreError::Persistence`] when the state lock is
    /// poisoned.
    pub fn height(&self) -> StateStoreResult<Version> {
        let state = self.state.read().map_err(|err| {
            StateStoreError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.height)
    }

    /// Returns the number of committed records across all types.
    ///
    /// # Errors
    ///
    /// Returns [`StateStoreError::Persistence`] when the state lock is
    /// poisoned.
    pub fn record_count(&self) -> StateStoreResult<usize> {
        let state = self.state.read().map_err(|err| {
            StateStoreError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.records.len())
    }
}

fn validate_reads(state: &InMemoryWorldState, change_set: &ChangeSet) -> StateStoreResult<()> {
    for (key, observed) in &change_set.reads {
        let current = state.records.get(key).map(|record| record.version);
        if current != *observed {
            return Err(StateStoreError::Conflict {
                key: key.clone(),
                observed: *observed,
                current,
            });
        }
    }
    Ok(())
}

#[async_trait]
impl StateStore for InMemoryStateStore {
    async fn read(&self, key: &StateKey) -> StateStoreResult<Option<VersionedRecord>> {
        let state = self.state.read().map_err(|err| {
            StateStoreError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.records.get(key).cloned())
    }

    async fn scan(
        &self,
        qualified_type: &QualifiedType,
    ) -> StateStoreResult<Vec<(EntityKey, VersionedRecord)>> {
        let state = self.state.read().map_err(|err| {
            StateStoreError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let records = state
            .records
            .iter()
            .filter(|(key, _)| key.qualified_type() == qualified_type)
            .map(|(key, record)| (key.key().clone(), record.clone()))
            .collect();
        Ok(records)
    }

    async fn commit(&self, change_set: ChangeSet) -> StateStoreResult<Version> {
        let mut state = self.state.write().map_err(|err| {
            StateStoreError::persistence(std::io::Error::other(err.to_string()))
        })?;

        validate_reads(&state, &change_set)?;
        if change_set.writes.is_empty() {
            return Ok(state.height);
        }

        let version = state.height.next();
        for (key, value) in change_set.writes {
            state.records.insert(key, VersionedRecord { version, value });
        }
        state.height = version;
        Ok(version)
    }
}
