//! Typed registry view over a transaction.

use super::{LedgerError, LedgerResult, Transaction};
use crate::ledger::{
    domain::{EntityKey, QualifiedType, Relationship, Resource, ResourceCategory, StateKey},
    ports::StateStore,
};
use serde_json::Value;
use std::collections::BTreeMap;
use std::marker::PhantomData;
use tracing::debug;

/// Keyed collection of every entity of type `T`.
///
/// Reads see committed world state overlaid with the enclosing transaction's
/// staged writes. Writes are staged and become durable when the transaction
/// commits.
pub struct Registry<'t, S: StateStore, T: Resource> {
    transaction: &'t Transaction<S>,
    qualified_type: QualifiedType,
    entity: PhantomData<fn() -> T>,
}

impl<'t, S: StateStore, T: Resource> Registry<'t, S, T> {
    pub(crate) const fn new(transaction: &'t Transaction<S>, qualified_type: QualifiedType) -> Self {
        Self {
            transaction,
            qualified_type,
            entity: PhantomData,
        }
    }

    /// Returns the qualified type stored in this registry.
    #[must_use]
    pub const fn qualified_type(&self) -> &QualifiedType {
        &self.qualified_type
    }

    /// Returns the registry category.
    #[must_use]
    pub const fn category(&self) -> ResourceCategory {
        T::CATEGORY
    }

    /// Adds one entity.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::DuplicateKey`] when the key already exists.
    pub async fn add(&self, entity: &T) -> LedgerResult<()> {
        self.add_all(std::slice::from_ref(entity)).await
    }

    /// Adds every entity or none of them.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::DuplicateKey`] when any key already exists or
    /// appears twice in `entities`. Nothing from the batch is staged then.
    pub async fn add_all(&self, entities: &[T]) -> LedgerResult<()> {
        let mut batch = BTreeMap::new();
        for entity in entities {
            let state_key = self.state_key(entity.key());
            if batch.contains_key(&state_key) || self.transaction.read(&state_key).await?.is_some()
            {
                return Err(LedgerError::DuplicateKey {
                    qualified_type: self.qualified_type.clone(),
                    key: entity.key().clone(),
                });
            }
            batch.insert(state_key, encode(entity)?);
        }

        let count = batch.len();
        self.transaction.stage(batch)?;
        debug!(registry = %self.qualified_type, count, "entities added");
        Ok(())
    }

    /// Returns the entity with `key`.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::NotFound`] when no entity has the key.
    pub async fn get(&self, key: &EntityKey) -> LedgerResult<T> {
        self.find(key)
            .await?
            .ok_or_else(|| self.not_found(key))
    }

    /// Returns the entity with `key`, or `None` when absent.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError`] when world state cannot be read or the record
    /// cannot be decoded.
    pub async fn find(&self, key: &EntityKey) -> LedgerResult<Option<T>> {
        self.transaction
            .read(&self.state_key(key))
            .await?
            .map(decode)
            .transpose()
    }

    /// Returns every entity in the registry, ordered by key.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError`] when world state cannot be read or a record
    /// cannot be decoded.
    pub async fn get_all(&self) -> LedgerResult<Vec<T>> {
        self.transaction
            .scan(&self.qualified_type)
            .await?
            .into_iter()
            .map(|(_, value)| decode(value))
            .collect()
    }

    /// Replaces the stored entity that has the same key.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::NotFound`] when no entity has the key.
    pub async fn update(&self, entity: &T) -> LedgerResult<()> {
        let state_key = self.state_key(entity.key());
        if self.transaction.read(&state_key).await?.is_none() {
            return Err(self.not_found(entity.key()));
        }
        self.transaction
            .stage(BTreeMap::from([(state_key, encode(entity)?)]))?;
        debug!(registry = %self.qualified_type, key = %entity.key(), "entity updated");
        Ok(())
    }

    /// Reports whether an entity with `key` exists.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Store`] only when world state cannot be read.
    pub async fn exists(&self, key: &EntityKey) -> LedgerResult<bool> {
        Ok(self.transaction.read(&self.state_key(key)).await?.is_some())
    }

    /// Loads the entity a relationship points at.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::RelationshipTypeMismatch`] when the relationship
    /// names another qualified type, or [`LedgerError::NotFound`] when the
    /// referent does not exist.
    pub async fn resolve(&self, relationship: &Relationship<T>) -> LedgerResult<T> {
        if relationship.qualified_type() != &self.qualified_type {
            return Err(LedgerError::RelationshipTypeMismatch {
                relationship: relationship.to_string(),
                qualified_type: self.qualified_type.clone(),
            });
        }
        self.get(relationship.key()).await
    }

    fn state_key(&self, key: &EntityKey) -> StateKey {
        StateKey::new(self.qualified_type.clone(), key.clone())
    }

    fn not_found(&self, key: &EntityKey) -> LedgerError {
        LedgerError::NotFound {
            qualified_type: self.qualified_type.clone(),
            key: key.clone(),
        }
    }
}

fn encode<T: Resource>(entity: &T) -> LedgerResult<Value> {
    serde_json::to_value(entity).map_err(LedgerError::serialization)
}

fn decode<T: Resource>(value: Value) -> LedgerResult<T> {
    serde_json::from_value(value).map_err(LedgerError::serialization)
}
