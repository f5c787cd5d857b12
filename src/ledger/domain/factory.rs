//! Namespace-bound construction of qualified types and relationships.

use super::{EntityKey, LedgerDomainError, Namespace, QualifiedType, Relationship, Resource};

/// Builds qualified type names and relationships within one namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Factory {
    namespace: Namespace,
}

impl Factory {
    /// Creates a factory for `namespace`.
    #[must_use]
    pub const fn new(namespace: Namespace) -> Self {
        Self { namespace }
    }

    /// Returns the namespace this factory qualifies names with.
    #[must_use]
    pub const fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    /// Returns the qualified type name of `T`.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerDomainError::InvalidTypeName`] when `T` declares an
    /// invalid type name.
    pub fn qualified_type<T: Resource>(&self) -> Result<QualifiedType, LedgerDomainError> {
        QualifiedType::new(self.namespace.clone(), T::TYPE_NAME)
    }

    /// Creates a relationship to the `T` identified by `key`.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerDomainError::EmptyKey`] when `key` is blank.
    pub fn new_relationship<T: Resource>(
        &self,
        key: impl Into<String>,
    ) -> Result<Relationship<T>, LedgerDomainError> {
        Relationship::new(&self.namespace, EntityKey::new(key)?)
    }

    /// Creates a relationship pointing at `entity`.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerDomainError::InvalidTypeName`] when `T` declares an
    /// invalid type name.
    pub fn relationship_to<T: Resource>(
        &self,
        entity: &T,
    ) -> Result<Relationship<T>, LedgerDomainError> {
        Relationship::new(&self.namespace, entity.key().clone())
    }
}
