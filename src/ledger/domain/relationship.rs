//! Weak, lazily resolved references between entities.

use super::{EntityKey, LedgerDomainError, Namespace, QualifiedType, Resource};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

const RESOURCE_SCHEME: &str = "resource:";

/// Reference to an entity of type `T` by qualified type and key.
///
/// A relationship owns nothing and may name an entity that has not been
/// loaded or does not exist yet. Resolve it through the registry of `T`.
/// Its text and serialised form is `resource:<namespace>.<Type>#<key>`.
pub struct Relationship<T> {
    qualified_type: QualifiedType,
    key: EntityKey,
    target: PhantomData<fn() -> T>,
}

impl<T: Resource> Relationship<T> {
    /// Creates a relationship to the `T` with `key` in `namespace`.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerDomainError::InvalidTypeName`] when `T` declares an
    /// invalid type name.
    pub fn new(namespace: &Namespace, key: EntityKey) -> Result<Self, LedgerDomainError> {
        let qualified_type = QualifiedType::new(namespace.clone(), T::TYPE_NAME)?;
        Ok(Self::from_parts(qualified_type, key))
    }

    /// Parses a `resource:` URI.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerDomainError::InvalidRelationship`] for malformed URIs
    /// and [`LedgerDomainError::RelationshipTargetMismatch`] when the URI
    /// names a type other than `T`.
    pub fn parse(uri: &str) -> Result<Self, LedgerDomainError> {
        let invalid = || LedgerDomainError::InvalidRelationship(uri.to_owned());
        let (type_part, key_part) = uri
            .strip_prefix(RESOURCE_SCHEME)
            .and_then(|rest| rest.split_once('#'))
            .ok_or_else(invalid)?;
        let qualified_type: QualifiedType = type_part.parse().map_err(|_| invalid())?;
        if qualified_type.name() != T::TYPE_NAME {
            return Err(LedgerDomainError::RelationshipTargetMismatch {
                expected: T::TYPE_NAME,
                found: qualified_type.to_string(),
            });
        }
        let key = EntityKey::new(key_part).map_err(|_| invalid())?;
        Ok(Self::from_parts(qualified_type, key))
    }
}

impl<T> Relationship<T> {
    pub(crate) const fn from_parts(qualified_type: QualifiedType, key: EntityKey) -> Self {
        Self {
            qualified_type,
            key,
            target: PhantomData,
        }
    }

    /// Returns the qualified type of the referenced entity.
    #[must_use]
    pub const fn qualified_type(&self) -> &QualifiedType {
        &self.qualified_type
    }

    /// Returns the key of the referenced entity.
    #[must_use]
    pub const fn key(&self) -> &EntityKey {
        &self.key
    }
}

impl<T> Clone for Relationship<T> {
    fn clone(&self) -> Self {
        Self::from_parts(self.qualified_type.clone(), self.key.clone())
    }
}

impl<T> PartialEq for Relationship<T> {
    fn eq(&self, other: &Self) -> bool {
        self.qualified_type == other.qualified_type && self.key == other.key
    }
}

impl<T> Eq for Relationship<T> {}

impl<T> Hash for Relationship<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.qualified_type.hash(state);
        self.key.hash(state);
    }
}

impl<T> fmt::Debug for Relationship<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Relationship").field(&self.to_string()).finish()
    }
}

impl<T> fmt::Display for Relationship<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{RESOURCE_SCHEME}{}#{}", self.qualified_type, self.key)
    }
}

impl<T> Serialize for Relationship<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de, T: Resource> Deserialize<'de> for Relationship<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let uri = String::deserialize(deserializer)?;
        Self::parse(&uri).map_err(de::Error::custom)
    }
}
