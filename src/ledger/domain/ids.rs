//! Identifier and validated scalar types for ledger records.

use super::LedgerDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Dotted namespace qualifying every type name on the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Namespace(String);

impl Namespace {
    /// Creates a validated namespace.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerDomainError::InvalidNamespace`] unless every
    /// dot-separated segment is an ASCII identifier.
    pub fn new(value: impl Into<String>) -> Result<Self, LedgerDomainError> {
        let raw = value.into();
        if !raw.split('.').all(is_identifier) {
            return Err(LedgerDomainError::InvalidNamespace(raw));
        }
        Ok(Self(raw))
    }

    /// Returns the namespace as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Namespace {
    type Error = LedgerDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Namespace> for String {
    fn from(value: Namespace) -> Self {
        value.0
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Fully-qualified type name, `<namespace>.<Type>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct QualifiedType {
    namespace: Namespace,
    name: String,
}

impl QualifiedType {
    /// Qualifies `name` with `namespace`.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerDomainError::InvalidTypeName`] when `name` is not an
    /// ASCII identifier.
    pub fn new(namespace: Namespace, name: impl Into<String>) -> Result<Self, LedgerDomainError> {
        let name = name.into();
        if !is_identifier(&name) {
            return Err(LedgerDomainError::InvalidTypeName(name));
        }
        Ok(Self { namespace, name })
    }

    /// Returns the namespace part.
    #[must_use]
    pub const fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    /// Returns the unqualified type name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl FromStr for QualifiedType {
    type Err = LedgerDomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || LedgerDomainError::InvalidQualifiedType(value.to_owned());
        let (namespace, name) = value.rsplit_once('.').ok_or_else(invalid)?;
        let namespace = Namespace::new(namespace).map_err(|_| invalid())?;
        Self::new(namespace, name).map_err(|_| invalid())
    }
}

impl TryFrom<String> for QualifiedType {
    type Error = LedgerDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<QualifiedType> for String {
    fn from(value: QualifiedType) -> Self {
        value.to_string()
    }
}

impl fmt::Display for QualifiedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.namespace, self.name)
    }
}

/// Identifier of an entity, unique within its qualified type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EntityKey(String);

impl EntityKey {
    /// Creates a trimmed, non-empty entity key.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerDomainError::EmptyKey`] when the value is empty after
    /// trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, LedgerDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(LedgerDomainError::EmptyKey);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the key as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for EntityKey {
    type Error = LedgerDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<EntityKey> for String {
    fn from(value: EntityKey) -> Self {
        value.0
    }
}

impl AsRef<str> for EntityKey {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for EntityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Address of one record in world state.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateKey {
    qualified_type: QualifiedType,
    key: EntityKey,
}

impl StateKey {
    /// Creates a world-state address.
    #[must_use]
    pub const fn new(qualified_type: QualifiedType, key: EntityKey) -> Self {
        Self {
            qualified_type,
            key,
        }
    }

    /// Returns the qualified type of the addressed record.
    #[must_use]
    pub const fn qualified_type(&self) -> &QualifiedType {
        &self.qualified_type
    }

    /// Returns the entity key of the addressed record.
    #[must_use]
    pub const fn key(&self) -> &EntityKey {
        &self.key
    }
}

impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.qualified_type, self.key)
    }
}

/// Unique identifier of a ledger transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(Uuid);

impl TransactionId {
    /// Creates a new random transaction identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a transaction identifier from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the wrapped UUID.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for TransactionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn is_identifier(segment: &str) -> bool {
    let mut chars = segment.chars();
    chars
        .next()
        .is_some_and(|first| first.is_ascii_alphabetic() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
