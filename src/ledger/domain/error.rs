//! Error types for ledger identifier validation and parsing.

use thiserror::Error;

/// Errors returned while constructing ledger identifiers and references.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LedgerDomainError {
    /// The namespace is not a dotted sequence of identifiers.
    #[error("invalid namespace '{0}', expected dotted identifiers such as org.example.app")]
    InvalidNamespace(String),

    /// The type name is not a plain identifier.
    #[error("invalid type name '{0}'")]
    InvalidTypeName(String),

    /// The qualified type does not have a `<namespace>.<Type>` shape.
    #[error("invalid qualified type '{0}', expected <namespace>.<Type>")]
    InvalidQualifiedType(String),

    /// The entity key is empty after trimming.
    #[error("entity key must not be empty")]
    EmptyKey,

    /// The relationship URI is malformed.
    #[error("invalid relationship '{0}', expected resource:<namespace>.<Type>#<key>")]
    InvalidRelationship(String),

    /// The relationship URI names a different entity type.
    #[error("relationship targets {found}, expected a {expected}")]
    RelationshipTargetMismatch {
        /// Type name the reference was parsed for.
        expected: &'static str,
        /// Qualified type found in the URI.
        found: String,
    },
}
