//! Historian records of committed transactions.

use super::{EntityKey, LedgerDomainError, QualifiedType, Resource, ResourceCategory, TransactionId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Record of one committed transaction, written in the same change set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistorianRecord {
    transaction_id: EntityKey,
    transaction_type: QualifiedType,
    timestamp: DateTime<Utc>,
}

impl HistorianRecord {
    /// Creates the historian record for a transaction.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerDomainError::EmptyKey`] if the transaction identifier
    /// renders as an empty key.
    pub fn new(
        transaction_id: TransactionId,
        transaction_type: QualifiedType,
        timestamp: DateTime<Utc>,
    ) -> Result<Self, LedgerDomainError> {
        Ok(Self {
            transaction_id: EntityKey::new(transaction_id.to_string())?,
            transaction_type,
            timestamp,
        })
    }

    /// Returns the committed transaction identifier.
    #[must_use]
    pub const fn transaction_id(&self) -> &EntityKey {
        &self.transaction_id
    }

    /// Returns the qualified transaction type, e.g. `<namespace>.Assign`.
    #[must_use]
    pub const fn transaction_type(&self) -> &QualifiedType {
        &self.transaction_type
    }

    /// Returns the transaction timestamp.
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

impl Resource for HistorianRecord {
    const TYPE_NAME: &'static str = "HistorianRecord";
    const CATEGORY: ResourceCategory = ResourceCategory::System;

    fn key(&self) -> &EntityKey {
        &self.transaction_id
    }
}
