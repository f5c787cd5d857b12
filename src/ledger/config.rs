//! Ledger configuration.

use super::domain::Namespace;
use serde::{Deserialize, Serialize};

/// Configuration for a [`Ledger`](super::services::Ledger).
///
/// # Examples
///
/// ```
/// use todo_ledger::ledger::{LedgerConfig, domain::Namespace};
///
/// let namespace = Namespace::new("org.example.todolist.hlfv1")?;
/// let config = LedgerConfig::new(namespace);
/// assert!(config.record_history);
///
/// let quiet = config.with_history(false);
/// assert!(!quiet.record_history);
/// # Ok::<(), todo_ledger::ledger::domain::LedgerDomainError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerConfig {
    /// Namespace qualifying every registry and transaction type.
    pub namespace: Namespace,
    /// Whether commits write a historian record.
    #[serde(default = "record_history_default")]
    pub record_history: bool,
}

impl LedgerConfig {
    /// Creates a configuration for `namespace` with history recording on.
    #[must_use]
    pub const fn new(namespace: Namespace) -> Self {
        Self {
            namespace,
            record_history: true,
        }
    }

    /// Enables or disables historian records.
    #[must_use]
    pub const fn with_history(mut self, record_history: bool) -> Self {
        self.record_history = record_history;
        self
    }
}

const fn record_history_default() -> bool {
    true
}
