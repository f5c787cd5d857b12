//! Typed entities stored in ledger registries.

use super::EntityKey;
use serde::{Serialize, de::DeserializeOwned};
use std::fmt;

/// Role of an entity type on the ledger.
///
/// Asset and participant registries share one storage contract; the category
/// only decides which accessor hands out the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceCategory {
    /// Owned resource, such as a task.
    Asset,
    /// Actor on the ledger, such as an admin.
    Participant,
    /// Ledger bookkeeping record.
    System,
}

impl ResourceCategory {
    /// Returns the lowercase category label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asset => "asset",
            Self::Participant => "participant",
            Self::System => "system",
        }
    }
}

impl fmt::Display for ResourceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An entity type that can live in a registry.
pub trait Resource: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Unqualified type name, e.g. `Task`.
    const TYPE_NAME: &'static str;

    /// Registry category of the type.
    const CATEGORY: ResourceCategory;

    /// Returns the identifier of this entity within its type.
    fn key(&self) -> &EntityKey;
}
