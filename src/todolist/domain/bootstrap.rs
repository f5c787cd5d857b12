//! Persisted bootstrap marker and the fixed sample data it guards.

use super::{Admin, Superhero, Task, TodoDomainError};
use crate::ledger::domain::{EntityKey, Factory, Resource, ResourceCategory, TransactionId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Key of the single bootstrap marker record.
pub const BOOTSTRAP_MARKER_KEY: &str = "bootstrap";

/// Email of the seeded admin every sample task is created by.
pub const SAMPLE_ADMIN_EMAIL: &str = "bobby.da.boss@example.com";

const SAMPLE_SUPERHEROES: [(&str, &str, &str); 4] = [
    ("catwoman@example.com", "Selina", "Kyle"),
    ("batman@example.com", "Bruce", "Wayne"),
    ("superman@example.com", "Clark", "Kent"),
    ("spiderman@example.com", "Peter", "Parker"),
];

const SAMPLE_TASKS: [(&str, &str); 5] = [
    ("T1", "Build a Bat Mobile!"),
    ("T2", "Save Lois Lane!"),
    ("T3", "Buy a gift for Mary Jane!"),
    ("T4", "Steal a diamond!"),
    ("T5", "Keep the super heroes busy"),
];

/// Record proving the ledger has been seeded.
///
/// Written in the same transaction as the sample data, so it exists exactly
/// when the seed inserts committed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BootstrapMarker {
    marker: EntityKey,
    transaction_id: TransactionId,
    bootstrapped_at: DateTime<Utc>,
}

impl BootstrapMarker {
    /// Creates the marker for the seeding transaction.
    ///
    /// # Errors
    ///
    /// Returns [`TodoDomainError::Ledger`] if the marker key is rejected.
    pub fn new(
        transaction_id: TransactionId,
        bootstrapped_at: DateTime<Utc>,
    ) -> Result<Self, TodoDomainError> {
        Ok(Self {
            marker: Self::marker_key()?,
            transaction_id,
            bootstrapped_at,
        })
    }

    /// Returns the fixed marker key.
    ///
    /// # Errors
    ///
    /// Returns [`TodoDomainError::Ledger`] if the marker key is rejected.
    pub fn marker_key() -> Result<EntityKey, TodoDomainError> {
        Ok(EntityKey::new(BOOTSTRAP_MARKER_KEY)?)
    }

    /// Returns the seeding transaction.
    #[must_use]
    pub const fn transaction_id(&self) -> TransactionId {
        self.transaction_id
    }

    /// Returns when the ledger was seeded.
    #[must_use]
    pub const fn bootstrapped_at(&self) -> DateTime<Utc> {
        self.bootstrapped_at
    }
}

impl Resource for BootstrapMarker {
    const TYPE_NAME: &'static str = "BootstrapMarker";
    const CATEGORY: ResourceCategory = ResourceCategory::System;

    fn key(&self) -> &EntityKey {
        &self.marker
    }
}

/// Entities inserted by the bootstrap transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedData {
    /// Seeded admins.
    pub admins: Vec<Admin>,
    /// Seeded superheroes.
    pub superheroes: Vec<Superhero>,
    /// Seeded tasks, all active and created by [`SAMPLE_ADMIN_EMAIL`].
    pub tasks: Vec<Task>,
}

/// Builds the sample admin, superheroes and tasks.
///
/// # Errors
///
/// Returns [`TodoDomainError`] if any sample literal fails validation.
pub fn sample_data(factory: &Factory) -> Result<SeedData, TodoDomainError> {
    let admins = vec![Admin::new(SAMPLE_ADMIN_EMAIL, "Bobby", "Da Boss")?];

    let superheroes = SAMPLE_SUPERHEROES
        .iter()
        .map(|(email, first_name, last_name)| Superhero::new(*email, *first_name, *last_name))
        .collect::<Result<Vec<_>, _>>()?;

    let creator = factory.new_relationship::<Admin>(SAMPLE_ADMIN_EMAIL)?;
    let tasks = SAMPLE_TASKS
        .iter()
        .map(|(code, description)| Task::new(*code, *description, creator.clone()))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(SeedData {
        admins,
        superheroes,
        tasks,
    })
}
