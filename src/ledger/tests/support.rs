//! Shared fixtures for ledger unit tests.

use std::sync::Arc;

use crate::ledger::{
    LedgerConfig,
    adapters::memory::InMemoryStateStore,
    domain::{EntityKey, Namespace, Resource, ResourceCategory},
    services::Ledger,
};
use mockable::DefaultClock;
use serde::{Deserialize, Serialize};

pub const TEST_NAMESPACE: &str = "org.example.tests";

pub type TestLedger = Ledger<InMemoryStateStore, DefaultClock>;

/// Minimal asset used to exercise registries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gadget {
    pub serial: EntityKey,
    pub label: String,
}

impl Resource for Gadget {
    const TYPE_NAME: &'static str = "Gadget";
    const CATEGORY: ResourceCategory = ResourceCategory::Asset;

    fn key(&self) -> &EntityKey {
        &self.serial
    }
}

/// Minimal participant used to exercise category checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operator {
    pub handle: EntityKey,
}

impl Resource for Operator {
    const TYPE_NAME: &'static str = "Operator";
    const CATEGORY: ResourceCategory = ResourceCategory::Participant;

    fn key(&self) -> &EntityKey {
        &self.handle
    }
}

pub fn gadget(serial: &str, label: &str) -> Gadget {
    Gadget {
        serial: key(serial),
        label: label.to_owned(),
    }
}

pub fn key(value: &str) -> EntityKey {
    EntityKey::new(value).expect("valid entity key")
}

pub fn config() -> LedgerConfig {
    LedgerConfig::new(Namespace::new(TEST_NAMESPACE).expect("valid namespace"))
}

pub fn ledger_over(store: InMemoryStateStore, config: LedgerConfig) -> TestLedger {
    Ledger::new(Arc::new(store), Arc::new(DefaultClock), config)
}
