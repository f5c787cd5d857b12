//! Domain model shared by every ledger registry.
//!
//! Identifiers, qualified type names, the [`Resource`] contract for stored
//! entities and weak [`Relationship`] references live here. Nothing in this
//! module touches world state.

mod error;
mod factory;
mod history;
mod ids;
mod relationship;
mod resource;

pub use error::LedgerDomainError;
pub use factory::Factory;
pub use history::HistorianRecord;
pub use ids::{EntityKey, Namespace, QualifiedType, StateKey, TransactionId};
pub use relationship::Relationship;
pub use resource::{Resource, ResourceCategory};
