//! Admin and superhero participants, both keyed by email address.

use super::TodoDomainError;
use crate::ledger::domain::{EntityKey, Resource, ResourceCategory};
use serde::{Deserialize, Serialize};

/// Participant who creates tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Admin {
    email: EntityKey,
    first_name: String,
    last_name: String,
}

impl Admin {
    /// Creates a validated admin.
    ///
    /// # Errors
    ///
    /// Returns [`TodoDomainError::InvalidEmail`] for a malformed email and
    /// [`TodoDomainError::EmptyName`] for a blank name.
    pub fn new(
        email: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Result<Self, TodoDomainError> {
        Ok(Self {
            email: email_key(email.into())?,
            first_name: required_name("first name", first_name.into())?,
            last_name: required_name("last name", last_name.into())?,
        })
    }

    /// Returns the admin's email address.
    #[must_use]
    pub const fn email(&self) -> &EntityKey {
        &self.email
    }

    /// Returns the admin's first name.
    #[must_use]
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    /// Returns the admin's last name.
    #[must_use]
    pub fn last_name(&self) -> &str {
        &self.last_name
    }
}

impl Resource for Admin {
    const TYPE_NAME: &'static str = "Admin";
    const CATEGORY: ResourceCategory = ResourceCategory::Participant;

    fn key(&self) -> &EntityKey {
        &self.email
    }
}

/// Participant tasks are assigned to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Superhero {
    email: EntityKey,
    first_name: String,
    last_name: String,
}

impl Superhero {
    /// Creates a validated superhero.
    ///
    /// # Errors
    ///
    /// Returns [`TodoDomainError::InvalidEmail`] for a malformed email and
    /// [`TodoDomainError::EmptyName`] for a blank name.
    pub fn new(
        email: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Result<Self, TodoDomainError> {
        Ok(Self {
            email: email_key(email.into())?,
            first_name: required_name("first name", first_name.into())?,
            last_name: required_name("last name", last_name.into())?,
        })
    }

    /// Returns the superhero's email address.
    #[must_use]
    pub const fn email(&self) -> &EntityKey {
        &self.email
    }

    /// Returns the superhero's first name.
    #[must_use]
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    /// Returns the superhero's last name.
    #[must_use]
    pub fn last_name(&self) -> &str {
        &self.last_name
    }
}

impl Resource for Superhero {
    const TYPE_NAME: &'static str = "Superhero";
    const CATEGORY: ResourceCategory = ResourceCategory::Participant;

    fn key(&self) -> &EntityKey {
        &self.email
    }
}

/// Validates `local@domain` with non-empty parts and no whitespace.
fn email_key(raw: String) -> Result<EntityKey, TodoDomainError> {
    let trimmed = raw.trim();
    let is_valid = trimmed.split_once('@').is_some_and(|(local, domain)| {
        !local.is_empty() && !domain.is_empty() && !domain.contains('@')
    }) && !trimmed.chars().any(char::is_whitespace);

    if !is_valid {
        return Err(TodoDomainError::InvalidEmail(raw));
    }
    Ok(EntityKey::new(trimmed)?)
}

fn required_name(field: &'static str, raw: String) -> Result<String, TodoDomainError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(TodoDomainError::EmptyName(field));
    }
    Ok(trimmed.to_owned())
}
