use std::collections::HashMap;

use super::domain::{Address, Contact, ContactId, PrisonerId, RelationshipId, Restriction};

/// Contacts as returned by one of the two upstream dialects.
///
/// The legacy offender-management source inlines each contact's restrictions;
/// the newer relationships source returns bare contacts and requires a second
/// batched call to [`ContactSource::fetch_restrictions`]. The tag exists only
/// so the directory can normalize; nothing downstream inspects it.
#[derive(Debug)]
pub enum ContactBatch {
    Inline(Vec<Contact>),
    Deferred(Vec<Contact>),
}

/// Per-relationship restriction bundle from the newer upstream: restrictions
/// scoped to the relationship itself plus global restrictions attached to the
/// contact as a person.
#[derive(Debug, Default, Clone)]
pub struct RelationshipRestrictions {
    pub local: Vec<Restriction>,
    pub global: Vec<Restriction>,
}

/// Upstream abstraction so the registry can be exercised against in-memory
/// fakes. Implementations are read-only and idempotent.
pub trait ContactSource: Send + Sync {
    fn fetch_contacts(
        &self,
        prisoner_id: &PrisonerId,
        approved_only: bool,
    ) -> Result<ContactBatch, SourceError>;

    fn fetch_addresses(&self, contact_id: &ContactId) -> Result<Vec<Address>, SourceError>;

    fn fetch_restrictions(
        &self,
        relationship_ids: &[RelationshipId],
    ) -> Result<HashMap<RelationshipId, RelationshipRestrictions>, SourceError>;
}

/// Error enumeration for upstream failures.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("prisoner {0} not found")]
    PrisonerNotFound(String),
    #[error("person {0} not found")]
    PersonNotFound(String),
    #[error("upstream failure: {0}")]
    Upstream(String),
}
