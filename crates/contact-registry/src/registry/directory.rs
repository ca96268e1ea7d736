use std::sync::Arc;

use tracing::debug;

use super::domain::{Address, Contact, ContactId, PrisonerId, RelationshipId, RestrictionScope};
use super::repository::{ContactBatch, ContactSource, SourceError};

/// Normalizing adapter over a [`ContactSource`]. Both upstream dialects come
/// out of [`ContactDirectory::contacts`] in the same shape, with each
/// contact's effective restriction set (local union global) attached.
pub struct ContactDirectory<S> {
    source: Arc<S>,
}

impl<S> Clone for ContactDirectory<S> {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
        }
    }
}

impl<S: ContactSource> ContactDirectory<S> {
    pub fn new(source: Arc<S>) -> Self {
        Self { source }
    }

    /// Fetch and normalize the contact list for a prisoner.
    ///
    /// For the deferred dialect, issues exactly one batched restrictions call
    /// keyed by relationship identifiers. A failed batch call fails the whole
    /// fetch: restrictions are not optional data for any restriction-aware
    /// caller.
    pub fn contacts(
        &self,
        prisoner_id: &PrisonerId,
        approved_only: bool,
    ) -> Result<Vec<Contact>, SourceError> {
        match self.source.fetch_contacts(prisoner_id, approved_only)? {
            ContactBatch::Inline(contacts) => Ok(contacts),
            ContactBatch::Deferred(mut contacts) => {
                if contacts.is_empty() {
                    return Ok(contacts);
                }

                let relationship_ids: Vec<RelationshipId> = contacts
                    .iter()
                    .map(|contact| contact.relationship_id.clone())
                    .collect();
                let mut bundles = self.source.fetch_restrictions(&relationship_ids)?;

                for contact in &mut contacts {
                    let Some(bundle) = bundles.remove(&contact.relationship_id) else {
                        debug!(
                            prisoner = %prisoner_id,
                            contact = %contact.contact_id,
                            "no restriction bundle returned for relationship"
                        );
                        continue;
                    };

                    let mut merged = bundle.local;
                    for restriction in &mut merged {
                        restriction.scope = RestrictionScope::Local;
                    }
                    let mut global = bundle.global;
                    for restriction in &mut global {
                        restriction.scope = RestrictionScope::Global;
                    }
                    merged.extend(global);
                    contact.restrictions = merged;
                }

                Ok(contacts)
            }
        }
    }

    pub fn addresses(&self, contact_id: &ContactId) -> Result<Vec<Address>, SourceError> {
        self.source.fetch_addresses(contact_id)
    }
}
