use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::{Local, NaiveDate};
use tracing::debug;

use super::directory::ContactDirectory;
use super::domain::{Contact, ContactId, DateRange, PrisonerId, RelationshipCategory, Restriction};
use super::filter::{
    enrich_addresses, not_banned_before, sort_contacts, ContactListFilter, SocialContactFilter,
};
use super::matcher::{match_visitors, VisitorNotFound};
use super::repository::{ContactSource, SourceError};
use super::restrictions::has_active_restriction;
use super::windows::{resolve_affected_windows, resolve_banned_window, DateRangeNotFound};

/// Facade composing the directory adapter, matcher, filter pipeline, and
/// window resolvers. One instance serves concurrent requests; every
/// computation is a pure function of the snapshot fetched for that request.
pub struct RegistryService<S> {
    directory: ContactDirectory<S>,
}

impl<S> Clone for RegistryService<S> {
    fn clone(&self) -> Self {
        Self {
            directory: self.directory.clone(),
        }
    }
}

impl<S: ContactSource> RegistryService<S> {
    pub fn new(source: Arc<S>) -> Self {
        Self {
            directory: ContactDirectory::new(source),
        }
    }

    /// List a prisoner's contacts, filtered and sorted, optionally enriched
    /// with addresses.
    pub fn contact_list(
        &self,
        prisoner_id: &PrisonerId,
        filter: &ContactListFilter,
    ) -> Result<Vec<Contact>, ServiceError> {
        let mut contacts = self
            .directory
            .contacts(prisoner_id, filter.approved_only)?;

        if let Some(category) = filter.category {
            contacts.retain(|contact| contact.category == category);
        }
        if let Some(contact_id) = &filter.contact_id {
            contacts.retain(|contact| &contact.contact_id == contact_id);
        }

        sort_contacts(&mut contacts);
        if filter.with_address {
            enrich_addresses(&self.directory, &mut contacts)?;
        }

        debug!(prisoner = %prisoner_id, count = contacts.len(), "contact list resolved");
        Ok(contacts)
    }

    /// List the approved social contacts of a prisoner.
    pub fn approved_social_contacts(
        &self,
        prisoner_id: &PrisonerId,
        filter: &SocialContactFilter,
    ) -> Result<Vec<Contact>, ServiceError> {
        let mut contacts = self.approved_social(prisoner_id)?;

        if let Some(wants_dob) = filter.has_date_of_birth {
            contacts.retain(|contact| contact.date_of_birth.is_some() == wants_dob);
        }
        if let Some(date) = filter.not_banned_before {
            contacts.retain(|contact| not_banned_before(contact, date));
        }

        sort_contacts(&mut contacts);
        if filter.with_address {
            enrich_addresses(&self.directory, &mut contacts)?;
        }

        Ok(contacts)
    }

    /// Narrow the requested booking window against the visitors' BAN
    /// restrictions, or reject it.
    pub fn banned_window(
        &self,
        prisoner_id: &PrisonerId,
        visitor_ids: &[ContactId],
        window: DateRange,
    ) -> Result<DateRange, ServiceError> {
        let visitors = self.matched_visitors(prisoner_id, visitor_ids)?;
        let resolved = resolve_banned_window(&visitors, window)?;
        Ok(resolved)
    }

    /// Whether any of the nominated visitors currently carries an active
    /// CLOSED restriction.
    pub fn closed_restriction_status(
        &self,
        prisoner_id: &PrisonerId,
        visitor_ids: &[ContactId],
    ) -> Result<bool, ServiceError> {
        self.closed_restriction_status_as_of(prisoner_id, visitor_ids, Local::now().date_naive())
    }

    pub fn closed_restriction_status_as_of(
        &self,
        prisoner_id: &PrisonerId,
        visitor_ids: &[ContactId],
        as_of: NaiveDate,
    ) -> Result<bool, ServiceError> {
        let visitors = self.matched_visitors(prisoner_id, visitor_ids)?;
        Ok(has_active_restriction(
            &visitors,
            Restriction::CLOSED,
            as_of,
        ))
    }

    /// Date ranges within the query window during which any restriction from
    /// the caller's allow-list is in force for the nominated visitors.
    pub fn request_visit_windows(
        &self,
        prisoner_id: &PrisonerId,
        visitor_ids: &[ContactId],
        supported_codes: &BTreeSet<String>,
        query_window: DateRange,
    ) -> Result<Vec<DateRange>, ServiceError> {
        let visitors = self.matched_visitors(prisoner_id, visitor_ids)?;
        Ok(resolve_affected_windows(
            &visitors,
            supported_codes,
            &query_window,
        ))
    }

    fn approved_social(&self, prisoner_id: &PrisonerId) -> Result<Vec<Contact>, ServiceError> {
        let mut contacts = self.directory.contacts(prisoner_id, true)?;
        contacts.retain(|contact| {
            contact.category == RelationshipCategory::Social && contact.approved_visitor
        });
        Ok(contacts)
    }

    fn matched_visitors(
        &self,
        prisoner_id: &PrisonerId,
        visitor_ids: &[ContactId],
    ) -> Result<Vec<Contact>, ServiceError> {
        let contacts = self.approved_social(prisoner_id)?;
        let matched = match_visitors(prisoner_id, contacts, visitor_ids)?;
        Ok(matched)
    }
}

/// Error raised by the registry facade.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error(transparent)]
    VisitorNotFound(#[from] VisitorNotFound),
    #[error(transparent)]
    DateRangeNotFound(#[from] DateRangeNotFound),
}
