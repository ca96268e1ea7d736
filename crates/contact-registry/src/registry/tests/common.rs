use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;

use crate::registry::domain::{
    Address, Contact, ContactId, PrisonerId, RelationshipCategory, RelationshipId, Restriction,
    RestrictionScope,
};
use crate::registry::repository::{
    ContactBatch, ContactSource, RelationshipRestrictions, SourceError,
};
use crate::registry::service::RegistryService;

pub(super) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub(super) fn prisoner() -> PrisonerId {
    PrisonerId("A1234BC".to_string())
}

pub(super) fn contact(id: &str, first: &str, last: &str) -> Contact {
    Contact {
        contact_id: ContactId(id.to_string()),
        relationship_id: RelationshipId(format!("rel-{id}")),
        first_name: Some(first.to_string()),
        middle_name: None,
        last_name: Some(last.to_string()),
        date_of_birth: Some(date(1985, 3, 12)),
        category: RelationshipCategory::Social,
        relationship_code: "FRI".to_string(),
        relationship_description: Some("Friend".to_string()),
        approved_visitor: true,
        emergency_contact: false,
        next_of_kin: false,
        comment: None,
        restrictions: Vec::new(),
        addresses: Vec::new(),
    }
}

pub(super) fn official_contact(id: &str, first: &str, last: &str) -> Contact {
    Contact {
        category: RelationshipCategory::Official,
        relationship_code: "SOL".to_string(),
        relationship_description: Some("Solicitor".to_string()),
        ..contact(id, first, last)
    }
}

pub(super) fn restriction(
    type_code: &str,
    start: NaiveDate,
    expiry: Option<NaiveDate>,
) -> Restriction {
    Restriction {
        restriction_id: format!("rst-{type_code}-{start}"),
        type_code: type_code.to_string(),
        type_description: None,
        start_date: start,
        expiry_date: expiry,
        scope: RestrictionScope::Local,
        comment: None,
    }
}

pub(super) fn address(town: &str) -> Address {
    Address {
        street: Some("1 Example Street".to_string()),
        town: Some(town.to_string()),
        postal_code: Some("S1 1AA".to_string()),
        primary: true,
        ..Address::default()
    }
}

/// How the stub answers an address lookup for one contact.
#[derive(Clone)]
pub(super) enum AddressBehavior {
    Found(Vec<Address>),
    PersonMissing,
    Failing,
}

/// In-memory upstream covering both dialects.
#[derive(Default)]
pub(super) struct StubSource {
    pub(super) contacts: Vec<Contact>,
    pub(super) deferred: bool,
    pub(super) bundles: HashMap<RelationshipId, RelationshipRestrictions>,
    pub(super) addresses: HashMap<ContactId, AddressBehavior>,
    pub(super) unknown_prisoner: bool,
    pub(super) restrictions_unavailable: bool,
}

impl StubSource {
    pub(super) fn inline(contacts: Vec<Contact>) -> Self {
        Self {
            contacts,
            ..Self::default()
        }
    }

    pub(super) fn deferred(
        contacts: Vec<Contact>,
        bundles: HashMap<RelationshipId, RelationshipRestrictions>,
    ) -> Self {
        Self {
            contacts,
            deferred: true,
            bundles,
            ..Self::default()
        }
    }
}

impl ContactSource for StubSource {
    fn fetch_contacts(
        &self,
        prisoner_id: &PrisonerId,
        approved_only: bool,
    ) -> Result<ContactBatch, SourceError> {
        if self.unknown_prisoner {
            return Err(SourceError::PrisonerNotFound(prisoner_id.0.clone()));
        }

        let contacts: Vec<Contact> = self
            .contacts
            .iter()
            .filter(|contact| !approved_only || contact.approved_visitor)
            .cloned()
            .collect();

        if self.deferred {
            Ok(ContactBatch::Deferred(contacts))
        } else {
            Ok(ContactBatch::Inline(contacts))
        }
    }

    fn fetch_addresses(&self, contact_id: &ContactId) -> Result<Vec<Address>, SourceError> {
        match self.addresses.get(contact_id) {
            Some(AddressBehavior::Found(addresses)) => Ok(addresses.clone()),
            Some(AddressBehavior::PersonMissing) => {
                Err(SourceError::PersonNotFound(contact_id.0.clone()))
            }
            Some(AddressBehavior::Failing) => {
                Err(SourceError::Upstream("address service offline".to_string()))
            }
            None => Ok(Vec::new()),
        }
    }

    fn fetch_restrictions(
        &self,
        relationship_ids: &[RelationshipId],
    ) -> Result<HashMap<RelationshipId, RelationshipRestrictions>, SourceError> {
        if self.restrictions_unavailable {
            return Err(SourceError::Upstream(
                "restrictions service offline".to_string(),
            ));
        }

        Ok(relationship_ids
            .iter()
            .filter_map(|id| self.bundles.get(id).map(|bundle| (id.clone(), bundle.clone())))
            .collect())
    }
}

pub(super) fn service_with(source: StubSource) -> RegistryService<StubSource> {
    RegistryService::new(Arc::new(source))
}
