use chrono::{Duration, Local, NaiveDate};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use contact_registry::registry::{
    Address, Contact, ContactBatch, ContactId, ContactSource, PrisonerId, RelationshipCategory,
    RelationshipId, RelationshipRestrictions, Restriction, RestrictionScope, SourceError,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// In-memory upstream standing in for the excluded HTTP-client plumbing.
/// Serves the demo command and local development; unknown prisoners fail
/// closed exactly as a real upstream 404 would.
#[derive(Default, Clone)]
pub(crate) struct FixtureContactSource {
    contacts: HashMap<PrisonerId, Vec<Contact>>,
    addresses: HashMap<ContactId, Vec<Address>>,
}

impl FixtureContactSource {
    pub(crate) fn with_prisoner(mut self, prisoner_id: &str, contacts: Vec<Contact>) -> Self {
        self.contacts
            .insert(PrisonerId(prisoner_id.to_string()), contacts);
        self
    }

    pub(crate) fn with_addresses(mut self, contact_id: &str, addresses: Vec<Address>) -> Self {
        self.addresses
            .insert(ContactId(contact_id.to_string()), addresses);
        self
    }
}

impl ContactSource for FixtureContactSource {
    fn fetch_contacts(
        &self,
        prisoner_id: &PrisonerId,
        approved_only: bool,
    ) -> Result<ContactBatch, SourceError> {
        let contacts = self
            .contacts
            .get(prisoner_id)
            .ok_or_else(|| SourceError::PrisonerNotFound(prisoner_id.0.clone()))?;

        Ok(ContactBatch::Inline(
            contacts
                .iter()
                .filter(|contact| !approved_only || contact.approved_visitor)
                .cloned()
                .collect(),
        ))
    }

    fn fetch_addresses(&self, contact_id: &ContactId) -> Result<Vec<Address>, SourceError> {
        Ok(self.addresses.get(contact_id).cloned().unwrap_or_default())
    }

    fn fetch_restrictions(
        &self,
        _relationship_ids: &[RelationshipId],
    ) -> Result<HashMap<RelationshipId, RelationshipRestrictions>, SourceError> {
        Ok(HashMap::new())
    }
}

pub(crate) fn sample_contact(id: &str, first: &str, last: &str) -> Contact {
    Contact {
        contact_id: ContactId(id.to_string()),
        relationship_id: RelationshipId(format!("rel-{id}")),
        first_name: Some(first.to_string()),
        middle_name: None,
        last_name: Some(last.to_string()),
        date_of_birth: NaiveDate::from_ymd_opt(1985, 3, 12),
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

pub(crate) fn sample_restriction(
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

/// Fixture data for one prisoner: a clean visitor, a visitor with a bounded
/// ban, and a visitor under an open-ended CLOSED restriction.
pub(crate) fn sample_source() -> FixtureContactSource {
    let today = Local::now().date_naive();

    let clean = sample_contact("9147510", "Ann", "Peters");

    let mut banned = sample_contact("9147511", "Bob", "Quinn");
    banned.restrictions = vec![sample_restriction(
        Restriction::BAN,
        today - Duration::days(30),
        Some(today + Duration::days(5)),
    )];

    let mut closed = sample_contact("9147512", "Cal", "Reyes");
    closed.restrictions = vec![sample_restriction(
        Restriction::CLOSED,
        today - Duration::days(10),
        None,
    )];

    FixtureContactSource::default()
        .with_prisoner("A1234BC", vec![clean, banned, closed])
        .with_addresses(
            "9147510",
            vec![Address {
                street: Some("1 Example Street".to_string()),
                town: Some("Sheffield".to_string()),
                postal_code: Some("S1 1AA".to_string()),
                primary: true,
                ..Address::default()
            }],
        )
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
