use chrono::NaiveDate;

use super::directory::ContactDirectory;
use super::domain::{Contact, ContactId, RelationshipCategory, Restriction};
use super::repository::{ContactSource, SourceError};
use super::restrictions::of_type;

/// Filters for the plain contact listing endpoint.
#[derive(Debug, Default, Clone)]
pub struct ContactListFilter {
    pub category: Option<RelationshipCategory>,
    pub contact_id: Option<ContactId>,
    pub approved_only: bool,
    pub with_address: bool,
}

/// Filters for the approved-social listing endpoint.
#[derive(Debug, Default, Clone)]
pub struct SocialContactFilter {
    pub has_date_of_birth: Option<bool>,
    pub not_banned_before: Option<NaiveDate>,
    pub with_address: bool,
}

/// True unless the contact carries a BAN whose expiry is open-ended or falls
/// on/after the given date.
pub fn not_banned_before(contact: &Contact, date: NaiveDate) -> bool {
    !of_type(contact, Restriction::BAN).any(|restriction| {
        restriction
            .expiry_date
            .map_or(true, |expiry| expiry >= date)
    })
}

/// Ascending by last name then first name, case-sensitive, missing names
/// comparing as empty strings.
pub fn sort_contacts(contacts: &mut [Contact]) {
    contacts.sort_by(|a, b| {
        let key_a = (
            a.last_name.as_deref().unwrap_or(""),
            a.first_name.as_deref().unwrap_or(""),
        );
        let key_b = (
            b.last_name.as_deref().unwrap_or(""),
            b.first_name.as_deref().unwrap_or(""),
        );
        key_a.cmp(&key_b)
    });
}

/// Fetch addresses for each contact in turn.
///
/// A `PersonNotFound` from one lookup is absorbed into an empty address list
/// for that contact; address records are known to be occasionally missing
/// upstream for valid contacts. Any other error fails the whole request.
pub fn enrich_addresses<S: ContactSource>(
    directory: &ContactDirectory<S>,
    contacts: &mut [Contact],
) -> Result<(), SourceError> {
    for contact in contacts.iter_mut() {
        match directory.addresses(&contact.contact_id) {
            Ok(addresses) => contact.addresses = addresses,
            Err(SourceError::PersonNotFound(_)) => contact.addresses = Vec::new(),
            Err(other) => return Err(other),
        }
    }
    Ok(())
}
