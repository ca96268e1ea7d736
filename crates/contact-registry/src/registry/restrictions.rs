use chrono::NaiveDate;

use super::domain::{Contact, Restriction};

/// A restriction with no expiry never lapses; one expiring *on* the reference
/// date is still active (inclusive boundary).
pub fn is_active(restriction: &Restriction, as_of: NaiveDate) -> bool {
    match restriction.expiry_date {
        None => true,
        Some(expiry) => as_of <= expiry,
    }
}

/// Exact, case-sensitive match on the type code over the contact's effective
/// restriction set.
pub fn of_type<'a>(
    contact: &'a Contact,
    type_code: &'a str,
) -> impl Iterator<Item = &'a Restriction> {
    contact
        .restrictions
        .iter()
        .filter(move |restriction| restriction.type_code == type_code)
}

/// True iff any restriction of the given type across the supplied contacts is
/// active as of the reference date. Local and global scopes both count.
pub fn has_active_restriction(contacts: &[Contact], type_code: &str, as_of: NaiveDate) -> bool {
    contacts
        .iter()
        .flat_map(|contact| of_type(contact, type_code))
        .any(|restriction| is_active(restriction, as_of))
}
