use std::collections::BTreeSet;

use super::domain::{Contact, ContactId, PrisonerId};

/// Raised when at least one requested visitor identifier has no corresponding
/// contact. The message preserves the caller's original ordered,
/// non-deduplicated list for diagnostics.
#[derive(Debug, thiserror::Error)]
#[error("could not find visitors [{requested}] as contacts of prisoner {prisoner_id}")]
pub struct VisitorNotFound {
    pub prisoner_id: String,
    pub requested: String,
}

impl VisitorNotFound {
    fn new(prisoner_id: &PrisonerId, visitor_ids: &[ContactId]) -> Self {
        let requested = visitor_ids
            .iter()
            .map(|id| id.0.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        Self {
            prisoner_id: prisoner_id.0.clone(),
            requested,
        }
    }
}

/// Select the contacts corresponding to the requested visitor identifiers.
///
/// Requested identifiers are deduplicated before matching, so repeats neither
/// multiply matches nor affect completeness. Fails closed when any distinct
/// identifier is unmatched.
pub fn match_visitors(
    prisoner_id: &PrisonerId,
    contacts: Vec<Contact>,
    visitor_ids: &[ContactId],
) -> Result<Vec<Contact>, VisitorNotFound> {
    let distinct: BTreeSet<&ContactId> = visitor_ids.iter().collect();

    let matched: Vec<Contact> = contacts
        .into_iter()
        .filter(|contact| distinct.contains(&contact.contact_id))
        .collect();

    let matched_ids: BTreeSet<&ContactId> =
        matched.iter().map(|contact| &contact.contact_id).collect();
    if matched_ids.len() < distinct.len() {
        return Err(VisitorNotFound::new(prisoner_id, visitor_ids));
    }

    Ok(matched)
}
