use std::collections::BTreeSet;

use super::domain::{Contact, DateRange, Restriction};
use super::restrictions::of_type;

/// Raised when BAN restrictions leave no satisfiable sub-window.
#[derive(Debug, thiserror::Error)]
pub enum DateRangeNotFound {
    #[error("BAN restriction has no expiry date, no date range possible")]
    OpenEndedBan,
    #[error("BAN expiry date at or after the requested end date, no date range possible")]
    BanSpansWindow,
}

/// Narrow the requested window against every BAN restriction across the
/// supplied contacts, or reject it.
///
/// Each rule is monotonic and failure is absolute, so restriction order does
/// not affect the result. An expiry exactly equal to the current start causes
/// neither failure nor narrowing.
pub fn resolve_banned_window(
    contacts: &[Contact],
    window: DateRange,
) -> Result<DateRange, DateRangeNotFound> {
    let mut result = window;

    for restriction in contacts
        .iter()
        .flat_map(|contact| of_type(contact, Restriction::BAN))
    {
        match restriction.expiry_date {
            None => return Err(DateRangeNotFound::OpenEndedBan),
            Some(expiry) if expiry >= result.to_date() => {
                return Err(DateRangeNotFound::BanSpansWindow)
            }
            Some(expiry) if expiry > result.from_date() => {
                result = result.with_from_date(expiry);
            }
            Some(_) => {}
        }
    }

    Ok(result)
}

/// Derive one date range per restriction whose type code is in the caller's
/// allow-list, within the query window.
///
/// A bounded restriction keeps its raw start date even when that precedes the
/// window; an open-ended restriction is clamped forward to the window start
/// and extends to the window end. No merging, deduplication, or sorting is
/// performed across the results. An open-ended restriction starting after the
/// window end yields no usable range and is skipped.
pub fn resolve_affected_windows(
    contacts: &[Contact],
    supported_codes: &BTreeSet<String>,
    query_window: &DateRange,
) -> Vec<DateRange> {
    contacts
        .iter()
        .flat_map(|contact| contact.restrictions.iter())
        .filter(|restriction| supported_codes.contains(&restriction.type_code))
        .filter_map(|restriction| match restriction.expiry_date {
            Some(expiry) => DateRange::new(restriction.start_date, expiry).ok(),
            None => {
                let from = restriction.start_date.max(query_window.from_date());
                DateRange::new(from, query_window.to_date()).ok()
            }
        })
        .collect()
}
