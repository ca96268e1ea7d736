use super::common::{contact, prisoner};
use crate::registry::domain::ContactId;
use crate::registry::matcher::match_visitors;

fn ids(raw: &[&str]) -> Vec<ContactId> {
    raw.iter().map(|id| ContactId(id.to_string())).collect()
}

#[test]
fn returns_only_requested_contacts() {
    let contacts = vec![
        contact("9147510", "Ann", "Peters"),
        contact("9147511", "Bob", "Quinn"),
        contact("9147512", "Cal", "Reyes"),
    ];

    let matched = match_visitors(&prisoner(), contacts, &ids(&["9147510", "9147512"]))
        .expect("all visitors known");

    let matched_ids: Vec<&str> = matched.iter().map(|c| c.contact_id.0.as_str()).collect();
    assert_eq!(matched_ids, vec!["9147510", "9147512"]);
}

#[test]
fn duplicate_identifiers_count_once() {
    let contacts = vec![contact("9147510", "Ann", "Peters")];

    let matched = match_visitors(
        &prisoner(),
        contacts,
        &ids(&["9147510", "9147510", "9147510"]),
    )
    .expect("duplicates collapse to one identifier");

    assert_eq!(matched.len(), 1);
}

#[test]
fn missing_visitor_fails_with_original_request_list() {
    let contacts = vec![contact("9147510", "Ann", "Peters")];

    let error = match_visitors(&prisoner(), contacts, &ids(&["9147510", "9147511"]))
        .expect_err("one visitor unknown");

    assert_eq!(error.prisoner_id, "A1234BC");
    assert_eq!(error.requested, "9147510, 9147511");
    assert!(error.to_string().contains("9147510, 9147511"));
}

#[test]
fn error_preserves_duplicates_and_order() {
    let error = match_visitors(
        &prisoner(),
        Vec::new(),
        &ids(&["9147511", "9147510", "9147511"]),
    )
    .expect_err("no contacts at all");

    assert_eq!(error.requested, "9147511, 9147510, 9147511");
}
