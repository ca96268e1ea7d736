use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier wrapper for prisoners (the offender number in the upstream
/// systems).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PrisonerId(pub String);

impl fmt::Display for PrisonerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier for a contact as a person, stable across prisoner
/// relationships.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ContactId(pub String);

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier for one specific prisoner-contact relationship. Restrictions
/// from the relationship upstream are keyed by this, not by the person.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RelationshipId(pub String);

/// Coarse relationship category used by the listing filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RelationshipCategory {
    Social,
    Official,
}

impl RelationshipCategory {
    pub const fn label(self) -> &'static str {
        match self {
            RelationshipCategory::Social => "social",
            RelationshipCategory::Official => "official",
        }
    }

    /// Accepts both the upstream single-letter codes and spelled-out names.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "S" | "s" | "social" | "SOCIAL" => Some(Self::Social),
            "O" | "o" | "official" | "OFFICIAL" => Some(Self::Official),
            _ => None,
        }
    }
}

/// Whether a restriction is bound to one prisoner-contact relationship or to
/// the contact as a person.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RestrictionScope {
    Local,
    Global,
}

/// A constraint on a contact's ability to visit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Restriction {
    pub restriction_id: String,
    pub type_code: String,
    pub type_description: Option<String>,
    pub start_date: NaiveDate,
    /// Inclusive. `None` means open-ended: the restriction never expires.
    pub expiry_date: Option<NaiveDate>,
    pub scope: RestrictionScope,
    pub comment: Option<String>,
}

impl Restriction {
    pub const BAN: &'static str = "BAN";
    pub const CLOSED: &'static str = "CLOSED";
}

/// A person linked to a prisoner, as normalized from either upstream.
///
/// `restrictions` holds the effective set for the prisoner the contact was
/// fetched for: local relationship restrictions and global person
/// restrictions merged together, each tagged with its [`RestrictionScope`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub contact_id: ContactId,
    pub relationship_id: RelationshipId,
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub last_name: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub category: RelationshipCategory,
    pub relationship_code: String,
    pub relationship_description: Option<String>,
    pub approved_visitor: bool,
    pub emergency_contact: bool,
    pub next_of_kin: bool,
    pub comment: Option<String>,
    pub restrictions: Vec<Restriction>,
    pub addresses: Vec<Address>,
}

/// Postal address attached to a contact, fetched lazily on demand.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub address_type: Option<String>,
    pub premise: Option<String>,
    pub street: Option<String>,
    pub locality: Option<String>,
    pub town: Option<String>,
    pub county: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    pub primary: bool,
    pub no_fixed_address: bool,
}

/// Inclusive date range with no time component. `from_date <= to_date` always
/// holds; equality is structural on both bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    from_date: NaiveDate,
    to_date: NaiveDate,
}

/// Raised when a caller supplies an inverted date range.
#[derive(Debug, thiserror::Error)]
#[error("invalid date range: {from_date} is after {to_date}")]
pub struct InvalidDateRange {
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
}

impl DateRange {
    pub fn new(from_date: NaiveDate, to_date: NaiveDate) -> Result<Self, InvalidDateRange> {
        if from_date > to_date {
            return Err(InvalidDateRange { from_date, to_date });
        }
        Ok(Self { from_date, to_date })
    }

    pub fn from_date(&self) -> NaiveDate {
        self.from_date
    }

    pub fn to_date(&self) -> NaiveDate {
        self.to_date
    }

    /// Push the start of the range forward. Callers must have established
    /// `from_date <= self.to_date`.
    pub(crate) fn with_from_date(self, from_date: NaiveDate) -> Self {
        debug_assert!(from_date <= self.to_date);
        Self { from_date, ..self }
    }
}
