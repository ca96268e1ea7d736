//! Restriction window resolution engine and contact listing pipeline.
//!
//! The directory adapter normalizes both upstream dialects into one contact
//! shape at the boundary; everything downstream (matcher, classifier, window
//! resolvers, filter pipeline) is upstream-agnostic.

pub mod directory;
pub mod domain;
pub mod filter;
pub mod matcher;
pub mod repository;
pub mod restrictions;
pub mod router;
pub mod service;
pub mod windows;

#[cfg(test)]
mod tests;

pub use directory::ContactDirectory;
pub use domain::{
    Address, Contact, ContactId, DateRange, InvalidDateRange, PrisonerId, RelationshipCategory,
    RelationshipId, Restriction, RestrictionScope,
};
pub use filter::{ContactListFilter, SocialContactFilter};
pub use matcher::VisitorNotFound;
pub use repository::{ContactBatch, ContactSource, RelationshipRestrictions, SourceError};
pub use router::registry_router;
pub use service::{RegistryService, ServiceError};
pub use windows::DateRangeNotFound;
